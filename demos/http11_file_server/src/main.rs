//! 静的ファイルサーバーの例 (tokio_http11_lite)
//!
//! ディレクトリ配下のファイルを GET / HEAD で返す。
//! 手元にないファイルでも対応表に載っていれば、そのサーバーへ 302 でリダイレクトする。
//!
//! 使い方:
//!   # HTTP サーバー (ポート 8080)
//!   cargo run -p http11_file_server -- ./public resources.tsv
//!
//!   # HTTPS サーバー (ポート 8443)
//!   cargo run -p http11_file_server -- ./public resources.tsv --tls --cert cert.pem --key key.pem
//!
//! 対応表は 1 行 1 エントリで `リソース TAB サーバー TAB ポート`:
//!   /big.iso	mirror.example.com	8080
//!
//! ログは RUST_LOG で制御する (デフォルトは info)。

mod files;
mod resources;

use std::sync::Arc;
use std::time::Duration;

use http11_lite::{ParsedRequest, Response};
use rustls::ServerConfig;
use rustls::pki_types::pem::PemObject;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use tokio_http11_lite::Server;
use tracing_subscriber::EnvFilter;

use crate::files::{FileRoot, Lookup};
use crate::resources::CorrelatedResources;

struct ServerOptions {
    dir: String,
    correlated_file: String,
    port: u16,
    tls: bool,
    cert_path: Option<String>,
    key_path: Option<String>,
    keep_alive_timeout: u64,
}

/// リクエストごとに共有する状態
struct App {
    root: FileRoot,
    correlated: CorrelatedResources,
}

impl App {
    async fn respond(&self, request: ParsedRequest) -> Response {
        match self.root.resolve(&request.path).await {
            Lookup::Found(path) => match files::read_file(&path).await {
                Ok(body) => Response::new(200, "OK")
                    .header("Content-Type", "application/octet-stream")
                    .body(body)
                    .omit_body(request.is_head()),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to read file");
                    Response::internal_server_error()
                }
            },
            Lookup::Missing => match self.correlated.lookup(&request.path) {
                Some(entry) => Response::found(&entry.location(&request.path)),
                None => Response::not_found(),
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = parse_args()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let root = FileRoot::open(&options.dir)
        .map_err(|e| format!("cannot serve {}: {}", options.dir, e))?;
    let correlated = CorrelatedResources::load(&options.correlated_file)
        .map_err(|e| format!("{}: {}", options.correlated_file, e))?;
    tracing::info!(
        root = %root.path().display(),
        correlated = correlated.len(),
        "loaded"
    );

    let addr = format!("0.0.0.0:{}", options.port);
    let mut server = Server::bind(&addr)
        .await?
        .keep_alive_timeout(Duration::from_secs(options.keep_alive_timeout));

    if options.tls {
        let cert_path = options
            .cert_path
            .as_ref()
            .ok_or("--cert is required for TLS")?;
        let key_path = options
            .key_path
            .as_ref()
            .ok_or("--key is required for TLS")?;

        let config = load_tls_config(cert_path, key_path)?;
        server = server.tls(Arc::new(config));
        println!("HTTPS server listening on https://{}", addr);
    } else {
        println!("HTTP server listening on http://{}", addr);
    }

    let app = Arc::new(App { root, correlated });
    server
        .serve(move |request: ParsedRequest| {
            let app = app.clone();
            async move { app.respond(request).await }
        })
        .await?;

    Ok(())
}

fn parse_args() -> Result<ServerOptions, Box<dyn std::error::Error>> {
    let mut args = noargs::raw_args();
    args.metadata_mut().app_name = "http11_file_server";

    noargs::HELP_FLAG.take_help(&mut args);

    let version_flag: bool = noargs::flag("version")
        .short('V')
        .doc("Show version")
        .take(&mut args)
        .is_present();
    if version_flag {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    let tls: bool = noargs::flag("tls")
        .doc("Enable HTTPS")
        .take(&mut args)
        .is_present();

    // デフォルトは TLS の有無で変わる
    let default_port = if tls { "8443" } else { "8080" };
    let port: u16 = noargs::opt("port")
        .short('p')
        .doc("Port to listen on (default: 8080, or 8443 with --tls)")
        .default(default_port)
        .take(&mut args)
        .then(|o| o.value().parse())
        .map_err(|e| format!("{:?}", e))?;

    let cert_path: Option<String> = noargs::opt("cert")
        .doc("Path to certificate file (PEM)")
        .take(&mut args)
        .present_and_then(|o| Ok::<_, &str>(o.value().to_string()))
        .map_err(|e| format!("{:?}", e))?;

    let key_path: Option<String> = noargs::opt("key")
        .doc("Path to private key file (PEM)")
        .take(&mut args)
        .present_and_then(|o| Ok::<_, &str>(o.value().to_string()))
        .map_err(|e| format!("{:?}", e))?;

    let keep_alive_timeout: u64 = noargs::opt("keep-alive-timeout")
        .doc("Idle connection timeout in seconds")
        .default("60")
        .take(&mut args)
        .then(|o| o.value().parse())
        .map_err(|e| format!("{:?}", e))?;

    let dir: String = noargs::arg("<DIR>")
        .doc("Directory to serve")
        .take(&mut args)
        .then(|a| Ok::<_, &str>(a.value().to_string()))
        .map_err(|e| format!("{:?}", e))?;

    let correlated_file: String = noargs::arg("<CORRELATED_FILE>")
        .doc("TAB-separated list of resources held by other servers")
        .take(&mut args)
        .then(|a| Ok::<_, &str>(a.value().to_string()))
        .map_err(|e| format!("{:?}", e))?;

    if let Some(help) = args.finish().map_err(|e| format!("{:?}", e))? {
        print!("{}", help);
        std::process::exit(0);
    }

    Ok(ServerOptions {
        dir,
        correlated_file,
        port,
        tls,
        cert_path,
        key_path,
        keep_alive_timeout,
    })
}

fn load_tls_config(
    cert_path: &str,
    key_path: &str,
) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let certs: Vec<CertificateDer<'static>> =
        CertificateDer::pem_file_iter(cert_path)?.collect::<Result<Vec<_>, _>>()?;

    if certs.is_empty() {
        return Err("No certificates found in cert file".into());
    }

    let key = PrivateKeyDer::from_pem_file(key_path)?;

    let config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)?;

    Ok(config)
}
