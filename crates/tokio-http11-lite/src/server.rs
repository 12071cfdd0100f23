//! HTTP/HTTPS サーバー
//!
//! tokio と tokio-rustls を使用した非同期 HTTP サーバー。
//!
//! ## 使い方
//!
//! ```ignore
//! use tokio_http11_lite::Server;
//!
//! // HTTP サーバー
//! let server = Server::bind("0.0.0.0:8080").await?;
//! server.serve(handler).await?;
//!
//! // HTTPS サーバー
//! let server = Server::bind("0.0.0.0:8443").await?
//!     .tls(tls_config);
//! server.serve(handler).await?;
//! ```

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use http11_lite::{ParsedRequest, Response};
use rustls::ServerConfig;
use tokio::net::{TcpListener, TcpStream};
use tokio_rustls::TlsAcceptor;

use crate::connection::{ConnectionConfig, handle_connection};
use crate::error::{Error, Result};

/// HTTP リクエストハンドラー
pub trait Handler: Send + Sync + 'static {
    /// リクエストを処理してレスポンスを返す
    fn handle(&self, request: ParsedRequest) -> impl Future<Output = Response> + Send;
}

/// 関数からハンドラーを作成
impl<F, Fut> Handler for F
where
    F: Fn(ParsedRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send,
{
    fn handle(&self, request: ParsedRequest) -> impl Future<Output = Response> + Send {
        (self)(request)
    }
}

/// HTTP サーバー
///
/// HTTP と HTTPS の両方に対応。HTTPS を使用する場合は `tls()` で TLS 設定を指定する。
pub struct Server {
    listener: TcpListener,
    keep_alive_timeout: Duration,
    max_requests_per_connection: u32,
    read_buffer_size: usize,
    write_buffer_size: usize,
    max_line_size: usize,
    tls_acceptor: Option<TlsAcceptor>,
}

impl Server {
    /// 指定アドレスにバインド
    pub async fn bind(addr: &str) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            keep_alive_timeout: Duration::from_secs(60),
            max_requests_per_connection: 1000,
            read_buffer_size: 8192,
            write_buffer_size: 65536,
            max_line_size: 8 * 1024,
            tls_acceptor: None,
        })
    }

    /// TLS 設定を指定 (HTTPS 用)
    pub fn tls(mut self, config: Arc<ServerConfig>) -> Self {
        self.tls_acceptor = Some(TlsAcceptor::from(config));
        self
    }

    /// Keep-Alive タイムアウトを設定
    ///
    /// TLS ハンドシェイクのタイムアウトにも使う。
    pub fn keep_alive_timeout(mut self, timeout: Duration) -> Self {
        self.keep_alive_timeout = timeout;
        self
    }

    /// 1 接続あたりの最大リクエスト数を設定
    pub fn max_requests_per_connection(mut self, max: u32) -> Self {
        self.max_requests_per_connection = max;
        self
    }

    /// 読み取りバッファサイズを設定
    pub fn read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size;
        self
    }

    /// 書き込みバッファサイズを設定
    pub fn write_buffer_size(mut self, size: usize) -> Self {
        self.write_buffer_size = size;
        self
    }

    /// 終端 (CRLF) のない行の最大長を設定
    ///
    /// 超えた場合は 400 を返して接続を閉じる。
    pub fn max_line_size(mut self, size: usize) -> Self {
        self.max_line_size = size;
        self
    }

    /// ローカルアドレスを取得
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// TLS が有効かどうかを返す
    pub fn is_tls(&self) -> bool {
        self.tls_acceptor.is_some()
    }

    fn connection_config(&self) -> Arc<ConnectionConfig> {
        Arc::new(ConnectionConfig {
            keep_alive_timeout: self.keep_alive_timeout,
            max_requests_per_connection: self.max_requests_per_connection,
            read_buffer_size: self.read_buffer_size,
            write_buffer_size: self.write_buffer_size,
            max_line_size: self.max_line_size,
        })
    }

    /// サーバーを起動
    pub async fn serve<H: Handler>(self, handler: H) -> Result<()> {
        let config = self.connection_config();
        let handler = Arc::new(handler);

        loop {
            let (stream, peer_addr) = self.listener.accept().await?;
            let config = config.clone();
            let handler = handler.clone();
            let tls_acceptor = self.tls_acceptor.clone();

            tokio::spawn(async move {
                tracing::debug!(%peer_addr, tls = tls_acceptor.is_some(), "connection accepted");
                if let Err(e) = accept(stream, peer_addr, tls_acceptor, config, handler).await {
                    tracing::warn!(%peer_addr, error = %e, "connection error");
                }
            });
        }
    }

    /// 単一の接続を処理 (テスト用)
    pub async fn handle_one<H: Handler>(self, handler: H) -> Result<()> {
        let (stream, peer_addr) = self.listener.accept().await?;
        let config = self.connection_config();
        accept(stream, peer_addr, self.tls_acceptor, config, Arc::new(handler)).await
    }
}

/// 必要なら TLS ハンドシェイクを行ってから接続を処理
async fn accept<H: Handler>(
    stream: TcpStream,
    peer_addr: SocketAddr,
    tls_acceptor: Option<TlsAcceptor>,
    config: Arc<ConnectionConfig>,
    handler: Arc<H>,
) -> Result<()> {
    match tls_acceptor {
        Some(acceptor) => {
            let tls_stream = tokio::time::timeout(config.keep_alive_timeout, acceptor.accept(stream))
                .await?
                .map_err(|e| Error::Tls(e.to_string()))?;
            handle_connection(tls_stream, peer_addr, config, handler).await
        }
        None => handle_connection(stream, peer_addr, config, handler).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    async fn echo_path(request: ParsedRequest) -> Response {
        Response::new(200, "OK")
            .body(request.path.clone().into_bytes())
            .omit_body(request.is_head())
    }

    async fn exchange(server: Server, writes: &[&[u8]]) -> (Vec<u8>, Result<()>) {
        let addr = server.local_addr().unwrap();
        let task = tokio::spawn(server.handle_one(echo_path));

        let mut client = TcpStream::connect(addr).await.unwrap();
        for chunk in writes {
            client.write_all(chunk).await.unwrap();
            client.flush().await.unwrap();
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        let mut received = Vec::new();
        client.read_to_end(&mut received).await.unwrap();
        (received, task.await.unwrap())
    }

    #[tokio::test]
    async fn test_server_bind() {
        let server = Server::bind("127.0.0.1:0").await.unwrap();
        let addr = server.local_addr().unwrap();
        assert!(addr.port() > 0);
        assert!(!server.is_tls());
    }

    #[tokio::test]
    async fn test_pipelined_requests_split_across_writes() {
        let server = Server::bind("127.0.0.1:0").await.unwrap();
        let (received, result) = exchange(
            server,
            &[
                b"GET /a HTTP/1.1\r\n\r\nHEAD /b HT",
                b"TP/1.1\r\nConnection: close\r",
                b"\n\r\n",
            ],
        )
        .await;

        assert!(result.is_ok());
        assert_eq!(
            received,
            b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\n/a\
              HTTP/1.1 200 OK\r\nConnection: close\r\nContent-Length: 2\r\n\r\n"
        );
    }

    #[tokio::test]
    async fn test_unsupported_method_closes_connection() {
        let server = Server::bind("127.0.0.1:0").await.unwrap();
        let (received, result) = exchange(server, &[b"GeT / HTTP/1.1\r\n\r\n"]).await;

        assert!(result.is_ok());
        assert_eq!(
            received,
            b"HTTP/1.1 501 Not Implemented\r\nConnection: close\r\nContent-Length: 0\r\n\r\n"
        );
    }

    #[tokio::test]
    async fn test_max_requests_per_connection() {
        let server = Server::bind("127.0.0.1:0")
            .await
            .unwrap()
            .max_requests_per_connection(1);
        let (received, result) =
            exchange(server, &[b"GET /only HTTP/1.1\r\n\r\nGET /never HTTP/1.1\r\n\r\n"]).await;

        assert!(result.is_ok());
        assert_eq!(
            received,
            b"HTTP/1.1 200 OK\r\nConnection: close\r\nContent-Length: 5\r\n\r\n/only"
        );
    }

    #[tokio::test]
    async fn test_line_too_long() {
        let server = Server::bind("127.0.0.1:0")
            .await
            .unwrap()
            .max_line_size(16);
        let (received, result) = exchange(server, &[b"GET /aaaaaaaaaaaaaaaaaaaaaaaa"]).await;

        assert!(matches!(
            result,
            Err(Error::LineTooLong {
                size: 29,
                limit: 16
            })
        ));
        assert!(received.starts_with(b"HTTP/1.1 400 Bad Request\r\n"));
    }
}
