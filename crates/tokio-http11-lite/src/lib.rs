//! tokio_http11_lite - Tokio integration for http11_lite
//!
//! tokio と tokio-rustls を使用した非同期 HTTP/1.1 サーバーライブラリ。
//! ソケットから読み込んだバイト列をそのまま `RequestParser` に渡し、
//! パースできたリクエストごとにハンドラーを呼び出す。
//!
//! ## 特徴
//!
//! - **http11_lite ベース**: Sans I/O パーサーをベースにした設計
//! - **非同期 I/O**: tokio による完全非同期対応
//! - **TLS 対応**: tokio-rustls による HTTPS 対応
//! - **Keep-Alive**: パイプライン化されたリクエストを含む持続接続のサポート
//!
//! ## サーバー
//!
//! ```ignore
//! use tokio_http11_lite::{ParsedRequest, Response, Server};
//!
//! async fn handler(request: ParsedRequest) -> Response {
//!     Response::new(200, "OK")
//!         .header("Content-Type", "text/plain")
//!         .body(request.path.into_bytes())
//!         .omit_body(request.is_head())
//! }
//!
//! // HTTP
//! let server = Server::bind("0.0.0.0:8080").await?;
//! server.serve(handler).await?;
//!
//! // HTTPS
//! let server = Server::bind("0.0.0.0:8443").await?.tls(tls_config);
//! server.serve(handler).await?;
//! ```

mod connection;
pub mod error;
pub mod server;

pub use error::{Error, Result};
pub use server::{Handler, Server};

// http11_lite の型を re-export
pub use http11_lite::{ConnectionMode, ErrorKind, Method, ParsedRequest, Response};
