//! 1 接続分のリクエスト処理

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use http11_lite::{ErrorKind, ParseEvent, RequestParser, Response};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufWriter};

use crate::error::{Error, Result};
use crate::server::Handler;

pub(crate) struct ConnectionConfig {
    pub keep_alive_timeout: Duration,
    pub max_requests_per_connection: u32,
    pub read_buffer_size: usize,
    pub write_buffer_size: usize,
    pub max_line_size: usize,
}

/// 接続を処理 (平文 / TLS 共通)
///
/// エラーイベントにはエラーレスポンスを返して接続を閉じる。
/// 拒否したリクエストの残りのヘッダー行と次のリクエストを区別できないため。
pub(crate) async fn handle_connection<S, H>(
    stream: S,
    peer_addr: SocketAddr,
    config: Arc<ConnectionConfig>,
    handler: Arc<H>,
) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
    H: Handler,
{
    let (mut reader, writer) = tokio::io::split(stream);
    let mut writer = BufWriter::with_capacity(config.write_buffer_size, writer);

    let mut parser = RequestParser::new();
    let mut buf = vec![0u8; config.read_buffer_size];
    let mut request_count = 0u32;

    loop {
        let read_result =
            tokio::time::timeout(config.keep_alive_timeout, reader.read(&mut buf)).await;

        let n = match read_result {
            Ok(Ok(n)) => n,
            Ok(Err(e)) => return Err(Error::Io(e)),
            Err(_) => {
                tracing::debug!(%peer_addr, "keep-alive timeout");
                return Ok(());
            }
        };

        if n == 0 {
            tracing::debug!(%peer_addr, "connection closed by peer");
            return Ok(());
        }

        for event in parser.feed_events(&buf[..n]) {
            let (response, keep_alive) = match event {
                ParseEvent::Request(request) => {
                    request_count += 1;
                    let keep_alive = request.is_keep_alive()
                        && request_count < config.max_requests_per_connection;

                    tracing::info!(
                        %peer_addr,
                        method = %request.method,
                        path = %request.path,
                        "request"
                    );

                    let mut response = handler.handle(request).await;

                    // Connection ヘッダーを設定
                    if !keep_alive && !response.has_header("Connection") {
                        response.add_header("Connection", "close");
                    }
                    let keep_alive = keep_alive && !response.closes_connection();
                    (response, keep_alive)
                }
                ParseEvent::Error(kind) => {
                    tracing::warn!(%peer_addr, error = %kind, "rejecting request");
                    (Response::from_error(kind), false)
                }
            };

            tracing::debug!(%peer_addr, status = response.status_code, keep_alive, "response");
            writer.write_all(&response.encode()).await?;
            writer.flush().await?;

            if !keep_alive {
                return Ok(());
            }
        }

        // 終端のない行の長さを制限
        let pending = parser.pending_len();
        if pending > config.max_line_size {
            let response = Response::from_error(ErrorKind::MalformedRequest);
            writer.write_all(&response.encode()).await?;
            writer.flush().await?;
            return Err(Error::LineTooLong {
                size: pending,
                limit: config.max_line_size,
            });
        }
    }
}
