//! # http11_lite
//!
//! 依存なしの HTTP/1.1 サブセット向けインクリメンタルリクエストパーサー (Sans I/O)
//!
//! ## 特徴
//!
//! - **依存なし**: 標準ライブラリのみ使用
//! - **Sans I/O**: I/O を完全に分離した設計
//! - **分割耐性**: 任意の位置で分割されたバイト列 (CRLF の途中を含む) を正しく扱う
//! - **限定的な文法**: GET / HEAD と Connection / Content-Length: 0 のみを解釈し、
//!   それ以外はエラーとして分類する
//!
//! ## 使い方
//!
//! ```rust
//! use http11_lite::{ParseEvent, RequestParser, Response};
//!
//! let mut parser = RequestParser::new();
//!
//! // 受信データを feed...
//! for event in parser.feed_events(b"GET /index.html HTTP/1.1\r\n\r\n") {
//!     let response = match event {
//!         ParseEvent::Request(request) => Response::new(200, "OK")
//!             .body(request.path.into_bytes()),
//!         ParseEvent::Error(kind) => Response::from_error(kind),
//!     };
//!     let bytes = response.encode();
//!     // bytes を送信...
//!     # assert!(bytes.starts_with(b"HTTP/1.1 200 OK\r\n"));
//! }
//! ```

mod encoder;
mod error;
mod parser;
mod request;
mod response;

pub use encoder::encode_response;
pub use error::ErrorKind;
pub use parser::{ParseEvent, RequestParser};
pub use request::{ConnectionMode, Method, ParsedRequest};
pub use response::Response;
