//! HTTP/1.1 リクエストパーサーモジュール
//!
//! ソケットの読み込みループから届く、任意に分割されたバイト列を受け取り、
//! CRLF で終わる行が揃うたびに分類する。
//!
//! ## 使い方
//!
//! ### イベント API (推奨)
//!
//! ```rust
//! use http11_lite::{ConnectionMode, ErrorKind, Method, ParseEvent, RequestParser};
//!
//! let mut parser = RequestParser::new();
//!
//! // 1 回の feed にパイプライン化された 2 つのリクエスト
//! let events = parser.feed_events(b"GET /a HTTP/1.1\r\n\r\nHEAD /b HTTP/1.1\r\nConnection: close\r\n\r\n");
//! assert_eq!(events.len(), 2);
//! let ParseEvent::Request(second) = &events[1] else { panic!() };
//! assert_eq!(second.method, Method::Head);
//! assert_eq!(second.connection, ConnectionMode::Close);
//!
//! // 分割されたデータ
//! assert!(parser.feed_events(b"GeT / HT").is_empty());
//! let events = parser.feed_events(b"TP/1.1\r\n");
//! assert_eq!(events, vec![ParseEvent::Error(ErrorKind::UnsupportedFunctionality)]);
//! ```
//!
//! ### 1 行ずつの API
//!
//! ```rust
//! use http11_lite::RequestParser;
//!
//! let mut parser = RequestParser::new();
//! parser.feed(b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n");
//! while parser.line_just_parsed() {
//!     if parser.has_error() || parser.is_request_complete() {
//!         break;
//!     }
//!     parser.feed(b"");
//! }
//! assert_eq!(parser.take_completed_request().unwrap().path, "/");
//! ```

mod event;
mod line;
mod request;

pub use event::ParseEvent;
pub use request::RequestParser;
