use crate::error::ErrorKind;
use crate::request::ParsedRequest;

/// `RequestParser::feed_events()` が返すイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEvent {
    /// リクエストのパースが完了した
    Request(ParsedRequest),
    /// リクエストのパースに失敗した
    Error(ErrorKind),
}
