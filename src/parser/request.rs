//! HTTP リクエストパーサー

use crate::error::ErrorKind;
use crate::request::{ConnectionMode, Method, ParsedRequest};

use super::event::ParseEvent;
use super::line::{
    RequestLine, find_crlf, is_content_length_header, is_header_line, is_zero_content_length,
    parse_connection_header, parse_request_line,
};

/// 行終端 (CRLF) の長さ
const CRLF_LEN: usize = 2;

/// HTTP リクエストパーサー (Sans I/O)
///
/// 1 接続につき 1 インスタンスを使い、リクエストごとに
/// `reset_for_next_request()` で状態をリセットして使い回す。
///
/// `feed()` は 1 回の呼び出しで最大 1 行しか処理しない。
/// バッファに残っている行を処理するには、`line_just_parsed()` が true の間
/// 空のチャンクで `feed()` を呼び続ける。
/// この手順をまとめたものが `feed_events()` である。
///
/// ```rust
/// use http11_lite::{ConnectionMode, Method, RequestParser};
///
/// let mut parser = RequestParser::new();
/// parser.feed(b"GET /index.html HTTP/1.1\r\n\r\n");
/// while parser.line_just_parsed() && !parser.is_request_complete() {
///     parser.feed(b"");
/// }
///
/// let request = parser.take_completed_request().unwrap();
/// assert_eq!(request.method, Method::Get);
/// assert_eq!(request.connection, ConnectionMode::KeepAlive);
/// assert_eq!(request.path, "/index.html");
/// parser.reset_for_next_request();
/// ```
#[derive(Debug, Default)]
pub struct RequestParser {
    /// feed されたがまだ走査し終えていないバイト列
    buf: Vec<u8>,
    /// 次に CRLF を探し始める位置
    cursor: usize,
    /// 複数の feed にまたがって組み立て中の行
    current_line: Vec<u8>,
    line_parsed: bool,
    request_complete: bool,
    error: Option<ErrorKind>,
    method: Option<Method>,
    connection: ConnectionMode,
    path: String,
    seen_connection: bool,
    seen_content_length: bool,
}

impl RequestParser {
    /// 新しいパーサーを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// チャンクを追加し、完成した行があれば 1 行だけ処理する
    pub fn feed(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);

        let unscanned = &self.buf[self.cursor..];
        let Some(pos) = find_crlf(unscanned) else {
            self.line_parsed = false;
            // 末尾の CR は次のチャンクの LF と組になる可能性があるので残しておく
            if unscanned.last() != Some(&b'\r') {
                self.current_line.extend_from_slice(unscanned);
                self.buf.clear();
                self.cursor = 0;
            }
            return;
        };

        let start = self.cursor;
        self.cursor = start + pos + CRLF_LEN;
        self.line_parsed = true;

        if self.current_line.is_empty() && pos == 0 {
            self.finish_head();
        } else {
            self.current_line
                .extend_from_slice(&self.buf[start..start + pos]);
            let mut line = std::mem::take(&mut self.current_line);
            self.classify(&line);
            line.clear();
            self.current_line = line;
        }

        if self.cursor == self.buf.len() {
            self.buf.clear();
            self.cursor = 0;
        }
    }

    /// チャンクを追加し、処理できる行をすべて処理してイベントとして返す
    ///
    /// 完成したリクエストやエラーを検出するたびに `reset_for_next_request()` を
    /// 行うため、パイプライン化されたリクエストも順番に取り出せる。
    pub fn feed_events(&mut self, chunk: &[u8]) -> Vec<ParseEvent> {
        let mut events = Vec::new();
        self.feed(chunk);

        loop {
            if let Some(kind) = self.error {
                events.push(ParseEvent::Error(kind));
                self.reset_for_next_request();
            } else if let Some(request) = self.take_completed_request() {
                events.push(ParseEvent::Request(request));
                self.reset_for_next_request();
            } else if !self.line_parsed {
                break;
            }
            self.feed(&[]);
        }

        events
    }

    /// 直前の `feed()` で 1 行処理したかどうか
    pub fn line_just_parsed(&self) -> bool {
        self.line_parsed
    }

    /// 現在のリクエストでエラーが発生したかどうか
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// 現在のリクエストで最初に発生したエラー
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error
    }

    /// ヘッダー終端の空行まで到達したかどうか
    pub fn is_request_complete(&self) -> bool {
        self.request_complete
    }

    /// 完成したリクエストを取得
    ///
    /// エラーなしで空行まで到達した場合のみ `Some` を返す。
    /// 状態はクリアしないので、続けて `reset_for_next_request()` を呼ぶこと。
    pub fn take_completed_request(&self) -> Option<ParsedRequest> {
        if !self.request_complete || self.error.is_some() {
            return None;
        }
        self.method
            .map(|method| ParsedRequest::new(method, self.connection, &self.path))
    }

    /// 未処理のバイト数 (バッファの未走査部分と組み立て中の行)
    pub fn pending_len(&self) -> usize {
        self.buf.len() - self.cursor + self.current_line.len()
    }

    /// 次のリクエストのためにリクエスト単位の状態をリセット
    ///
    /// バッファ済みのバイト列は残るので、パイプライン化された次のリクエストは
    /// そのまま続けてパースできる。
    pub fn reset_for_next_request(&mut self) {
        self.line_parsed = false;
        self.request_complete = false;
        self.error = None;
        self.method = None;
        self.connection = ConnectionMode::KeepAlive;
        self.path.clear();
        self.seen_connection = false;
        self.seen_content_length = false;
    }

    /// バッファも含めてすべてリセット (新しい接続用)
    pub fn reset_connection(&mut self) {
        self.reset_for_next_request();
        self.buf.clear();
        self.cursor = 0;
        self.current_line.clear();
    }

    /// ヘッダー終端の空行を処理
    fn finish_head(&mut self) {
        if self.method.is_some() {
            self.request_complete = true;
        } else {
            self.set_error(ErrorKind::MalformedRequest);
        }
    }

    /// 1 行を分類して状態を更新
    ///
    /// 判定順序に意味がある (未対応リクエストラインの形はサポートする
    /// リクエストラインの形を含む) ので、並べ替えないこと。
    fn classify(&mut self, line: &[u8]) {
        let request_line = parse_request_line(line);

        if let Some(RequestLine {
            method: Some(method),
            path,
        }) = request_line
        {
            if self.method.is_some() {
                self.set_error(ErrorKind::MalformedRequest);
            } else {
                self.method = Some(method);
                self.path = String::from_utf8_lossy(path).into_owned();
            }
            return;
        }

        let has_method = self.method.is_some();

        if has_method {
            if let Some(mode) = parse_connection_header(line) {
                if self.seen_connection {
                    self.set_error(ErrorKind::MalformedRequest);
                } else {
                    self.connection = mode;
                    self.seen_connection = true;
                }
                return;
            }
        }

        if has_method && is_zero_content_length(line) {
            if self.seen_content_length {
                self.set_error(ErrorKind::MalformedRequest);
            } else {
                self.seen_content_length = true;
            }
            return;
        }

        if request_line.is_some() {
            self.set_error(ErrorKind::UnsupportedFunctionality);
        } else if is_content_length_header(line) {
            // Content-Length は 0 以外受け付けない
            self.set_error(ErrorKind::MalformedRequest);
        } else if !is_header_line(line) {
            self.set_error(ErrorKind::MalformedRequest);
        }
    }

    /// エラーを記録 (最初のエラーを保持する)
    fn set_error(&mut self, kind: ErrorKind) {
        if self.error.is_none() {
            self.error = Some(kind);
        }
    }
}
