//! 行の構文チェック
//!
//! 正規表現は使わず、バイト列に対する構造チェックで文法を表現する。
//! 文字クラスと大文字小文字の区別は厳密に守ること。

use crate::request::{ConnectionMode, Method};

/// サポートする唯一の HTTP バージョン
const HTTP_VERSION: &[u8] = b"HTTP/1.1";

/// リクエストライン形式の行
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RequestLine<'a> {
    /// GET / HEAD のいずれか。それ以外のトークンは `None`
    pub method: Option<Method>,
    pub path: &'a [u8],
}

/// CRLF の位置を探す
pub(crate) fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n")
}

/// `TOKEN SP PATH SP HTTP/1.1` 形式の行をパース
///
/// TOKEN は空白を含まない 1 文字以上のバイト列。
/// メソッドとして認識できるかどうかは `RequestLine::method` で判定する。
pub(crate) fn parse_request_line(line: &[u8]) -> Option<RequestLine<'_>> {
    let sp = line.iter().position(|&b| b == b' ')?;
    let (token, rest) = (&line[..sp], &line[sp + 1..]);
    if token.is_empty() || token.iter().any(|b| is_whitespace(*b)) {
        return None;
    }

    let path = rest.strip_suffix(HTTP_VERSION)?.strip_suffix(b" ")?;
    if !is_valid_path(path) {
        return None;
    }

    Some(RequestLine {
        method: Method::from_token(token),
        path,
    })
}

/// パスの文法: `/` で始まり、英数字と `.` `-` `/` のみ
pub(crate) fn is_valid_path(path: &[u8]) -> bool {
    match path.split_first() {
        Some((b'/', rest)) => rest
            .iter()
            .all(|&b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-' | b'/')),
        _ => false,
    }
}

/// Connection ヘッダーをパース
///
/// 名前は `Connection` または `connection` のみ。値は前後の OWS を除いて
/// `close` か `keep-alive` (大文字小文字を区別する)。
pub(crate) fn parse_connection_header(line: &[u8]) -> Option<ConnectionMode> {
    let value = header_value(line, b"Connection").or_else(|| header_value(line, b"connection"))?;
    ConnectionMode::from_value(trim_ows(value))
}

/// 値が 1 個以上の `0` だけからなる Content-Length ヘッダーか
pub(crate) fn is_zero_content_length(line: &[u8]) -> bool {
    match header_value(line, b"Content-Length") {
        Some(value) => {
            let value = trim_ows(value);
            !value.is_empty() && value.iter().all(|&b| b == b'0')
        }
        None => false,
    }
}

/// 値の形に関係なく Content-Length ヘッダーか
pub(crate) fn is_content_length_header(line: &[u8]) -> bool {
    header_value(line, b"Content-Length").is_some()
}

/// 一般的なヘッダー行か: `token OWS ":" OWS value OWS`
///
/// 値には CR / LF 以外の任意のバイトを許可する。
pub(crate) fn is_header_line(line: &[u8]) -> bool {
    let Some(colon) = line.iter().position(|&b| b == b':') else {
        return false;
    };
    let name = trim_ows_end(&line[..colon]);
    if name.is_empty() || !name.iter().all(|&b| is_token_char(b)) {
        return false;
    }
    line[colon + 1..].iter().all(|&b| b != b'\r' && b != b'\n')
}

/// 名前 (大文字小文字を区別) の直後が `:` なら、その後ろを返す
fn header_value<'a>(line: &'a [u8], name: &[u8]) -> Option<&'a [u8]> {
    line.strip_prefix(name)?.strip_prefix(b":")
}

/// トークン文字か確認 (RFC 9110 Section 5.6.2)
fn is_token_char(b: u8) -> bool {
    matches!(
        b,
        b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' |
        b'0'..=b'9' | b'A'..=b'Z' | b'^' | b'_' | b'`' | b'a'..=b'z' | b'|' | b'~'
    )
}

fn is_ows(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0b | 0x0c)
}

fn trim_ows(value: &[u8]) -> &[u8] {
    let start = value.iter().position(|&b| !is_ows(b)).unwrap_or(value.len());
    trim_ows_end(&value[start..])
}

fn trim_ows_end(value: &[u8]) -> &[u8] {
    let end = value.iter().rposition(|&b| !is_ows(b)).map_or(0, |i| i + 1);
    &value[..end]
}
