use std::fmt;

/// サポートするリクエストメソッド
///
/// GET と HEAD のみ。大文字小文字は区別する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Head,
}

impl Method {
    /// リクエストラインに現れるトークンからメソッドを取得
    pub fn from_token(token: &[u8]) -> Option<Self> {
        match token {
            b"GET" => Some(Method::Get),
            b"HEAD" => Some(Method::Head),
            _ => None,
        }
    }

    /// メソッド名
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection ヘッダーで指定される接続モード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionMode {
    /// 持続接続 (HTTP/1.1 のデフォルト)
    #[default]
    KeepAlive,
    /// レスポンス送信後に切断
    Close,
}

impl ConnectionMode {
    /// Connection ヘッダー値からモードを取得 (大文字小文字を区別する)
    pub fn from_value(value: &[u8]) -> Option<Self> {
        match value {
            b"keep-alive" => Some(ConnectionMode::KeepAlive),
            b"close" => Some(ConnectionMode::Close),
            _ => None,
        }
    }

    /// ヘッダー値としての表現
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionMode::KeepAlive => "keep-alive",
            ConnectionMode::Close => "close",
        }
    }
}

impl fmt::Display for ConnectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// パース済みリクエスト
///
/// ボディは持たない (Content-Length は 0 のみ受け付ける)。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    /// リクエストメソッド
    pub method: Method,
    /// 接続モード
    pub connection: ConnectionMode,
    /// リソースパス (`/` で始まる)
    pub path: String,
}

impl ParsedRequest {
    /// 新しいリクエストを作成
    pub fn new(method: Method, connection: ConnectionMode, path: &str) -> Self {
        Self {
            method,
            connection,
            path: path.to_string(),
        }
    }

    /// Keep-Alive 接続かどうかを判定
    pub fn is_keep_alive(&self) -> bool {
        self.connection == ConnectionMode::KeepAlive
    }

    /// HEAD リクエストかどうかを判定
    pub fn is_head(&self) -> bool {
        self.method == Method::Head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_from_token_is_case_sensitive() {
        assert_eq!(Method::from_token(b"GET"), Some(Method::Get));
        assert_eq!(Method::from_token(b"HEAD"), Some(Method::Head));
        assert_eq!(Method::from_token(b"get"), None);
        assert_eq!(Method::from_token(b"GeT"), None);
        assert_eq!(Method::from_token(b"POST"), None);
    }

    #[test]
    fn connection_mode_from_value() {
        assert_eq!(
            ConnectionMode::from_value(b"close"),
            Some(ConnectionMode::Close)
        );
        assert_eq!(
            ConnectionMode::from_value(b"keep-alive"),
            Some(ConnectionMode::KeepAlive)
        );
        assert_eq!(ConnectionMode::from_value(b"Close"), None);
        assert_eq!(ConnectionMode::default(), ConnectionMode::KeepAlive);
    }

    #[test]
    fn parsed_request_helpers() {
        let request = ParsedRequest::new(Method::Head, ConnectionMode::Close, "/x");
        assert!(request.is_head());
        assert!(!request.is_keep_alive());
        assert_eq!(request.method.to_string(), "HEAD");
        assert_eq!(request.connection.to_string(), "close");
    }
}
