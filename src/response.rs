use crate::error::ErrorKind;

/// HTTP レスポンス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// ステータスコード (200, 404, etc.)
    pub status_code: u16,
    /// ステータスフレーズ (OK, Not Found, etc.)
    pub reason_phrase: String,
    /// ヘッダー
    pub headers: Vec<(String, String)>,
    /// ボディ
    pub body: Vec<u8>,
    /// ボディを送信しないフラグ (HEAD レスポンス用)
    ///
    /// HEAD レスポンスではボディを送信しないが、GET と同じ Content-Length を返す。
    /// このフラグを true にすると、エンコーダーは body の長さを Content-Length として
    /// 書き出し、body 自体は書き出さない。
    pub omit_body: bool,
}

impl Response {
    /// 新しいレスポンスを作成
    pub fn new(status_code: u16, reason_phrase: &str) -> Self {
        Self {
            status_code,
            reason_phrase: reason_phrase.to_string(),
            headers: Vec::new(),
            body: Vec::new(),
            omit_body: false,
        }
    }

    /// パースエラーに対応するレスポンスを作成
    ///
    /// 400 Bad Request / 501 Not Implemented。どちらも接続を閉じる。
    pub fn from_error(kind: ErrorKind) -> Self {
        Response::new(kind.status_code(), kind.reason_phrase()).header("Connection", "close")
    }

    /// 302 Found
    pub fn found(location: &str) -> Self {
        Response::new(302, "Found").header("Location", location)
    }

    /// 404 Not Found
    pub fn not_found() -> Self {
        Response::new(404, "Not Found")
    }

    /// 500 Internal Server Error
    pub fn internal_server_error() -> Self {
        Response::new(500, "Internal Server Error").header("Connection", "close")
    }

    /// ボディを送信しない (ビルダーパターン)
    pub fn omit_body(mut self, omit: bool) -> Self {
        self.omit_body = omit;
        self
    }

    /// ヘッダーを追加 (ビルダーパターン)
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// ボディを設定 (ビルダーパターン)
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// ヘッダーを追加
    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_string(), value.to_string()));
    }

    /// ヘッダーを取得 (大文字小文字を区別しない)
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// ヘッダーが存在するか確認
    pub fn has_header(&self, name: &str) -> bool {
        self.headers
            .iter()
            .any(|(n, _)| n.eq_ignore_ascii_case(name))
    }

    /// レスポンス送信後に接続を閉じるべきか
    pub fn closes_connection(&self) -> bool {
        self.get_header("Connection")
            .is_some_and(|v| v.eq_ignore_ascii_case("close"))
    }
}
