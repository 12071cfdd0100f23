use std::fmt;

/// リクエストのパースエラー種別
///
/// どちらも現在のリクエストに対しては終端的だが、パーサー自体は
/// `reset_for_next_request()` 後に再利用できる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 不正なリクエスト (ヘッダーの重複、不正な値、リクエストラインなし、解釈できない行)
    MalformedRequest,
    /// 形式は正しいがサーバーが実装していない機能 (未対応メソッド等)
    UnsupportedFunctionality,
}

impl ErrorKind {
    /// 対応するステータスコード
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::MalformedRequest => 400,
            ErrorKind::UnsupportedFunctionality => 501,
        }
    }

    /// 対応するステータスフレーズ
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            ErrorKind::MalformedRequest => "Bad Request",
            ErrorKind::UnsupportedFunctionality => "Not Implemented",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::MalformedRequest => write!(f, "malformed request"),
            ErrorKind::UnsupportedFunctionality => write!(f, "unsupported functionality"),
        }
    }
}

impl std::error::Error for ErrorKind {}
