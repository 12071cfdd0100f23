//! 他サーバーに存在するリソースの一覧
//!
//! ファイル形式は 1 行 1 エントリで `リソース TAB サーバー TAB ポート`。
//! 同じリソースが複数回現れた場合は最初のエントリを使う。

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// リソースの所在
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correlated {
    pub server: String,
    pub port: u16,
}

impl Correlated {
    /// リダイレクト先 URL
    pub fn location(&self, path: &str) -> String {
        format!("http://{}:{}{}", self.server, self.port, path)
    }
}

/// 読み込みエラー
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    /// 列数が 3 でない
    InvalidLine { line: usize },
    /// ポート番号が u16 でない
    InvalidPort { line: usize, value: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "I/O error: {}", e),
            LoadError::InvalidLine { line } => {
                write!(f, "line {}: expected <resource>\\t<server>\\t<port>", line)
            }
            LoadError::InvalidPort { line, value } => {
                write!(f, "line {}: invalid port: {:?}", line, value)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

#[derive(Debug, Default)]
pub struct CorrelatedResources {
    entries: HashMap<String, Correlated>,
}

impl CorrelatedResources {
    /// ファイルから読み込む
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let mut entries = HashMap::new();

        for (index, line) in text.lines().enumerate() {
            let line_number = index + 1;
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').collect();
            let [resource, server, port] = fields[..] else {
                return Err(LoadError::InvalidLine { line: line_number });
            };
            if resource.is_empty() || server.is_empty() {
                return Err(LoadError::InvalidLine { line: line_number });
            }
            let port = port.trim().parse().map_err(|_| LoadError::InvalidPort {
                line: line_number,
                value: port.to_string(),
            })?;

            entries
                .entry(resource.to_string())
                .or_insert_with(|| Correlated {
                    server: server.to_string(),
                    port,
                });
        }

        Ok(Self { entries })
    }

    pub fn lookup(&self, path: &str) -> Option<&Correlated> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
