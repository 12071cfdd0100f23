//! 公開ディレクトリ配下のファイル解決

use std::io;
use std::path::{Path, PathBuf};

/// パス解決の結果
#[derive(Debug, PartialEq, Eq)]
pub enum Lookup {
    /// ルート配下の読み込み可能な通常ファイル
    Found(PathBuf),
    Missing,
}

/// 公開ディレクトリ
#[derive(Debug, Clone)]
pub struct FileRoot {
    root: PathBuf,
}

impl FileRoot {
    /// ディレクトリを正規化して開く
    pub fn open(dir: impl AsRef<Path>) -> io::Result<Self> {
        let root = std::fs::canonicalize(dir)?;
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("not a directory: {}", root.display()),
            ));
        }
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// リクエストパスをファイルに解決する
    ///
    /// `..` でルートの外に出るパス、ディレクトリ、開けないファイルは `Missing`。
    pub async fn resolve(&self, request_path: &str) -> Lookup {
        let candidate = self.root.join(request_path.trim_start_matches('/'));
        let Ok(resolved) = tokio::fs::canonicalize(&candidate).await else {
            return Lookup::Missing;
        };
        if !resolved.starts_with(&self.root) {
            return Lookup::Missing;
        }
        match tokio::fs::metadata(&resolved).await {
            Ok(metadata) if metadata.is_file() => {}
            _ => return Lookup::Missing,
        }
        if tokio::fs::File::open(&resolved).await.is_err() {
            return Lookup::Missing;
        }
        Lookup::Found(resolved)
    }
}

pub async fn read_file(path: &Path) -> io::Result<Vec<u8>> {
    tokio::fs::read(path).await
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TempDir(PathBuf);

    impl TempDir {
        fn new(name: &str) -> Self {
            let dir = std::env::temp_dir().join(format!(
                "http11_file_server_{}_{}",
                name,
                std::process::id()
            ));
            let _ = std::fs::remove_dir_all(&dir);
            std::fs::create_dir_all(dir.join("public/sub")).unwrap();
            std::fs::write(dir.join("public/a.txt"), b"hello").unwrap();
            std::fs::write(dir.join("public/sub/b.bin"), b"\x00\x01").unwrap();
            std::fs::write(dir.join("secret.txt"), b"secret").unwrap();
            Self(dir)
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    #[tokio::test]
    async fn resolves_files_under_root() {
        let tmp = TempDir::new("found");
        let root = FileRoot::open(tmp.0.join("public")).unwrap();

        let Lookup::Found(path) = root.resolve("/a.txt").await else {
            panic!("a.txt not found");
        };
        assert_eq!(read_file(&path).await.unwrap(), b"hello");
        assert!(matches!(root.resolve("/sub/b.bin").await, Lookup::Found(_)));
        assert!(matches!(
            root.resolve("/sub/../a.txt").await,
            Lookup::Found(_)
        ));
    }

    #[tokio::test]
    async fn rejects_missing_directories_and_escapes() {
        let tmp = TempDir::new("missing");
        let root = FileRoot::open(tmp.0.join("public")).unwrap();

        assert_eq!(root.resolve("/nothing.txt").await, Lookup::Missing);
        assert_eq!(root.resolve("/sub").await, Lookup::Missing);
        assert_eq!(root.resolve("/").await, Lookup::Missing);
        assert_eq!(root.resolve("/../secret.txt").await, Lookup::Missing);
        assert_eq!(root.resolve("/sub/../../secret.txt").await, Lookup::Missing);
    }

    #[test]
    fn open_requires_directory() {
        let tmp = TempDir::new("open");
        assert_eq!(
            FileRoot::open(tmp.0.join("secret.txt")).unwrap_err().kind(),
            io::ErrorKind::NotADirectory
        );
        assert!(FileRoot::open(tmp.0.join("absent")).is_err());
        let root = FileRoot::open(tmp.0.join("public")).unwrap();
        assert!(root.path().is_absolute());
    }
}
