use {
    crate::DawgError,
    async_trait::async_trait,
    log::debug,
    std::{
        convert::AsRef,
        fmt::Debug,
        io::{Error as IoError, ErrorKind as IoErrorKind, Result as IoResult},
        path::{Path, PathBuf},
    },
    tokio::{
        fs::{metadata, File},
        io::{AsyncBufReadExt, BufReader},
    },
};

const DEFAULT_CAPACITY: usize = 64;

/// A provider of the lines of text to be indexed.
///
/// Line terminators are not part of the returned lines; how lines are joined into a single symbol stream is
/// decided by the [IndexConfig](crate::IndexConfig) used for indexing.
#[async_trait(?Send)]
pub trait TextSource: Debug {
    /// Returns every line of the text, in order.
    async fn read_lines(&mut self) -> IoResult<Vec<String>>;
}

/// Text read from a file on the local file system.
#[derive(Debug)]
pub struct FileTextSource {
    path: PathBuf,
}

impl FileTextSource {
    /// Returns the path of the file.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a text file at the given path.
    ///
    /// This will return an error if the path does not exist or is not a regular file.
    pub async fn open<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();
        let md = metadata(path).await?;
        if !md.is_file() {
            return Err(IoError::new(IoErrorKind::Other, DawgError::NotAFile(path.display().to_string())));
        }

        Ok(Self {
            path: path.to_path_buf(),
        })
    }
}

#[async_trait(?Send)]
impl TextSource for FileTextSource {
    async fn read_lines(&mut self) -> IoResult<Vec<String>> {
        let f = File::open(&self.path).await?;
        let mut lines = BufReader::new(f).lines();
        let mut result = Vec::with_capacity(DEFAULT_CAPACITY);

        while let Some(line) = lines.next_line().await? {
            result.push(line);
        }

        debug!("Read {} lines from {}", result.len(), self.path.display());
        Ok(result)
    }
}

/// Text held in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryTextSource {
    lines: Vec<String>,
}

impl MemoryTextSource {
    /// Splits `text` into lines the same way [FileTextSource] does.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }
}

impl From<Vec<String>> for MemoryTextSource {
    fn from(lines: Vec<String>) -> Self {
        Self {
            lines,
        }
    }
}

#[async_trait(?Send)]
impl TextSource for MemoryTextSource {
    async fn read_lines(&mut self) -> IoResult<Vec<String>> {
        Ok(self.lines.clone())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{FileTextSource, MemoryTextSource, TextSource},
        pretty_assertions::assert_eq,
        std::path::PathBuf,
    };

    fn data_path(file_name: &str) -> PathBuf {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("tests");
        path.push("data");
        path.push(file_name);
        path
    }

    #[test_log::test(tokio::test)]
    async fn test_read_file_lines() {
        let mut source = FileTextSource::open(data_path("two_lines.txt")).await.unwrap();
        assert_eq!(source.read_lines().await.unwrap(), vec!["abc".to_string(), "def".to_string()]);
    }

    #[test_log::test(tokio::test)]
    async fn test_open_rejects_directory() {
        let err = FileTextSource::open(env!("CARGO_MANIFEST_DIR")).await.unwrap_err();
        assert!(err.to_string().ends_with("is not a file"), "unexpected error: {err}");
    }

    #[test_log::test(tokio::test)]
    async fn test_open_missing_file() {
        let err = FileTextSource::open(data_path("does_not_exist.txt")).await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test_log::test(tokio::test)]
    async fn test_memory_lines() {
        let mut source = MemoryTextSource::from_text("abc\r\ndef\n");
        assert_eq!(source.read_lines().await.unwrap(), vec!["abc".to_string(), "def".to_string()]);
        // Reading is repeatable.
        assert_eq!(source.read_lines().await.unwrap().len(), 2);
    }
}
