use {
    crate::dawg::Dawg,
    async_trait::async_trait,
    log::info,
    std::{
        ffi::OsString,
        io::Result as IoResult,
        path::{Path, PathBuf},
    },
    tokio::{
        fs::{metadata, OpenOptions},
        io::{AsyncWrite, AsyncWriteExt, BufWriter},
    },
};

/// Suffix appended to the input path to name the file that receives its edge dump.
pub const EDGE_FILE_SUFFIX: &str = "_edges.txt";

/// Additional methods for writing edge dumps on top of the standard `AsyncWrite` trait.
#[async_trait(?Send)]
pub trait EdgeWriteExt: AsyncWriteExt + Unpin {
    /// Writes every primary and secondary edge of `dawg`, one line per edge, in the format of
    /// [EdgeRecord](crate::dawg::EdgeRecord)'s `Display` implementation.
    ///
    /// # Errors
    /// This method will return an error if any write fails.
    async fn write_edge_dump(&mut self, dawg: &Dawg) -> IoResult<()> {
        for edge in dawg.edges() {
            self.write_all(format!("{edge}\n").as_bytes()).await?;
        }
        Ok(())
    }
}

impl<W: AsyncWrite + Unpin + ?Sized> EdgeWriteExt for W {}

/// Returns the path of the edge file for the text at `input_path`: the input path with [EDGE_FILE_SUFFIX]
/// appended.
pub fn edge_file_path<P: AsRef<Path>>(input_path: P) -> PathBuf {
    let mut path = OsString::from(input_path.as_ref().as_os_str());
    path.push(EDGE_FILE_SUFFIX);
    PathBuf::from(path)
}

/// Saves the edge dump of `dawg` next to the text it was built from. An existing edge file is overwritten.
///
/// Returns the path written to.
pub async fn save_edges<P: AsRef<Path>>(dawg: &Dawg, input_path: P) -> IoResult<PathBuf> {
    let path = edge_file_path(input_path);
    let existed = metadata(&path).await.is_ok();

    let mut options = OpenOptions::new();
    options.write(true);
    options.truncate(true);
    options.create(true);
    let f = options.open(&path).await?;

    let mut w = BufWriter::new(f);
    w.write_edge_dump(dawg).await?;
    w.flush().await?;

    if existed {
        info!("Overwrote existing file {}", path.display());
    } else {
        info!("Created new file {}", path.display());
    }
    info!("Wrote {} edges to {}", dawg.num_edges(), path.display());

    Ok(path)
}

#[cfg(test)]
mod tests {
    use {
        super::{edge_file_path, save_edges, EdgeWriteExt},
        crate::dawg::Dawg,
        pretty_assertions::assert_eq,
        std::path::PathBuf,
    };

    #[test_log::test]
    fn test_edge_file_path() {
        assert_eq!(edge_file_path("texts/abc.txt"), PathBuf::from("texts/abc.txt_edges.txt"));
    }

    #[test_log::test(tokio::test)]
    async fn test_write_edge_dump() {
        let dawg = Dawg::from_text("ab");
        let mut buf = Vec::new();
        buf.write_edge_dump(&dawg).await.unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "0\t--\"a\"-[primary]-->\t1\n0\t--\"b\"-[secondary]-->\t2\n1\t--\"b\"-[primary]-->\t2\n"
        );
    }

    #[test_log::test(tokio::test)]
    async fn test_save_edges() {
        let mut input_path = std::env::temp_dir();
        input_path.push(format!("infix-dawg-save-edges-{}.txt", std::process::id()));

        let dawg = Dawg::from_text("abb");
        let path = save_edges(&dawg, &input_path).await.unwrap();
        assert_eq!(path, edge_file_path(&input_path));

        let mut expected = Vec::new();
        dawg.write_edges(&mut expected).unwrap();
        assert_eq!(tokio::fs::read(&path).await.unwrap(), expected);

        // A second save truncates rather than appends.
        let shorter = Dawg::from_text("a");
        save_edges(&shorter, &input_path).await.unwrap();
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "0\t--\"a\"-[primary]-->\t1\n");

        tokio::fs::remove_file(&path).await.unwrap();
    }
}
