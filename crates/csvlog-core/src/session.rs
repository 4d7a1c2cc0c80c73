//! File session state

use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::LoggerError;

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No filename has been configured yet
    Closed,
    /// The file must be (re)opened on the next log call
    NeedsReopen,
    /// The file is open and its header has been written
    Open,
}

/// An open, appendable log file
#[derive(Debug)]
pub(crate) struct OpenFile {
    path: PathBuf,
    file: File,
    was_empty: bool,
}

/// Appendable storage that can be cut back to an earlier length
pub(crate) trait AppendTarget: Write + Seek {
    fn truncate_to(&mut self, len: u64) -> io::Result<()>;
}

impl AppendTarget for File {
    fn truncate_to(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }
}

/// Append `line` plus a newline as a single write.
///
/// On failure the target is cut back to its length before the call, so no
/// part of a dropped line stays behind.
pub(crate) fn append_line<T: AppendTarget>(target: &mut T, line: &str) -> io::Result<()> {
    let start = target.seek(SeekFrom::End(0)).ok();

    let mut bytes = Vec::with_capacity(line.len() + 1);
    bytes.extend_from_slice(line.as_bytes());
    bytes.push(b'\n');

    let result = target.write_all(&bytes).and_then(|()| target.flush());
    if result.is_err() {
        if let Some(start) = start {
            if let Err(e) = target.truncate_to(start) {
                tracing::error!("Could not discard partial line: {e}");
            }
        }
    }
    result
}

impl OpenFile {
    /// Create parent directories and open `path` for appending.
    pub(crate) fn open(path: &Path) -> Result<Self, LoggerError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| LoggerError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let open_err = |source: io::Error| LoggerError::Open {
            path: path.to_path_buf(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(open_err)?;

        // Append mode writes at the end; the end position tells whether
        // anything was there before.
        let position = file.seek(SeekFrom::End(0)).map_err(open_err)?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
            was_empty: position == 0,
        })
    }

    /// Whether the file held no bytes when it was opened
    pub(crate) fn was_empty(&self) -> bool {
        self.was_empty
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Append `line` plus a newline, all or nothing.
    pub(crate) fn write_line(&mut self, line: &str) -> io::Result<()> {
        append_line(&mut self.file, line)
    }

    pub(crate) fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Session state with the file handle, so `Open` always owns a handle
#[derive(Debug)]
pub(crate) enum Session {
    Closed,
    NeedsReopen,
    Open(OpenFile),
}

impl Session {
    pub(crate) fn state(&self) -> SessionState {
        match self {
            Session::Closed => SessionState::Closed,
            Session::NeedsReopen => SessionState::NeedsReopen,
            Session::Open(_) => SessionState::Open,
        }
    }

    /// Flush and drop any open handle, leaving `NeedsReopen`.
    pub(crate) fn close(&mut self) {
        if let Session::Open(mut file) = std::mem::replace(self, Session::NeedsReopen) {
            if let Err(e) = file.flush() {
                tracing::error!("Flush on close failed for {}: {e}", file.path().display());
            }
            tracing::debug!("Closed {}", file.path().display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/c/log.csv");

        let file = OpenFile::open(&path).unwrap();
        assert!(file.was_empty());
        assert!(path.exists());
    }

    #[test]
    fn test_existing_empty_file_counts_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        fs::write(&path, "").unwrap();

        assert!(OpenFile::open(&path).unwrap().was_empty());
    }

    #[test]
    fn test_non_empty_file_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        fs::write(&path, "h\n").unwrap();

        let mut file = OpenFile::open(&path).unwrap();
        assert!(!file.was_empty());
        file.write_line("x").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "h\nx\n");
    }

    #[test]
    fn test_close_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::Open(OpenFile::open(&dir.path().join("x.csv")).unwrap());

        session.close();
        assert_eq!(session.state(), SessionState::NeedsReopen);
        session.close();
        assert_eq!(session.state(), SessionState::NeedsReopen);
    }

    /// In-memory file that refuses writes past `limit` bytes
    struct LimitedFile {
        data: io::Cursor<Vec<u8>>,
        limit: usize,
    }

    impl LimitedFile {
        fn new(content: &str, limit: usize) -> Self {
            Self {
                data: io::Cursor::new(content.as_bytes().to_vec()),
                limit,
            }
        }

        fn text(&self) -> String {
            String::from_utf8(self.data.get_ref().clone()).unwrap()
        }
    }

    impl Write for LimitedFile {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let room = self.limit.saturating_sub(self.data.get_ref().len());
            if room == 0 {
                return Err(io::Error::new(io::ErrorKind::Other, "limit reached"));
            }
            let n = buf.len().min(room);
            self.data.write(&buf[..n])
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Seek for LimitedFile {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.data.seek(pos)
        }
    }

    impl AppendTarget for LimitedFile {
        fn truncate_to(&mut self, len: u64) -> io::Result<()> {
            self.data.get_mut().truncate(len as usize);
            self.data.set_position(len);
            Ok(())
        }
    }

    #[test]
    fn test_failed_append_leaves_no_partial_line() {
        let mut file = LimitedFile::new("h\n", 10);

        append_line(&mut file, "ok").unwrap();
        // Fits only partially: 5 bytes written, then the limit is hit
        assert!(append_line(&mut file, "toolong").is_err());
        assert_eq!(file.text(), "h\nok\n");

        file.limit = 64;
        append_line(&mut file, "next").unwrap();
        assert_eq!(file.text(), "h\nok\nnext\n");
    }

    #[test]
    fn test_failed_header_leaves_file_empty() {
        let mut file = LimitedFile::new("", 4);

        assert!(append_line(&mut file, "timestamp, a").is_err());
        assert_eq!(file.text(), "");
    }

    #[test]
    fn test_open_fails_on_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = OpenFile::open(dir.path()).unwrap_err();
        assert!(matches!(err, LoggerError::Open { .. }));
    }
}
