//! Byte-at-a-time line reader for `/proc` pseudo-files.
//!
//! Pseudo-files are generated on access and are small, so lines are pulled
//! one byte per read without an intermediate buffer. Each line lands in a
//! caller-owned [`LineBuf`], normalized so that its terminator becomes a
//! single trailing space.

use std::io::{self, Read};
use std::path::Path;

use tracing::warn;

use super::error::ExtractError;
use crate::collector::traits::FileSystem;

/// Largest number of bytes consumed for one line. Longer lines are split.
pub const LINE_CAPACITY: usize = 1024;

/// Reusable line buffer owned by the caller of [`LineReader::read_line`].
#[derive(Debug, Default)]
pub struct LineBuf {
    raw: Vec<u8>,
    text: String,
}

impl LineBuf {
    pub fn new() -> Self {
        Self {
            raw: Vec::with_capacity(LINE_CAPACITY),
            text: String::with_capacity(LINE_CAPACITY),
        }
    }

    /// The normalized text of the most recently read line.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    fn clear(&mut self) {
        self.raw.clear();
        self.text.clear();
    }

    fn finish(&mut self) {
        self.text.push_str(&String::from_utf8_lossy(&self.raw));
    }
}

/// Reads logical lines from an unbuffered byte source.
pub struct LineReader<R> {
    inner: R,
}

impl<R: Read> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Reads the next line into `buf`.
    ///
    /// Stops after a newline or NUL byte, or after [`LINE_CAPACITY`] bytes.
    /// Returns the number of bytes consumed including the terminator, or 0
    /// at end of file. The terminator is stored as a single space.
    pub fn read_line(&mut self, buf: &mut LineBuf) -> io::Result<usize> {
        buf.clear();
        let mut byte = [0u8; 1];
        let mut consumed = 0;

        while consumed < LINE_CAPACITY {
            match self.inner.read(&mut byte) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
            consumed += 1;
            if byte[0] == b'\n' || byte[0] == b'\0' {
                buf.raw.push(b' ');
                break;
            }
            buf.raw.push(byte[0]);
        }

        buf.finish();
        Ok(consumed)
    }
}

/// Opens `path` for line reading.
///
/// An unopenable file is logged and reported to the caller, which is
/// expected to degrade to a blank field rather than abort.
pub fn open_lines<'a, F: FileSystem>(
    fs: &'a F,
    path: &Path,
) -> Result<LineReader<Box<dyn Read + 'a>>, ExtractError> {
    match fs.open(path) {
        Ok(reader) => Ok(LineReader::new(reader)),
        Err(source) => {
            warn!(path = %path.display(), error = %source, "open failed");
            Err(ExtractError::Open {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// Scans `path` line by line, handing each normalized line to `visit` until
/// it returns `Some`.
pub fn scan_lines<F, T>(
    fs: &F,
    path: &Path,
    mut visit: impl FnMut(&str) -> Option<T>,
) -> Result<Option<T>, ExtractError>
where
    F: FileSystem,
{
    let mut reader = open_lines(fs, path)?;
    let mut buf = LineBuf::new();
    loop {
        let n = reader
            .read_line(&mut buf)
            .map_err(|source| ExtractError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        if n == 0 {
            return Ok(None);
        }
        if let Some(found) = visit(buf.as_str()) {
            return Ok(Some(found));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;
    use std::io::Cursor;

    #[test]
    fn test_read_line_normalizes_newline_to_space() {
        let mut reader = LineReader::new(Cursor::new("testbox\n"));
        let mut buf = LineBuf::new();

        assert_eq!(reader.read_line(&mut buf).unwrap(), 8);
        assert_eq!(buf.as_str(), "testbox ");
        assert_eq!(reader.read_line(&mut buf).unwrap(), 0);
        assert_eq!(buf.as_str(), "");
    }

    #[test]
    fn test_read_line_counts_terminator_and_stops_at_nul() {
        let mut reader = LineReader::new(Cursor::new(b"ab\0cd".to_vec()));
        let mut buf = LineBuf::new();

        assert_eq!(reader.read_line(&mut buf).unwrap(), 3);
        assert_eq!(buf.as_str(), "ab ");
        assert_eq!(reader.read_line(&mut buf).unwrap(), 2);
        assert_eq!(buf.as_str(), "cd");
    }

    #[test]
    fn test_read_line_reuses_buffer_between_lines() {
        let mut reader = LineReader::new(Cursor::new("a much longer first line\nb\n"));
        let mut buf = LineBuf::new();

        reader.read_line(&mut buf).unwrap();
        reader.read_line(&mut buf).unwrap();
        assert_eq!(buf.as_str(), "b ");
    }

    #[test]
    fn test_read_line_splits_at_capacity() {
        let long = "x".repeat(LINE_CAPACITY + 10);
        let mut reader = LineReader::new(Cursor::new(long));
        let mut buf = LineBuf::new();

        assert_eq!(reader.read_line(&mut buf).unwrap(), LINE_CAPACITY);
        assert_eq!(reader.read_line(&mut buf).unwrap(), 10);
    }

    #[test]
    fn test_scan_lines_stops_at_first_match() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/meminfo", "MemTotal: 10 kB\nActive: 4 kB\nActive: 9 kB\n");

        let found = scan_lines(&fs, Path::new("/proc/meminfo"), |line| {
            line.starts_with("Active:").then(|| line.to_string())
        })
        .unwrap();
        assert_eq!(found.as_deref(), Some("Active: 4 kB "));
    }

    #[test]
    fn test_open_lines_missing_file_is_reported() {
        let fs = MockFs::new();
        let err = open_lines(&fs, Path::new("/proc/nope")).err().unwrap();
        assert!(err.is_unavailable());
    }
}
