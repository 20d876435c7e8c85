//! Filesystem seam between the collectors and the proc mount.
//!
//! Collectors only touch files through [`FileSystem`], so the same parsing
//! code runs against the live mount ([`RealFs`]) or an in-memory fixture.

use std::fs::File;
use std::io::{self, Read};
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

/// Read-only file access used by the collectors.
pub trait FileSystem {
    /// Opens a file as a raw byte stream.
    ///
    /// The returned reader must not buffer: the line reader pulls one byte
    /// at a time and relies on each read reflecting the file as it is now.
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>>;

    /// Whole-file read, for small files that are not parsed line by line.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    fn exists(&self, path: &Path) -> bool;

    /// Full paths of the entries directly under `path`.
    ///
    /// Order is whatever the underlying listing yields; callers must not
    /// depend on it.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// UID of the user owning `path`.
    fn owner_uid(&self, path: &Path) -> io::Result<u32>;
}

/// The host filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>> {
        let file = File::open(path)?;
        Ok(Box::new(file))
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect()
    }

    fn owner_uid(&self, path: &Path) -> io::Result<u32> {
        std::fs::metadata(path).map(|meta| meta.uid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn proc_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("loadavg"), "0.42 0.31 0.27 2/611 48213\n").unwrap();
        std::fs::create_dir(dir.path().join("1")).unwrap();
        std::fs::write(dir.path().join("1").join("status"), "Name:\tinit\n").unwrap();
        dir
    }

    #[test]
    fn test_open_yields_file_bytes() {
        let dir = proc_dir();
        let mut content = String::new();
        RealFs::new()
            .open(&dir.path().join("loadavg"))
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "0.42 0.31 0.27 2/611 48213\n");
    }

    #[test]
    fn test_open_missing_file_is_not_found() {
        let dir = proc_dir();
        let err = RealFs::new().open(&dir.path().join("nope")).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_read_dir_returns_full_paths() {
        let dir = proc_dir();
        let fs = RealFs::new();

        let mut entries = fs.read_dir(dir.path()).unwrap();
        entries.sort();
        assert_eq!(entries, vec![dir.path().join("1"), dir.path().join("loadavg")]);
        assert!(fs.exists(&entries[0]));
        assert!(!fs.exists(&dir.path().join("2")));
    }

    #[test]
    fn test_owner_uid_matches_metadata() {
        let dir = proc_dir();
        let status = dir.path().join("1").join("status");
        let uid = RealFs::new().owner_uid(&status).unwrap();
        assert_eq!(uid, std::fs::metadata(&status).unwrap().uid());
    }
}
