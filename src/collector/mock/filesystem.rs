//! In-memory proc tree for exercising collectors off-Linux.

use std::collections::BTreeMap;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};

use crate::collector::traits::FileSystem;

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File {
        content: String,
        owner: u32,
        readable: bool,
    },
}

/// In-memory filesystem.
///
/// Paths map to directory or file nodes. Files carry an owning UID (root
/// unless set) and can be made unreadable to simulate permission errors or
/// tasks that exit between listing and reading. Listings come back in path
/// order.
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    nodes: BTreeMap<PathBuf, Node>,
}

impl MockFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a root-owned file, creating missing parents.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = path.as_ref();
        self.add_parents(path);
        self.nodes.insert(
            path.to_path_buf(),
            Node::File {
                content: content.into(),
                owner: 0,
                readable: true,
            },
        );
    }

    /// Adds a directory and any missing parents.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.add_parents(path);
        self.nodes.insert(path.to_path_buf(), Node::Dir);
    }

    /// Removes a file; its directory stays listed.
    pub fn remove_file(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if matches!(self.nodes.get(path), Some(Node::File { .. })) {
            self.nodes.remove(path);
        }
    }

    /// Keeps a file listed but makes every read fail with `PermissionDenied`.
    pub fn deny(&mut self, path: impl AsRef<Path>) {
        if let Some(Node::File { readable, .. }) = self.nodes.get_mut(path.as_ref()) {
            *readable = false;
        }
    }

    pub fn set_owner(&mut self, path: impl AsRef<Path>, uid: u32) {
        if let Some(Node::File { owner, .. }) = self.nodes.get_mut(path.as_ref()) {
            *owner = uid;
        }
    }

    /// Adds `<root>/<pid>/status` owned by `uid`.
    pub fn add_task(&mut self, root: impl AsRef<Path>, pid: u32, status: &str, uid: u32) {
        let status_path = root.as_ref().join(pid.to_string()).join("status");
        self.add_file(&status_path, status);
        self.set_owner(&status_path, uid);
    }

    fn add_parents(&mut self, path: &Path) {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            self.nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
        }
    }

    /// Content and owner of a readable file.
    fn file(&self, path: &Path) -> io::Result<(&str, u32)> {
        match self.nodes.get(path) {
            Some(Node::File {
                content,
                owner,
                readable: true,
            }) => Ok((content.as_str(), *owner)),
            Some(Node::File { .. }) => Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{}: permission denied", path.display()),
            )),
            Some(Node::Dir) => Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("{}: is a directory", path.display()),
            )),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}: no such file", path.display()),
            )),
        }
    }
}

impl FileSystem for MockFs {
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>> {
        let (content, _) = self.file(path)?;
        Ok(Box::new(Cursor::new(content.as_bytes())))
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.file(path).map(|(content, _)| content.to_string())
    }

    fn exists(&self, path: &Path) -> bool {
        self.nodes.contains_key(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        match self.nodes.get(path) {
            Some(Node::Dir) => Ok(self
                .nodes
                .keys()
                .filter(|child| child.parent() == Some(path))
                .cloned()
                .collect()),
            _ => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}: no such directory", path.display()),
            )),
        }
    }

    fn owner_uid(&self, path: &Path) -> io::Result<u32> {
        self.file(path).map(|(_, owner)| owner)
    }
}
