//! Owner name lookup for task status files.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::collector::traits::FileSystem;

/// Location of the account database.
pub const PASSWD_PATH: &str = "/etc/passwd";

/// Maps each UID in `/etc/passwd` content to its login name.
///
/// Lines without a numeric third column are ignored. When a UID appears
/// more than once the earliest entry is kept, matching `getpwuid`.
pub fn parse_passwd(content: &str) -> HashMap<u32, String> {
    let mut names = HashMap::new();
    for entry in content.lines().map(str::trim) {
        if entry.starts_with('#') {
            continue;
        }
        let mut columns = entry.split(':');
        let (Some(login), Some(_), Some(uid)) = (columns.next(), columns.next(), columns.next())
        else {
            continue;
        };
        if let Ok(uid) = uid.parse::<u32>() {
            names.entry(uid).or_insert_with(|| login.to_string());
        }
    }
    names
}

/// Resolves task owners to login names.
#[derive(Debug, Clone, Default)]
pub struct UserResolver {
    names: HashMap<u32, String>,
}

impl UserResolver {
    /// Reads the account database through `fs`. Without one every UID is
    /// shown as its number.
    pub fn load<F: FileSystem>(fs: &F) -> Self {
        let path = Path::new(PASSWD_PATH);
        if !fs.exists(path) {
            debug!("no account database, showing numeric uids");
            return Self::default();
        }
        match fs.read_to_string(path) {
            Ok(content) => Self::from_passwd(&content),
            Err(e) => {
                warn!(error = %e, "account database unreadable, showing numeric uids");
                Self::default()
            }
        }
    }

    pub fn from_passwd(content: &str) -> Self {
        Self {
            names: parse_passwd(content),
        }
    }

    /// Login name for `uid`, or the UID itself when it has no entry.
    pub fn resolve(&self, uid: u32) -> String {
        match self.names.get(&uid) {
            Some(name) => name.clone(),
            None => uid.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
