use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Reasons a single field could not be extracted.
///
/// None of these abort a report; the renderer leaves the field blank and
/// records the error in its diagnostics.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The file could not be opened (permission, vanished task, wrong mount).
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading stopped with an I/O error part-way through the file.
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directory could not be listed.
    #[error("cannot list {path}: {source}")]
    ListDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file was readable but the expected label or column was absent.
    #[error("{field} not found in {path}")]
    MissingField { path: PathBuf, field: &'static str },
}

impl ExtractError {
    /// Returns `true` when the file itself was unavailable, as opposed to
    /// present but lacking the field.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ExtractError::Open { .. } | ExtractError::ListDir { .. })
    }
}
