use std::path::PathBuf;

use atelier_storage::StorageError;
use thiserror::Error;

/// Errors that abort a migration phase.
///
/// Per-file failures inside a phase are reported, not raised.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Media directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid asset map {}: {source}", .path.display())]
    AssetMap {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl MigrationError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MigrationError::Io {
            path: path.into(),
            source,
        }
    }
}
