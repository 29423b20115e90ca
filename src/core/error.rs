//! Errors raised by mod folder operations

use std::path::PathBuf;

use thiserror::Error;

/// Failure while reading or changing the mod folder
#[derive(Debug, Error)]
pub enum ModError {
    #[error("Mod folder does not exist: {}", .0.display())]
    FolderMissing(PathBuf),

    #[error("Refusing to overwrite existing file: {}", .0.display())]
    TargetExists(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ModError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
