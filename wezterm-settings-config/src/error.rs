//! Typed error types for the settings engine.
//!
//! Diagnostics and validation problems are plain data (see
//! [`crate::lua::ParseDiagnostic`] and [`crate::validate::ValidationError`]);
//! the enums here cover operations that actually fail.

use std::path::PathBuf;
use thiserror::Error;

/// A typed field update could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateError {
    /// An index-based update pointed past the end of a list.
    #[error("{field}: index {index} out of range (length {len})")]
    IndexOutOfRange {
        field: &'static str,
        index: usize,
        len: usize,
    },
}

/// Errors raised while taking, listing or restoring snapshots.
#[derive(Debug, Error)]
pub enum BackupError {
    /// Copying, listing or deleting a snapshot failed.
    #[error("Backup I/O failed for '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A snapshot id contained a path separator or a parent reference.
    #[error("Invalid backup id '{0}'")]
    InvalidId(String),

    /// No snapshot with this id exists.
    #[error("Backup '{0}' not found")]
    NotFound(String),

    /// The target path has no usable file name.
    #[error("Cannot back up '{}': path has no file name", .0.display())]
    NoFileName(PathBuf),
}

impl BackupError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors surfaced by the sync orchestrator.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Reading or writing a module file failed.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The pre-write snapshot failed, so the write was skipped.
    #[error("Backup of '{}' failed, file left untouched: {source}", path.display())]
    Backup {
        path: PathBuf,
        #[source]
        source: BackupError,
    },

    /// A backup operation requested directly by the caller failed.
    #[error(transparent)]
    BackupOperation(#[from] BackupError),

    /// The configuration directory could not be determined.
    #[error("Could not resolve the WezTerm configuration directory: {0}")]
    PathResolution(String),
}

impl SyncError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
