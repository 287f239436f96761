//! Persistence errors.

use dcf_core::ValidationError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A scenario could not be saved, loaded or deleted.
///
/// Surfaced verbatim to the caller. A failed save leaves no partial file
/// behind.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Filesystem failure.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The record could not be encoded or decoded as JSON.
    #[error("Malformed scenario record {}: {source}", path.display())]
    Serialisation {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// A stored record decoded but its assumptions violate a bound.
    #[error("Scenario record {} holds invalid assumptions: {source}", path.display())]
    Record {
        /// File involved
        path: PathBuf,
        /// The violated bound
        #[source]
        source: ValidationError,
    },
}

impl PersistenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn serialisation(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Serialisation {
            path: path.into(),
            source,
        }
    }

    /// Path of the file or directory the failure relates to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. }
            | Self::Serialisation { path, .. }
            | Self::Record { path, .. } => path,
        }
    }
}
