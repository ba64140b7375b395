//! Error types for tfind
//!
//! Only conditions that abort a whole operation live here. Problems with
//! individual entries below the root are [`Diagnostic`](crate::Diagnostic)s
//! and never unwind a build or a search.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TfindError {
    /// The search root does not exist or cannot be enumerated.
    #[error("cannot access '{}': {source}", path.display())]
    RootUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The search root exists but is not a directory.
    #[error("cannot access '{}': Not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("number of threads must be inside [{min}; {max}]")]
    InvalidConcurrency { value: usize, min: usize, max: usize },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TfindError {
    /// True for the errors that mean the search root could not be used.
    pub fn is_root_unavailable(&self) -> bool {
        matches!(
            self,
            TfindError::RootUnavailable { .. } | TfindError::NotADirectory { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TfindError>;
