use crate::core::io::traits::SinkError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(
        "Topology file '{filename}' not found in '{primary}' or '{fallback}'",
        primary = primary.display(),
        fallback = fallback.display()
    )]
    NotFound {
        filename: String,
        primary: PathBuf,
        fallback: PathBuf,
    },

    #[error("Failed to read topology file '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Include cycle detected at '{path}'", path = path.display())]
    IncludeCycle { path: PathBuf },

    #[error("Color sink failed: {source}")]
    Sink {
        #[source]
        source: SinkError,
    },
}

impl EngineError {
    /// Whether the failure only concerns one branch of an include tree. Such failures skip the
    /// branch when they occur below the top-level file; anything else aborts the traversal.
    pub fn is_branch_local(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Io { .. } | Self::IncludeCycle { .. }
        )
    }
}
