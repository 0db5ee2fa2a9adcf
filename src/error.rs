//! Error types for the grouping pipeline
//!
//! Fatal failures (unreadable primary input, unwritable combined output)
//! abort the run; per-shard failures are surfaced as warnings by the driver.

use std::path::PathBuf;
use thiserror::Error;

/// Failures the pipeline distinguishes by policy
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The primary input wordlist could not be opened or read
    #[error("cannot read input wordlist {path:?}")]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The combined output file could not be created or written
    #[error("cannot write combined output {path:?}")]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A per-length shard file could not be created
    #[error("cannot create shard file {path:?}")]
    ShardCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    pub fn input_unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::InputUnreadable {
            path: path.into(),
            source,
        }
    }

    pub fn output_unwritable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputUnwritable {
            path: path.into(),
            source,
        }
    }

    pub fn shard_create_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ShardCreateFailed {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_path() {
        let err = PipelineError::input_unreadable(
            "missing.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        assert!(err.to_string().contains("missing.txt"));
    }
}
