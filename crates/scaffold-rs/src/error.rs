//! Errors raised while loading configuration, tables, and CLI input.
//!
//! Composition itself never fails.

use std::path::PathBuf;

/// Failure while loading files, reading input, or encoding output.
#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("instruction table '{}' has no \"general\" entry", path.display())]
    MissingGeneral { path: PathBuf },

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}
