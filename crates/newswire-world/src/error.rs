//! Error types for the `newswire-world` crate.

use std::path::PathBuf;

/// Errors that can occur while loading or saving the world state.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The state file exists but could not be read, or could not be written.
    #[error("world state I/O failed for {}: {source}", .path.display())]
    Io {
        /// The state file path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The state file exists but does not contain a valid world state.
    #[error("malformed world state in {}: {source}", .path.display())]
    Parse {
        /// The state file path.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// The in-memory state could not be serialized.
    #[error("failed to serialize world state: {0}")]
    Serialize(#[from] serde_json::Error),
}
