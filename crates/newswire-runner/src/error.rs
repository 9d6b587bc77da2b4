//! Error types for the newswire runner.
//!
//! Uses `thiserror` for typed errors that surface through the whole cycle:
//! configuration, prompt rendering, the LLM call, response parsing, state
//! persistence, and feed output. None of them is retried.

use std::path::PathBuf;

use newswire_world::StoreError;

/// Errors that can occur during a generation cycle.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration is invalid or missing.
    #[error("config error: {0}")]
    Config(String),

    /// Failed to load or render a prompt template.
    #[error("template error: {0}")]
    Template(String),

    /// The LLM backend returned an error or was unreachable.
    #[error("LLM backend error: {0}")]
    LlmBackend(String),

    /// The LLM response contained nothing usable.
    #[error("response parse error: {0}")]
    Parse(String),

    /// Loading or saving the world state failed.
    #[error("world state error: {0}")]
    Store(#[from] StoreError),

    /// The RSS document could not be rendered.
    #[error("feed render error: {0}")]
    Feed(String),

    /// Writing an output file failed.
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        /// The file being written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
