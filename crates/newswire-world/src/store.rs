//! JSON file persistence for the world state.
//!
//! The store owns nothing but a path. A missing file is the normal first-run
//! case and yields the starting world; a file that exists but cannot be read
//! or parsed is an error, never silently replaced by defaults.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StoreError;
use crate::starting_world::starting_world;
use crate::state::WorldState;

/// Reads and writes a [`WorldState`] at a fixed path.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Create a store bound to `path`. Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The state file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted world state, or the starting world if the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file exists but cannot be read, and
    /// [`StoreError::Parse`] if its content is not a valid world state.
    pub fn load(&self) -> Result<WorldState, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no world state on disk, using starting world");
                return Ok(starting_world());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let state: WorldState =
            serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;

        debug!(
            path = %self.path.display(),
            year = state.year,
            recent_events = state.recent_events.len(),
            "world state loaded"
        );
        Ok(state)
    }

    /// Overwrite the state file with `state` as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialize`] if the state cannot be encoded and
    /// [`StoreError::Io`] if the file cannot be written.
    pub fn save(&self, state: &WorldState) -> Result<(), StoreError> {
        let json = state.to_pretty_json()?;
        std::fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!(
            path = %self.path.display(),
            recent_events = state.recent_events.len(),
            "world state saved"
        );
        Ok(())
    }
}
