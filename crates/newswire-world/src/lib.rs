//! Persistent world-state memory for the Interstellar Newswire.
//!
//! The newswire keeps a small JSON document describing the fictional setting
//! (known star systems, common technologies, and the most recent headlines).
//! Every generation run loads it, feeds it to the language model as context,
//! records the new headlines, and writes it back.
//!
//! # Modules
//!
//! - [`state`] -- The [`WorldState`] document and the headline updater
//! - [`starting_world`] -- Factory for the setting used on the very first run
//! - [`store`] -- JSON file persistence via [`StateStore`]
//! - [`error`] -- [`StoreError`]

pub mod error;
pub mod starting_world;
pub mod state;
pub mod store;

pub use error::StoreError;
pub use starting_world::{STARTING_YEAR, starting_world};
pub use state::{MAX_RECENT_EVENTS, WorldState};
pub use store::StateStore;
