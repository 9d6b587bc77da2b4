//! Headline generation cycle for the Interstellar Newswire.
//!
//! Loads the persisted world state, asks a language model for a batch of
//! calm, wire-service style headlines set in that world, records them in the
//! state's memory, and publishes them as an RSS 2.0 feed.
//!
//! # Modules
//!
//! - [`config`] -- Environment-driven [`RunnerConfig`](config::RunnerConfig)
//! - [`prompt`] -- `minijinja` prompt templates
//! - [`llm`] -- OpenAI-compatible and Anthropic backends
//! - [`parse`] -- Headline extraction from untrusted model output
//! - [`feed`] -- RSS rendering and output
//! - [`cycle`] -- The end-to-end run
//! - [`error`] -- [`RunnerError`](error::RunnerError)

pub mod config;
pub mod cycle;
pub mod error;
pub mod feed;
pub mod llm;
pub mod parse;
pub mod prompt;
