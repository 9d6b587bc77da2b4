//! One generation cycle: load, generate, record, save, publish.
//!
//! ```text
//! StateStore::load --> PromptEngine --> LlmBackend --> extract_headlines
//!        --> WorldState::record_headlines --> StateStore::save --> write_feed
//! ```
//!
//! Nothing touches the disk until the model has produced at least one usable
//! headline and the feed has been rendered, so a failed call leaves the
//! previous state and feed files exactly as they were.

use std::path::PathBuf;

use chrono::Utc;
use newswire_world::StateStore;
use tracing::info;

use crate::config::RunnerConfig;
use crate::error::RunnerError;
use crate::feed;
use crate::llm::LlmBackend;
use crate::parse::extract_headlines;
use crate::prompt::PromptEngine;

/// Outcome of a successful cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    /// The headlines published in this run, in feed order.
    pub headlines: Vec<String>,
    /// Where the updated world state was written.
    pub state_path: PathBuf,
    /// Where the feed was written.
    pub feed_path: PathBuf,
}

/// Run a single generation cycle.
///
/// # Errors
///
/// Propagates the first failure: [`RunnerError::Store`] for an unreadable or
/// malformed state file, [`RunnerError::Template`] for prompt rendering,
/// [`RunnerError::LlmBackend`] for the API call, [`RunnerError::Parse`] for
/// an unusable response, and [`RunnerError::Feed`] / [`RunnerError::Io`]
/// for output.
pub async fn run_cycle(
    config: &RunnerConfig,
    prompts: &PromptEngine,
    backend: &LlmBackend,
) -> Result<CycleReport, RunnerError> {
    let store = StateStore::new(&config.state_path);
    let mut world = store.load()?;
    info!(
        year = world.year,
        known_systems = world.known_systems.len(),
        recent_events = world.recent_events.len(),
        "world state ready"
    );

    let prompt = prompts.render(&world, config.headlines_per_run)?;

    info!(
        backend = backend.name(),
        model = backend.model(),
        requested = config.headlines_per_run,
        "requesting headlines"
    );
    let raw = backend.complete(&prompt).await?;
    let headlines = extract_headlines(&raw, config.headlines_per_run)?;

    let xml = feed::build_feed(&config.channel, &headlines, Utc::now())?;

    world.record_headlines(&headlines);
    store.save(&world)?;
    feed::write_feed(&config.feed_path, &xml)?;

    info!(
        headlines = headlines.len(),
        state_path = %config.state_path.display(),
        feed_path = %config.feed_path.display(),
        "cycle complete"
    );

    Ok(CycleReport {
        headlines,
        state_path: config.state_path.clone(),
        feed_path: config.feed_path.clone(),
    })
}
