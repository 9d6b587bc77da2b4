//! Newswire runner entry point.
//!
//! Runs exactly one generation cycle and exits. Scheduling (cron, CI
//! workflow, systemd timer) is left to the caller.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from environment variables
//! 3. Load prompt templates
//! 4. Create the LLM backend
//! 5. Run the cycle and print a one-line summary

use newswire_runner::config::RunnerConfig;
use newswire_runner::cycle::run_cycle;
use newswire_runner::llm::create_backend;
use newswire_runner::prompt::PromptEngine;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// # Errors
///
/// Returns an error (and a non-zero exit code) if any step of the cycle
/// fails. No file is modified in that case.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    info!("newswire-runner starting");

    let config = RunnerConfig::from_env()?;
    info!(
        state_path = %config.state_path.display(),
        feed_path = %config.feed_path.display(),
        headlines_per_run = config.headlines_per_run,
        templates_dir = ?config.templates_dir,
        "configuration loaded"
    );

    let prompts = PromptEngine::new(config.templates_dir.as_deref())?;

    let backend = create_backend(&config.backend)?;
    info!(
        backend = backend.name(),
        model = config.backend.model,
        api_url = config.backend.api_url,
        "LLM backend configured"
    );

    let report = run_cycle(&config, &prompts, &backend).await?;

    println!("Generated {} headlines.", report.headlines.len());
    Ok(())
}

/// Install the `tracing` subscriber on stderr, keeping stdout for the
/// summary line. `RUST_LOG` sets the filter (default `info`);
/// `LOG_FORMAT=json` switches to JSON lines.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
