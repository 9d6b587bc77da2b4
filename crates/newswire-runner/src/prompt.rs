//! Prompt template loading and rendering via `minijinja`.
//!
//! Two templates make up a prompt: `system` (the wire-service persona and
//! writing rules) and `user` (the serialized world state plus the request).
//! Built-in copies are compiled into the binary; an operator can point
//! `NEWSWIRE_TEMPLATES_DIR` at a directory holding `system.j2` and `user.j2`
//! to tune the voice without recompiling.

use std::path::Path;

use minijinja::{Environment, context};
use newswire_world::WorldState;

use crate::error::RunnerError;

const BUILTIN_SYSTEM: &str = include_str!("../templates/system.j2");
const BUILTIN_USER: &str = include_str!("../templates/user.j2");

/// Holds the loaded prompt templates.
pub struct PromptEngine {
    env: Environment<'static>,
}

/// The complete rendered prompt ready to send to an LLM backend.
#[derive(Debug, Clone)]
pub struct RenderedPrompt {
    /// System message establishing tone and output rules.
    pub system: String,
    /// User message carrying the world state and the request.
    pub user: String,
}

impl PromptEngine {
    /// Create an engine from `templates_dir`, or from the built-in templates
    /// when no directory is given.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Template`] if a template file cannot be read
    /// or does not compile.
    pub fn new(templates_dir: Option<&Path>) -> Result<Self, RunnerError> {
        match templates_dir {
            Some(dir) => Self::from_sources(
                load_template(dir, "system.j2")?,
                load_template(dir, "user.j2")?,
            ),
            None => Self::builtin(),
        }
    }

    /// Create an engine from the templates compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Template`] if a built-in template fails to
    /// compile.
    pub fn builtin() -> Result<Self, RunnerError> {
        Self::from_sources(BUILTIN_SYSTEM.to_owned(), BUILTIN_USER.to_owned())
    }

    fn from_sources(system: String, user: String) -> Result<Self, RunnerError> {
        let mut env = Environment::new();
        env.add_template_owned("system", system)
            .map_err(|e| RunnerError::Template(format!("failed to add system template: {e}")))?;
        env.add_template_owned("user", user)
            .map_err(|e| RunnerError::Template(format!("failed to add user template: {e}")))?;
        Ok(Self { env })
    }

    /// Render the prompt asking for `count` headlines about `world`.
    ///
    /// Templates see `world_state` (the state as pretty JSON), `count`,
    /// and `year`.
    pub fn render(&self, world: &WorldState, count: usize) -> Result<RenderedPrompt, RunnerError> {
        let world_state = world.to_pretty_json().map_err(|e| {
            RunnerError::Template(format!("failed to serialize world state: {e}"))
        })?;
        let ctx = context! {
            world_state => world_state,
            count => count,
            year => world.year,
        };

        let system = self
            .env
            .get_template("system")
            .map_err(|e| RunnerError::Template(format!("missing system template: {e}")))?
            .render(&ctx)
            .map_err(|e| RunnerError::Template(format!("system render failed: {e}")))?;

        let user = self
            .env
            .get_template("user")
            .map_err(|e| RunnerError::Template(format!("missing user template: {e}")))?
            .render(&ctx)
            .map_err(|e| RunnerError::Template(format!("user render failed: {e}")))?;

        Ok(RenderedPrompt { system, user })
    }
}

/// Read a template file from disk.
fn load_template(dir: &Path, filename: &str) -> Result<String, RunnerError> {
    let path = dir.join(filename);
    std::fs::read_to_string(&path)
        .map_err(|e| RunnerError::Template(format!("failed to read {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use newswire_world::starting_world;

    use super::*;

    fn temp_dir(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "newswire_templates_{name}_{}_{:?}",
            std::process::id(),
            std::thread::current().id(),
        ))
    }

    #[test]
    fn builtin_prompt_embeds_state_and_count() {
        let engine = PromptEngine::builtin();
        assert!(engine.is_ok(), "built-in templates should compile");
        let Ok(engine) = engine else { return };

        let mut world = starting_world();
        world.record_headlines(&[String::from("Gate maintenance completed.")]);

        let prompt = engine.render(&world, 10);
        assert!(prompt.is_ok());
        let Ok(prompt) = prompt else { return };

        assert!(
            prompt
                .system
                .starts_with("You are an interstellar news wire service in the year 2479.")
        );
        assert!(prompt.system.contains("No numbering"));
        assert!(prompt.user.contains("Generate 10 headlines dated in the year 2479."));
        assert!(prompt.user.contains("\"Andromeda Transit Hub\""));
        assert!(prompt.user.contains("Gate maintenance completed."));
        assert!(prompt.user.contains("  \"recent_events\": ["));
    }

    #[test]
    fn year_follows_world_state() {
        let Ok(engine) = PromptEngine::builtin() else { return };
        let mut world = starting_world();
        world.year = 2481;

        let prompt = engine.render(&world, 3);
        assert!(prompt.is_ok(), "render should succeed");
        let Ok(prompt) = prompt else { return };
        assert!(prompt.system.contains("year 2481"));
        assert!(prompt.user.contains("Generate 3 headlines dated in the year 2481."));
    }

    #[test]
    fn templates_dir_overrides_builtin() {
        let dir = temp_dir("override");
        std::fs::create_dir_all(&dir).ok();
        std::fs::write(dir.join("system.j2"), "Terse wire for {{ year }}.").ok();
        std::fs::write(
            dir.join("user.j2"),
            "{{ count }} items. Systems: {{ world_state }}",
        )
        .ok();

        let engine = PromptEngine::new(Some(&dir));
        assert!(engine.is_ok());
        let Ok(engine) = engine else { return };

        let prompt = engine.render(&starting_world(), 4);
        assert!(prompt.is_ok(), "render should succeed");
        let Ok(prompt) = prompt else { return };
        assert_eq!(prompt.system, "Terse wire for 2479.");
        assert!(prompt.user.starts_with("4 items. Systems: {"));
        assert!(prompt.user.contains("Kepler-442"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_template_returns_error() {
        let dir = temp_dir("missing");
        std::fs::create_dir_all(&dir).ok();
        std::fs::write(dir.join("system.j2"), "only the system prompt").ok();

        let result = PromptEngine::new(Some(&dir));
        assert!(matches!(result, Err(RunnerError::Template(_))));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn broken_template_returns_error() {
        let dir = temp_dir("broken");
        std::fs::create_dir_all(&dir).ok();
        std::fs::write(dir.join("system.j2"), "{% if %}").ok();
        std::fs::write(dir.join("user.j2"), "fine").ok();

        let result = PromptEngine::new(Some(&dir));
        assert!(matches!(result, Err(RunnerError::Template(_))));

        std::fs::remove_dir_all(&dir).ok();
    }
}
