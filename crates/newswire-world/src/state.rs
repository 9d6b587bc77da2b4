//! The world-state document and the headline updater.
//!
//! [`WorldState`] mirrors the persisted JSON object. Keys the newswire does
//! not know about are kept in [`WorldState::extra`] so that hand edits to the
//! file survive a round trip and still reach the prompt.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::starting_world::STARTING_YEAR;

/// Maximum number of headlines kept in [`WorldState::recent_events`].
pub const MAX_RECENT_EVENTS: usize = 20;

/// Accumulated memory of the fictional setting, used to seed every prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    /// Current in-fiction year.
    #[serde(default = "default_year")]
    pub year: i32,
    /// Star systems and hubs the wire has reported on.
    #[serde(default)]
    pub known_systems: Vec<String>,
    /// Technologies treated as everyday infrastructure.
    #[serde(default)]
    pub technologies: Vec<String>,
    /// Most recent headlines, newest first. Never longer than
    /// [`MAX_RECENT_EVENTS`] after [`WorldState::record_headlines`].
    #[serde(default)]
    pub recent_events: Vec<String>,
    /// Any other top-level keys found in the persisted document.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

const fn default_year() -> i32 {
    STARTING_YEAR
}

impl WorldState {
    /// Prepend `headlines` (in order) to the recent events and drop the
    /// oldest entries beyond [`MAX_RECENT_EVENTS`].
    ///
    /// Repeated headlines are kept as-is.
    pub fn record_headlines(&mut self, headlines: &[String]) {
        let mut events =
            Vec::with_capacity(headlines.len().saturating_add(self.recent_events.len()));
        events.extend(headlines.iter().cloned());
        events.append(&mut self.recent_events);
        events.truncate(MAX_RECENT_EVENTS);
        self.recent_events = events;
    }

    /// Serialize the state the way it is embedded into the user prompt
    /// (pretty JSON, two-space indent).
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::starting_world::starting_world;

    fn headlines(prefix: &str, count: usize) -> Vec<String> {
        (0..count).map(|i| format!("{prefix} {i}.")).collect()
    }

    #[test]
    fn record_prepends_in_order() {
        let mut world = starting_world();
        world.recent_events = vec![String::from("Old report.")];

        let new = vec![
            String::from("Shipment arrives at Tau Ceti."),
            String::from("Gate maintenance completed."),
        ];
        world.record_headlines(&new);

        assert_eq!(
            world.recent_events,
            vec![
                String::from("Shipment arrives at Tau Ceti."),
                String::from("Gate maintenance completed."),
                String::from("Old report."),
            ]
        );
    }

    #[test]
    fn record_truncates_oldest() {
        let mut world = starting_world();
        world.recent_events = headlines("old", 15);

        let new = headlines("new", 10);
        world.record_headlines(&new);

        assert_eq!(world.recent_events.len(), MAX_RECENT_EVENTS);
        assert_eq!(world.recent_events.get(..10), Some(new.as_slice()));
        assert_eq!(world.recent_events.get(10).map(String::as_str), Some("old 0."));
        assert_eq!(world.recent_events.last().map(String::as_str), Some("old 9."));
    }

    #[test]
    fn record_more_than_limit_keeps_first_twenty_new() {
        let mut world = starting_world();
        let new = headlines("burst", 25);
        world.record_headlines(&new);

        assert_eq!(world.recent_events.len(), MAX_RECENT_EVENTS);
        assert_eq!(world.recent_events.first().map(String::as_str), Some("burst 0."));
        assert_eq!(world.recent_events.last().map(String::as_str), Some("burst 19."));
    }

    #[test]
    fn record_keeps_duplicates() {
        let mut world = starting_world();
        let same = vec![String::from("Gate maintenance completed.")];
        world.record_headlines(&same);
        world.record_headlines(&same);
        assert_eq!(world.recent_events.len(), 2);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let parsed: Result<WorldState, _> = serde_json::from_str("{}");
        assert!(parsed.is_ok());
        let Ok(world) = parsed else { return };
        assert_eq!(world.year, STARTING_YEAR);
        assert!(world.known_systems.is_empty());
        assert!(world.recent_events.is_empty());
    }

    #[test]
    fn unknown_keys_survive_round_trip() {
        let raw = r#"{
            "year": 2480,
            "known_systems": ["Sol"],
            "technologies": [],
            "recent_events": [],
            "factions": ["Outer Rim Compact"]
        }"#;
        let parsed: Result<WorldState, _> = serde_json::from_str(raw);
        assert!(parsed.is_ok(), "valid document should parse");
        let Ok(world) = parsed else { return };
        assert!(world.extra.contains_key("factions"));

        let json = world.to_pretty_json().unwrap_or_default();
        assert!(json.contains("Outer Rim Compact"));
        assert!(json.contains("  \"year\": 2480"));
    }
}
