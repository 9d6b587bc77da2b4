//! The setting used when no world state has been persisted yet.

use std::collections::BTreeMap;

use crate::state::WorldState;

/// The in-fiction year every fresh world starts in.
pub const STARTING_YEAR: i32 = 2479;

/// Build the starting world: four colonized systems, four infrastructure
/// technologies, and no recorded events.
///
/// A fresh value is built on every call so callers may mutate it freely.
pub fn starting_world() -> WorldState {
    WorldState {
        year: STARTING_YEAR,
        known_systems: owned(&[
            "Epsilon Eridani",
            "Kepler-442",
            "Andromeda Transit Hub",
            "Tau Ceti",
        ]),
        technologies: owned(&[
            "Teleportation Gates",
            "Stellar Shield Arrays",
            "Quantum Courier Network",
            "Autonomous Governance AIs",
        ]),
        recent_events: Vec::new(),
        extra: BTreeMap::new(),
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_world_contents() {
        let world = starting_world();
        assert_eq!(world.year, 2479);
        assert_eq!(world.known_systems.len(), 4);
        assert!(world.known_systems.iter().any(|s| s == "Tau Ceti"));
        assert_eq!(world.technologies.len(), 4);
        assert!(world.technologies.iter().any(|t| t == "Teleportation Gates"));
        assert!(world.recent_events.is_empty());
        assert!(world.extra.is_empty());
    }

    #[test]
    fn each_call_is_independent() {
        let mut first = starting_world();
        first.recent_events.push(String::from("Something happened."));
        let second = starting_world();
        assert!(second.recent_events.is_empty());
    }
}
