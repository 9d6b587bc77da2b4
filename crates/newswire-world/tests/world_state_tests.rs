//! Integration tests for world-state persistence and the headline updater.

use newswire_world::{MAX_RECENT_EVENTS, StateStore, StoreError, WorldState, starting_world};

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "newswire_world_it_{name}_{}.json",
        std::process::id()
    ))
}

fn numbered(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{prefix} report {i}.")).collect()
}

#[test]
fn recent_events_length_is_bounded() {
    for (previous, added) in [(0, 10), (5, 10), (10, 10), (19, 1), (3, 0), (20, 20)] {
        let mut world = starting_world();
        world.recent_events = numbered("old", previous);
        let new = numbered("new", added);

        world.record_headlines(&new);

        let expected = MAX_RECENT_EVENTS.min(previous.saturating_add(added));
        assert_eq!(
            world.recent_events.len(),
            expected,
            "previous={previous} added={added}"
        );
        let head = world.recent_events.get(..added.min(MAX_RECENT_EVENTS));
        assert_eq!(head, new.get(..added.min(MAX_RECENT_EVENTS)));
    }
}

#[test]
fn state_survives_consecutive_runs() {
    let path = temp_path("consecutive");
    std::fs::remove_file(&path).ok();
    let store = StateStore::new(&path);

    for run in 0..3 {
        let mut world = store.load().unwrap_or_else(|_| starting_world());
        world.record_headlines(&numbered(&format!("run {run}"), 10));
        assert!(store.save(&world).is_ok());
    }

    let loaded = store.load();
    assert!(loaded.is_ok());
    let world = loaded.unwrap_or_else(|_| starting_world());
    assert_eq!(world.recent_events.len(), MAX_RECENT_EVENTS);
    assert_eq!(
        world.recent_events.first().map(String::as_str),
        Some("run 2 report 0.")
    );
    assert_eq!(
        world.recent_events.last().map(String::as_str),
        Some("run 1 report 9.")
    );

    std::fs::remove_file(&path).ok();
}

#[test]
fn persisted_file_is_plain_json_object() {
    let path = temp_path("plain_json");
    let store = StateStore::new(&path);
    assert!(store.save(&starting_world()).is_ok());

    let raw = std::fs::read_to_string(&path).unwrap_or_default();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap_or_default();
    assert_eq!(value.get("year"), Some(&serde_json::json!(2479)));
    assert!(value.get("known_systems").is_some_and(serde_json::Value::is_array));
    assert!(value.get("recent_events").is_some_and(serde_json::Value::is_array));

    std::fs::remove_file(&path).ok();
}

#[test]
fn malformed_state_is_not_replaced_by_defaults() {
    let path = temp_path("malformed");
    std::fs::write(&path, "not json at all").ok();

    let result: Result<WorldState, StoreError> = StateStore::new(&path).load();
    assert!(matches!(result, Err(StoreError::Parse { .. })));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap_or_default(),
        "not json at all"
    );

    std::fs::remove_file(&path).ok();
}
