//! Workout session persistence.
//!
//! The in-progress workout and the last-used targets live under two
//! fixed keys of a [`KeyValueStore`]. Every operation here is
//! best-effort: failures are logged and swallowed, and unreadable data
//! is treated as absent.

use crate::storage::KeyValueStore;
use crate::{Targets, WorkoutState};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Key holding the in-progress workout
pub const SESSION_KEY: &str = "cindy_workout";

/// Key holding the targets of the last completed workout
pub const LAST_REPS_KEY: &str = "cindy_last_reps";

fn save_json<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) {
    let contents = match serde_json::to_string(value) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::error!("Failed to serialize {}: {}", key, e);
            return;
        }
    };

    if let Err(e) = store.set(key, &contents) {
        tracing::error!("Failed to save {}: {}", key, e);
    }
}

fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let contents = match store.get(key) {
        Ok(Some(contents)) => contents,
        Ok(None) => {
            tracing::debug!("No saved {} found", key);
            return None;
        }
        Err(e) => {
            tracing::error!("Failed to load {}: {}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&contents) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Failed to parse saved {}: {}. Ignoring it.", key, e);
            None
        }
    }
}

fn remove_key(store: &mut dyn KeyValueStore, key: &str) {
    if let Err(e) = store.remove(key) {
        tracing::error!("Failed to clear {}: {}", key, e);
    }
}

/// Persist the in-progress workout
pub fn save_session(store: &mut dyn KeyValueStore, state: &WorkoutState) {
    save_json(store, SESSION_KEY, state);
}

/// Load the in-progress workout, `None` if missing or unreadable
///
/// A blob whose counters break `current <= total` is treated as unreadable.
pub fn load_session(store: &dyn KeyValueStore) -> Option<WorkoutState> {
    let state: WorkoutState = load_json(store, SESSION_KEY)?;
    if !state.is_valid() {
        tracing::warn!("Saved {} has inconsistent counters. Ignoring it.", SESSION_KEY);
        return None;
    }
    Some(state)
}

/// Forget the in-progress workout
pub fn clear_session(store: &mut dyn KeyValueStore) {
    remove_key(store, SESSION_KEY);
}

/// Record the targets of a completed workout, replacing the previous record
pub fn save_last_reps(store: &mut dyn KeyValueStore, targets: &Targets) {
    save_json(store, LAST_REPS_KEY, targets);
}

/// Load the last-used targets, `None` if missing or unreadable
pub fn load_last_reps(store: &dyn KeyValueStore) -> Option<Targets> {
    load_json(store, LAST_REPS_KEY)
}
