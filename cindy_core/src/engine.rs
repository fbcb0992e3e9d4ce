//! Decrement engine for rep counters.
//!
//! Reps performed count `current` down to zero. Anything performed past
//! zero rolls into `total` as bonus, so `total` only ever grows once a
//! workout has started.

use crate::{Exercise, ExerciseEntry, Result, WorkoutState};

/// Record `reps` performed for an entry
///
/// 1. **Crossing zero**: `current` is consumed and the remainder is bonus.
/// 2. **Already at zero**: all of `reps` is bonus.
/// 3. **Otherwise**: `current` drops by `reps`.
pub fn decrement(entry: ExerciseEntry, reps: u32) -> ExerciseEntry {
    let mut next = entry;

    if entry.current > 0 && entry.current < reps {
        next.current = 0;
        next.total = entry.total.saturating_add(reps - entry.current);
    } else if entry.current == 0 {
        next.total = entry.total.saturating_add(reps);
    } else {
        next.current = entry.current - reps;
    }

    next
}

/// Apply a signed rep delta to an entry
///
/// Negative deltas are reps performed and go through [`decrement`].
/// Positive deltas raise `current`, capped at `total`.
pub fn apply_delta(entry: ExerciseEntry, delta: i32) -> ExerciseEntry {
    let magnitude = delta.unsigned_abs();
    if delta < 0 {
        return decrement(entry, magnitude);
    }

    let mut next = entry;
    next.current = entry.current.saturating_add(magnitude).min(entry.total);
    next
}

/// Apply a delta to one exercise of a workout, looked up by name
///
/// Unknown names are an error and leave the state untouched.
pub fn apply_named_delta(state: &mut WorkoutState, name: &str, delta: i32) -> Result<Exercise> {
    let exercise: Exercise = name.parse()?;
    let entry = state.entry_mut(exercise);
    let before = *entry;
    *entry = apply_delta(before, delta);

    tracing::debug!(
        "{}: current {} -> {}, total {} -> {}",
        exercise,
        before.current,
        entry.current,
        before.total,
        entry.total
    );

    if entry.bonus() > before.bonus() {
        tracing::info!("{} bonus reps: +{}", exercise, entry.bonus());
    }

    Ok(exercise)
}
