//! Core domain types for the Cindy rep tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - The three tracked exercises
//! - Per-exercise rep counters
//! - The persisted workout state and last-used targets
//! - The named UI screens

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Exercises
// ============================================================================

/// One of the three movements in a Cindy workout
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Exercise {
    Pullups,
    Pushups,
    Squats,
}

impl Exercise {
    /// All exercises in display order
    pub const ALL: [Exercise; 3] = [Exercise::Pullups, Exercise::Pushups, Exercise::Squats];

    pub fn name(&self) -> &'static str {
        match self {
            Exercise::Pullups => "pullups",
            Exercise::Pushups => "pushups",
            Exercise::Squats => "squats",
        }
    }

    /// Human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            Exercise::Pullups => "Pull-ups",
            Exercise::Pushups => "Push-ups",
            Exercise::Squats => "Squats",
        }
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Exercise {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pullups" => Ok(Exercise::Pullups),
            "pushups" => Ok(Exercise::Pushups),
            "squats" => Ok(Exercise::Squats),
            _ => Err(Error::UnknownExercise(s.to_string())),
        }
    }
}

// ============================================================================
// Rep Counters
// ============================================================================

/// Rep counter for a single exercise
///
/// `current` counts down towards zero; reps performed past zero are added
/// to `total` as bonus. `original_target` is the baseline for the bonus.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseEntry {
    pub total: u32,
    pub current: u32,
    pub original_target: u32,
}

impl ExerciseEntry {
    /// Fresh entry with all three counters at the target
    pub fn new(target: u32) -> Self {
        Self {
            total: target,
            current: target,
            original_target: target,
        }
    }

    /// Reps performed beyond the original target
    pub fn bonus(&self) -> u32 {
        self.total.saturating_sub(self.original_target)
    }
}

/// Target reps for each exercise
///
/// Also the shape of the "last used targets" record.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Targets {
    pub pullups: u32,
    pub pushups: u32,
    pub squats: u32,
}

impl Targets {
    pub fn new(pullups: u32, pushups: u32, squats: u32) -> Self {
        Self {
            pullups,
            pushups,
            squats,
        }
    }

    pub fn get(&self, exercise: Exercise) -> u32 {
        match exercise {
            Exercise::Pullups => self.pullups,
            Exercise::Pushups => self.pushups,
            Exercise::Squats => self.squats,
        }
    }
}

// ============================================================================
// Workout State
// ============================================================================

/// Full in-progress workout, as persisted between runs
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutState {
    pub pullups: ExerciseEntry,
    pub pushups: ExerciseEntry,
    pub squats: ExerciseEntry,

    /// Milliseconds accumulated up to the last pause/resume
    #[serde(default)]
    pub elapsed_time: u64,

    #[serde(default = "default_timer_paused")]
    pub is_timer_paused: bool,

    /// Wall-clock instant the timer last resumed, while running
    #[serde(default)]
    pub running_since: Option<DateTime<Utc>>,
}

fn default_timer_paused() -> bool {
    true
}

impl WorkoutState {
    /// Build a fresh workout from the given targets
    ///
    /// The timer fields start zeroed; callers start the timer separately.
    pub fn start(targets: Targets) -> Self {
        Self {
            pullups: ExerciseEntry::new(targets.pullups),
            pushups: ExerciseEntry::new(targets.pushups),
            squats: ExerciseEntry::new(targets.squats),
            elapsed_time: 0,
            is_timer_paused: true,
            running_since: None,
        }
    }

    pub fn entry(&self, exercise: Exercise) -> &ExerciseEntry {
        match exercise {
            Exercise::Pullups => &self.pullups,
            Exercise::Pushups => &self.pushups,
            Exercise::Squats => &self.squats,
        }
    }

    pub fn entry_mut(&mut self, exercise: Exercise) -> &mut ExerciseEntry {
        match exercise {
            Exercise::Pullups => &mut self.pullups,
            Exercise::Pushups => &mut self.pushups,
            Exercise::Squats => &mut self.squats,
        }
    }

    /// Entries paired with their exercise, in display order
    pub fn entries(&self) -> impl Iterator<Item = (Exercise, &ExerciseEntry)> {
        Exercise::ALL.into_iter().map(move |e| (e, self.entry(e)))
    }

    /// The original targets this workout was started with
    pub fn targets(&self) -> Targets {
        Targets {
            pullups: self.pullups.original_target,
            pushups: self.pushups.original_target,
            squats: self.squats.original_target,
        }
    }

    /// A saved state is worth resuming when any exercise has reps
    pub fn is_active(&self) -> bool {
        self.entries().any(|(_, entry)| entry.total > 0)
    }

    /// Counters respect `current <= total` and `original_target <= total`
    pub fn is_valid(&self) -> bool {
        self.entries().all(|(_, entry)| {
            entry.current <= entry.total && entry.original_target <= entry.total
        })
    }

    /// Every counter is at zero and every exercise had reps to do
    pub fn is_complete(&self) -> bool {
        self.entries()
            .all(|(_, entry)| entry.current == 0 && entry.total > 0)
    }
}

// ============================================================================
// Screens
// ============================================================================

/// The three named views of the app
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Setup,
    Workout,
    Complete,
}

impl Screen {
    pub fn id(&self) -> &'static str {
        match self {
            Screen::Setup => "setup-screen",
            Screen::Workout => "workout-screen",
            Screen::Complete => "complete-screen",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exercise_names() {
        assert_eq!("pullups".parse::<Exercise>().unwrap(), Exercise::Pullups);
        assert_eq!("PushUps".parse::<Exercise>().unwrap(), Exercise::Pushups);
        assert_eq!(" squats ".parse::<Exercise>().unwrap(), Exercise::Squats);

        match "burpees".parse::<Exercise>() {
            Err(Error::UnknownExercise(name)) => assert_eq!(name, "burpees"),
            other => panic!("Expected UnknownExercise, got {:?}", other),
        }
    }

    #[test]
    fn test_start_sets_all_counters_to_target() {
        let state = WorkoutState::start(Targets::new(10, 15, 20));

        assert_eq!(state.pullups, ExerciseEntry::new(10));
        assert_eq!(state.pushups, ExerciseEntry::new(15));
        assert_eq!(state.squats, ExerciseEntry::new(20));
        assert_eq!(state.squats.current, 20);
        assert_eq!(state.squats.total, 20);
        assert_eq!(state.squats.original_target, 20);
        assert_eq!(state.elapsed_time, 0);
    }

    #[test]
    fn test_bonus_never_negative() {
        let entry = ExerciseEntry {
            total: 12,
            current: 0,
            original_target: 10,
        };
        assert_eq!(entry.bonus(), 2);

        let entry = ExerciseEntry {
            total: 8,
            current: 0,
            original_target: 10,
        };
        assert_eq!(entry.bonus(), 0);
    }

    #[test]
    fn test_completion_requires_reps() {
        assert!(!WorkoutState::default().is_complete());
        assert!(!WorkoutState::default().is_active());

        let mut state = WorkoutState::start(Targets::new(1, 1, 1));
        assert!(state.is_active());
        assert!(!state.is_complete());

        for exercise in Exercise::ALL {
            state.entry_mut(exercise).current = 0;
        }
        assert!(state.is_complete());
    }

    #[test]
    fn test_validity_of_counters() {
        let mut state = WorkoutState::start(Targets::new(10, 15, 20));
        assert!(state.is_valid());
        assert!(WorkoutState::default().is_valid());

        state.pullups.total = 12;
        state.pullups.current = 0;
        assert!(state.is_valid());

        state.pushups.current = 16;
        assert!(!state.is_valid());

        state.pushups.current = 0;
        state.squats.total = 19;
        assert!(!state.is_valid());
    }

    #[test]
    fn test_serialized_field_names() {
        let state = WorkoutState::start(Targets::new(3, 4, 5));
        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["pullups"]["originalTarget"], 3);
        assert_eq!(json["squats"]["current"], 5);
        assert_eq!(json["elapsedTime"], 0);
        assert_eq!(json["isTimerPaused"], true);
    }

    #[test]
    fn test_older_blob_without_timer_fields() {
        let json = r#"{
            "pullups": {"total": 10, "current": 4, "originalTarget": 10},
            "pushups": {"total": 20, "current": 20, "originalTarget": 20},
            "squats": {"total": 30, "current": 0, "originalTarget": 30}
        }"#;

        let state: WorkoutState = serde_json::from_str(json).unwrap();
        assert_eq!(state.pullups.current, 4);
        assert_eq!(state.elapsed_time, 0);
        assert!(state.is_timer_paused);
        assert!(state.running_since.is_none());
    }
}
