//! Presentation helpers shared by every front end.

use crate::{Exercise, ExerciseEntry};

/// Everything a front end needs to draw one exercise card
#[derive(Clone, Debug, PartialEq)]
pub struct RepsDisplay {
    pub exercise: Exercise,
    pub current: u32,
    pub total: u32,
    pub original_target: u32,
    pub bonus: u32,
    /// Remaining reps as a percentage of total, 0..=100
    pub progress_percent: f64,
    /// The countdown has reached zero
    pub complete: bool,
}

impl RepsDisplay {
    pub fn for_entry(exercise: Exercise, entry: &ExerciseEntry) -> Self {
        let total = entry.total.max(1) as f64;
        let progress_percent = (entry.current as f64 / total * 100.0).min(100.0);

        Self {
            exercise,
            current: entry.current,
            total: entry.total,
            original_target: entry.original_target,
            bonus: entry.bonus(),
            progress_percent,
            complete: entry.current == 0,
        }
    }

    /// Bonus badge text, e.g. `+3`
    pub fn bonus_label(&self) -> String {
        format!("+{}", self.bonus)
    }
}

/// Format milliseconds as `m:ss`
pub fn format_time(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}", minutes, seconds)
}

/// Label for the pause/resume button
pub fn timer_button_label(is_paused: bool) -> &'static str {
    if is_paused {
        "▶ Resume"
    } else {
        "⏸ Pause"
    }
}
