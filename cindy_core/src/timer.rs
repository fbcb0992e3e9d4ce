//! Elapsed-time workout timer with pause/resume.
//!
//! The timer never reads the clock itself; every operation takes the
//! current instant so the same code drives the interactive loop, the
//! one-shot CLI commands and the tests.

use crate::WorkoutState;
use chrono::{DateTime, Utc};

/// Pause/resume elapsed-time counter
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkoutTimer {
    /// Milliseconds accumulated before the current run
    accumulated_ms: u64,
    /// Set while running
    running_since: Option<DateTime<Utc>>,
}

impl WorkoutTimer {
    /// A stopped timer at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    pub fn is_paused(&self) -> bool {
        !self.is_running()
    }

    /// Elapsed milliseconds as of `now`
    ///
    /// A clock that moved backwards contributes nothing.
    pub fn elapsed_ms(&self, now: DateTime<Utc>) -> u64 {
        match self.running_since {
            Some(since) => {
                let run = (now - since).num_milliseconds().max(0) as u64;
                self.accumulated_ms.saturating_add(run)
            }
            None => self.accumulated_ms,
        }
    }

    /// Reset to zero and start running
    pub fn start(&mut self, now: DateTime<Utc>) {
        self.accumulated_ms = 0;
        self.running_since = Some(now);
        tracing::debug!("Timer started");
    }

    /// Resume from the frozen value; no-op while running
    pub fn resume(&mut self, now: DateTime<Utc>) {
        if self.running_since.is_none() {
            self.running_since = Some(now);
            tracing::debug!("Timer resumed at {} ms", self.accumulated_ms);
        }
    }

    /// Freeze at the current value; no-op while paused
    pub fn pause(&mut self, now: DateTime<Utc>) {
        if self.running_since.is_some() {
            self.accumulated_ms = self.elapsed_ms(now);
            self.running_since = None;
            tracing::debug!("Timer paused at {} ms", self.accumulated_ms);
        }
    }

    /// Flip between running and paused, returning true when now running
    pub fn toggle(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_running() {
            self.pause(now);
        } else {
            self.resume(now);
        }
        self.is_running()
    }

    /// Reset to zero and pause
    pub fn stop(&mut self) {
        self.accumulated_ms = 0;
        self.running_since = None;
    }

    /// Restore a timer from a persisted workout
    pub fn from_state(state: &WorkoutState) -> Self {
        let running_since = if state.is_timer_paused {
            None
        } else {
            state.running_since
        };

        Self {
            accumulated_ms: state.elapsed_time,
            running_since,
        }
    }

    /// Write the timer fields of a workout for persistence
    pub fn write_to(&self, state: &mut WorkoutState) {
        state.elapsed_time = self.accumulated_ms;
        state.is_timer_paused = self.is_paused();
        state.running_since = self.running_since;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Targets;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_new_timer_is_paused_at_zero() {
        let timer = WorkoutTimer::new();
        assert!(timer.is_paused());
        assert_eq!(timer.elapsed_ms(t0() + Duration::hours(1)), 0);
    }

    #[test]
    fn test_runs_with_clock() {
        let mut timer = WorkoutTimer::new();
        timer.start(t0());
        assert_eq!(timer.elapsed_ms(t0() + Duration::milliseconds(1500)), 1500);
    }

    #[test]
    fn test_pause_freezes_and_resume_continues() {
        let mut timer = WorkoutTimer::new();
        timer.start(t0());

        assert!(!timer.toggle(t0() + Duration::seconds(10)));
        assert_eq!(timer.elapsed_ms(t0() + Duration::seconds(10)), 10_000);
        assert_eq!(timer.elapsed_ms(t0() + Duration::seconds(500)), 10_000);

        assert!(timer.toggle(t0() + Duration::seconds(60)));
        assert_eq!(timer.elapsed_ms(t0() + Duration::seconds(65)), 15_000);
    }

    #[test]
    fn test_start_resets() {
        let mut timer = WorkoutTimer::new();
        timer.start(t0());
        timer.pause(t0() + Duration::seconds(30));

        timer.start(t0() + Duration::seconds(40));
        assert!(timer.is_running());
        assert_eq!(timer.elapsed_ms(t0() + Duration::seconds(41)), 1_000);
    }

    #[test]
    fn test_stop_resets_and_pauses() {
        let mut timer = WorkoutTimer::new();
        timer.start(t0());
        timer.stop();
        assert!(timer.is_paused());
        assert_eq!(timer.elapsed_ms(t0() + Duration::seconds(5)), 0);
    }

    #[test]
    fn test_clock_going_backwards() {
        let mut timer = WorkoutTimer::new();
        timer.start(t0());
        assert_eq!(timer.elapsed_ms(t0() - Duration::seconds(5)), 0);
    }

    #[test]
    fn test_state_roundtrip_while_running() {
        let mut timer = WorkoutTimer::new();
        timer.start(t0());
        timer.pause(t0() + Duration::seconds(20));
        timer.resume(t0() + Duration::seconds(30));

        let mut state = WorkoutState::start(Targets::new(1, 2, 3));
        timer.write_to(&mut state);
        assert_eq!(state.elapsed_time, 20_000);
        assert!(!state.is_timer_paused);

        let restored = WorkoutTimer::from_state(&state);
        assert_eq!(restored, timer);
        assert_eq!(restored.elapsed_ms(t0() + Duration::seconds(40)), 30_000);
    }

    #[test]
    fn test_state_roundtrip_while_paused() {
        let mut timer = WorkoutTimer::new();
        timer.start(t0());
        timer.pause(t0() + Duration::seconds(7));

        let mut state = WorkoutState::default();
        timer.write_to(&mut state);
        assert!(state.is_timer_paused);
        assert!(state.running_since.is_none());

        let restored = WorkoutTimer::from_state(&state);
        assert_eq!(restored.elapsed_ms(t0() + Duration::hours(2)), 7_000);
    }
}
