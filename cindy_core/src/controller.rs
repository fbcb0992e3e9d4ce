//! Workout controller: command handlers driving a view.
//!
//! The controller owns the workout state, the timer and the store. A
//! front end forwards user commands to the handlers below and renders
//! through the [`WorkoutView`] it handed over at construction.

use crate::display::{format_time, RepsDisplay};
use crate::session;
use crate::storage::KeyValueStore;
use crate::timer::WorkoutTimer;
use crate::{engine, Error, Screen, Targets, WorkoutState};
use chrono::{DateTime, Utc};

/// UI collaborator rendering the workout
pub trait WorkoutView {
    /// Switch to one of the three named screens
    fn show_screen(&mut self, screen: Screen);

    fn update_reps_display(&mut self, reps: &RepsDisplay);

    fn update_timer_display(&mut self, time: &str);

    fn update_timer_button(&mut self, is_paused: bool);

    fn show_completion_dialog(&mut self);

    fn hide_completion_dialog(&mut self);

    /// Ask a yes/no question
    fn confirm(&mut self, message: &str) -> bool;

    /// Clear the setup form
    fn reset_form(&mut self);

    /// Pre-fill the setup form
    fn set_form_values(&mut self, targets: &Targets);
}

/// Single owner of an in-progress workout
pub struct WorkoutController<S, V> {
    state: WorkoutState,
    timer: WorkoutTimer,
    screen: Screen,
    store: S,
    view: V,
}

impl<S: KeyValueStore, V: WorkoutView> WorkoutController<S, V> {
    /// Controller with no workout, showing nothing yet
    pub fn new(store: S, view: V) -> Self {
        Self {
            state: WorkoutState::default(),
            timer: WorkoutTimer::new(),
            screen: Screen::Setup,
            store,
            view,
        }
    }

    pub fn state(&self) -> &WorkoutState {
        &self.state
    }

    pub fn timer(&self) -> &WorkoutTimer {
        &self.timer
    }

    /// Screen most recently shown
    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_parts(self) -> (S, V) {
        (self.store, self.view)
    }

    /// Resume a saved workout if there is one
    ///
    /// Returns true when a workout was resumed. Otherwise the setup
    /// screen is shown, pre-filled with the last-used targets.
    pub fn restore(&mut self, now: DateTime<Utc>) -> bool {
        match session::load_session(&self.store) {
            Some(saved) if saved.is_active() => {
                tracing::info!("Resuming saved workout");
                self.timer = WorkoutTimer::from_state(&saved);
                self.state = saved;
                self.show_screen(Screen::Workout);
                self.update_ui();
                self.refresh_timer(now);
                true
            }
            _ => {
                self.show_screen(Screen::Setup);
                if let Some(last) = session::load_last_reps(&self.store) {
                    self.view.set_form_values(&last);
                }
                false
            }
        }
    }

    /// Begin a fresh workout and start the timer
    pub fn start_workout(&mut self, targets: Targets, now: DateTime<Utc>) {
        tracing::info!(
            "Starting workout: {} pullups, {} pushups, {} squats",
            targets.pullups,
            targets.pushups,
            targets.squats
        );

        self.state = WorkoutState::start(targets);
        self.timer.start(now);
        self.persist();
        self.show_screen(Screen::Workout);
        self.update_ui();
        self.refresh_timer(now);
    }

    /// Apply a rep delta to the named exercise
    ///
    /// Unknown names, and reps logged with no workout in progress, are
    /// logged and ignored, returning false.
    pub fn decrement(&mut self, exercise: &str, delta: i32) -> bool {
        if !self.state.is_active() {
            tracing::warn!("Ignoring {} {}: no workout in progress", exercise, delta);
            return false;
        }

        match engine::apply_named_delta(&mut self.state, exercise, delta) {
            Ok(_) => {
                self.persist();
                self.update_ui();
                true
            }
            Err(Error::UnknownExercise(name)) => {
                tracing::error!("Unknown exercise: {}", name);
                false
            }
            Err(e) => {
                tracing::error!("Failed to apply {} to {}: {}", delta, exercise, e);
                false
            }
        }
    }

    /// Pause or resume the timer, returning true when now running
    pub fn toggle_timer(&mut self, now: DateTime<Utc>) -> bool {
        if !self.state.is_active() {
            tracing::warn!("Ignoring timer toggle: no workout in progress");
            return false;
        }

        let running = self.timer.toggle(now);
        self.persist();
        self.refresh_timer(now);
        running
    }

    /// Periodic refresh of the elapsed-time display
    pub fn tick(&mut self, now: DateTime<Utc>) -> u64 {
        let elapsed = self.timer.elapsed_ms(now);
        self.view.update_timer_display(&format_time(elapsed));
        elapsed
    }

    pub fn show_end_workout_dialog(&mut self) {
        if !self.state.is_active() {
            tracing::warn!("No workout in progress to end");
            return;
        }
        self.view.show_completion_dialog();
    }

    /// Finish the workout, remembering its targets for next time
    ///
    /// Returns `None` and leaves the last-used targets alone when no
    /// workout is in progress.
    pub fn complete_workout(&mut self) -> Option<Targets> {
        self.view.hide_completion_dialog();
        if !self.state.is_active() {
            tracing::warn!("No workout in progress to complete");
            return None;
        }

        let targets = self.state.targets();
        session::save_last_reps(&mut self.store, &targets);
        tracing::info!("Workout complete after {}", format_time(self.state.elapsed_time));

        self.clear_workout();
        self.show_screen(Screen::Setup);
        Some(targets)
    }

    /// Abandon the workout if the user confirms
    pub fn reset_workout(&mut self) -> bool {
        self.view.hide_completion_dialog();
        if !self.view.confirm("Reset this workout?") {
            return false;
        }

        tracing::info!("Workout reset");
        self.clear_workout();
        self.show_screen(Screen::Setup);
        true
    }

    /// Back to setup, pre-filled with the last-used targets
    pub fn new_workout(&mut self) -> Option<Targets> {
        let last = session::load_last_reps(&self.store);
        self.clear_workout();

        if let Some(ref targets) = last {
            self.view.set_form_values(targets);
        }

        self.show_screen(Screen::Setup);
        last
    }

    fn clear_workout(&mut self) {
        session::clear_session(&mut self.store);
        self.timer.stop();
        self.view.update_timer_display(&format_time(0));
        self.view.update_timer_button(true);
        self.state = WorkoutState::default();
        self.view.reset_form();
    }

    fn persist(&mut self) {
        self.timer.write_to(&mut self.state);
        session::save_session(&mut self.store, &self.state);
    }

    fn show_screen(&mut self, screen: Screen) {
        self.screen = screen;
        self.view.show_screen(screen);
    }

    fn refresh_timer(&mut self, now: DateTime<Utc>) {
        self.view.update_timer_button(self.timer.is_paused());
        self.tick(now);
    }

    fn update_ui(&mut self) {
        for (exercise, entry) in self.state.entries() {
            self.view
                .update_reps_display(&RepsDisplay::for_entry(exercise, entry));
        }

        if self.state.is_complete() {
            self.show_screen(Screen::Complete);
        }
    }
}
