//! Terminal rendering of the workout.

use cindy_core::display::timer_button_label;
use cindy_core::{Exercise, RepsDisplay, Screen, Targets, WorkoutView};
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

const BAR_WIDTH: usize = 20;

/// `WorkoutView` that keeps the latest values and prints them on demand
pub struct TerminalView {
    screen: Screen,
    reps: BTreeMap<Exercise, RepsDisplay>,
    timer_text: String,
    timer_paused: bool,
    dialog_open: bool,
    form: Option<Targets>,
    /// Answer confirmations without prompting
    assume_yes: bool,
    /// Echo timer changes as they happen
    live: bool,
}

impl TerminalView {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            screen: Screen::Setup,
            reps: BTreeMap::new(),
            timer_text: "0:00".into(),
            timer_paused: true,
            dialog_open: false,
            form: None,
            assume_yes,
            live: false,
        }
    }

    pub fn set_live(&mut self, live: bool) {
        self.live = live;
    }

    pub fn render(&self) {
        match self.screen {
            Screen::Setup => self.render_setup(),
            Screen::Workout => self.render_workout("WORKOUT"),
            Screen::Complete => {
                self.render_workout("ALL REPS DONE");
                println!("  Finish with `cindy complete` (or `end`, `done` in a session) to keep these targets.");
                println!();
            }
        }

        if self.dialog_open {
            println!("  End workout? Type 'done' to save it or 'reset' to discard it.");
            println!();
        }
    }

    fn render_setup(&self) {
        println!("\n╭─────────────────────────────────────────╮");
        println!("│  NEW WORKOUT");
        println!("╰─────────────────────────────────────────╯");
        println!();
        match self.form {
            Some(t) => {
                println!("  Last targets: {} pullups, {} pushups, {} squats", t.pullups, t.pushups, t.squats);
                println!(
                    "  Start with: cindy start --pullups {} --pushups {} --squats {}",
                    t.pullups, t.pushups, t.squats
                );
            }
            None => {
                println!("  No workout in progress.");
                println!("  Start with: cindy start --pullups N --pushups N --squats N");
            }
        }
        println!();
    }

    fn render_workout(&self, title: &str) {
        println!("\n╭─────────────────────────────────────────╮");
        println!("│  {}   ⏱ {}   {}", title, self.timer_text, timer_button_label(self.timer_paused));
        println!("╰─────────────────────────────────────────╯");
        println!();

        for reps in self.reps.values() {
            let filled = ((reps.progress_percent / 100.0) * BAR_WIDTH as f64).round() as usize;
            let bar = format!(
                "{}{}",
                "█".repeat(filled.min(BAR_WIDTH)),
                "░".repeat(BAR_WIDTH - filled.min(BAR_WIDTH))
            );
            let status = if reps.complete { "✓" } else { " " };
            let bonus = if reps.bonus > 0 {
                format!("  bonus {}", reps.bonus_label())
            } else {
                String::new()
            };

            println!(
                "  {} {:<9} {:>4} / {:<4} {}{}",
                status,
                reps.exercise.label(),
                reps.current,
                reps.total,
                bar,
                bonus
            );
        }
        println!();
    }
}

impl WorkoutView for TerminalView {
    fn show_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    fn update_reps_display(&mut self, reps: &RepsDisplay) {
        self.reps.insert(reps.exercise, reps.clone());
    }

    fn update_timer_display(&mut self, time: &str) {
        if self.timer_text == time {
            return;
        }
        self.timer_text = time.to_string();

        if self.live && self.screen != Screen::Setup {
            print!("\r  ⏱ {}  ", self.timer_text);
            let _ = io::stdout().flush();
        }
    }

    fn update_timer_button(&mut self, is_paused: bool) {
        self.timer_paused = is_paused;
    }

    fn show_completion_dialog(&mut self) {
        self.dialog_open = true;
    }

    fn hide_completion_dialog(&mut self) {
        self.dialog_open = false;
    }

    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("{} [y/N] ", message);
        let _ = io::stdout().flush();

        let mut input = String::new();
        match io::stdin().lock().read_line(&mut input) {
            Ok(_) => matches!(input.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                tracing::warn!("Failed to read confirmation: {}", e);
                false
            }
        }
    }

    fn reset_form(&mut self) {
        self.form = None;
        self.reps.clear();
    }

    fn set_form_values(&mut self, targets: &Targets) {
        self.form = Some(*targets);
    }
}
