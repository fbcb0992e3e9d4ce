//! Interactive workout session.
//!
//! The controller is only touched on the calling thread. Two helper
//! threads feed it events over a channel: one reads stdin lines, the
//! other ticks the timer display while the timer runs.

use crate::view::TerminalView;
use cindy_core::{Exercise, FileStore, Result, Targets, WorkoutController};
use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

type Controller = WorkoutController<FileStore, TerminalView>;

enum Event {
    Input(String),
    InputClosed,
    Tick,
}

/// Periodic tick source, cancelled when the timer stops
struct Ticker {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl Ticker {
    fn start(interval: Duration, tx: Sender<Event>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        let handle = thread::spawn(move || loop {
            thread::sleep(interval);
            if flag.load(Ordering::Relaxed) || tx.send(Event::Tick).is_err() {
                break;
            }
        });

        tracing::debug!("Ticker started ({} ms)", interval.as_millis());
        Self { stop, handle }
    }

    fn cancel(self) {
        self.stop.store(true, Ordering::Relaxed);
        if self.handle.join().is_err() {
            tracing::warn!("Ticker thread panicked");
        }
        tracing::debug!("Ticker cancelled");
    }
}

/// Parsed session command
#[derive(Debug, PartialEq)]
enum Command {
    Start(Targets),
    Rep(String, i32),
    Timer,
    End,
    Done,
    Reset,
    New,
    Show,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let head = parts.next().unwrap_or("").to_lowercase();
    let args: Vec<&str> = parts.collect();

    let command = match head.as_str() {
        "start" => {
            let nums: Vec<u32> = args.iter().filter_map(|a| a.parse().ok()).collect();
            match nums.as_slice() {
                [p, u, s] => Command::Start(Targets::new(*p, *u, *s)),
                _ => return None,
            }
        }
        "t" | "timer" => Command::Timer,
        "e" | "end" => Command::End,
        "done" => Command::Done,
        "reset" => Command::Reset,
        "n" | "new" => Command::New,
        "?" | "h" | "help" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        "" | "show" => Command::Show,
        name => {
            let exercise = match name {
                "p" => Exercise::Pullups.name().to_string(),
                "u" => Exercise::Pushups.name().to_string(),
                "s" => Exercise::Squats.name().to_string(),
                other => other.to_string(),
            };
            let amount = match args.first() {
                Some(a) => a.parse::<i32>().ok().filter(|n| *n > 0)?,
                None => 1,
            };
            Command::Rep(exercise, amount)
        }
    };
    Some(command)
}

fn print_help() {
    println!("─────────────────────────────────────────");
    println!("  start P U S   begin a workout (pullups pushups squats)");
    println!("  p|u|s [n]     log n pullups / pushups / squats (default 1)");
    println!("  t             pause or resume the timer");
    println!("  end           end the workout (then 'done' to save or 'reset' to discard)");
    println!("  <enter>       redraw");
    println!("  new           back to setup");
    println!("  q             quit (progress is kept)");
}

/// Run the interactive loop until the user quits or stdin closes
pub fn run(controller: &mut Controller, tick_interval: Duration) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    spawn_input_reader(tx.clone());

    controller.view_mut().set_live(true);
    controller.restore(chrono::Utc::now());
    controller.view().render();
    print_help();

    let mut ticker: Option<Ticker> = None;
    sync_ticker(controller, &mut ticker, tick_interval, &tx);

    let result = event_loop(controller, &rx, &mut ticker, tick_interval, &tx);

    if let Some(t) = ticker.take() {
        t.cancel();
    }
    result
}

fn event_loop(
    controller: &mut Controller,
    rx: &Receiver<Event>,
    ticker: &mut Option<Ticker>,
    tick_interval: Duration,
    tx: &Sender<Event>,
) -> Result<()> {
    for event in rx.iter() {
        match event {
            Event::Tick => {
                controller.tick(chrono::Utc::now());
            }
            Event::InputClosed => break,
            Event::Input(line) => {
                let Some(command) = parse_command(&line) else {
                    println!("Unrecognised command: {}", line.trim());
                    continue;
                };
                if command == Command::Quit {
                    break;
                }
                handle_command(controller, command);
                sync_ticker(controller, ticker, tick_interval, tx);
            }
        }
    }
    println!();
    Ok(())
}

fn needs_workout(command: &Command) -> bool {
    matches!(
        command,
        Command::Rep(..) | Command::Timer | Command::End | Command::Done
    )
}

fn handle_command(controller: &mut Controller, command: Command) {
    if needs_workout(&command) && !controller.state().is_active() {
        println!("No workout in progress. Type 'start P U S' first.");
        return;
    }

    let now = chrono::Utc::now();
    match command {
        Command::Start(targets) => controller.start_workout(targets, now),
        Command::Rep(exercise, amount) => {
            if !controller.decrement(&exercise, -amount) {
                println!("Unknown exercise: {}", exercise);
                return;
            }
        }
        Command::Timer => {
            controller.toggle_timer(now);
        }
        Command::End => controller.show_end_workout_dialog(),
        Command::Done => {
            controller.complete_workout();
        }
        Command::Reset => {
            controller.reset_workout();
        }
        Command::New => {
            controller.new_workout();
        }
        Command::Show => {
            controller.tick(now);
        }
        Command::Help => {
            print_help();
            return;
        }
        Command::Quit => return,
    }
    controller.view().render();
}

/// Keep exactly one ticker alive while the timer runs
fn sync_ticker(
    controller: &Controller,
    ticker: &mut Option<Ticker>,
    tick_interval: Duration,
    tx: &Sender<Event>,
) {
    let running = controller.timer().is_running();
    match (running, ticker.is_some()) {
        (true, false) => *ticker = Some(Ticker::start(tick_interval, tx.clone())),
        (false, true) => {
            if let Some(t) = ticker.take() {
                t.cancel();
            }
        }
        _ => {}
    }
}

fn spawn_input_reader(tx: Sender<Event>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(Event::Input(line)).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to read input: {}", e);
                    break;
                }
            }
        }
        let _ = tx.send(Event::InputClosed);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rep_shortcuts() {
        assert_eq!(
            parse_command("p 5"),
            Some(Command::Rep("pullups".into(), 5))
        );
        assert_eq!(parse_command("u"), Some(Command::Rep("pushups".into(), 1)));
        assert_eq!(
            parse_command("squats 10"),
            Some(Command::Rep("squats".into(), 10))
        );
        assert_eq!(parse_command("s many"), None);
    }

    #[test]
    fn test_parse_rejects_out_of_range_amounts() {
        assert_eq!(parse_command("p 0"), None);
        assert_eq!(parse_command("u -3"), None);
        assert_eq!(parse_command("s 3000000000"), None);
        assert_eq!(
            parse_command("s 2147483647"),
            Some(Command::Rep("squats".into(), i32::MAX))
        );
    }

    #[test]
    fn test_workout_commands_need_a_workout() {
        assert!(needs_workout(&Command::Rep("pullups".into(), 1)));
        assert!(needs_workout(&Command::Timer));
        assert!(needs_workout(&Command::End));
        assert!(needs_workout(&Command::Done));
        assert!(!needs_workout(&Command::Start(Targets::new(1, 2, 3))));
        assert!(!needs_workout(&Command::New));
        assert!(!needs_workout(&Command::Reset));
    }

    #[test]
    fn test_parse_start() {
        assert_eq!(
            parse_command("start 10 15 20"),
            Some(Command::Start(Targets::new(10, 15, 20)))
        );
        assert_eq!(parse_command("start 10 15"), None);
    }

    #[test]
    fn test_parse_controls() {
        assert_eq!(parse_command("t"), Some(Command::Timer));
        assert_eq!(parse_command("END"), Some(Command::End));
        assert_eq!(parse_command("done"), Some(Command::Done));
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command(""), Some(Command::Show));
    }

    #[test]
    fn test_ticker_sends_until_cancelled() {
        let (tx, rx) = mpsc::channel();
        let ticker = Ticker::start(Duration::from_millis(5), tx);

        assert!(matches!(
            rx.recv_timeout(Duration::from_secs(2)),
            Ok(Event::Tick)
        ));

        ticker.cancel();
        // Drain anything sent before the flag was seen
        while rx.try_recv().is_ok() {}
        thread::sleep(Duration::from_millis(30));
        assert!(rx.try_recv().is_err());
    }
}
