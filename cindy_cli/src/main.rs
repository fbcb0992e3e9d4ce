mod interactive;
mod view;

use cindy_core::session::load_last_reps;
use cindy_core::*;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use view::TerminalView;

#[derive(Parser)]
#[command(name = "cindy")]
#[command(about = "Rep tracker for pullups, pushups and squats", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new workout
    Start {
        /// Pull-up target (defaults to last workout's)
        #[arg(long)]
        pullups: Option<u32>,

        /// Push-up target (defaults to last workout's)
        #[arg(long)]
        pushups: Option<u32>,

        /// Squat target (defaults to last workout's)
        #[arg(long)]
        squats: Option<u32>,
    },

    /// Log reps performed for an exercise
    Rep {
        /// pullups, pushups or squats
        exercise: String,

        /// Number of reps performed
        #[arg(default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=i64::from(i32::MAX)))]
        amount: u32,
    },

    /// Show the workout in progress (default)
    Status,

    /// Pause or resume the timer
    Timer,

    /// Finish the workout and remember its targets
    Complete,

    /// Discard the workout in progress
    Reset {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Clear any workout and show the last targets
    New,

    /// Interactive session with a live timer
    Session,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        cindy_core::logging::init_with_level("debug");
    } else {
        cindy_core::logging::init_with_level("warn");
    }

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let store = FileStore::new(&data_dir);
    tracing::debug!("Using data directory {:?}", data_dir);

    match cli.command.unwrap_or(Commands::Status) {
        Commands::Start {
            pullups,
            pushups,
            squats,
        } => cmd_start(store, &config, pullups, pushups, squats),
        Commands::Rep { exercise, amount } => cmd_rep(store, &exercise, amount),
        Commands::Status => cmd_status(store),
        Commands::Timer => cmd_timer(store),
        Commands::Complete => cmd_complete(store),
        Commands::Reset { yes } => cmd_reset(store, yes),
        Commands::New => cmd_new(store),
        Commands::Session => {
            let mut controller = WorkoutController::new(store, TerminalView::new(true));
            let interval = Duration::from_millis(config.timer.tick_interval_ms);
            interactive::run(&mut controller, interval)
        }
    }
}

fn controller(store: FileStore, assume_yes: bool) -> WorkoutController<FileStore, TerminalView> {
    WorkoutController::new(store, TerminalView::new(assume_yes))
}

/// Restore the saved workout, failing when there is none
fn resume(store: FileStore) -> Result<WorkoutController<FileStore, TerminalView>> {
    let mut c = controller(store, false);
    if !c.restore(chrono::Utc::now()) {
        return Err(Error::Other(
            "no workout in progress, run `cindy start` first".into(),
        ));
    }
    Ok(c)
}

fn cmd_start(
    store: FileStore,
    config: &Config,
    pullups: Option<u32>,
    pushups: Option<u32>,
    squats: Option<u32>,
) -> Result<()> {
    let fallback = load_last_reps(&store).unwrap_or_else(|| config.targets.to_targets());
    let targets = Targets::new(
        pullups.unwrap_or(fallback.pullups),
        pushups.unwrap_or(fallback.pushups),
        squats.unwrap_or(fallback.squats),
    );

    let mut c = controller(store, false);
    c.start_workout(targets, chrono::Utc::now());
    c.view().render();
    Ok(())
}

fn cmd_rep(store: FileStore, exercise: &str, amount: u32) -> Result<()> {
    let mut c = resume(store)?;
    let delta = i32::try_from(amount)
        .map(|a| -a)
        .map_err(|_| Error::Other(format!("rep amount {} is too large", amount)))?;

    if !c.decrement(exercise, delta) {
        eprintln!("Unknown exercise: {} (expected pullups, pushups or squats)", exercise);
    }
    c.view().render();
    Ok(())
}

fn cmd_status(store: FileStore) -> Result<()> {
    let mut c = controller(store, false);
    c.restore(chrono::Utc::now());
    c.view().render();
    Ok(())
}

fn cmd_timer(store: FileStore) -> Result<()> {
    let mut c = resume(store)?;
    let now = chrono::Utc::now();
    let elapsed = format_time(c.timer().elapsed_ms(now));

    if c.toggle_timer(now) {
        println!("Timer resumed at {}", elapsed);
    } else {
        println!("Timer paused at {}", elapsed);
    }
    Ok(())
}

fn cmd_complete(store: FileStore) -> Result<()> {
    let mut c = resume(store)?;
    let now = chrono::Utc::now();
    let finished = c.state().clone();
    let elapsed = format_time(c.timer().elapsed_ms(now));

    c.show_end_workout_dialog();
    if c.complete_workout().is_none() {
        return Err(Error::Other("no workout in progress".into()));
    }

    println!("\n✓ Workout complete in {}", elapsed);
    for (exercise, entry) in finished.entries() {
        let done = entry.total.saturating_sub(entry.current);
        if entry.bonus() > 0 {
            println!("  {:<9} {:>4} reps (+{} bonus)", exercise.label(), done, entry.bonus());
        } else {
            println!("  {:<9} {:>4} reps", exercise.label(), done);
        }
    }
    println!();
    Ok(())
}

fn cmd_reset(store: FileStore, yes: bool) -> Result<()> {
    let mut c = controller(store, yes);
    if !c.restore(chrono::Utc::now()) {
        println!("No workout in progress.");
        return Ok(());
    }

    if c.reset_workout() {
        println!("Workout reset.");
    } else {
        println!("Kept the workout in progress.");
    }
    Ok(())
}

fn cmd_new(store: FileStore) -> Result<()> {
    let mut c = controller(store, false);
    c.new_workout();
    c.view().render();
    Ok(())
}
