//! momentum - task and daily-habit tracker CLI
//!
//! Parses the command line, stacks today's habit instances, and dispatches
//! to a single command or the interactive TUI.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use tracing_subscriber::EnvFilter;

use momentum::commands::*;
use momentum::stacker;
use momentum::storage::Storage;
use momentum::store::TaskStore;
use momentum::tui::run_tui;

#[derive(Parser)]
#[command(name = "momentum")]
#[command(about = "Local-first task and daily-habit tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task name (quoted if it has spaces)
        name: String,
        /// Mark as a daily habit (a fresh instance is stacked every day)
        #[arg(short, long)]
        daily: bool,
        /// Due date in YYYY-MM-DD (defaults to today)
        #[arg(short = 'D', long)]
        due: Option<String>,
    },
    /// List tasks (incomplete first, then by due date)
    List {
        /// Show completed tasks too
        #[arg(short, long)]
        all: bool,
    },
    /// Show the incomplete tasks due today
    Today,
    /// Show one-time tasks due within the next days
    Upcoming {
        /// Horizon in days (tomorrow through today + days)
        #[arg(short, long, default_value_t = 7)]
        days: i64,
    },
    /// Show a month calendar with per-day task counts
    Calendar {
        /// Month to show as YYYY-MM (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Toggle completion of a task
    Toggle {
        /// Unique id prefix (see `list`)
        id: String,
    },
    /// Remove a task
    Remove {
        /// Unique id prefix (see `list`)
        id: String,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
    /// Open interactive TUI
    Ui,
}

fn main() {
    // Tracing is opt-in via RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let shell_enum = match shell.as_str() {
            "bash" => Shell::Bash,
            "zsh" => Shell::Zsh,
            "fish" => Shell::Fish,
            "powershell" => Shell::PowerShell,
            "elvish" => Shell::Elvish,
            _ => {
                eprintln!("Unsupported shell: {}", shell);
                return;
            }
        };
        let mut cmd = Cli::command();
        generate(shell_enum, &mut cmd, "momentum", &mut io::stdout());
        return;
    }

    let mut store = TaskStore::load(Storage::from_env());
    // Stack today's habit instances exactly once per day, before anything
    // renders.
    stacker::run(&mut store);

    match cli.command {
        Some(Commands::Add { name, daily, due }) => cmd_add(&mut store, name, daily, due, false),
        Some(Commands::List { all }) => cmd_list(&store, all),
        Some(Commands::Today) => cmd_today(&store),
        Some(Commands::Upcoming { days }) => cmd_upcoming(&store, days),
        Some(Commands::Calendar { month }) => cmd_calendar(&store, month),
        Some(Commands::Toggle { id }) => cmd_toggle(&mut store, id, false),
        Some(Commands::Remove { id }) => cmd_remove(&mut store, id, false),
        Some(Commands::Completions { .. }) => unreachable!(),
        Some(Commands::Ui) | None => {
            if let Err(e) = run_tui(store) {
                eprintln!("Error running TUI: {}", e);
            }
        }
    }
}
