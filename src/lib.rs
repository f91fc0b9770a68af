//! # Momentum
//!
//! A local-first task and daily-habit tracker for the terminal. Momentum combines a fast CLI for quick entry with an interactive TUI featuring a day view and a month calendar.
//!
//! ## Features
//!
//! *   **Daily Habits**: Mark a task as a daily habit and a fresh instance is stacked for it every day, automatically, at startup.
//! *   **Dual Interface**:
//!     *   **CLI**: Scriptable and quick for single commands.
//!     *   **TUI**: Interactive day view and month calendar.
//! *   **Calendar**: Month grid showing which days have activity.
//! *   **Data Persistence**: Tasks are stored in standard XDG data directories (JSON format) and written after every change.
//!
//! ## Usage
//!
//! ### Interactive Mode (TUI)
//!
//! Run the command without arguments to launch the interactive UI:
//!
//! ```bash
//! momentum
//! # or explicitly
//! momentum ui
//! ```
//!
//! #### TUI Key Bindings
//!
//! **Day View**
//! *   `q`: Quit
//! *   `a`: Add task for the selected date
//! *   `Space`: Toggle completion of the selected task
//! *   `d`: Delete selected task
//! *   `c`: Show/Hide completed tasks
//! *   `Left`/`Right`: Previous/next day
//! *   `t`: Jump to today
//! *   `v`: Switch to the calendar view
//!
//! **Calendar View**
//! *   Arrow keys: Move the day selection
//! *   `[` / `]`: Previous/next month
//! *   `Enter`: Open the selected day
//! *   `v`: Back to the day view
//!
//! ### Command Line Interface (CLI)
//!
//! ```bash
//! # One-time task (due defaults to today)
//! momentum add "File taxes" --due 2026-04-10
//!
//! # Daily habit; an instance is stacked for it every day from now on
//! momentum add "Meditate" --daily
//!
//! # Views
//! momentum list
//! momentum today
//! momentum upcoming --days 7
//! momentum calendar --month 2026-08
//!
//! # Mutations take a unique id prefix from `list`
//! momentum toggle 3fa8
//! momentum remove 3fa8
//! ```
//!
//! ## Data Storage
//!
//! Tasks are saved in your local data directory:
//! *   Linux: `~/.local/share/momentum/tasks.json`
//! *   macOS: `~/Library/Application Support/momentum/tasks.json`
//! *   Windows: `%APPDATA%\momentum\tasks.json`
//!
//! You can override this by setting the `MOMENTUM_DB` environment variable.
//! The habit-stacking day marker (`last_stacked`) lives beside the snapshot.
//!
//! Set `RUST_LOG` (e.g. `RUST_LOG=momentum=debug`) for diagnostics; logging
//! is off by default.

pub mod commands;
pub mod models;
pub mod query;
pub mod stacker;
pub mod storage;
pub mod store;
pub mod tui;
