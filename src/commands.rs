use chrono::{Datelike, Local, NaiveDate};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use uuid::Uuid;

use crate::models::{day_start, Task};
use crate::query::{display_order, for_selected_date, group_by_date, upcoming};
use crate::store::TaskStore;

/// First eight characters of the id's simple form; what the tables show and
/// what `toggle`/`remove` accept as a prefix.
pub fn short_id(id: Uuid) -> String {
    id.simple().to_string().chars().take(8).collect()
}

/// Resolves a user-supplied id prefix against the current collection.
///
/// Unknown or ambiguous prefixes resolve to `None`; no task is mutated.
fn resolve_id(tasks: &[Task], needle: &str, silent: bool) -> Option<Uuid> {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    let matches: Vec<Uuid> = tasks
        .iter()
        .filter(|t| t.id.simple().to_string().starts_with(&needle))
        .map(|t| t.id)
        .collect();
    match matches.as_slice() {
        [id] => Some(*id),
        [] => {
            if !silent { eprintln!("No task matches id '{}'.", needle); }
            None
        }
        _ => {
            if !silent { eprintln!("Id '{}' is ambiguous ({} matches).", needle, matches.len()); }
            None
        }
    }
}

fn warn_if_stale(store: &TaskStore, silent: bool) {
    if store.is_stale() && !silent {
        eprintln!("Warning: tasks could not be written to disk; changes are held in memory only.");
    }
}

/// Adds a new task due on the given date (today when omitted).
pub fn cmd_add(store: &mut TaskStore, name: String, daily: bool, due: Option<String>, silent: bool) {
    let due_day = match due {
        Some(d) => match NaiveDate::parse_from_str(&d, "%Y-%m-%d") {
            Ok(date) => date,
            Err(e) => {
                if !silent { eprintln!("Invalid due date '{}': {}. Use YYYY-MM-DD.", d, e); }
                return;
            }
        },
        None => Local::now().date_naive(),
    };

    match store.add(&name, daily, day_start(due_day)) {
        Some(id) => {
            if !silent {
                let kind = if daily { "Habit" } else { "Task" };
                println!("{} added (id = {})", kind, short_id(id));
            }
        }
        None => {
            if !silent { println!("Task name is empty; nothing to add."); }
        }
    }
    warn_if_stale(store, silent);
}

/// Flips completion for the task matching the id prefix.
pub fn cmd_toggle(store: &mut TaskStore, id: String, silent: bool) {
    let Some(id) = resolve_id(store.snapshot(), &id, silent) else { return };
    store.toggle_complete(id);
    if !silent {
        let done = store
            .snapshot()
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.is_completed)
            .unwrap_or(false);
        println!("Task {} marked {}.", short_id(id), if done { "complete" } else { "incomplete" });
    }
    warn_if_stale(store, silent);
}

/// Removes the task matching the id prefix.
pub fn cmd_remove(store: &mut TaskStore, id: String, silent: bool) {
    let Some(id) = resolve_id(store.snapshot(), &id, silent) else { return };
    store.remove(id);
    if !silent { println!("Task {} removed.", short_id(id)); }
    warn_if_stale(store, silent);
}

fn task_table(tasks: &[&Task]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Type").add_attribute(Attribute::Bold),
            Cell::new("Due").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
            Cell::new("Completed").add_attribute(Attribute::Bold),
        ]);

    for t in tasks {
        let kind = if t.is_daily_habit { "Habit" } else { "One-time" };
        let status = if t.is_completed { "Done" } else { "Pending" };
        let status_color = if t.is_completed { Color::Green } else { Color::Yellow };
        let completed = t
            .completed_at
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();

        table.add_row(vec![
            Cell::new(short_id(t.id)),
            Cell::new(&t.name),
            Cell::new(kind).fg(if t.is_daily_habit { Color::Cyan } else { Color::Reset }),
            Cell::new(t.due_day()),
            Cell::new(status).fg(status_color),
            Cell::new(completed),
        ]);
    }
    table
}

/// Lists tasks in display order (incomplete first, then by due date).
/// Completed tasks are hidden unless `all` is set.
pub fn cmd_list(store: &TaskStore, all: bool) {
    let mut tasks = display_order(store.snapshot());
    if !all {
        tasks.retain(|t| !t.is_completed);
    }
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }
    println!("{}", task_table(&tasks));
}

/// Shows the incomplete tasks due today.
pub fn cmd_today(store: &TaskStore) {
    let today = Local::now().date_naive();
    let mut targets = for_selected_date(store.snapshot(), today);
    targets.sort_by(|a, b| a.due_date.cmp(&b.due_date));
    if targets.is_empty() {
        println!("Nothing due today.");
        return;
    }
    println!("Targets for {}:", today);
    println!("{}", task_table(&targets));
}

/// Shows incomplete one-time tasks due within the next `days` days
/// (tomorrow through `today + days`).
pub fn cmd_upcoming(store: &TaskStore, days: i64) {
    let today = Local::now().date_naive();
    let mut tasks = upcoming(store.snapshot(), today, days);
    tasks.sort_by(|a, b| a.due_date.cmp(&b.due_date));
    if tasks.is_empty() {
        println!("Nothing due in the next {} day(s).", days);
        return;
    }
    println!("{}", task_table(&tasks));
}

/// Renders a month grid with per-day task counts. `month` is `YYYY-MM`;
/// defaults to the current month.
pub fn cmd_calendar(store: &TaskStore, month: Option<String>) {
    let today = Local::now().date_naive();
    let first = match month {
        Some(m) => match NaiveDate::parse_from_str(&format!("{}-01", m), "%Y-%m-%d") {
            Ok(d) => d,
            Err(e) => {
                eprintln!("Invalid month '{}': {}. Use YYYY-MM.", m, e);
                return;
            }
        },
        None => today.with_day(1).unwrap(),
    };

    let groups = group_by_date(store.snapshot());
    let days_in_month = days_in_month(first);
    let leading = first.weekday().num_days_from_sunday() as usize;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]);

    let mut cells: Vec<Cell> = (0..leading).map(|_| Cell::new("")).collect();
    for day in 1..=days_in_month {
        let date = first.with_day(day).unwrap();
        let count = groups.get(&date).map(|g| g.len()).unwrap_or(0);
        let text = if count > 0 {
            format!("{:>2} ({})", day, count)
        } else {
            format!("{:>2}", day)
        };
        let mut cell = Cell::new(text);
        if date == today {
            cell = cell.add_attribute(Attribute::Bold).fg(Color::Cyan);
        } else if count > 0 {
            cell = cell.fg(Color::Yellow);
        }
        cells.push(cell);
        if cells.len() == 7 {
            table.add_row(cells.drain(..).collect::<Vec<_>>());
        }
    }
    if !cells.is_empty() {
        while cells.len() < 7 {
            cells.push(Cell::new(""));
        }
        table.add_row(cells);
    }

    println!("{}", first.format("%B %Y"));
    println!("{table}");
}

fn days_in_month(first: NaiveDate) -> u32 {
    let (y, m) = (first.year(), first.month());
    let next = if m == 12 {
        NaiveDate::from_ymd_opt(y + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(y, m + 1, 1)
    };
    next.and_then(|d| d.pred_opt()).map(|d| d.day()).unwrap_or(31)
}
