//! Pure view derivations over a store snapshot.
//!
//! Every function here recomputes from the full snapshot on each call; there
//! is no cached derived state to invalidate. Dataset sizes are personal-scale.

use std::collections::{BTreeMap, HashSet};

use chrono::{Duration, NaiveDate};

use crate::models::Task;

/// All tasks keyed by their local due date, in encounter order within a day.
///
/// Calendar cells with activity are exactly the keys of this map.
pub fn group_by_date(snapshot: &[Task]) -> BTreeMap<NaiveDate, Vec<&Task>> {
    let mut groups: BTreeMap<NaiveDate, Vec<&Task>> = BTreeMap::new();
    for t in snapshot {
        groups.entry(t.due_day()).or_default().push(t);
    }
    groups
}

/// Incomplete tasks due exactly on `date`; the primary "targets for this
/// day" list.
pub fn for_selected_date(snapshot: &[Task], date: NaiveDate) -> Vec<&Task> {
    snapshot
        .iter()
        .filter(|t| !t.is_completed && t.due_day() == date)
        .collect()
}

/// Incomplete daily habits.
pub fn daily_habits(snapshot: &[Task]) -> Vec<&Task> {
    snapshot.iter().filter(|t| !t.is_completed && t.is_daily_habit).collect()
}

/// Incomplete one-time tasks.
pub fn one_time(snapshot: &[Task]) -> Vec<&Task> {
    snapshot.iter().filter(|t| !t.is_completed && !t.is_daily_habit).collect()
}

/// Completed tasks, most recently completed first.
pub fn completed(snapshot: &[Task]) -> Vec<&Task> {
    let mut done: Vec<&Task> = snapshot.iter().filter(|t| t.is_completed).collect();
    done.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
    done
}

/// Incomplete one-time tasks due after `from` (exclusive) and no later than
/// `from + horizon_days` (inclusive).
pub fn upcoming(snapshot: &[Task], from: NaiveDate, horizon_days: i64) -> Vec<&Task> {
    let end = from + Duration::days(horizon_days);
    snapshot
        .iter()
        .filter(|t| {
            !t.is_completed && !t.is_daily_habit && t.due_day() > from && t.due_day() <= end
        })
        .collect()
}

/// Display order: incomplete before completed, then by due date ascending.
/// The sort is stable, so ties keep encounter order.
pub fn display_order(snapshot: &[Task]) -> Vec<&Task> {
    let mut tasks: Vec<&Task> = snapshot.iter().collect();
    tasks.sort_by(|a, b| {
        a.is_completed
            .cmp(&b.is_completed)
            .then(a.due_date.cmp(&b.due_date))
    });
    tasks
}

/// Distinct habit names in first-seen order, projected over every task ever
/// flagged as a daily habit (completed or not, any date).
pub fn distinct_habit_names(snapshot: &[Task]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for t in snapshot.iter().filter(|t| t.is_daily_habit) {
        if seen.insert(t.name.clone()) {
            names.push(t.name.clone());
        }
    }
    names
}
