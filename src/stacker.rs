//! Daily habit stacking.
//!
//! Once per calendar day, every habit name known to the store gets a fresh
//! incomplete instance due today. A persisted day marker makes the run
//! idempotent across repeated process starts within the same day.

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::models::day_start;
use crate::query::distinct_habit_names;
use crate::store::TaskStore;

/// Runs the stacker for today. Call once at process start, before the first
/// render.
pub fn run(store: &mut TaskStore) -> usize {
    stack_for_day(store, Local::now().date_naive())
}

/// Stacks habit instances for the given day and returns how many were
/// created.
///
/// Only additive: existing tasks are never mutated or removed. A habit is
/// identified by its name; there is no separate habit-definition entity, so
/// renaming a habit starts a new lineage.
pub fn stack_for_day(store: &mut TaskStore, today: NaiveDate) -> usize {
    let marker = today.format("%Y-%m-%d").to_string();
    if store.storage().load_last_stacked().as_deref() == Some(marker.as_str()) {
        debug!("habits already stacked for {marker}");
        return 0;
    }

    let names = distinct_habit_names(store.snapshot());
    let mut created = 0;
    for name in names {
        let has_instance_today = store
            .snapshot()
            .iter()
            .any(|t| t.is_daily_habit && t.name == name && t.due_day() == today);
        if !has_instance_today && store.add(&name, true, day_start(today)).is_some() {
            created += 1;
        }
    }

    if let Err(e) = store.storage().save_last_stacked(&marker) {
        warn!("failed to record last-stacked day: {e}");
    }
    if created > 0 {
        info!("stacked {created} habit instance(s) for {marker}");
    }
    created
}
