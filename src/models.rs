use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a single tracked item: a one-time task or a dated instance of a
/// daily habit.
///
/// Field names are serialized in camelCase to match the on-disk snapshot
/// layout (`tasks.json`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, generated at creation and never reused.
    pub id: Uuid,
    /// User-supplied label. For habits this is also the recurrence key.
    pub name: String,
    /// Whether this task recurs daily.
    #[serde(default)]
    pub is_daily_habit: bool,
    /// Whether the task has been completed.
    #[serde(default)]
    pub is_completed: bool,
    /// The instant the task is scheduled for (ISO 8601). Only the local date
    /// portion is used for grouping.
    pub due_date: DateTime<Local>,
    /// Set when the task is completed, cleared when it is reopened.
    #[serde(default)]
    pub completed_at: Option<DateTime<Local>>,
}

impl Task {
    /// Constructs a fresh, incomplete task due at the given instant.
    pub fn new(name: String, is_daily_habit: bool, due_date: DateTime<Local>) -> Task {
        Task {
            id: Uuid::new_v4(),
            name,
            is_daily_habit,
            is_completed: false,
            due_date,
            completed_at: None,
        }
    }

    /// The local calendar date this task is due on.
    pub fn due_day(&self) -> NaiveDate {
        self.due_date.date_naive()
    }
}

/// Start-of-day instant for a local calendar date.
///
/// If midnight does not exist on that date (DST gap), the earliest valid
/// wall-clock time is used instead.
pub fn day_start(date: NaiveDate) -> DateTime<Local> {
    date.and_time(NaiveTime::MIN)
        .and_local_timezone(Local)
        .earliest()
        .unwrap_or_else(Local::now)
}
