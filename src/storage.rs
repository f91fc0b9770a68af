use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::PathBuf;

use tracing::warn;

use crate::models::Task;

/// Handle to the durable snapshot files: the task collection (`tasks.json`)
/// and the habit-stacking day marker (`last_stacked`), kept side by side.
#[derive(Debug, Clone)]
pub struct Storage {
    tasks_path: PathBuf,
}

impl Storage {
    /// Resolves the snapshot location the way the CLI does:
    ///
    /// 1. `MOMENTUM_DB` environment variable.
    /// 2. `~/.local/share/momentum/tasks.json` (on Linux).
    /// 3. `./tasks.json` (fallback).
    pub fn from_env() -> Storage {
        let path = std::env::var("MOMENTUM_DB").map(PathBuf::from).unwrap_or_else(|_| {
            let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
            p.push("momentum");
            if !p.exists() {
                let _ = fs::create_dir_all(&p);
            }
            p.push("tasks.json");
            p
        });
        Storage { tasks_path: path }
    }

    /// Storage rooted at an explicit snapshot path. Used by tests.
    pub fn at(tasks_path: PathBuf) -> Storage {
        Storage { tasks_path }
    }

    pub fn tasks_path(&self) -> &PathBuf {
        &self.tasks_path
    }

    fn marker_path(&self) -> PathBuf {
        let mut p = self.tasks_path.clone();
        p.pop();
        p.push("last_stacked");
        p
    }

    /// Loads the task snapshot.
    ///
    /// A missing, unreadable, or corrupt snapshot is treated as "no prior
    /// data" and yields an empty collection; this never fails.
    pub fn load_tasks(&self) -> Vec<Task> {
        if !self.tasks_path.exists() {
            return Vec::new();
        }
        let mut f = match OpenOptions::new().read(true).open(&self.tasks_path) {
            Ok(f) => f,
            Err(_) => return Vec::new(),
        };
        let mut s = String::new();
        if f.read_to_string(&mut s).is_err() {
            return Vec::new();
        }
        serde_json::from_str(&s).unwrap_or_else(|e| {
            warn!("task snapshot at {} is unreadable ({e}); starting empty", self.tasks_path.display());
            Vec::new()
        })
    }

    /// Saves the full task collection, overwriting the existing snapshot.
    pub fn save_tasks(&self, tasks: &[Task]) -> std::io::Result<()> {
        let s = serde_json::to_string_pretty(tasks).unwrap();
        let mut f = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.tasks_path)?;
        f.write_all(s.as_bytes())?;
        Ok(())
    }

    /// Reads the day marker written by the last habit-stacking run.
    pub fn load_last_stacked(&self) -> Option<String> {
        let s = fs::read_to_string(self.marker_path()).ok()?;
        let s = s.trim();
        if s.is_empty() {
            None
        } else {
            Some(s.to_string())
        }
    }

    /// Records the day marker for today's habit-stacking run.
    pub fn save_last_stacked(&self, day: &str) -> std::io::Result<()> {
        fs::write(self.marker_path(), day)
    }
}
