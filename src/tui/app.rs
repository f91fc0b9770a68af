use chrono::{Datelike, Duration, Local, NaiveDate};
use ratatui::widgets::TableState;

use crate::models::{day_start, Task};
use crate::query::display_order;
use crate::store::TaskStore;

#[derive(PartialEq)]
pub enum InputMode {
    Normal,
    Adding,
}

pub enum ViewMode {
    Day,
    Calendar,
}

pub struct App {
    pub store: TaskStore,
    /// The date the day view targets; new tasks are created for it.
    pub selected_date: NaiveDate,
    /// Tasks shown in the day view, display-ordered.
    pub visible: Vec<Task>,
    pub state: TableState,
    pub view_mode: ViewMode,
    pub input_mode: InputMode,
    pub input_buffer: String,
    /// Add wizard: 0 = name, 1 = daily habit y/N.
    pub add_step: usize,
    pub pending_name: String,
    pub show_completed: bool,
}

impl App {
    pub fn new(store: TaskStore) -> App {
        let mut app = App {
            store,
            selected_date: Local::now().date_naive(),
            visible: Vec::new(),
            state: TableState::default(),
            view_mode: ViewMode::Day,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            add_step: 0,
            pending_name: String::new(),
            show_completed: false,
        };
        app.reload();
        app
    }

    /// Recomputes the day view list from the store snapshot.
    pub fn reload(&mut self) {
        let visible: Vec<Task> = display_order(self.store.snapshot())
            .into_iter()
            .filter(|t| t.due_day() == self.selected_date)
            .filter(|t| self.show_completed || !t.is_completed)
            .cloned()
            .collect();
        self.visible = visible;

        if self.visible.is_empty() {
            self.state.select(None);
        } else if let Some(i) = self.state.selected() {
            if i >= self.visible.len() {
                self.state.select(Some(self.visible.len() - 1));
            }
        } else {
            self.state.select(Some(0));
        }
    }

    /// Selects the next task in the day view.
    pub fn next(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.visible.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    /// Selects the previous task in the day view.
    pub fn previous(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.visible.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    /// Toggles completion of the selected task.
    pub fn toggle_selected(&mut self) {
        if let Some(i) = self.state.selected() {
            if let Some(t) = self.visible.get(i) {
                let id = t.id;
                self.store.toggle_complete(id);
                self.reload();
            }
        }
    }

    /// Deletes the selected task.
    pub fn delete_selected(&mut self) {
        if let Some(i) = self.state.selected() {
            if let Some(t) = self.visible.get(i) {
                let id = t.id;
                self.store.remove(id);
                self.reload();
            }
        }
    }

    /// Toggles the visibility of completed tasks in the day view.
    pub fn toggle_completed(&mut self) {
        self.show_completed = !self.show_completed;
        self.reload();
    }

    /// Switches between the day view and the calendar.
    pub fn toggle_view(&mut self) {
        self.view_mode = match self.view_mode {
            ViewMode::Day => ViewMode::Calendar,
            ViewMode::Calendar => ViewMode::Day,
        };
    }

    /// Moves the selected date by whole days (calendar arrows, day paging).
    pub fn shift_selected_date(&mut self, days: i64) {
        self.selected_date = self.selected_date + Duration::days(days);
        self.reload();
    }

    /// Moves the selected date by one month, clamping to the last day of the
    /// target month.
    pub fn shift_selected_month(&mut self, months: i32) {
        let total = self.selected_date.year() * 12 + self.selected_date.month0() as i32 + months;
        let (year, month) = (total.div_euclid(12), total.rem_euclid(12) as u32 + 1);
        let mut day = self.selected_date.day();
        while day > 28 && NaiveDate::from_ymd_opt(year, month, day).is_none() {
            day -= 1;
        }
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            self.selected_date = date;
            self.reload();
        }
    }

    /// Jumps the selection back to today.
    pub fn goto_today(&mut self) {
        self.selected_date = Local::now().date_naive();
        self.reload();
    }

    /// Initiates the "Add Task" wizard for the selected date.
    pub fn start_add(&mut self) {
        self.input_mode = InputMode::Adding;
        self.add_step = 0;
        self.pending_name.clear();
        self.input_buffer.clear();
    }

    /// Advances the add wizard by one step; a blank name cancels.
    pub fn handle_input(&mut self) {
        match self.add_step {
            0 => {
                if self.input_buffer.trim().is_empty() {
                    self.input_mode = InputMode::Normal;
                    self.input_buffer.clear();
                    return;
                }
                self.pending_name = self.input_buffer.clone();
                self.add_step = 1;
                self.input_buffer.clear();
            }
            _ => {
                let daily = matches!(
                    self.input_buffer.trim().to_lowercase().as_str(),
                    "y" | "yes"
                );
                let _ = self
                    .store
                    .add(&self.pending_name, daily, day_start(self.selected_date));
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
                self.reload();
            }
        }
    }
}
