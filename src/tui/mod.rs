pub mod app;
pub mod ui;

use std::io;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::store::TaskStore;
use app::{App, InputMode, ViewMode};
use ui::ui;

pub fn run_tui(store: TaskStore) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(store);

    // Run loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match app.input_mode {
                InputMode::Normal => match app.view_mode {
                    ViewMode::Day => match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Down | KeyCode::Char('j') => app.next(),
                        KeyCode::Up | KeyCode::Char('k') => app.previous(),
                        KeyCode::Char(' ') => app.toggle_selected(),
                        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
                        KeyCode::Char('a') => app.start_add(),
                        KeyCode::Char('c') => app.toggle_completed(),
                        KeyCode::Left | KeyCode::Char('h') => app.shift_selected_date(-1),
                        KeyCode::Right | KeyCode::Char('l') => app.shift_selected_date(1),
                        KeyCode::Char('t') => app.goto_today(),
                        KeyCode::Char('v') => app.toggle_view(),
                        _ => {}
                    },
                    ViewMode::Calendar => match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Left | KeyCode::Char('h') => app.shift_selected_date(-1),
                        KeyCode::Right | KeyCode::Char('l') => app.shift_selected_date(1),
                        KeyCode::Up | KeyCode::Char('k') => app.shift_selected_date(-7),
                        KeyCode::Down | KeyCode::Char('j') => app.shift_selected_date(7),
                        KeyCode::Char('[') => app.shift_selected_month(-1),
                        KeyCode::Char(']') => app.shift_selected_month(1),
                        KeyCode::Char('t') => app.goto_today(),
                        KeyCode::Enter | KeyCode::Char('v') => app.toggle_view(),
                        _ => {}
                    },
                },
                InputMode::Adding => match key.code {
                    KeyCode::Enter => app.handle_input(),
                    KeyCode::Esc => {
                        app.input_mode = InputMode::Normal;
                        app.input_buffer.clear();
                    }
                    KeyCode::Char(c) => {
                        app.input_buffer.push(c);
                    }
                    KeyCode::Backspace => {
                        app.input_buffer.pop();
                    }
                    _ => {}
                },
            }
        }
    }
}
