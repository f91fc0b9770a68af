use chrono::{Datelike, Local};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use super::app::{App, InputMode, ViewMode};
use crate::query::group_by_date;

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Table / calendar
            Constraint::Length(3), // Help
        ].as_ref())
        .split(f.area());

    match app.view_mode {
        ViewMode::Day => render_day(f, app, chunks[0]),
        ViewMode::Calendar => render_calendar(f, app, chunks[0]),
    }

    let help_text = match app.input_mode {
        InputMode::Normal => match app.view_mode {
            ViewMode::Day => "q: Quit | a: Add | Space: Toggle Done | d: Del | c: Show Done | ←/→: Day | t: Today | v: Calendar",
            ViewMode::Calendar => "q: Quit | Arrows: Move | [ ]: Month | t: Today | Enter: Open Day | v: Day View",
        },
        InputMode::Adding => "Enter: Next Step | Esc: Cancel",
    };

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, chunks[1]);

    // Render input box if needed
    if app.input_mode == InputMode::Adding {
        let area = centered_rect(60, 3, f.area());
        f.render_widget(Clear, area);

        let title = match app.add_step {
            0 => format!("Add Task for {}: Enter Name", app.selected_date),
            _ => "Daily habit? (y/N)".to_string(),
        };

        let input = Paragraph::new(app.input_buffer.as_str())
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title(title));

        f.render_widget(input, area);
    }
}

fn render_day(f: &mut Frame, app: &mut App, area: Rect) {
    let today = Local::now().date_naive();

    let rows: Vec<Row> = app
        .visible
        .iter()
        .map(|t| {
            let mark = if t.is_completed { "[x]" } else { "[ ]" };
            let kind = if t.is_daily_habit { "Habit" } else { "One-time" };
            let done_at = t
                .completed_at
                .map(|at| at.format("%H:%M").to_string())
                .unwrap_or_default();

            let style = if t.is_completed {
                Style::default().fg(Color::DarkGray)
            } else if t.is_daily_habit {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(mark),
                Cell::from(t.name.clone()),
                Cell::from(kind),
                Cell::from(t.due_day().to_string()),
                Cell::from(done_at),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Min(20),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(8),
    ];

    let open = app.visible.iter().filter(|t| !t.is_completed).count();
    let day_label = if app.selected_date == today {
        "Today".to_string()
    } else {
        app.selected_date.format("%a").to_string()
    };
    let mut title = format!(
        "Momentum - {} {} ({} open)",
        day_label, app.selected_date, open
    );
    if app.store.is_stale() {
        title.push_str(" - UNSAVED: storage write failed");
    }

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["", "Name", "Type", "Due", "Done"])
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .bottom_margin(1),
        )
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_calendar(f: &mut Frame, app: &App, area: Rect) {
    let today = Local::now().date_naive();
    let first = app.selected_date.with_day(1).unwrap();
    let groups = group_by_date(app.store.snapshot());

    let leading = first.weekday().num_days_from_sunday() as usize;
    let mut rows: Vec<Row> = Vec::new();
    let mut cells: Vec<Cell> = (0..leading).map(|_| Cell::from("")).collect();

    let mut date = first;
    while date.month() == first.month() {
        let count = groups.get(&date).map(|g| g.len()).unwrap_or(0);
        let text = if count > 0 {
            format!("{:>2} ({})", date.day(), count)
        } else {
            format!("{:>2}", date.day())
        };

        let mut style = if count > 0 {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        if date == today {
            style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
        }
        if date == app.selected_date {
            style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
        }
        cells.push(Cell::from(text).style(style));

        if cells.len() == 7 {
            rows.push(Row::new(std::mem::take(&mut cells)));
        }
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }
    if !cells.is_empty() {
        rows.push(Row::new(cells));
    }

    let widths = [Constraint::Length(8); 7];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"])
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .bottom_margin(1),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Momentum - {}", first.format("%B %Y"))),
        );

    f.render_widget(table, area);
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height - height) / 2),
            Constraint::Length(height),
            Constraint::Length((r.height - height) / 2),
        ].as_ref())
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ].as_ref())
        .split(popup_layout[1])[1]
}
