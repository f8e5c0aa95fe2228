//! Terminal User Interface rendering module
//!
//! Renders the console with ratatui: a header, a tab bar with one tab per
//! operation, the active form on the left and its status area on the right.
//!
//! - `header` - Header bar with API origin and in-flight counts
//! - `forms` - Form inputs and status areas
//! - `help` - Help overlay showing keybindings

mod forms;
mod header;
mod help;

use crate::app::{App, Mode};
use crate::console::FormKind;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
    Frame,
};

pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Length(1), // Tabs
            Constraint::Min(1),    // Form + status
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    header::render(f, app, chunks[0]);
    render_tabs(f, app, chunks[1]);
    render_main_content(f, app, chunks[2]);
    render_footer(f, app, chunks[3]);

    if app.mode == Mode::Help {
        help::render(f, app);
    }
}

fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = FormKind::ALL
        .iter()
        .map(|kind| {
            let pane = app.pane(*kind);
            let marker = if pane.in_flight > 0 { " ↻" } else { "" };
            Line::from(format!(" {}{} ", kind.title(), marker))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.active.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
        .divider("|");

    f.render_widget(tabs, area);
}

fn render_main_content(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let pane = app.active_pane();
    forms::render_form(f, &pane.form, chunks[0]);
    forms::render_status(f, &pane.status, chunks[1]);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let key = Style::default().fg(Color::Yellow);
    let mut spans = vec![
        Span::styled(" Tab", key),
        Span::raw(": switch  "),
        Span::styled("Enter", key),
        Span::raw(": submit  "),
    ];

    if app.active_pane().form.has_fields() {
        spans.extend([
            Span::styled("↑/↓", key),
            Span::raw(": field  "),
            Span::styled("Ctrl+r", key),
            Span::raw(": reset  "),
        ]);
    }

    spans.extend([
        Span::styled("PgUp/PgDn", key),
        Span::raw(": scroll  "),
        Span::styled("F1", key),
        Span::raw(": help  "),
        Span::styled("Esc", key),
        Span::raw(": quit"),
    ]);

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
