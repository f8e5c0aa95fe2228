//! Header Component
//!
//! Displays the API origin and how many requests are in flight.

use crate::app::App;
use crate::VERSION;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" tcluster v{} ", VERSION),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    f.render_widget(block, area);

    let in_flight: usize = app.panes.iter().map(|p| p.in_flight).sum();

    let api = Line::from(vec![
        Span::styled(" API: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.client.base_url(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let requests = Line::from(vec![
        Span::styled(" Requests: ", Style::default().fg(Color::DarkGray)),
        if in_flight > 0 {
            Span::styled(
                format!("{} in flight", in_flight),
                Style::default().fg(Color::Yellow),
            )
        } else {
            Span::styled("idle", Style::default().fg(Color::Green))
        },
    ]);

    f.render_widget(Paragraph::new(vec![api, requests]), inner);
}
