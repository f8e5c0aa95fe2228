//! Form and Status Rendering
//!
//! Left side: labelled inputs of the active form. Right side: its status
//! area with the optional JSON detail block.

use crate::console::{FormState, StatusArea, StatusKind};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Width reserved for field labels
const LABEL_WIDTH: usize = 18;

pub fn render_form(f: &mut Frame, form: &FormState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {} ", form.kind.title()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    f.render_widget(block, area);

    if !form.has_fields() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter to fetch all clusters",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center);
        f.render_widget(msg, inner);
        return;
    }

    let lines: Vec<Line> = form
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let focused = i == form.focus;
            let marker = if field.required { "*" } else { " " };
            let label = format!(" {}{:<width$}", marker, field.label, width = LABEL_WIDTH);

            let label_style = if focused {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };

            let value = if field.value.is_empty() && !focused {
                Span::styled(field.placeholder, Style::default().fg(Color::DarkGray))
            } else if focused {
                Span::styled(
                    format!("{}_", field.value),
                    Style::default().fg(Color::White),
                )
            } else {
                Span::styled(field.value.clone(), Style::default().fg(Color::White))
            };

            Line::from(vec![Span::styled(label, label_style), value])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

pub fn render_status(f: &mut Frame, status: &StatusArea, area: Rect) {
    let color = match status.kind {
        StatusKind::Info => Color::Yellow,
        StatusKind::Success => Color::Green,
        StatusKind::Error => Color::Red,
    };

    let title = match (&status.updated_at, status.visible) {
        (Some(at), true) if status.is_pending() => {
            format!(" Result [{}] waiting ", at.format("%H:%M:%S"))
        }
        (Some(at), true) => format!(" Result [{}] ", at.format("%H:%M:%S")),
        _ => " Result ".to_string(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if status.visible {
            color
        } else {
            Color::DarkGray
        }))
        .title(Span::styled(title, Style::default().fg(Color::Cyan)))
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    f.render_widget(block, area);

    if !status.visible {
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (i, text) in status.message.lines().enumerate() {
        if i == 0 {
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {} ", status.kind.icon()),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(text.to_string(), Style::default().fg(color)),
            ]));
        } else {
            lines.push(Line::from(Span::raw(format!("   {}", text))));
        }
    }

    if let Some(detail) = &status.detail {
        lines.push(Line::from(""));
        lines.extend(detail.lines().map(highlight_json_line));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((status.scroll, 0));
    f.render_widget(paragraph, inner);
}

/// Color one line of pretty-printed JSON: keys cyan, strings green,
/// numbers light blue, booleans magenta, null dark gray
fn highlight_json_line(line: &str) -> Line<'static> {
    let indent_len = line.len() - line.trim_start().len();
    let (indent, rest) = line.split_at(indent_len);
    let mut spans = vec![Span::raw(format!(" {}", indent))];

    let (key, value) = match split_key(rest) {
        Some((k, v)) => (Some(k), v),
        None => (None, rest),
    };

    if let Some(key) = key {
        spans.push(Span::styled(key.to_string(), Style::default().fg(Color::Cyan)));
        spans.push(Span::raw(": "));
    }

    let trimmed = value.trim_end_matches(',');
    let style = if trimmed.starts_with('"') {
        Style::default().fg(Color::Green)
    } else if trimmed == "true" || trimmed == "false" {
        Style::default().fg(Color::Magenta)
    } else if trimmed == "null" {
        Style::default().fg(Color::DarkGray)
    } else if trimmed.parse::<f64>().is_ok() {
        Style::default().fg(Color::LightBlue)
    } else {
        Style::default()
    };
    spans.push(Span::styled(value.to_string(), style));

    Line::from(spans)
}

/// Split `"key": value` at the colon that follows the quoted key
fn split_key(s: &str) -> Option<(&str, &str)> {
    if !s.starts_with('"') {
        return None;
    }
    let mut escaped = false;
    for (i, c) in s.char_indices().skip(1) {
        match c {
            '\\' if !escaped => escaped = true,
            '"' if !escaped => {
                let after = &s[i + 1..];
                return after
                    .strip_prefix(": ")
                    .map(|value| (&s[..=i], value));
            }
            _ => escaped = false,
        }
    }
    None
}
