//! Event Handling
//!
//! Keyboard handling for tcluster.

use crate::app::{App, Mode};
use crate::console::FormKind;
use anyhow::Result;
use crossterm::event::{poll, read, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Handle events, returns true if app should quit
pub fn handle_events(app: &mut App) -> Result<bool> {
    if poll(Duration::from_millis(100))? {
        if let Event::Key(key) = read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(handle_key_event(app, key.code, key.modifiers));
            }
        }
    }
    Ok(false)
}

pub fn handle_key_event(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> bool {
    // Global quit shortcut
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, code, modifiers),
        Mode::Help => {
            handle_help_mode(app, code);
            false
        }
    }
}

fn handle_normal_mode(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Esc => return true,

        // Pane switching
        KeyCode::Tab => app.next_pane(),
        KeyCode::BackTab => app.previous_pane(),

        // Field focus
        KeyCode::Down => app.active_pane_mut().form.focus_next(),
        KeyCode::Up => app.active_pane_mut().form.focus_previous(),

        // Detail block scrolling
        KeyCode::PageDown => app.active_pane_mut().status.scroll_down(10),
        KeyCode::PageUp => app.active_pane_mut().status.scroll_up(10),

        KeyCode::Enter => app.submit_active(),

        KeyCode::Char('r') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.active_pane_mut().form.reset();
        },
        KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.active_pane_mut().form.clear_focused();
        },

        KeyCode::F(1) => app.enter_help_mode(),

        // The list pane has nothing to type into, so plain keys are free there
        KeyCode::Char('?') if app.active == FormKind::List => app.enter_help_mode(),
        KeyCode::Char('q') if app.active == FormKind::List => return true,

        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
            app.active_pane_mut().form.insert_char(c);
        },
        KeyCode::Backspace => app.active_pane_mut().form.backspace(),

        _ => {},
    }

    false
}

fn handle_help_mode(app: &mut App, code: KeyCode) {
    if matches!(
        code,
        KeyCode::Esc | KeyCode::Enter | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q')
    ) {
        app.exit_help_mode();
    }
}
