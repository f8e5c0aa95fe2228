//! Status Areas
//!
//! Per-form result display: an in-progress message, then a success or error
//! message that hides itself after a delay.

use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

/// Default delay before a finished status hides itself
pub const DEFAULT_HIDE_DELAY: Duration = Duration::from_secs(5);

/// Kind of message currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

impl StatusKind {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Info => "↻",
            Self::Success => "✓",
            Self::Error => "✗",
        }
    }
}

/// What a finished operation wants shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub kind: StatusKind,
    pub message: String,
    /// Pretty-printed JSON appended below the message
    pub detail: Option<String>,
}

impl StatusUpdate {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            message: message.into(),
            detail: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            message: message.into(),
            detail: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: String) -> Self {
        self.detail = Some(detail);
        self
    }
}

/// One status area
///
/// Every `apply` replaces the hide deadline: Info clears it, Success/Error
/// set a fresh one. A deadline from an older message therefore never hides
/// a newer one.
#[derive(Debug, Clone)]
pub struct StatusArea {
    pub kind: StatusKind,
    pub message: String,
    pub detail: Option<String>,
    pub visible: bool,
    pub updated_at: Option<DateTime<Local>>,
    /// Scroll offset into the detail block
    pub scroll: u16,
    hide_at: Option<Instant>,
    hide_delay: Duration,
}

impl Default for StatusArea {
    fn default() -> Self {
        Self::new(DEFAULT_HIDE_DELAY)
    }
}

impl StatusArea {
    pub fn new(hide_delay: Duration) -> Self {
        Self {
            kind: StatusKind::Info,
            message: String::new(),
            detail: None,
            visible: false,
            updated_at: None,
            scroll: 0,
            hide_at: None,
            hide_delay,
        }
    }

    /// Show an update as of `now`
    pub fn apply(&mut self, update: StatusUpdate, now: Instant) {
        self.kind = update.kind;
        self.message = update.message;
        self.detail = update.detail;
        self.visible = true;
        self.scroll = 0;
        self.updated_at = Some(Local::now());
        self.hide_at = if update.kind.is_terminal() {
            Some(now + self.hide_delay)
        } else {
            None
        };
    }

    /// Hide the area once its deadline has passed.
    /// Returns true if this call hid it.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.hide_at {
            Some(deadline) if now >= deadline => {
                self.visible = false;
                self.hide_at = None;
                true
            }
            _ => false,
        }
    }

    #[cfg(test)]
    pub fn hide_at(&self) -> Option<Instant> {
        self.hide_at
    }

    pub fn hide_delay(&self) -> Duration {
        self.hide_delay
    }

    pub fn is_pending(&self) -> bool {
        self.visible && self.kind == StatusKind::Info
    }

    pub fn scroll_down(&mut self, lines: u16) {
        let max = self
            .detail
            .as_ref()
            .map(|d| u16::try_from(d.lines().count()).unwrap_or(u16::MAX))
            .unwrap_or(0);
        self.scroll = self.scroll.saturating_add(lines).min(max.saturating_sub(1));
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_never_hides() {
        let mut area = StatusArea::default();
        let t0 = Instant::now();
        area.apply(StatusUpdate::info("creating..."), t0);
        assert!(area.visible);
        assert!(area.hide_at().is_none());
        assert!(!area.tick(t0 + Duration::from_secs(60)));
        assert!(area.visible);
    }

    #[test]
    fn test_success_hides_after_delay() {
        let mut area = StatusArea::default();
        let t0 = Instant::now();
        area.apply(StatusUpdate::success("ok"), t0);
        assert!(!area.tick(t0 + Duration::from_millis(4999)));
        assert!(area.visible);
        assert!(area.tick(t0 + Duration::from_secs(5)));
        assert!(!area.visible);
    }

    #[test]
    fn test_new_submit_replaces_deadline() {
        let mut area = StatusArea::default();
        let t0 = Instant::now();
        area.apply(StatusUpdate::error("boom"), t0);

        // new submit at t0+4s, finishes at t0+4.5s
        area.apply(StatusUpdate::info("creating..."), t0 + Duration::from_secs(4));
        area.apply(
            StatusUpdate::success("ok"),
            t0 + Duration::from_millis(4500),
        );

        // original deadline passes without hiding the newer message
        assert!(!area.tick(t0 + Duration::from_secs(5)));
        assert!(area.visible);
        assert_eq!(area.message, "ok");
        assert!(area.tick(t0 + Duration::from_millis(9500)));
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut area = StatusArea::default();
        area.apply(
            StatusUpdate::success("found").with_detail("a\nb\nc".to_string()),
            Instant::now(),
        );
        area.scroll_down(10);
        assert_eq!(area.scroll, 2);
        area.scroll_up(5);
        assert_eq!(area.scroll, 0);
    }

    #[test]
    fn test_scroll_saturates_on_huge_detail() {
        let mut area = StatusArea::default();
        let detail = vec!["{}"; 65_540].join("\n");
        area.apply(
            StatusUpdate::success("found 65540 clusters").with_detail(detail),
            Instant::now(),
        );
        area.scroll_down(10);
        assert_eq!(area.scroll, 10);
        area.scroll_down(u16::MAX);
        assert_eq!(area.scroll, u16::MAX - 1);
    }
}
