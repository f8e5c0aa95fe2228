//! Application State
//!
//! Central state for the console: one form and one status area per
//! operation, plus the channel that carries finished requests back from
//! their tasks.

use crate::api::client::ClusterClient;
use crate::console::ops::{self, pending_message, render_rejected, Outcome, Submission};
use crate::console::{FormKind, FormState, StatusArea, StatusUpdate};
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

/// Application modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal, // Editing forms
    Help,   // F1 help popup
}

/// A request that finished in the background
#[derive(Debug)]
pub struct Completion {
    pub kind: FormKind,
    pub request_id: Uuid,
    pub outcome: Outcome,
}

/// Form plus its status area
#[derive(Debug, Clone)]
pub struct Pane {
    pub form: FormState,
    pub status: StatusArea,
    /// Requests sent from this pane that haven't come back yet
    pub in_flight: usize,
}

/// Main application state
pub struct App {
    pub client: ClusterClient,
    pub panes: Vec<Pane>,
    pub active: FormKind,
    pub mode: Mode,
    completions_tx: UnboundedSender<Completion>,
    completions_rx: UnboundedReceiver<Completion>,
}

impl App {
    pub fn new(client: ClusterClient, hide_delay: Duration) -> Self {
        let (completions_tx, completions_rx) = unbounded_channel();
        let panes = FormKind::ALL
            .iter()
            .map(|kind| Pane {
                form: FormState::new(*kind),
                status: StatusArea::new(hide_delay),
                in_flight: 0,
            })
            .collect();

        Self {
            client,
            panes,
            active: FormKind::Create,
            mode: Mode::Normal,
            completions_tx,
            completions_rx,
        }
    }

    pub fn pane(&self, kind: FormKind) -> &Pane {
        &self.panes[kind.index()]
    }

    pub fn pane_mut(&mut self, kind: FormKind) -> &mut Pane {
        &mut self.panes[kind.index()]
    }

    pub fn active_pane(&self) -> &Pane {
        self.pane(self.active)
    }

    pub fn active_pane_mut(&mut self) -> &mut Pane {
        let kind = self.active;
        self.pane_mut(kind)
    }

    pub fn next_pane(&mut self) {
        self.active = self.active.next();
    }

    pub fn previous_pane(&mut self) {
        self.active = self.active.previous();
    }

    pub fn enter_help_mode(&mut self) {
        self.mode = Mode::Help;
    }

    pub fn exit_help_mode(&mut self) {
        self.mode = Mode::Normal;
    }

    /// Submit the active pane's form
    pub fn submit_active(&mut self) {
        let kind = self.active;
        self.submit(kind, Instant::now());
    }

    /// Submit a form: reject locally or spawn the request.
    ///
    /// Repeated submits are not coalesced; each one sends its own request
    /// and whichever finishes last decides what the status area shows.
    pub fn submit(&mut self, kind: FormKind, now: Instant) {
        let submission = Submission::from_form(&self.pane(kind).form);

        if let Err(err) = submission.validate() {
            tracing::debug!("{} rejected: {}", kind.title(), err);
            let outcome = render_rejected(&err);
            self.pane_mut(kind).status.apply(outcome.update, now);
            return;
        }

        let request_id = Uuid::new_v4();
        tracing::info!("[{}] {} submitted", request_id, kind.title());

        let pane = self.pane_mut(kind);
        pane.status
            .apply(StatusUpdate::info(pending_message(kind)), now);
        pane.in_flight += 1;

        let client = self.client.clone();
        let tx = self.completions_tx.clone();
        tokio::spawn(async move {
            let outcome = ops::execute(&client, &submission).await;
            // receiver only goes away on shutdown
            let _ = tx.send(Completion {
                kind,
                request_id,
                outcome,
            });
        });
    }

    /// Apply every completion that has arrived so far
    pub fn drain_completions(&mut self, now: Instant) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.apply_completion(completion, now);
            applied += 1;
        }
        applied
    }

    pub fn apply_completion(&mut self, completion: Completion, now: Instant) {
        tracing::info!(
            "[{}] {} finished: {:?}",
            completion.request_id,
            completion.kind.title(),
            completion.outcome.update.kind
        );

        let pane = self.pane_mut(completion.kind);
        pane.in_flight = pane.in_flight.saturating_sub(1);
        pane.status.apply(completion.outcome.update, now);
        if completion.outcome.reset_form {
            pane.form.reset();
        }
    }

    /// Advance status timers
    pub fn tick(&mut self, now: Instant) {
        for pane in &mut self.panes {
            pane.status.tick(now);
        }
    }

    /// Wait for the next completion
    #[cfg(test)]
    pub async fn next_completion(&mut self) -> Option<Completion> {
        self.completions_rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::http::{ApiRequest, ApiResponse, Transport};
    use crate::console::StatusKind;
    use crate::error::TransportError;
    use futures::future::{BoxFuture, FutureExt};
    use std::sync::Arc;

    struct Echo;

    impl Transport for Echo {
        fn send(&self, request: ApiRequest) -> BoxFuture<'_, Result<ApiResponse, TransportError>> {
            async move { Ok(ApiResponse::new(200, format!("{} {}", request.method, request.url))) }
                .boxed()
        }
    }

    fn app() -> App {
        let client = ClusterClient::with_transport("http://api.test", Arc::new(Echo));
        App::new(client, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_rejected_submit_is_immediate() {
        let mut app = app();
        app.submit(FormKind::Delete, Instant::now());

        let pane = app.pane(FormKind::Delete);
        assert_eq!(pane.status.kind, StatusKind::Error);
        assert_eq!(pane.status.message, "namespace required");
        assert_eq!(pane.in_flight, 0);
    }

    #[tokio::test]
    async fn test_submit_then_complete() {
        let mut app = app();
        app.pane_mut(FormKind::Delete).form.set("namespace", "ns-1");

        let now = Instant::now();
        app.submit(FormKind::Delete, now);
        assert!(app.pane(FormKind::Delete).status.is_pending());
        assert_eq!(app.pane(FormKind::Delete).status.message, "deleting...");

        let completion = app.next_completion().await.unwrap();
        app.apply_completion(completion, now);

        let pane = app.pane(FormKind::Delete);
        assert_eq!(pane.status.kind, StatusKind::Success);
        assert!(pane.status.message.contains("DELETE http://api.test/clusters"));
        assert!(pane.form.is_blank());
        assert_eq!(pane.in_flight, 0);
    }

    #[tokio::test]
    async fn test_panes_are_independent() {
        let mut app = app();
        app.submit(FormKind::Details, Instant::now());
        assert_eq!(app.pane(FormKind::Details).status.kind, StatusKind::Error);
        assert!(!app.pane(FormKind::Create).status.visible);
        assert!(!app.pane(FormKind::List).status.visible);
    }

    #[tokio::test]
    async fn test_double_submit_sends_twice() {
        let mut app = app();
        let now = Instant::now();
        app.submit(FormKind::List, now);
        app.submit(FormKind::List, now);
        assert_eq!(app.pane(FormKind::List).in_flight, 2);

        for _ in 0..2 {
            let completion = app.next_completion().await.unwrap();
            app.apply_completion(completion, now);
        }
        assert_eq!(app.pane(FormKind::List).in_flight, 0);
    }

    #[test]
    fn test_pane_cycling() {
        let mut app = app();
        app.previous_pane();
        assert_eq!(app.active, FormKind::Scale);
        app.next_pane();
        app.next_pane();
        assert_eq!(app.active, FormKind::Delete);
    }
}
