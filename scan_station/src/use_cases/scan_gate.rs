// Debounced scan-and-verify flow.

use crate::domain::ports::{StatusDisplay, TokenVerifier};
use crate::domain::{GateState, StatusView, Token, VerificationOutcome, classify};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// What happened to a token handed to [`ScanGate::on_result`].
#[derive(Debug)]
pub enum ScanDisposition {
    /// The gate was open; the handle resolves to the rendered outcome.
    Accepted(JoinHandle<VerificationOutcome>),
    /// The gate was closed and the token was discarded.
    Dropped,
}

impl ScanDisposition {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ScanDisposition::Accepted(_))
    }
}

/// Mediates between a burst of scanner callbacks and the verification service.
///
/// At most one token is processed per gate cycle: the gate closes when a token
/// is accepted and reopens a fixed cooldown after its outcome was rendered.
/// Clones share the same gate.
#[derive(Clone)]
pub struct ScanGate {
    verifier: Arc<dyn TokenVerifier>,
    display: Arc<dyn StatusDisplay>,
    state: Arc<watch::Sender<GateState>>,
    cooldown: Duration,
}

impl ScanGate {
    pub fn new(
        verifier: Arc<dyn TokenVerifier>,
        display: Arc<dyn StatusDisplay>,
        cooldown: Duration,
    ) -> Self {
        let (state, _state_rx) = watch::channel(GateState::Open);
        Self {
            verifier,
            display,
            state: Arc::new(state),
            cooldown,
        }
    }

    pub fn state(&self) -> GateState {
        *self.state.borrow()
    }

    /// Receiver notified on every gate transition.
    pub fn subscribe(&self) -> watch::Receiver<GateState> {
        self.state.subscribe()
    }

    /// Scanner callback. Must be called from within a Tokio runtime.
    pub fn on_result(&self, token: Token) -> ScanDisposition {
        // Close before spawning so a callback racing this one sees `Closed`.
        if !self.try_close() {
            debug!(token = %token, "gate closed; dropping token");
            return ScanDisposition::Dropped;
        }

        debug!(token = %token, "token accepted");
        let gate = self.clone();
        ScanDisposition::Accepted(tokio::spawn(async move { gate.process(token).await }))
    }

    /// Shows the outcome for `token`, replacing whatever was shown before.
    pub fn render(&self, token: &Token, outcome: &VerificationOutcome) {
        let view = StatusView::for_outcome(token, outcome);
        self.display.render(&view);
    }

    fn try_close(&self) -> bool {
        self.state.send_if_modified(|state| {
            if state.is_open() {
                *state = GateState::Closed;
                true
            } else {
                false
            }
        })
    }

    async fn process(&self, token: Token) -> VerificationOutcome {
        // Reopens the gate even if verification or rendering panics.
        let reopen = ReopenOnDrop {
            state: Arc::clone(&self.state),
            cooldown: self.cooldown,
        };

        let outcome = match self.verifier.verify(&token).await {
            Ok(response) => classify(&response),
            Err(err) => {
                warn!(token = %token, error = %err, "token verification failed");
                VerificationOutcome::TransportError
            }
        };

        self.render(&token, &outcome);
        info!(token = %token, outcome = outcome.kind(), "scan outcome rendered");
        drop(reopen);
        outcome
    }
}

// Schedules the cooldown when dropped; its deadline is fixed at drop time.
struct ReopenOnDrop {
    state: Arc<watch::Sender<GateState>>,
    cooldown: Duration,
}

impl Drop for ReopenOnDrop {
    fn drop(&mut self) {
        let state = Arc::clone(&self.state);
        if tokio::runtime::Handle::try_current().is_err() {
            // Runtime gone: nothing left to debounce.
            state.send_replace(GateState::Open);
            return;
        }

        let cooldown = tokio::time::sleep(self.cooldown);
        tokio::spawn(async move {
            cooldown.await;
            state.send_replace(GateState::Open);
            debug!("gate reopened");
        });
    }
}
