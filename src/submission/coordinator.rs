use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info, instrument, warn};

use crate::{editor::Snapshot, logging::SubmitEvent, traits::SubmitTransport, Status};

use super::SubmissionState;

/// Sends collection snapshots for review, one attempt at a time.
///
/// `Idle -> InFlight -> Success | Failure`. While an attempt is in flight,
/// further `submit` calls are ignored. There is no cancellation: an exchange
/// that never resolves keeps the coordinator `InFlight`.
pub struct SubmissionCoordinator<T: SubmitTransport> {
    transport: Arc<T>,
    state: watch::Sender<SubmissionState>,
}

impl<T: SubmitTransport> SubmissionCoordinator<T> {
    pub fn new(transport: Arc<T>) -> Self {
        let (state, _) = watch::channel(SubmissionState::Idle);
        SubmissionCoordinator { transport, state }
    }

    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    /// Returns a terminal state to `Idle`. Does nothing while `InFlight`.
    pub fn reset(&self) -> bool {
        self.state.send_if_modified(|state| match state.is_terminal() {
            true => {
                *state = SubmissionState::Idle;
                true
            }
            false => false,
        })
    }

    /// Submits `snapshot` as a single payload and returns the terminal state
    /// it ended in, or `None` if another attempt was already in flight.
    #[instrument(name = "submission::submit", level = "info", skip_all, fields(records = snapshot.len()))]
    pub async fn submit(&self, snapshot: Snapshot) -> Option<SubmissionState> {
        let started = self.state.send_if_modified(|state| match state.is_in_flight() {
            true => false,
            false => {
                *state = SubmissionState::InFlight;
                true
            }
        });
        if !started {
            warn!("submission already in flight, ignoring");
            SubmitEvent::ignored(snapshot.revision());
            return None;
        }

        let outcome = self.exchange(&snapshot).await;
        SubmitEvent::finished(&snapshot, &outcome);

        let state = match outcome {
            Ok(code) if code.is_success() => {
                info!("submission accepted ({code})");
                SubmissionState::success()
            }
            Ok(code) => {
                warn!("submission declined ({code})");
                SubmissionState::rejected()
            }
            Err(status) => {
                error!("submission failed: {status}");
                SubmissionState::unreachable()
            }
        };

        self.state.send_replace(state.clone());
        Some(state)
    }

    async fn exchange(&self, snapshot: &Snapshot) -> Result<reqwest::StatusCode, Status> {
        let body = snapshot.to_json()?;
        self.transport.post(body).await
    }
}
