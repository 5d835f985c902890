//! Result polling.
//!
//! A repeating timer scoped to one active reference id at a time. Each tick
//! fetches the stored reviews for that id and the run ends on the first
//! non-empty result set. Reassigning the id cancels the previous run and
//! invalidates any fetch it still had in flight.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::client::ApiClient;
use crate::envelope;
use crate::error::FailureKind;
use crate::types::AnalysisResult;

/// Phase of the poller for the currently assigned reference id.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// No reference id assigned.
    Idle,
    /// Polling; the service has not produced a result yet.
    Pending,
    /// A result set arrived and decoded; polling has stopped.
    Found(AnalysisResult),
    /// Polling stopped on a non-recoverable failure.
    Failed(FailureKind),
}

impl Phase {
    /// Whether this phase ends the polling run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Found(_) | Self::Failed(_))
    }
}

/// Counters for one polling run. Reset on every reassignment.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PollerStats {
    /// Fetches that resolved
    pub attempts: usize,
    /// Fetches that failed with a transport or status error
    pub transient_failures: usize,
    /// Fetches that returned an empty result set
    pub empty_responses: usize,
}

/// Shared state between the poller handle and its background task.
struct PollerState {
    /// Bumped on every assign/cancel; a task whose epoch is stale must not
    /// write anything and must exit.
    epoch: u64,
    pr_id: Option<String>,
    phase: Phase,
    stats: PollerStats,
    task: Option<JoinHandle<()>>,
}

/// Polls the review service for the results of one reference id at a time.
pub struct ResultPoller {
    client: ApiClient,
    interval: Duration,
    state: Arc<RwLock<PollerState>>,
}

impl ResultPoller {
    /// Create an idle poller.
    pub fn new(client: ApiClient, interval: Duration) -> Self {
        Self {
            client,
            interval,
            state: Arc::new(RwLock::new(PollerState {
                epoch: 0,
                pr_id: None,
                phase: Phase::Idle,
                stats: PollerStats::default(),
                task: None,
            })),
        }
    }

    /// Start polling for a reference id.
    ///
    /// Any previous run is cancelled first: its timer stops, its held result
    /// is cleared, and a late resolution of a fetch it had in flight is
    /// discarded instead of applied. The first fetch for the new id goes out
    /// immediately rather than waiting for the first tick.
    pub async fn assign(&self, pr_id: impl Into<String>) {
        let pr_id = pr_id.into();
        let mut state = self.state.write().await;

        if let Some(task) = state.task.take() {
            task.abort();
        }
        state.epoch += 1;
        state.pr_id = Some(pr_id.clone());
        state.phase = Phase::Pending;
        state.stats = PollerStats::default();

        info!(%pr_id, "Polling for review results");

        // Spawned while the lock is held so no second assign can slip in
        // between the epoch bump and the task being tracked.
        state.task = Some(tokio::spawn(poll_loop(
            self.client.clone(),
            self.interval,
            self.state.clone(),
            state.epoch,
            pr_id,
        )));
    }

    /// Stop polling and return to idle, dropping any held result.
    pub async fn cancel(&self) {
        let mut state = self.state.write().await;

        if let Some(task) = state.task.take() {
            task.abort();
        }
        state.epoch += 1;
        state.pr_id = None;
        state.phase = Phase::Idle;
        state.stats = PollerStats::default();

        debug!("Polling cancelled");
    }

    /// Current phase for the assigned reference id.
    pub async fn phase(&self) -> Phase {
        self.state.read().await.phase.clone()
    }

    /// The reference id currently being polled, if any.
    pub async fn pr_id(&self) -> Option<String> {
        self.state.read().await.pr_id.clone()
    }

    /// Counters for the current run.
    pub async fn stats(&self) -> PollerStats {
        self.state.read().await.stats
    }
}

impl Drop for ResultPoller {
    fn drop(&mut self) {
        // The task holds an Arc to the state, not to the poller, so it
        // would keep ticking after the handle is gone. Abort it instead.
        if let Ok(mut state) = self.state.try_write() {
            if let Some(task) = state.task.take() {
                task.abort();
            }
        }
    }
}

/// One polling run.
///
/// Fetches immediately, then at the fixed period, until a result set arrives
/// or the run is superseded. Fetches are awaited in sequence, so at most one
/// is in flight per reference id; ticks that fire while a fetch is still
/// outstanding are skipped, not queued. Every state write is gated on
/// `epoch` still being current.
async fn poll_loop(
    client: ApiClient,
    interval: Duration,
    state: Arc<RwLock<PollerState>>,
    epoch: u64,
    pr_id: String,
) {
    // The first tick completes immediately, so the initial fetch does not
    // wait out a full period.
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        // Abort covers a run cancelled while waiting on the timer; this
        // check covers a tick racing the reassignment.
        if state.read().await.epoch != epoch {
            return;
        }

        match client.fetch_reviews(&pr_id).await {
            Ok(records) if records.is_empty() => {
                let mut s = state.write().await;
                if s.epoch != epoch {
                    return;
                }
                s.stats.attempts += 1;
                s.stats.empty_responses += 1;
                debug!(%pr_id, "No review results yet");
            }
            Ok(records) => {
                let outcome = envelope::decode_latest(&records);

                let mut s = state.write().await;
                if s.epoch != epoch {
                    return;
                }
                s.stats.attempts += 1;

                match outcome {
                    Ok(analysis) => {
                        info!(%pr_id, records = records.len(), "Review results ready");
                        s.phase = Phase::Found(analysis);
                    }
                    Err(e) => {
                        warn!(%pr_id, error = %e, "Failed to decode analysis payload");
                        s.phase = Phase::Failed(e.failure_kind());
                    }
                }
                return;
            }
            Err(e) => {
                // Transient failures retry at the fixed period for as long
                // as this id has produced nothing; logged, not surfaced.
                let mut s = state.write().await;
                if s.epoch != epoch {
                    return;
                }
                s.stats.attempts += 1;
                s.stats.transient_failures += 1;
                warn!(%pr_id, error = %e, "Fetch failed; retrying on next tick");
            }
        }
    }
}
