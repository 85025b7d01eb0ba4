//! Long-polling loop.
//!
//! Requests updates with the last marker, dispatches each update in order, then advances the
//! marker. On failure the marker is kept and the loop backs off before retrying.
//! Cancellation abandons an in-flight poll but lets an in-flight batch finish.

use std::sync::Arc;
use std::time::Duration;

use maxbot_core::{PollRequest, Result, UpdateBatch, UpdateSource, UpdateType};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

use crate::dispatcher::Dispatcher;

/// Polling parameters. `limit` and `timeout_secs` are clamped when the request is built.
#[derive(Debug, Clone)]
pub struct PollingConfig {
    pub limit: u32,
    pub timeout_secs: u32,
    /// Update types to request; empty means all.
    pub types: Vec<UpdateType>,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            limit: PollRequest::DEFAULT_LIMIT,
            timeout_secs: PollRequest::DEFAULT_TIMEOUT_SECS,
            types: Vec::new(),
            initial_backoff: Duration::from_secs(5),
            max_backoff: Duration::from_secs(60),
        }
    }
}

/// Whether a poll request is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Waiting,
}

/// Exponential backoff: `initial`, doubling per consecutive failure, capped at `max`.
#[derive(Debug, Clone)]
pub struct Backoff {
    initial: Duration,
    max: Duration,
    next: Duration,
}

impl Backoff {
    pub fn new(initial: Duration, max: Duration) -> Self {
        Self {
            initial,
            max,
            next: initial,
        }
    }

    /// Delay to wait after the current failure.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.next.min(self.max);
        self.next = (delay * 2).min(self.max);
        delay
    }

    pub fn reset(&mut self) {
        self.next = self.initial;
    }
}

/// Polls an [`UpdateSource`] and feeds a [`Dispatcher`].
pub struct PollingLoop {
    source: Arc<dyn UpdateSource>,
    dispatcher: Arc<Dispatcher>,
    config: PollingConfig,
    marker: Option<i64>,
    state: PollState,
    backoff: Backoff,
}

impl PollingLoop {
    pub fn new(
        source: Arc<dyn UpdateSource>,
        dispatcher: Arc<Dispatcher>,
        config: PollingConfig,
    ) -> Self {
        let backoff = Backoff::new(config.initial_backoff, config.max_backoff);
        Self {
            source,
            dispatcher,
            config,
            marker: None,
            state: PollState::Idle,
            backoff,
        }
    }

    pub fn marker(&self) -> Option<i64> {
        self.marker
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    fn request(&self) -> PollRequest {
        PollRequest::new(
            self.marker,
            self.config.limit,
            self.config.timeout_secs,
            self.config.types.clone(),
        )
    }

    /// Dispatches a batch in order, then advances the marker when the server sent one.
    async fn process_batch(&mut self, batch: UpdateBatch) -> usize {
        let count = batch.updates.len();
        for update in &batch.updates {
            self.dispatcher.dispatch(update).await;
        }
        if let Some(marker) = batch.marker {
            self.marker = Some(marker);
        }
        self.backoff.reset();
        count
    }

    /// One poll cycle without backoff. Returns the number of updates dispatched.
    /// On error the marker is unchanged.
    pub async fn poll_once(&mut self) -> Result<usize> {
        let request = self.request();
        self.state = PollState::Waiting;
        let result = self.source.get_updates(&request).await;
        self.state = PollState::Idle;
        let batch = result?;
        Ok(self.process_batch(batch).await)
    }

    /// Runs startup hooks, polls until `cancel` fires, then runs shutdown hooks.
    #[instrument(skip(self, cancel))]
    pub async fn run(&mut self, cancel: CancellationToken) {
        self.dispatcher.run_startup().await;
        info!(
            limit = self.config.limit,
            timeout_secs = self.config.timeout_secs,
            "step: polling started"
        );

        while !cancel.is_cancelled() {
            let request = self.request();
            let source = Arc::clone(&self.source);
            self.state = PollState::Waiting;
            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    self.state = PollState::Idle;
                    break;
                }
                result = source.get_updates(&request) => result,
            };
            self.state = PollState::Idle;

            match result {
                Ok(batch) => {
                    let count = self.process_batch(batch).await;
                    if count > 0 {
                        info!(count = count, marker = ?self.marker, "step: batch dispatched");
                    }
                }
                Err(e) => {
                    let delay = self.backoff.next_delay();
                    if e.is_transient() {
                        warn!(
                            error = %e,
                            marker = ?self.marker,
                            retry_in_secs = delay.as_secs_f64(),
                            "Polling failed, backing off"
                        );
                    } else {
                        error!(
                            error = %e,
                            marker = ?self.marker,
                            retry_in_secs = delay.as_secs_f64(),
                            "Polling rejected by the API, backing off"
                        );
                    }
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
            }
        }

        info!(marker = ?self.marker, "step: polling stopped");
        self.dispatcher.run_shutdown().await;
    }
}
