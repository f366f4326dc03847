//! Connection state machine and poll loop for presence reporting

use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};

use super::status::StatusPayload;
use super::tracker::PresenceTracker;
use super::traits::{PresenceSink, SnapshotSource};
use crate::error::{Result, ShellError};

pub const POLL_INTERVAL: Duration = Duration::from_millis(1000);
pub const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);
/// Kept below the poll interval so a tick's fetch never overlaps the next one.
pub const FETCH_TIMEOUT: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disabled,
    Connecting,
    Ready,
    /// Terminal for the process lifetime.
    Failed,
}

pub struct PresenceBridge<P, S> {
    sink: P,
    source: S,
    state: ConnectionState,
    tracker: Option<PresenceTracker>,
}

impl<P: PresenceSink, S: SnapshotSource> PresenceBridge<P, S> {
    pub fn new(sink: P, source: S) -> Self {
        Self {
            sink,
            source,
            state: ConnectionState::Disabled,
            tracker: None,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn tracker(&self) -> Option<&PresenceTracker> {
        self.tracker.as_ref()
    }

    /// Performs the handshake. Only attempted once; a failure disables presence for good.
    pub async fn connect(&mut self, now: i64) -> Result<()> {
        if self.state != ConnectionState::Disabled {
            return Err(ShellError::Presence(format!(
                "handshake already attempted ({:?})",
                self.state
            )));
        }

        self.state = ConnectionState::Connecting;
        tracing::info!("{} presence connecting...", self.sink.name());

        let outcome = match time::timeout(HANDSHAKE_TIMEOUT, self.sink.connect()).await {
            Ok(result) => result,
            Err(_) => Err(ShellError::Presence("handshake timed out".to_string())),
        };

        match outcome {
            Ok(()) => {
                tracing::info!("{} presence is ready", self.sink.name());
                self.state = ConnectionState::Ready;
                self.tracker = Some(PresenceTracker::new(now));
                Ok(())
            }
            Err(e) => {
                tracing::warn!("{} presence is not available: {}", self.sink.name(), e);
                self.state = ConnectionState::Failed;
                Err(e)
            }
        }
    }

    /// One poll: fetch, project, push. Returns the pushed status, or `None` when the
    /// bridge isn't ready.
    pub async fn tick(&mut self, now: i64) -> Option<StatusPayload> {
        if self.state != ConnectionState::Ready {
            return None;
        }

        let snapshot = match time::timeout(FETCH_TIMEOUT, self.source.fetch()).await {
            Ok(result) => result,
            Err(_) => Err(ShellError::Snapshot("page did not answer in time".to_string())),
        };

        let tracker = self.tracker.as_mut()?;
        let status = tracker.project(snapshot.as_ref(), now);

        if let Err(e) = self.sink.push_status(&status).await {
            tracing::debug!("Failed to update {} activity: {}", self.sink.name(), e);
        }
        Some(status)
    }

    /// Connects if `enabled`, then polls every [`POLL_INTERVAL`] until the process exits.
    pub async fn run(mut self, enabled: bool) {
        if !enabled {
            tracing::info!("Presence reporting disabled");
            return;
        }

        if self.connect(now_millis()).await.is_err() {
            return;
        }

        let mut interval = time::interval(POLL_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            self.tick(now_millis()).await;
        }
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
