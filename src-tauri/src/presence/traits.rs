use std::future::Future;

use super::status::{GameSnapshot, StatusPayload};
use crate::error::Result;

/// External status service (Discord, or a fake in tests).
pub trait PresenceSink: Send {
    /// Returns the name of this sink (for logging)
    fn name(&self) -> &'static str;

    /// Register, connect and authenticate. Called once per process.
    fn connect(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Replace the displayed status
    fn push_status(&mut self, status: &StatusPayload) -> impl Future<Output = Result<()>> + Send;
}

/// Reads the game's state out of the loaded page.
pub trait SnapshotSource: Send {
    fn fetch(&mut self) -> impl Future<Output = Result<GameSnapshot>> + Send;
}
