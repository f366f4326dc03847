//! Reads `window.gameInfo` out of the main page.
//!
//! `eval` cannot return a value, so the injected script hands the object back through
//! the `report_game_info` command and the pending fetch is completed from there.

use std::sync::{Arc, Mutex};

use tauri::{AppHandle, Manager, State};
use tokio::sync::oneshot;

use crate::error::{Result, ShellError};
use crate::presence::{GameSnapshot, SnapshotSource};
use crate::window::WindowRole;

const REPORT_SCRIPT: &str = "window.__TAURI_INTERNALS__.invoke('report_game_info', \
     { info: typeof window.gameInfo === 'undefined' ? null : window.gameInfo });";

/// Slot for the fetch currently waiting on the page.
#[derive(Default)]
pub struct SnapshotChannel {
    pending: Mutex<Option<oneshot::Sender<Option<serde_json::Value>>>>,
}

impl SnapshotChannel {
    fn begin(&self) -> oneshot::Receiver<Option<serde_json::Value>> {
        let (tx, rx) = oneshot::channel();
        // A stale sender left by a timed-out fetch is dropped here
        *self.pending.lock().unwrap() = Some(tx);
        rx
    }

    fn complete(&self, info: Option<serde_json::Value>) {
        if let Some(tx) = self.pending.lock().unwrap().take() {
            let _ = tx.send(info);
        }
    }
}

pub struct PageSnapshotSource {
    app: AppHandle,
    channel: Arc<SnapshotChannel>,
}

impl PageSnapshotSource {
    pub fn new(app: AppHandle, channel: Arc<SnapshotChannel>) -> Self {
        Self { app, channel }
    }
}

impl SnapshotSource for PageSnapshotSource {
    async fn fetch(&mut self) -> Result<GameSnapshot> {
        let window = self
            .app
            .get_webview_window(WindowRole::Main.label())
            .ok_or_else(|| ShellError::Snapshot("main window is not open".to_string()))?;

        let reply = self.channel.begin();
        window.eval(REPORT_SCRIPT)?;

        let info = reply
            .await
            .map_err(|_| ShellError::Snapshot("request superseded".to_string()))?
            .ok_or_else(|| ShellError::Snapshot("gameInfo is not defined".to_string()))?;

        Ok(serde_json::from_value(info)?)
    }
}

#[tauri::command]
pub fn report_game_info(
    channel: State<'_, Arc<SnapshotChannel>>,
    info: Option<serde_json::Value>,
) -> std::result::Result<(), String> {
    channel.complete(info);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn completed_fetch_receives_page_value() {
        let channel = SnapshotChannel::default();
        let rx = channel.begin();
        channel.complete(Some(serde_json::json!({ "gameMode": "Title" })));

        let info = rx.await.unwrap().unwrap();
        let snapshot: GameSnapshot = serde_json::from_value(info).unwrap();
        assert!(snapshot.is_title());
    }

    #[tokio::test]
    async fn newer_fetch_supersedes_pending_one() {
        let channel = SnapshotChannel::default();
        let stale = channel.begin();
        let fresh = channel.begin();

        assert!(stale.await.is_err());
        channel.complete(None);
        assert_eq!(fresh.await.unwrap(), None);
    }

    #[test]
    fn reply_without_pending_fetch_is_dropped() {
        let channel = SnapshotChannel::default();
        channel.complete(None);
        assert!(channel.pending.lock().unwrap().is_none());
    }
}
