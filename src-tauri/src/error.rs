//! Error types shared by the shell.
//!
//! Everything here degrades to a log line; nothing is surfaced to the player as a dialog.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    /// Filesystem access failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings or snapshot JSON could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A native window could not be created or driven
    #[error("Window error: {0}")]
    Window(String),

    /// The presence service rejected or dropped a request
    #[error("Presence error: {0}")]
    Presence(String),

    /// The page has not exposed its game state (yet)
    #[error("Snapshot unavailable: {0}")]
    Snapshot(String),

    /// Global shortcut registration failed
    #[error("Hotkey error: {0}")]
    Hotkey(String),

    #[cfg(feature = "desktop")]
    #[error("Tauri error: {0}")]
    Tauri(#[from] tauri::Error),
}

pub type Result<T> = std::result::Result<T, ShellError>;
