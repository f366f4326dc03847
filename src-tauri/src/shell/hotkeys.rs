//! Global shortcut capture that replays keys into the game page

use std::collections::BTreeMap;

use tauri::{AppHandle, Manager};
use tauri_plugin_global_shortcut::{GlobalShortcutExt, ShortcutState};

use crate::error::{Result, ShellError};
use crate::window::WindowRole;

/// Registers one shortcut per keymap entry. A binding the OS refuses is skipped.
pub fn register(app: &AppHandle, keymap: &BTreeMap<String, String>) -> Result<()> {
    let shortcuts = app.global_shortcut();
    let mut registered = 0;

    for (key, accelerator) in keymap {
        let game_key = key.clone();
        let result = shortcuts.on_shortcut(accelerator.as_str(), move |app, _shortcut, event| {
            let kind = match event.state() {
                ShortcutState::Pressed => "keydown",
                ShortcutState::Released => "keyup",
            };
            dispatch_key(app, &game_key, kind);
        });

        match result {
            Ok(()) => registered += 1,
            Err(e) => tracing::warn!("Failed to bind {} to {}: {}", accelerator, key, e),
        }
    }

    tracing::debug!("Registered {} of {} hotkeys", registered, keymap.len());
    Ok(())
}

pub fn unregister(app: &AppHandle) -> Result<()> {
    app.global_shortcut()
        .unregister_all()
        .map_err(|e| ShellError::Hotkey(e.to_string()))
}

fn dispatch_key(app: &AppHandle, key: &str, kind: &str) {
    let Some(window) = app.get_webview_window(WindowRole::Main.label()) else {
        return;
    };

    let key = match serde_json::to_string(key) {
        Ok(key) => key,
        Err(e) => {
            tracing::warn!("Cannot encode key {}: {}", key, e);
            return;
        }
    };
    let script = format!(
        "window.dispatchEvent(new KeyboardEvent('{kind}', {{ key: {key}, bubbles: true }}));"
    );

    if let Err(e) = window.eval(&script) {
        tracing::debug!("Failed to dispatch {} for {}: {}", kind, key, e);
    }
}
