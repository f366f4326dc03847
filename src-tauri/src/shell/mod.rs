//! Tauri wiring: translates window, menu and app events into [`AppEvent`]s for the
//! lifecycle controller and starts the presence bridge.

mod hotkeys;
mod menu;
mod snapshot;
mod tauri_shell;

use std::path::Path;
use std::sync::Arc;

use tauri::http::{header, Response, StatusCode};
use tauri::webview::PageLoadEvent;
use tauri::{AppHandle, Manager, RunEvent, State, WindowEvent};
use tokio::sync::mpsc;

use crate::config::LaunchConfig;
use crate::discord::DiscordPresence;
use crate::game_files::{self, GAME_SCHEME};
use crate::lifecycle::{run_controller, AppEvent, Controller, MenuAction};
use crate::logging;
use crate::presence::PresenceBridge;
use crate::settings::SettingsStore;
use crate::window::WindowRole;

pub use snapshot::{PageSnapshotSource, SnapshotChannel};
pub use tauri_shell::TauriShell;

/// Sending half of the controller's event queue, managed as app state.
pub struct EventSender(mpsc::UnboundedSender<AppEvent>);

/// Returns false once the controller has stopped.
fn send(app: &AppHandle, event: AppEvent) -> bool {
    let Some(sender) = app.try_state::<EventSender>() else {
        return false;
    };
    if sender.0.send(event).is_err() {
        tracing::debug!("Lifecycle controller already stopped");
        return false;
    }
    true
}

fn serve_game_file(game_dir: &Path, path: &str) -> Response<Vec<u8>> {
    let response = match game_files::read(game_dir, path) {
        Ok((bytes, content_type)) => Response::builder()
            .header(header::CONTENT_TYPE, content_type)
            .body(bytes),
        Err(e) => {
            tracing::debug!("Game file {} unavailable: {}", path, e);
            Response::builder()
                .status(StatusCode::NOT_FOUND)
                .body(Vec::new())
        }
    };
    response.unwrap_or_else(|_| Response::new(Vec::new()))
}

/// Binds `key` to `accelerator`, or clears the binding when `accelerator` is null.
#[tauri::command]
fn set_key_binding(
    events: State<'_, EventSender>,
    key: String,
    accelerator: Option<String>,
) -> Result<(), String> {
    events
        .0
        .send(AppEvent::Menu(MenuAction::SetKeyBinding { key, accelerator }))
        .map_err(|e| e.to_string())
}

#[tauri::command]
fn reveal_menu(events: State<'_, EventSender>) -> Result<(), String> {
    events
        .0
        .send(AppEvent::RevealMenu)
        .map_err(|e| e.to_string())
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let _log_guard = logging::init_logging();
    let config = LaunchConfig::from_env();
    tracing::info!(
        "Game url {}, game dir {}",
        config.game_url,
        config.game_dir.display()
    );

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let snapshots = Arc::new(SnapshotChannel::default());
    let game_dir = config.game_dir.clone();

    let app = tauri::Builder::default()
        .plugin(tauri_plugin_global_shortcut::Builder::new().build())
        .manage(EventSender(event_tx))
        .manage(Arc::clone(&snapshots))
        .register_uri_scheme_protocol(GAME_SCHEME, move |_ctx, request| {
            serve_game_file(&game_dir, request.uri().path())
        })
        .invoke_handler(tauri::generate_handler![
            snapshot::report_game_info,
            set_key_binding,
            reveal_menu
        ])
        .on_window_event(|window, event| {
            let Some(role) = WindowRole::from_label(window.label()) else {
                return;
            };
            match event {
                WindowEvent::Focused(focused) => {
                    send(
                        window.app_handle(),
                        AppEvent::Focus {
                            role,
                            focused: *focused,
                        },
                    );
                }
                WindowEvent::Destroyed => {
                    send(window.app_handle(), AppEvent::WindowClosed(role));
                }
                _ => {}
            }
        })
        .on_page_load(|webview, payload| {
            if payload.event() != PageLoadEvent::Finished {
                return;
            }
            if let Some(role) = WindowRole::from_label(webview.label()) {
                send(webview.app_handle(), AppEvent::PageLoaded(role));
            }
        })
        .on_menu_event(|app, event| {
            let Some(action) = MenuAction::from_menu_id(event.id().as_ref()) else {
                tracing::debug!("Unhandled menu item {:?}", event.id());
                return;
            };
            send(app, AppEvent::Menu(action));
        })
        .setup(move |app| {
            let user_data_dir = app.path().app_data_dir()?;
            tracing::info!("User data directory: {}", user_data_dir.display());

            let settings = SettingsStore::new(&user_data_dir).load();
            app.set_menu(menu::build(app.handle(), &settings)?)?;

            let shell = TauriShell::new(
                app.handle().clone(),
                user_data_dir.clone(),
                config.game_dir.clone(),
            );
            let controller = Controller::new(shell, config.clone(), user_data_dir);
            tauri::async_runtime::spawn(async move {
                run_controller(controller, event_rx).await;
            });

            let bridge = PresenceBridge::new(
                DiscordPresence::new(),
                PageSnapshotSource::new(app.handle().clone(), snapshots),
            );
            tauri::async_runtime::spawn(bridge.run(config.presence_enabled));

            send(app.handle(), AppEvent::Ready);
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    // Only the controller exits the app (`Shell::exit`), after its teardown has run.
    app.run(|app, event| match event {
        RunEvent::ExitRequested { api, code: None, .. } => {
            if send(app, AppEvent::AllWindowsClosed) {
                api.prevent_exit();
            }
        }
        #[cfg(target_os = "macos")]
        RunEvent::Reopen { .. } => {
            send(app, AppEvent::Activate);
        }
        _ => {}
    });
}
