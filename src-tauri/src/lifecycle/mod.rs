//! Application lifecycle: window orchestration, menu actions and hotkey activation

mod controller;
mod events;
mod shell;

pub use controller::Controller;
pub use events::{
    AppEvent, MenuAction, MENU_RELOAD, MENU_TOGGLE_AUTO_HIDE_MENU, MENU_TOGGLE_DARK_MODE,
    MENU_TOGGLE_HIDE_CURSOR, MENU_TOGGLE_MODIFIED_HOTKEYS, MENU_TOGGLE_OFFLINE_MODE,
};
pub use shell::Shell;

use tokio::sync::mpsc;

/// Feeds `events` to the controller until it starts exiting or every sender is gone.
pub async fn run_controller<S: Shell>(
    mut controller: Controller<S>,
    mut events: mpsc::UnboundedReceiver<AppEvent>,
) -> Controller<S> {
    while let Some(event) = events.recv().await {
        controller.handle(event);
        if controller.is_exiting() {
            break;
        }
    }
    tracing::debug!("Lifecycle controller stopped");
    controller
}
