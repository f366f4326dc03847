use crate::window::WindowRole;

const OPEN_PREFIX: &str = "open:";

pub const MENU_TOGGLE_DARK_MODE: &str = "toggle_dark_mode";
pub const MENU_TOGGLE_MODIFIED_HOTKEYS: &str = "toggle_modified_hotkeys";
pub const MENU_TOGGLE_HIDE_CURSOR: &str = "toggle_hide_cursor";
pub const MENU_TOGGLE_AUTO_HIDE_MENU: &str = "toggle_auto_hide_menu";
pub const MENU_TOGGLE_OFFLINE_MODE: &str = "toggle_offline_mode";
pub const MENU_RELOAD: &str = "reload";

/// Everything the controller reacts to. Platform callbacks are translated into these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Ready,
    /// Activation (dock click) while possibly windowless.
    Activate,
    AllWindowsClosed,
    Focus { role: WindowRole, focused: bool },
    PageLoaded(WindowRole),
    /// Alt pressed in the main page while the menu bar auto-hides.
    RevealMenu,
    WindowClosed(WindowRole),
    Menu(MenuAction),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    Open(WindowRole),
    ToggleDarkMode,
    ToggleModifiedHotkeys,
    ToggleHideCursor,
    ToggleAutoHideMenu,
    ToggleOfflineMode,
    Reload,
    /// `None` removes the binding for `key`.
    SetKeyBinding {
        key: String,
        accelerator: Option<String>,
    },
}

impl MenuAction {
    /// Id of the menu item that triggers this action, if it has one.
    pub fn menu_id(&self) -> Option<String> {
        let id = match self {
            MenuAction::Open(role) => return Some(format!("{OPEN_PREFIX}{}", role.label())),
            MenuAction::ToggleDarkMode => MENU_TOGGLE_DARK_MODE,
            MenuAction::ToggleModifiedHotkeys => MENU_TOGGLE_MODIFIED_HOTKEYS,
            MenuAction::ToggleHideCursor => MENU_TOGGLE_HIDE_CURSOR,
            MenuAction::ToggleAutoHideMenu => MENU_TOGGLE_AUTO_HIDE_MENU,
            MenuAction::ToggleOfflineMode => MENU_TOGGLE_OFFLINE_MODE,
            MenuAction::Reload => MENU_RELOAD,
            MenuAction::SetKeyBinding { .. } => return None,
        };
        Some(id.to_string())
    }

    pub fn from_menu_id(menu_id: &str) -> Option<Self> {
        if let Some(label) = menu_id.strip_prefix(OPEN_PREFIX) {
            return WindowRole::from_label(label)
                .filter(|role| !role.is_main())
                .map(MenuAction::Open);
        }

        match menu_id {
            MENU_TOGGLE_DARK_MODE => Some(MenuAction::ToggleDarkMode),
            MENU_TOGGLE_MODIFIED_HOTKEYS => Some(MenuAction::ToggleModifiedHotkeys),
            MENU_TOGGLE_HIDE_CURSOR => Some(MenuAction::ToggleHideCursor),
            MENU_TOGGLE_AUTO_HIDE_MENU => Some(MenuAction::ToggleAutoHideMenu),
            MENU_TOGGLE_OFFLINE_MODE => Some(MenuAction::ToggleOfflineMode),
            MENU_RELOAD => Some(MenuAction::Reload),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_ids_map_back_to_actions() {
        let mut actions = vec![
            MenuAction::ToggleDarkMode,
            MenuAction::ToggleModifiedHotkeys,
            MenuAction::ToggleHideCursor,
            MenuAction::ToggleAutoHideMenu,
            MenuAction::ToggleOfflineMode,
            MenuAction::Reload,
        ];
        actions.extend(WindowRole::auxiliary().map(MenuAction::Open));

        for action in actions {
            let id = action.menu_id().unwrap();
            assert_eq!(MenuAction::from_menu_id(&id), Some(action));
        }
    }

    #[test]
    fn unknown_and_main_ids_are_rejected() {
        assert_eq!(MenuAction::from_menu_id("open:main"), None);
        assert_eq!(MenuAction::from_menu_id("open:nowhere"), None);
        assert_eq!(MenuAction::from_menu_id("quit"), None);
    }

    #[test]
    fn key_bindings_have_no_menu_item() {
        let action = MenuAction::SetKeyBinding {
            key: "Enter".to_string(),
            accelerator: Some("Z".to_string()),
        };
        assert_eq!(action.menu_id(), None);
    }
}
