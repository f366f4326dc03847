use tauri::menu::{CheckMenuItemBuilder, Menu, MenuBuilder, MenuItemBuilder, SubmenuBuilder};
use tauri::{AppHandle, Wry};

use crate::lifecycle::MenuAction;
use crate::settings::Settings;
use crate::window::WindowRole;

/// Application menu. Check items start from the stored settings and toggle natively on click.
pub fn build(app: &AppHandle, settings: &Settings) -> tauri::Result<Menu<Wry>> {
    let reload = MenuItemBuilder::with_id(menu_id(MenuAction::Reload), "Reload")
        .accelerator("CmdOrCtrl+R")
        .build(app)?;
    let game = SubmenuBuilder::new(app, "PokeRogue")
        .item(&reload)
        .separator()
        .quit()
        .build()?;

    let mut tools = SubmenuBuilder::new(app, "Tools");
    for role in WindowRole::auxiliary() {
        let item = MenuItemBuilder::with_id(menu_id(MenuAction::Open(role)), role.title())
            .build(app)?;
        tools = tools.item(&item);
    }
    let tools = tools.build()?;

    let toggles = [
        (MenuAction::ToggleDarkMode, "Dark Mode", settings.dark_mode),
        (
            MenuAction::ToggleModifiedHotkeys,
            "Use Modified Hotkeys",
            settings.use_modified_hotkeys,
        ),
        (
            MenuAction::ToggleHideCursor,
            "Hide Cursor",
            settings.hide_cursor,
        ),
        (
            MenuAction::ToggleAutoHideMenu,
            "Auto-hide Menu Bar",
            settings.auto_hide_menu,
        ),
        (
            MenuAction::ToggleOfflineMode,
            "Offline Mode",
            settings.is_offline_mode,
        ),
    ];
    let mut options = SubmenuBuilder::new(app, "Settings");
    for (action, text, checked) in toggles {
        let item = CheckMenuItemBuilder::with_id(menu_id(action), text)
            .checked(checked)
            .build(app)?;
        options = options.item(&item);
    }
    let options = options.build()?;

    MenuBuilder::new(app)
        .item(&game)
        .item(&tools)
        .item(&options)
        .build()
}

fn menu_id(action: MenuAction) -> String {
    action.menu_id().unwrap_or_default()
}
