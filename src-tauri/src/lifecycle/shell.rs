use std::collections::BTreeMap;

use crate::config::ContentSource;
use crate::error::Result;
use crate::settings::Settings;
use crate::window::{WindowHandle, WindowRole};

/// The windowing platform the controller drives.
pub trait Shell {
    type Window: WindowHandle;

    /// Builds the (initially hidden) main window loading `source`.
    fn create_main_window(&mut self, source: &ContentSource) -> Result<Self::Window>;

    fn create_aux_window(&mut self, role: WindowRole) -> Result<Self::Window>;

    fn load_content(&mut self, window: &Self::Window, source: &ContentSource) -> Result<()>;

    fn reload(&mut self, window: &Self::Window) -> Result<()>;

    /// Shows and centers the main window once its page has loaded.
    fn reveal(&mut self, window: &Self::Window) -> Result<()>;

    /// Dark mode for every role; cursor and menu visibility for the main window.
    fn apply_appearance(
        &mut self,
        window: &Self::Window,
        role: WindowRole,
        settings: &Settings,
    ) -> Result<()>;

    /// Shows or hides the main window's menu bar without touching the stored setting.
    fn set_menu_visible(&mut self, window: &Self::Window, visible: bool) -> Result<()>;

    fn register_hotkeys(&mut self, keymap: &BTreeMap<String, String>) -> Result<()>;

    fn unregister_hotkeys(&mut self) -> Result<()>;

    fn exit(&mut self);
}
