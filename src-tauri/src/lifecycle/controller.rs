use std::path::PathBuf;

use super::events::{AppEvent, MenuAction};
use super::shell::Shell;
use crate::cache;
use crate::config::LaunchConfig;
use crate::error::Result;
use crate::settings::{Settings, SettingsStore};
use crate::window::{WindowHandle, WindowRegistry, WindowRole};

/// Owns all mutable application state. Every platform event is funneled through
/// [`Controller::handle`], one at a time.
pub struct Controller<S: Shell> {
    shell: S,
    registry: WindowRegistry<S::Window>,
    store: SettingsStore,
    settings: Settings,
    config: LaunchConfig,
    user_data_dir: PathBuf,
    hotkeys_active: bool,
    menu_revealed: bool,
    exiting: bool,
}

impl<S: Shell> Controller<S> {
    pub fn new(shell: S, config: LaunchConfig, user_data_dir: PathBuf) -> Self {
        Self {
            shell,
            registry: WindowRegistry::new(),
            store: SettingsStore::new(&user_data_dir),
            settings: Settings::default(),
            config,
            user_data_dir,
            hotkeys_active: false,
            menu_revealed: false,
            exiting: false,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn registry(&self) -> &WindowRegistry<S::Window> {
        &self.registry
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    pub fn hotkeys_active(&self) -> bool {
        self.hotkeys_active
    }

    pub fn is_exiting(&self) -> bool {
        self.exiting
    }

    pub fn handle(&mut self, event: AppEvent) {
        if self.exiting {
            tracing::debug!("Ignoring {:?} during shutdown", event);
            return;
        }

        tracing::debug!("Handling {:?}", event);
        let result = match event {
            AppEvent::Ready => self.on_ready(),
            AppEvent::Activate => self.on_activate(),
            AppEvent::AllWindowsClosed => {
                self.quit();
                Ok(())
            }
            AppEvent::Focus { role, focused } => self.on_focus(role, focused),
            AppEvent::PageLoaded(role) => self.on_page_loaded(role),
            AppEvent::RevealMenu => self.reveal_menu(),
            AppEvent::WindowClosed(role) => self.on_window_closed(role),
            AppEvent::Menu(action) => {
                let result = self.on_menu(action);
                if let Err(e) = self.conceal_menu() {
                    tracing::warn!("Failed to hide menu bar: {}", e);
                }
                result
            }
        };

        if let Err(e) = result {
            tracing::warn!("Event handling failed: {}", e);
        }
    }

    fn on_ready(&mut self) -> Result<()> {
        if self.config.clear_cache {
            tracing::info!("Clearing cached data in {}", self.user_data_dir.display());
            if let Err(e) = cache::clear_user_data(&self.user_data_dir) {
                tracing::error!("Cache clear aborted: {}", e);
            }
        }
        self.ensure_main()
    }

    fn on_activate(&mut self) -> Result<()> {
        if self.registry.live_count() == 0 {
            tracing::info!("Activated without windows, recreating main window");
            return self.create_main();
        }
        Ok(())
    }

    fn ensure_main(&mut self) -> Result<()> {
        match self.registry.get(WindowRole::Main) {
            Some(main) => main.focus(),
            None => self.create_main(),
        }
    }

    /// Loads settings and bootstraps appearance and hotkeys along with the window.
    fn create_main(&mut self) -> Result<()> {
        self.settings = self.store.load();
        let source = self.config.content_source(&self.settings);

        let main = self
            .registry
            .open(WindowRole::Main, || self.shell.create_main_window(&source))?;
        self.shell
            .apply_appearance(&main, WindowRole::Main, &self.settings)?;

        if self.settings.use_modified_hotkeys {
            self.start_hotkeys()?;
        }
        Ok(())
    }

    fn on_focus(&mut self, role: WindowRole, focused: bool) -> Result<()> {
        if !role.is_main() {
            return Ok(());
        }
        if !focused {
            if let Err(e) = self.conceal_menu() {
                tracing::warn!("Failed to hide menu bar: {}", e);
            }
            return self.stop_hotkeys();
        }
        if self.settings.use_modified_hotkeys {
            self.start_hotkeys()
        } else {
            Ok(())
        }
    }

    fn on_page_loaded(&mut self, role: WindowRole) -> Result<()> {
        let Some(window) = self.registry.get(role).cloned() else {
            return Ok(());
        };
        if role.is_main() {
            self.menu_revealed = false;
            self.shell.reveal(&window)?;
        }
        self.shell.apply_appearance(&window, role, &self.settings)
    }

    fn on_window_closed(&mut self, role: WindowRole) -> Result<()> {
        if !role.is_main() {
            self.registry.on_closed(role);
            return Ok(());
        }

        tracing::info!("Main window closed, shutting down");
        self.registry.on_closed(WindowRole::Main);
        self.persist();
        let closed = self.registry.close_all();
        tracing::debug!("Closed {} auxiliary windows", closed);
        if let Err(e) = self.stop_hotkeys() {
            tracing::warn!("Failed to unregister hotkeys: {}", e);
        }
        self.quit();
        Ok(())
    }

    fn on_menu(&mut self, action: MenuAction) -> Result<()> {
        match action {
            MenuAction::Open(role) if role.is_main() => self.ensure_main(),
            MenuAction::Open(role) => {
                let window = self
                    .registry
                    .open(role, || self.shell.create_aux_window(role))?;
                self.shell.apply_appearance(&window, role, &self.settings)
            }
            MenuAction::ToggleDarkMode => {
                self.settings.dark_mode = !self.settings.dark_mode;
                self.persist();
                self.apply_appearance_everywhere();
                Ok(())
            }
            MenuAction::ToggleModifiedHotkeys => {
                self.settings.use_modified_hotkeys = !self.settings.use_modified_hotkeys;
                self.persist();
                if self.settings.use_modified_hotkeys {
                    self.start_hotkeys()
                } else {
                    self.stop_hotkeys()
                }
            }
            MenuAction::ToggleHideCursor => {
                self.settings.hide_cursor = !self.settings.hide_cursor;
                self.persist();
                self.apply_main_appearance()
            }
            MenuAction::ToggleAutoHideMenu => {
                self.settings.auto_hide_menu = !self.settings.auto_hide_menu;
                self.persist();
                self.apply_main_appearance()
            }
            MenuAction::ToggleOfflineMode => {
                self.settings.is_offline_mode = !self.settings.is_offline_mode;
                self.persist();
                let Some(main) = self.registry.get(WindowRole::Main).cloned() else {
                    return Ok(());
                };
                let source = self.config.content_source(&self.settings);
                self.shell.load_content(&main, &source)
            }
            MenuAction::Reload => match self.registry.get(WindowRole::Main).cloned() {
                Some(main) => self.shell.reload(&main),
                None => Ok(()),
            },
            MenuAction::SetKeyBinding { key, accelerator } => {
                match accelerator {
                    Some(accelerator) => self.settings.keymap.insert(key, accelerator),
                    None => self.settings.keymap.remove(&key),
                };
                self.persist();
                if self.hotkeys_active {
                    self.stop_hotkeys()?;
                    self.start_hotkeys()?;
                }
                Ok(())
            }
        }
    }

    /// Alt toggles the auto-hidden menu bar.
    fn reveal_menu(&mut self) -> Result<()> {
        if !self.settings.auto_hide_menu {
            return Ok(());
        }
        if self.menu_revealed {
            return self.conceal_menu();
        }
        let Some(main) = self.registry.get(WindowRole::Main) else {
            return Ok(());
        };
        self.shell.set_menu_visible(main, true)?;
        self.menu_revealed = true;
        Ok(())
    }

    fn conceal_menu(&mut self) -> Result<()> {
        if !self.menu_revealed {
            return Ok(());
        }
        self.menu_revealed = false;
        if !self.settings.auto_hide_menu {
            return Ok(());
        }
        match self.registry.get(WindowRole::Main) {
            Some(main) => self.shell.set_menu_visible(main, false),
            None => Ok(()),
        }
    }

    fn start_hotkeys(&mut self) -> Result<()> {
        if self.hotkeys_active {
            return Ok(());
        }
        self.shell.register_hotkeys(&self.settings.keymap)?;
        self.hotkeys_active = true;
        Ok(())
    }

    fn stop_hotkeys(&mut self) -> Result<()> {
        if !self.hotkeys_active {
            return Ok(());
        }
        self.hotkeys_active = false;
        self.shell.unregister_hotkeys()
    }

    fn apply_main_appearance(&mut self) -> Result<()> {
        match self.registry.get(WindowRole::Main) {
            Some(main) => self
                .shell
                .apply_appearance(main, WindowRole::Main, &self.settings),
            None => Ok(()),
        }
    }

    fn apply_appearance_everywhere(&mut self) {
        for (role, window) in self.registry.live() {
            if let Err(e) = self.shell.apply_appearance(window, role, &self.settings) {
                tracing::warn!("Failed to apply appearance to {}: {}", role.label(), e);
            }
        }
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.settings) {
            tracing::warn!("Failed to save settings: {}", e);
        }
    }

    fn quit(&mut self) {
        self.exiting = true;
        self.shell.exit();
    }
}
