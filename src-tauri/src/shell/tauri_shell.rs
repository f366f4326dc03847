use std::collections::BTreeMap;
use std::path::PathBuf;

use tauri::{AppHandle, Theme, Url, WebviewUrl, WebviewWindow, WebviewWindowBuilder};

use super::hotkeys;
use crate::config::ContentSource;
use crate::error::{Result, ShellError};
use crate::game_files;
use crate::lifecycle::Shell;
use crate::settings::Settings;
use crate::window::{MainGeometry, WindowHandle, WindowRole};

const HIDE_CURSOR_STYLE_ID: &str = "pokerogue-hide-cursor";

/// Pressing Alt asks for the hidden menu bar, like a native auto-hiding menu.
const MENU_REVEAL_SCRIPT: &str = r#"(() => {
  if (window.__pokerogueMenuReveal) return;
  window.__pokerogueMenuReveal = true;
  window.addEventListener('keyup', (event) => {
    if (event.key === 'Alt') window.__TAURI_INTERNALS__?.invoke('reveal_menu');
  });
})();"#;

impl WindowHandle for WebviewWindow {
    fn focus(&self) -> Result<()> {
        if self.is_minimized()? {
            self.unminimize()?;
        }
        self.set_focus()?;
        Ok(())
    }

    fn close(&self) -> Result<()> {
        WebviewWindow::close(self)?;
        Ok(())
    }
}

/// [`Shell`] backed by Tauri webview windows.
pub struct TauriShell {
    app: AppHandle,
    user_data_dir: PathBuf,
    game_dir: PathBuf,
}

impl TauriShell {
    pub fn new(app: AppHandle, user_data_dir: PathBuf, game_dir: PathBuf) -> Self {
        Self {
            app,
            user_data_dir,
            game_dir,
        }
    }

    /// Downloaded game files are served through the `game` scheme registered in `run`.
    fn content_url(&self, source: &ContentSource) -> Result<Url> {
        let raw = match source {
            ContentSource::Remote(url) => url.clone(),
            ContentSource::Local(entry) => game_files::local_url(&self.game_dir, entry)?,
        };
        Url::parse(&raw).map_err(|e| ShellError::Window(format!("{}: {}", raw, e)))
    }

    fn main_geometry(&self) -> MainGeometry {
        match self.app.primary_monitor() {
            Ok(Some(monitor)) => {
                let size = monitor.size().to_logical::<f64>(monitor.scale_factor());
                MainGeometry::for_work_area(size.width, size.height)
            }
            Ok(None) => MainGeometry::unscaled(),
            Err(e) => {
                tracing::warn!("Failed to query primary monitor: {}", e);
                MainGeometry::unscaled()
            }
        }
    }
}

impl Shell for TauriShell {
    type Window = WebviewWindow;

    fn create_main_window(&mut self, source: &ContentSource) -> Result<WebviewWindow> {
        let geometry = self.main_geometry();
        tracing::info!(
            "Creating main window {}x{} (zoom {:.2})",
            geometry.width,
            geometry.height,
            geometry.zoom
        );

        let role = WindowRole::Main;
        let url = WebviewUrl::External(self.content_url(source)?);
        let window = WebviewWindowBuilder::new(&self.app, role.label(), url)
            .title(role.title())
            .inner_size(geometry.width, geometry.height)
            .visible(false)
            .data_directory(self.user_data_dir.clone())
            .build()?;
        window.set_zoom(geometry.zoom)?;
        Ok(window)
    }

    fn create_aux_window(&mut self, role: WindowRole) -> Result<WebviewWindow> {
        let url = role
            .url()
            .ok_or_else(|| ShellError::Window(format!("{} has no page", role.label())))?;
        let url = Url::parse(url).map_err(|e| ShellError::Window(e.to_string()))?;
        let (width, height) = role.default_size();

        tracing::info!("Opening {} window", role.label());
        let window = WebviewWindowBuilder::new(&self.app, role.label(), WebviewUrl::External(url))
            .title(role.title())
            .inner_size(width, height)
            .data_directory(self.user_data_dir.clone())
            .build()?;
        Ok(window)
    }

    fn load_content(&mut self, window: &WebviewWindow, source: &ContentSource) -> Result<()> {
        let url = self.content_url(source)?;
        tracing::info!("Loading {}", url);
        window.navigate(url)?;
        Ok(())
    }

    fn reload(&mut self, window: &WebviewWindow) -> Result<()> {
        window.eval("window.location.reload()")?;
        Ok(())
    }

    fn reveal(&mut self, window: &WebviewWindow) -> Result<()> {
        window.show()?;
        window.center()?;
        window.set_focus()?;
        Ok(())
    }

    fn apply_appearance(
        &mut self,
        window: &WebviewWindow,
        role: WindowRole,
        settings: &Settings,
    ) -> Result<()> {
        let theme = settings.dark_mode.then_some(Theme::Dark);
        window.set_theme(theme)?;

        if role.is_main() {
            window.eval(&cursor_script(settings.hide_cursor))?;
            if settings.auto_hide_menu {
                window.eval(MENU_REVEAL_SCRIPT)?;
            }
            self.set_menu_visible(window, !settings.auto_hide_menu)?;
        }
        Ok(())
    }

    fn set_menu_visible(&mut self, window: &WebviewWindow, visible: bool) -> Result<()> {
        if visible {
            window.show_menu()?;
        } else {
            window.hide_menu()?;
        }
        Ok(())
    }

    fn register_hotkeys(&mut self, keymap: &BTreeMap<String, String>) -> Result<()> {
        hotkeys::register(&self.app, keymap)
    }

    fn unregister_hotkeys(&mut self) -> Result<()> {
        hotkeys::unregister(&self.app)
    }

    fn exit(&mut self) {
        self.app.exit(0);
    }
}

/// Adds or removes the stylesheet that hides the pointer over the game canvas.
fn cursor_script(hide: bool) -> String {
    if hide {
        format!(
            r#"(() => {{
  if (document.getElementById('{id}')) return;
  const style = document.createElement('style');
  style.id = '{id}';
  style.textContent = '* {{ cursor: none !important; }}';
  (document.head || document.documentElement).appendChild(style);
}})();"#,
            id = HIDE_CURSOR_STYLE_ID
        )
    } else {
        format!(
            "document.getElementById('{}')?.remove();",
            HIDE_CURSOR_STYLE_ID
        )
    }
}
