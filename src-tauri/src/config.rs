//! Launch configuration: command line plus environment overrides.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use url::Url;

use crate::settings::Settings;

pub const DEFAULT_GAME_URL: &str = "https://pokerogue.net/";
pub const GAME_ENTRY_FILE: &str = "index.html";

const GAME_URL_ENV: &str = "POKEROGUE_URL";
const GAME_DIR_ENV: &str = "POKEROGUE_GAME_DIR";
const DISABLE_PRESENCE_ENV: &str = "POKEROGUE_DISABLE_PRESENCE";

#[derive(Debug, Default, Parser)]
#[command(name = "pokerogue-desktop", version, about = "Desktop shell for PokeRogue")]
pub struct Cli {
    /// Wipe cached browser data (keeps settings and local storage) before starting
    #[arg(long = "clear-cache")]
    pub clear_cache: bool,
}

/// Where the main window loads the game from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    Remote(String),
    Local(PathBuf),
}

#[derive(Debug, Clone)]
pub struct LaunchConfig {
    pub clear_cache: bool,
    pub presence_enabled: bool,
    pub game_url: String,
    pub game_dir: PathBuf,
}

impl LaunchConfig {
    /// Reads the process arguments and environment.
    pub fn from_env() -> Self {
        Self::from_parts(parse_cli(env::args_os()), |key| env::var(key).ok())
    }

    fn from_parts(cli: Cli, var: impl Fn(&str) -> Option<String>) -> Self {
        let game_url = match var(GAME_URL_ENV) {
            Some(raw) => match Url::parse(raw.trim()) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => url.to_string(),
                _ => {
                    tracing::warn!("Invalid {} '{}', using default", GAME_URL_ENV, raw);
                    DEFAULT_GAME_URL.to_string()
                }
            },
            None => DEFAULT_GAME_URL.to_string(),
        };

        let game_dir = var(GAME_DIR_ENV)
            .map(|dir| dir.trim().to_string())
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_game_dir);

        let presence_enabled = !var(DISABLE_PRESENCE_ENV)
            .map(|value| matches!(value.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            clear_cache: cli.clear_cache,
            presence_enabled,
            game_url,
            game_dir,
        }
    }

    pub fn game_files_downloaded(&self) -> bool {
        self.game_dir.is_dir()
    }

    pub fn game_entry(&self) -> PathBuf {
        self.game_dir.join(GAME_ENTRY_FILE)
    }

    /// Offline mode without downloaded game files falls back to the remote game.
    pub fn content_source(&self, settings: &Settings) -> ContentSource {
        if settings.is_offline_mode {
            if self.game_files_downloaded() {
                return ContentSource::Local(self.game_entry());
            }
            tracing::warn!(
                "Offline mode is enabled but {} does not exist, loading {}",
                self.game_dir.display(),
                self.game_url
            );
        }
        ContentSource::Remote(self.game_url.clone())
    }
}

/// Parses the flags [`Cli`] declares. Anything else on the command line is dropped
/// before clap sees it, since the webview runtime may append its own switches.
fn parse_cli<I, T>(args: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args = recognized_args(args.into_iter().map(Into::into));
    match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            tracing::warn!("Ignoring command line: {:?}", e.kind());
            Cli::default()
        }
    }
}

fn recognized_args(mut args: impl Iterator<Item = OsString>) -> Vec<OsString> {
    let command = Cli::command();
    let mut kept: Vec<OsString> = args.next().into_iter().collect();

    for arg in args {
        let Some(text) = arg.to_str() else {
            continue;
        };
        let name = text.split_once('=').map_or(text, |(name, _)| name);
        let known = match name.strip_prefix("--") {
            Some(long) => {
                matches!(long, "help" | "version")
                    || command.get_arguments().any(|a| a.get_long() == Some(long))
            }
            None => matches!(name, "-h" | "-V"),
        };

        if known {
            kept.push(arg);
        } else {
            tracing::debug!("Ignoring unrecognized argument {}", text);
        }
    }
    kept
}

#[cfg(target_os = "macos")]
fn default_game_dir() -> PathBuf {
    dirs::document_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("PokeRogue")
        .join("game")
}

#[cfg(not(target_os = "macos"))]
fn default_game_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .as_deref()
        .and_then(std::path::Path::parent)
        .map(|dir| dir.join("..").join("game"))
        .unwrap_or_else(|| PathBuf::from("game"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)], cli: Cli) -> LaunchConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        LaunchConfig::from_parts(cli, |key| vars.get(key).cloned())
    }

    #[test]
    fn clear_cache_flag_is_parsed() {
        let cli = Cli::try_parse_from(["pokerogue-desktop", "--clear-cache"]).unwrap();
        assert!(cli.clear_cache);

        let cli = Cli::try_parse_from(["pokerogue-desktop"]).unwrap();
        assert!(!cli.clear_cache);
    }

    #[test]
    fn clear_cache_survives_unrecognized_arguments() {
        let cli = parse_cli(["pokerogue-desktop", "--clear-cache", "--foo"]);
        assert!(cli.clear_cache);

        let cli = parse_cli([
            "pokerogue-desktop",
            "--enable-features=Foo",
            "stray",
            "--clear-cache",
        ]);
        assert!(config_with(&[], cli).clear_cache);
    }

    #[test]
    fn unrecognized_arguments_alone_leave_defaults() {
        let cli = parse_cli(["pokerogue-desktop", "--foo", "-x", "bar"]);
        assert!(!cli.clear_cache);
    }

    #[test]
    fn defaults_without_environment() {
        let config = config_with(&[], Cli::default());
        assert!(!config.clear_cache);
        assert!(config.presence_enabled);
        assert_eq!(config.game_url, DEFAULT_GAME_URL);
    }

    #[test]
    fn environment_overrides() {
        let config = config_with(
            &[
                ("POKEROGUE_GAME_DIR", "/opt/pokerogue/game"),
                ("POKEROGUE_DISABLE_PRESENCE", "1"),
                ("POKEROGUE_URL", "https://beta.pokerogue.net/"),
            ],
            Cli { clear_cache: true },
        );
        assert!(config.clear_cache);
        assert!(!config.presence_enabled);
        assert_eq!(config.game_dir, PathBuf::from("/opt/pokerogue/game"));
        assert_eq!(config.game_url, "https://beta.pokerogue.net/");
    }

    #[test]
    fn invalid_url_override_is_ignored() {
        let config = config_with(&[("POKEROGUE_URL", "file:///etc/passwd")], Cli::default());
        assert_eq!(config.game_url, DEFAULT_GAME_URL);
    }

    #[test]
    fn offline_mode_loads_local_entry_when_downloaded() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_string_lossy().to_string();
        let config = config_with(&[("POKEROGUE_GAME_DIR", &dir_str)], Cli::default());

        let offline = Settings {
            is_offline_mode: true,
            ..Settings::default()
        };
        assert_eq!(
            config.content_source(&offline),
            ContentSource::Local(dir.path().join("index.html"))
        );
        assert_eq!(
            config.content_source(&Settings::default()),
            ContentSource::Remote(DEFAULT_GAME_URL.to_string())
        );
    }

    #[test]
    fn offline_mode_without_game_files_uses_remote() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing").to_string_lossy().to_string();
        let config = config_with(&[("POKEROGUE_GAME_DIR", &missing)], Cli::default());

        let offline = Settings {
            is_offline_mode: true,
            ..Settings::default()
        };
        assert_eq!(
            config.content_source(&offline),
            ContentSource::Remote(DEFAULT_GAME_URL.to_string())
        );
    }
}
