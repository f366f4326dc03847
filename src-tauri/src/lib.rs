pub mod cache;
pub mod config;
pub mod error;
pub mod game_files;
pub mod lifecycle;
pub mod logging;
pub mod presence;
pub mod settings;
pub mod window;

#[cfg(feature = "desktop")]
mod discord;
#[cfg(feature = "desktop")]
mod shell;

#[cfg(feature = "desktop")]
pub use shell::run;
