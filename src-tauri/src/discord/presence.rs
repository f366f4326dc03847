//! Discord Rich Presence sink using discord-sdk

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use discord_sdk::{
    activity::{ActivityBuilder, Assets},
    registration::{Application, LaunchCommand},
    wheel::{UserState, Wheel},
    Discord, Subscriptions,
};

use crate::error::{Result, ShellError};
use crate::presence::{PresenceSink, StatusPayload};

/// Discord Application ID for PokeRogue
pub const DISCORD_APP_ID: i64 = 1232165629046292551;

/// Connection is established lazily in [`PresenceSink::connect`]; the handshake
/// timeout is enforced by the presence bridge.
#[derive(Default)]
pub struct DiscordPresence {
    discord: Option<Discord>,
    wheel: Option<Wheel>,
}

impl DiscordPresence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lets Discord launch this executable from a profile card.
    fn register() {
        let path = match std::env::current_exe() {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("Cannot resolve executable for Discord registration: {}", e);
                return;
            }
        };

        if let Err(e) = discord_sdk::registration::register_app(Application {
            id: DISCORD_APP_ID,
            name: Some("PokeRogue".to_string()),
            command: LaunchCommand::Bin {
                path,
                args: Vec::new(),
            },
        }) {
            tracing::warn!("Failed to register Discord app: {:?}", e);
        }
    }
}

impl PresenceSink for DiscordPresence {
    fn name(&self) -> &'static str {
        "Discord"
    }

    async fn connect(&mut self) -> Result<()> {
        Self::register();

        let (wheel, handler) = Wheel::new(Box::new(|err| {
            tracing::warn!("Discord error: {:?}", err);
        }));
        let mut user_spoke = wheel.user();

        let discord = Discord::new(DISCORD_APP_ID, Subscriptions::ACTIVITY, Box::new(handler))
            .map_err(|e| ShellError::Presence(format!("Discord not available: {:?}", e)))?;

        if user_spoke.0.changed().await.is_err() {
            return Err(ShellError::Presence("Discord connection closed".into()));
        }

        let user = match &*user_spoke.0.borrow() {
            UserState::Connected(user) => user.clone(),
            UserState::Disconnected(err) => {
                let reason = format!("Discord disconnected: {:?}", err);
                return Err(ShellError::Presence(reason));
            }
        };

        tracing::info!(
            "Discord Rich Presence connected as {}#{}",
            user.username,
            user.discriminator.unwrap_or(0)
        );

        self.discord = Some(discord);
        self.wheel = Some(wheel);
        Ok(())
    }

    async fn push_status(&mut self, status: &StatusPayload) -> Result<()> {
        let discord = self
            .discord
            .as_ref()
            .ok_or_else(|| ShellError::Presence("Discord is not connected".to_string()))?;

        discord
            .update_activity(build_activity(status))
            .await
            .map(|_| ())
            .map_err(|e| ShellError::Presence(format!("{:?}", e)))
    }
}

fn build_activity(status: &StatusPayload) -> ActivityBuilder {
    let mut assets = Assets::default().large(
        status.large_image_key.as_str(),
        Some(status.large_image_text.as_str()),
    );
    if let Some(key) = &status.small_image_key {
        assets = assets.small(key.as_str(), status.small_image_text.as_deref());
    }

    let mut activity = ActivityBuilder::new()
        .start_timestamp(epoch_millis(status.start_timestamp))
        .assets(assets)
        .instance(status.instance);
    if let Some(details) = &status.details {
        activity = activity.details(details.as_str());
    }
    if let Some(state) = &status.state {
        activity = activity.state(state.as_str());
    }
    activity
}

fn epoch_millis(millis: i64) -> SystemTime {
    UNIX_EPOCH + Duration::from_millis(millis.max(0) as u64)
}
