mod presence;

pub use presence::{DiscordPresence, DISCORD_APP_ID};
