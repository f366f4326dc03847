mod manager;
mod status;
mod tracker;
mod traits;

pub use manager::{ConnectionState, PresenceBridge, POLL_INTERVAL};
pub use status::{
    biome_image_key, menu_status, party_state_line, run_status, GameSnapshot, PartyMember,
    StatusPayload, MAX_STATE_CHARS, TITLE_MODE,
};
pub use tracker::{Phase, PresenceTracker, PLAY_TIME_SENTINEL};
pub use traits::{PresenceSink, SnapshotSource};
