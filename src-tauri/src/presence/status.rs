//! Game snapshot model and the status payloads projected from it

use serde::{Deserialize, Serialize};

pub const TITLE_MODE: &str = "Title";
pub const MAX_STATE_CHARS: usize = 128;

const ELLIPSIS: &str = "...";
const LOGO_LARGE: &str = "logo2";
const LOGO_SMALL: &str = "logo";
const GAME_NAME: &str = "PokéRogue";

/// `window.gameInfo` as exposed by the game page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub game_mode: String,
    #[serde(default)]
    pub wave: u32,
    #[serde(default)]
    pub biome: String,
    /// Seconds
    #[serde(default)]
    pub play_time: f64,
    #[serde(default)]
    pub party: Vec<PartyMember>,
}

impl GameSnapshot {
    pub fn is_title(&self) -> bool {
        self.game_mode == TITLE_MODE
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PartyMember {
    pub level: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPayload {
    pub details: Option<String>,
    pub state: Option<String>,
    /// Epoch milliseconds
    pub start_timestamp: i64,
    pub large_image_key: String,
    pub large_image_text: String,
    pub small_image_key: Option<String>,
    pub small_image_text: Option<String>,
    pub instance: bool,
}

/// Shown on the title screen and whenever the page can't be read.
pub fn menu_status(connected_at: i64) -> StatusPayload {
    StatusPayload {
        details: Some("On the menu".to_string()),
        state: None,
        start_timestamp: connected_at,
        large_image_key: LOGO_LARGE.to_string(),
        large_image_text: GAME_NAME.to_string(),
        small_image_key: None,
        small_image_text: None,
        instance: true,
    }
}

pub fn run_status(snapshot: &GameSnapshot, start_timestamp: i64) -> StatusPayload {
    StatusPayload {
        details: Some(format!(
            "{} | Wave: {} | {}",
            snapshot.game_mode, snapshot.wave, snapshot.biome
        )),
        state: Some(party_state_line(&snapshot.party)),
        start_timestamp,
        large_image_key: biome_image_key(&snapshot.biome),
        large_image_text: snapshot.biome.clone(),
        small_image_key: Some(LOGO_SMALL.to_string()),
        small_image_text: Some(GAME_NAME.to_string()),
        instance: true,
    }
}

/// `Party:` followed by one `Lv. <level> <name>` line per member, cut to
/// [`MAX_STATE_CHARS`] characters.
pub fn party_state_line(party: &[PartyMember]) -> String {
    let members: Vec<String> = party
        .iter()
        .map(|member| format!("Lv. {} {}", member.level, member.name))
        .collect();
    truncate_state(format!("Party:\n{}", members.join("\n")))
}

fn truncate_state(state: String) -> String {
    if state.chars().count() <= MAX_STATE_CHARS {
        return state;
    }
    let keep = MAX_STATE_CHARS - ELLIPSIS.len();
    let mut truncated: String = state.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// `"Ancient Ruins"` -> `"ancient_ruins_discord"`
pub fn biome_image_key(biome: &str) -> String {
    if biome.is_empty() {
        return LOGO_LARGE.to_string();
    }
    let key: String = biome
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    format!("{key}_discord")
}
