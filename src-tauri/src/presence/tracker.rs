use super::status::{menu_status, run_status, GameSnapshot, StatusPayload};
use crate::error::ShellError;

/// `adjusted_play_time` before the current run's baseline has been captured.
pub const PLAY_TIME_SENTINEL: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Menu,
    InRun,
}

/// Turns successive snapshots into status payloads, anchoring the displayed elapsed
/// time at the run's total play time rather than the current session.
///
/// The baseline is captured on the first run snapshot after the sentinel was set; if
/// pushing that tick's status fails, the baseline stays captured.
#[derive(Debug, Clone)]
pub struct PresenceTracker {
    connected_at: i64,
    phase: Phase,
    session_start_time: i64,
    adjusted_play_time: i64,
}

impl PresenceTracker {
    pub fn new(connected_at: i64) -> Self {
        Self {
            connected_at,
            phase: Phase::Menu,
            session_start_time: 0,
            adjusted_play_time: PLAY_TIME_SENTINEL,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session_start_time(&self) -> i64 {
        self.session_start_time
    }

    pub fn adjusted_play_time(&self) -> i64 {
        self.adjusted_play_time
    }

    /// One poll result in, one status out. `now` is epoch milliseconds.
    pub fn project(
        &mut self,
        snapshot: Result<&GameSnapshot, &ShellError>,
        now: i64,
    ) -> StatusPayload {
        let snapshot = match snapshot {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::debug!("Game state unavailable: {}", e);
                return menu_status(self.connected_at);
            }
        };

        if snapshot.is_title() {
            self.phase = Phase::Menu;
            self.adjusted_play_time = PLAY_TIME_SENTINEL;
            return menu_status(self.connected_at);
        }

        if self.adjusted_play_time == PLAY_TIME_SENTINEL {
            self.session_start_time = now;
            self.adjusted_play_time = (snapshot.play_time * 1000.0).round() as i64;
            tracing::debug!(
                "Run baseline captured: {} ms played",
                self.adjusted_play_time
            );
        }
        self.phase = Phase::InRun;

        run_status(snapshot, self.session_start_time - self.adjusted_play_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presence::status::{menu_status, PartyMember};

    const CONNECTED_AT: i64 = 1_700_000_000_000;

    fn title() -> GameSnapshot {
        GameSnapshot {
            game_mode: "Title".to_string(),
            wave: 0,
            biome: String::new(),
            play_time: 0.0,
            party: Vec::new(),
        }
    }

    fn run(play_time: f64) -> GameSnapshot {
        GameSnapshot {
            game_mode: "Classic".to_string(),
            wave: 7,
            biome: "Plains".to_string(),
            play_time,
            party: vec![PartyMember {
                level: 9,
                name: "Charmander".to_string(),
            }],
        }
    }

    #[test]
    fn title_resets_sentinel_and_shows_menu() {
        let mut tracker = PresenceTracker::new(CONNECTED_AT);
        tracker.project(Ok(&run(60.0)), CONNECTED_AT + 5_000);
        assert_ne!(tracker.adjusted_play_time(), PLAY_TIME_SENTINEL);

        let status = tracker.project(Ok(&title()), CONNECTED_AT + 6_000);
        assert_eq!(tracker.adjusted_play_time(), PLAY_TIME_SENTINEL);
        assert_eq!(tracker.phase(), Phase::Menu);
        assert_eq!(status, menu_status(CONNECTED_AT));
    }

    #[test]
    fn first_run_tick_captures_baseline() {
        let mut tracker = PresenceTracker::new(CONNECTED_AT);
        tracker.project(Ok(&title()), CONNECTED_AT + 1_000);

        let now = CONNECTED_AT + 2_000;
        let status = tracker.project(Ok(&run(120.0)), now);

        assert_eq!(tracker.adjusted_play_time(), 120_000);
        assert_eq!(tracker.session_start_time(), now);
        assert_eq!(status.start_timestamp, now - 120_000);
        assert_eq!(tracker.phase(), Phase::InRun);
    }

    #[test]
    fn later_run_ticks_keep_the_anchor() {
        let mut tracker = PresenceTracker::new(CONNECTED_AT);
        let first = tracker.project(Ok(&run(120.0)), CONNECTED_AT + 2_000);
        let later = tracker.project(Ok(&run(125.0)), CONNECTED_AT + 7_000);

        assert_eq!(first.start_timestamp, later.start_timestamp);
        assert_eq!(tracker.adjusted_play_time(), 120_000);
    }

    #[test]
    fn fetch_failure_shows_menu_without_touching_play_time() {
        let mut tracker = PresenceTracker::new(CONNECTED_AT);
        tracker.project(Ok(&run(30.0)), CONNECTED_AT + 1_000);
        let session_start = tracker.session_start_time();

        let error = ShellError::Snapshot("navigating".to_string());
        let status = tracker.project(Err(&error), CONNECTED_AT + 2_000);

        assert_eq!(status, menu_status(CONNECTED_AT));
        assert_eq!(tracker.adjusted_play_time(), 30_000);
        assert_eq!(tracker.session_start_time(), session_start);
        assert_eq!(tracker.phase(), Phase::InRun);

        let resumed = tracker.project(Ok(&run(31.0)), CONNECTED_AT + 3_000);
        assert_eq!(resumed.start_timestamp, session_start - 30_000);
    }

    #[test]
    fn new_run_after_title_recaptures_baseline() {
        let mut tracker = PresenceTracker::new(CONNECTED_AT);
        tracker.project(Ok(&run(30.0)), CONNECTED_AT + 1_000);
        tracker.project(Ok(&title()), CONNECTED_AT + 2_000);

        let now = CONNECTED_AT + 3_000;
        let status = tracker.project(Ok(&run(500.0)), now);
        assert_eq!(status.start_timestamp, now - 500_000);
    }
}
