//! Agent tool surface
//!
//! Voice and automation callers drive the player through three verbs:
//! play a catalog release, issue a transport action, read the state.
//! The transport that carries the tool calls (and serializes the
//! results) lives with the host application; this layer only maps verbs
//! onto player commands.
//!
//! Catalog knowledge stays external: the player works on raw URIs, so
//! `play_track` goes through the host-provided [`CatalogResolver`] to
//! turn an opaque release id into something playable. Resolution
//! failures are caller-level errors - the player itself cannot fail.

use crate::error::Result;
use crate::player::Player;
use crate::types::PlayerSnapshot;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Transport action for `control_player`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerAction {
    Play,
    Pause,
    Next,
    Previous,
    Stop,
    ToggleShuffle,
}

/// A catalog release resolved to playable audio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTrack {
    /// Playable locator handed to the player
    pub uri: String,

    /// Display title
    pub title: String,

    /// Logical-track key reported back to callers instead of the URI
    pub key: Option<String>,
}

/// External data collaborator resolving release ids to playable tracks
pub trait CatalogResolver: Send + Sync {
    /// Resolve a release id to a playable track
    fn resolve_release(&self, release_id: &str) -> Result<ResolvedTrack>;
}

/// Tool-call surface over a shared [`Player`]
pub struct PlayerTools {
    player: Player,
    catalog: Arc<dyn CatalogResolver>,
}

impl PlayerTools {
    /// Create the tool surface
    pub fn new(player: Player, catalog: Arc<dyn CatalogResolver>) -> Self {
        Self { player, catalog }
    }

    /// Resolve a release and start playing it
    ///
    /// Returns the post-command snapshot so the caller can report what
    /// is now playing.
    pub fn play_track(&self, release_id: &str) -> Result<PlayerSnapshot> {
        let track = self.catalog.resolve_release(release_id)?;
        tracing::debug!(release_id, uri = %track.uri, "tool playing release");
        self.player.play(Some(&track.uri), Some(&track.title));
        self.player.set_track_key(track.key);
        Ok(self.player.snapshot())
    }

    /// Dispatch a transport action, optionally adjusting volume too
    pub fn control_player(
        &self,
        action: PlayerAction,
        volume: Option<f64>,
    ) -> PlayerSnapshot {
        match action {
            PlayerAction::Play => self.player.play(None, None),
            PlayerAction::Pause => self.player.pause(),
            PlayerAction::Next => self.player.next(),
            PlayerAction::Previous => self.player.previous(),
            PlayerAction::Stop => self.player.stop(),
            PlayerAction::ToggleShuffle => self.player.toggle_shuffle(),
        }
        if let Some(volume) = volume {
            self.player.set_volume(volume);
        }
        self.player.snapshot()
    }

    /// Read-only snapshot of the full player state
    pub fn get_player_state(&self) -> PlayerSnapshot {
        self.player.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolError;
    use std::collections::HashMap;

    /// In-memory catalog for tests
    struct StubCatalog {
        releases: HashMap<String, ResolvedTrack>,
    }

    impl StubCatalog {
        fn with_release(id: &str, uri: &str, title: &str) -> Self {
            let mut releases = HashMap::new();
            releases.insert(
                id.to_string(),
                ResolvedTrack {
                    uri: uri.to_string(),
                    title: title.to_string(),
                    key: Some(id.to_string()),
                },
            );
            Self { releases }
        }
    }

    impl CatalogResolver for StubCatalog {
        fn resolve_release(&self, release_id: &str) -> Result<ResolvedTrack> {
            self.releases
                .get(release_id)
                .cloned()
                .ok_or_else(|| ToolError::UnknownRelease(release_id.to_string()))
        }
    }

    fn tools() -> PlayerTools {
        PlayerTools::new(
            Player::default(),
            Arc::new(StubCatalog::with_release(
                "rel-42",
                "https://cdn.example.com/audio/rel-42.mp3",
                "Midnight Set",
            )),
        )
    }

    #[tokio::test]
    async fn play_track_resolves_and_plays() {
        let tools = tools();
        let snap = tools.play_track("rel-42").unwrap();

        assert_eq!(
            snap.current_track_uri.as_deref(),
            Some("https://cdn.example.com/audio/rel-42.mp3")
        );
        assert_eq!(snap.current_track_title.as_deref(), Some("Midnight Set"));
        assert_eq!(snap.current_track_key.as_deref(), Some("rel-42"));
        assert!(snap.is_playing);
    }

    #[tokio::test]
    async fn play_track_unknown_release_errors() {
        let tools = tools();
        let err = tools.play_track("rel-404").unwrap_err();
        assert!(matches!(err, ToolError::UnknownRelease(id) if id == "rel-404"));

        // Player untouched by the failed call.
        assert_eq!(tools.get_player_state().current_track_uri, None);
    }

    #[tokio::test]
    async fn control_player_dispatches_actions() {
        let tools = tools();
        tools.play_track("rel-42").unwrap();

        let snap = tools.control_player(PlayerAction::Pause, None);
        assert!(!snap.is_playing);

        let snap = tools.control_player(PlayerAction::Play, None);
        assert!(snap.is_playing);

        let snap = tools.control_player(PlayerAction::ToggleShuffle, None);
        assert!(snap.shuffle_enabled);

        let snap = tools.control_player(PlayerAction::Stop, None);
        assert!(!snap.is_playing);
        assert_eq!(snap.current_time, 0.0);
    }

    #[tokio::test]
    async fn control_player_applies_volume() {
        let tools = tools();
        let snap = tools.control_player(PlayerAction::Pause, Some(0.3));
        assert_eq!(snap.volume, 0.3);

        let snap = tools.control_player(PlayerAction::Pause, Some(4.0));
        assert_eq!(snap.volume, 1.0);
    }

    #[test]
    fn action_wire_format_is_snake_case() {
        assert_eq!(
            serde_json::to_string(&PlayerAction::ToggleShuffle).unwrap(),
            "\"toggle_shuffle\""
        );
        assert_eq!(
            serde_json::from_str::<PlayerAction>("\"previous\"").unwrap(),
            PlayerAction::Previous
        );
    }
}
