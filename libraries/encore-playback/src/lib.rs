//! Encore - Playback Engine
//!
//! Shared playback state for the artist dashboard.
//!
//! This crate provides:
//! - The canonical playback state machine (play/pause/seek/skip, playlist,
//!   repeat and shuffle, volume and rate)
//! - A shared observable [`Player`] handle with the software progress clock
//! - Deterministic pseudo-waveform generation for visualizers
//! - The agent tool surface (`play_track`, `control_player`,
//!   `get_player_state`)
//!
//! # Architecture
//!
//! `encore-playback` is completely platform-agnostic:
//! - No audio I/O - the real output device is driven by `encore-audio`
//! - No rendering - UI surfaces are read-only observers
//! - No catalog knowledge - releases resolve to URIs via a host trait
//!
//! Every surface (mini-player, waveform views, voice tools) holds a clone
//! of one [`Player`] per session. Commands mutate the canonical state
//! atomically; observers read snapshots from a watch channel and discrete
//! transitions from a broadcast channel. While playback is active a
//! single cancellable clock task advances the position optimistically;
//! the media binding corrects it with real device progress.
//!
//! # Example: Basic Control
//!
//! ```rust
//! use encore_playback::{PlaybackStore, RepeatMode};
//!
//! let mut store = PlaybackStore::default();
//!
//! store.set_playlist(vec!["track-a".into(), "track-b".into()]);
//! store.play(None, None);
//! assert!(store.is_playing());
//! assert_eq!(store.current_track_uri(), Some("track-a"));
//!
//! store.set_repeat_mode(RepeatMode::Playlist);
//! store.next();
//! assert_eq!(store.current_track_uri(), Some("track-b"));
//! ```
//!
//! # Example: Shared Player
//!
//! ```rust,no_run
//! use encore_playback::{Player, PlayerConfig};
//!
//! # async fn example() {
//! let player = Player::new(PlayerConfig::default());
//!
//! // UI surfaces observe snapshots reactively.
//! let mut snapshots = player.subscribe();
//!
//! player.play(Some("https://cdn.example.com/audio/rel-1.mp3"), Some("Opener"));
//! snapshots.changed().await.ok();
//! assert!(snapshots.borrow().is_playing);
//! # }
//! ```

mod error;
mod events;
mod player;
mod store;
mod tools;
pub mod types;
pub mod waveform;

// Public exports
pub use error::{Result, ToolError};
pub use events::PlayerEvent;
pub use player::Player;
pub use store::PlaybackStore;
pub use tools::{CatalogResolver, PlayerAction, PlayerTools, ResolvedTrack};
pub use types::{PlayerConfig, PlayerSnapshot, RepeatMode};
pub use waveform::{waveform, waveform_bars};
