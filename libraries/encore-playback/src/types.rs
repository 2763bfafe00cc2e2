//! Core types for the playback engine

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Repeat mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatMode {
    /// Stop when the playlist ends
    #[default]
    Off,

    /// Loop the current track only
    Track,

    /// Loop the entire playlist
    Playlist,
}

/// Configuration for the player
///
/// Tuning knobs for the software clock and the command defaults. The
/// defaults reproduce the dashboard's stock behavior; hosts override
/// individual fields as needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Software clock period (default: 100 ms)
    pub tick_interval: Duration,

    /// Duration assumed until real metadata arrives (default: 180 s)
    pub placeholder_duration: f64,

    /// Volume restored by unmuting (default: 0.7)
    ///
    /// Deliberately a fixed level, not the pre-mute value.
    pub unmute_level: f64,

    /// Position beyond which `previous` restarts in place (default: 3 s)
    pub previous_restart_threshold: f64,

    /// Default skip amount for skip forward/backward (default: 10 s)
    pub skip_amount: f64,

    /// Initial volume (0.0-1.0, default: 1.0)
    pub volume: f64,

    /// Initial playback rate (default: 1.0)
    pub playback_rate: f64,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// Initial shuffle state (default: off)
    pub shuffle: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(100),
            placeholder_duration: 180.0,
            unmute_level: 0.7,
            previous_restart_threshold: 3.0,
            skip_amount: 10.0,
            volume: 1.0,
            playback_rate: 1.0,
            repeat: RepeatMode::Off,
            shuffle: false,
        }
    }
}

/// Read-only copy of the canonical playback state
///
/// Published over the player's watch channel after every mutation and
/// returned verbatim by the tool surface. Consumers never mutate state
/// through a snapshot; all writes go through player commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Opaque locator of the active track, `None` when nothing is loaded
    pub current_track_uri: Option<String>,

    /// Display label, independent of the URI
    pub current_track_title: Option<String>,

    /// Opaque logical-track identifier set by the tool layer
    pub current_track_key: Option<String>,

    /// Intent to play; audio may still be buffering
    pub is_playing: bool,

    /// True until the real output confirms audible playback
    pub is_buffering: bool,

    /// Canonical position in seconds
    pub current_time: f64,

    /// Canonical track length in seconds (placeholder until metadata)
    pub duration: f64,

    /// Volume in [0.0, 1.0]
    pub volume: f64,

    /// Playback rate in [0.5, 2.0]
    pub playback_rate: f64,

    /// One-shot seek request awaiting consumption by the media binding
    pub seek_target: Option<f64>,

    /// Track URIs in playback order (duplicates allowed)
    pub playlist: Vec<String>,

    /// Selected playlist index, `None` when nothing is selected
    pub current_track_index: Option<usize>,

    /// Repeat mode
    pub repeat_mode: RepeatMode,

    /// Shuffle state
    pub shuffle_enabled: bool,
}
