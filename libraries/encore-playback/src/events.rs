//! Player events
//!
//! Discrete notifications broadcast alongside the watch-channel
//! snapshots. The watch channel always carries the latest full state;
//! events exist for observers that care about transitions (a toast on
//! error, a "now playing" announcement) rather than current values.
//! The broadcast channel is lossy - slow receivers miss old events, they
//! never stall the player.

use serde::{Deserialize, Serialize};

/// Events emitted by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Play intent flipped
    StateChanged {
        /// The new intent
        is_playing: bool,
    },

    /// The active track URI changed
    TrackChanged {
        /// New URI, `None` when playback was cleared
        uri: Option<String>,
    },

    /// Playlist contents changed
    PlaylistChanged {
        /// New playlist length
        length: usize,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume in [0, 1]
        volume: f64,
    },

    /// A reportable device failure was surfaced by the media binding
    Error {
        /// Human-readable description
        message: String,
    },
}
