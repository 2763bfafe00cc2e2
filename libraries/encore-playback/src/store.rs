//! Canonical playback state machine
//!
//! `PlaybackStore` owns every playback field and mutates them only
//! through its command methods. Commands are total functions: out-of-range
//! input is clamped and impossible requests are no-ops, so the store can
//! never be observed in an invalid state and never returns an error.
//!
//! The store is purely synchronous and performs no I/O. Clock scheduling
//! lives in [`crate::player::Player`], which calls [`PlaybackStore::tick`]
//! on a fixed period; device reconciliation lives in the media binding
//! crate, which feeds real progress back through the direct setters
//! (`set_current_time`, `set_duration`, `set_buffering`).

use crate::types::{PlayerConfig, PlayerSnapshot, RepeatMode};
use rand::Rng;

/// Playback rate bounds
const MIN_PLAYBACK_RATE: f64 = 0.5;
const MAX_PLAYBACK_RATE: f64 = 2.0;

/// Canonical playback state
///
/// One instance per session. All mutation goes through the command
/// methods below; reads go through [`PlaybackStore::snapshot`] or the
/// field accessors.
#[derive(Debug)]
pub struct PlaybackStore {
    config: PlayerConfig,

    current_track_uri: Option<String>,
    current_track_title: Option<String>,
    current_track_key: Option<String>,

    is_playing: bool,
    is_buffering: bool,

    current_time: f64,
    duration: f64,

    volume: f64,
    playback_rate: f64,

    seek_target: Option<f64>,

    playlist: Vec<String>,
    current_index: Option<usize>,

    repeat_mode: RepeatMode,
    shuffle_enabled: bool,
}

impl PlaybackStore {
    /// Create a new store with the configured initial state
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            current_track_uri: None,
            current_track_title: None,
            current_track_key: None,
            is_playing: false,
            is_buffering: false,
            current_time: 0.0,
            duration: config.placeholder_duration,
            volume: config.volume.clamp(0.0, 1.0),
            playback_rate: config.playback_rate.clamp(MIN_PLAYBACK_RATE, MAX_PLAYBACK_RATE),
            seek_target: None,
            playlist: Vec::new(),
            current_index: None,
            repeat_mode: config.repeat,
            shuffle_enabled: config.shuffle,
            config,
        }
    }

    // ===== Playback Control =====

    /// Start or resume playback
    ///
    /// With a new URI: switches track, resets the position and enters
    /// buffering until the real output confirms playback. With the
    /// current URI: resumes in place. With no URI: resumes the current
    /// track, or starts the selected playlist entry from zero, or no-ops
    /// when nothing is loaded and nothing is selected.
    pub fn play(&mut self, uri: Option<&str>, title: Option<&str>) {
        match uri {
            Some(uri) if self.current_track_uri.as_deref() != Some(uri) => {
                tracing::debug!(uri, "switching track");
                self.current_track_uri = Some(uri.to_string());
                if let Some(title) = title {
                    self.current_track_title = Some(title.to_string());
                }
                self.current_track_key = None;
                self.is_playing = true;
                self.is_buffering = true;
                self.current_time = 0.0;
            }
            Some(_) => {
                self.is_playing = true;
                self.is_buffering = false;
            }
            None => {
                if self.current_track_uri.is_some() {
                    self.is_playing = true;
                    self.is_buffering = false;
                } else if let Some(uri) = self
                    .current_index
                    .and_then(|i| self.playlist.get(i))
                    .cloned()
                {
                    self.play(Some(&uri), None);
                }
            }
        }
    }

    /// Pause playback, keeping position and selection
    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    /// Toggle between play and pause
    pub fn toggle_play_pause(&mut self) {
        if self.is_playing {
            self.pause();
        } else {
            self.play(None, None);
        }
    }

    /// Stop playback and rewind; track selection and playlist survive
    pub fn stop(&mut self) {
        self.is_playing = false;
        self.current_time = 0.0;
    }

    // ===== Seek =====

    /// Request a seek
    ///
    /// Sets the one-shot seek target for the media binding and moves the
    /// canonical position immediately so scrubbing feels instant. The
    /// position is floored at zero but deliberately not clamped against
    /// the duration, which may still be a placeholder.
    pub fn seek_to(&mut self, time: f64) {
        if !time.is_finite() {
            return;
        }
        let time = time.max(0.0);
        self.seek_target = Some(time);
        self.current_time = time;
    }

    /// Clear the one-shot seek target (called by the media binding)
    pub fn clear_seek(&mut self) {
        self.seek_target = None;
    }

    /// Skip forward, clamped to the track duration
    pub fn skip_forward(&mut self, seconds: Option<f64>) {
        let seconds = seconds.unwrap_or(self.config.skip_amount);
        if !seconds.is_finite() {
            return;
        }
        self.seek_to((self.current_time + seconds).min(self.duration));
    }

    /// Skip backward, floored at zero
    pub fn skip_backward(&mut self, seconds: Option<f64>) {
        let seconds = seconds.unwrap_or(self.config.skip_amount);
        if !seconds.is_finite() {
            return;
        }
        self.seek_to((self.current_time - seconds).max(0.0));
    }

    // ===== Collaborator-facing setters =====

    /// Report the real playback position (media binding)
    ///
    /// Does not touch the seek target.
    pub fn set_current_time(&mut self, time: f64) {
        if !time.is_finite() {
            return;
        }
        self.current_time = time.max(0.0);
    }

    /// Report the real track duration (media binding)
    pub fn set_duration(&mut self, duration: f64) {
        if !duration.is_finite() {
            return;
        }
        self.duration = duration.max(0.0);
    }

    /// Set or clear the buffering flag (media binding)
    pub fn set_buffering(&mut self, buffering: bool) {
        self.is_buffering = buffering;
    }

    /// Set or clear the logical-track key (tool layer)
    pub fn set_track_key(&mut self, key: Option<String>) {
        self.current_track_key = key;
    }

    // ===== Volume & Rate =====

    /// Set volume, clamped to [0, 1]
    pub fn set_volume(&mut self, volume: f64) {
        if !volume.is_finite() {
            return;
        }
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Toggle mute
    ///
    /// Muting drops to zero; unmuting restores the fixed configured
    /// level rather than the pre-mute volume.
    pub fn toggle_mute(&mut self) {
        if self.volume > 0.0 {
            self.volume = 0.0;
        } else {
            self.volume = self.config.unmute_level.clamp(0.0, 1.0);
        }
    }

    /// Set playback rate, clamped to [0.5, 2.0]
    pub fn set_playback_rate(&mut self, rate: f64) {
        if !rate.is_finite() {
            return;
        }
        self.playback_rate = rate.clamp(MIN_PLAYBACK_RATE, MAX_PLAYBACK_RATE);
    }

    // ===== Playlist =====

    /// Replace the playlist
    ///
    /// A non-empty playlist selects index 0 as the current track without
    /// starting playback; an empty playlist clears the selection.
    pub fn set_playlist(&mut self, tracks: Vec<String>) {
        self.playlist = tracks;
        if self.playlist.is_empty() {
            self.current_index = None;
        } else {
            self.current_index = Some(0);
            self.select_current_uri();
        }
    }

    /// Append a track
    ///
    /// Appending to an empty playlist selects the new entry as current,
    /// again without starting playback.
    pub fn add_to_playlist(&mut self, uri: &str) {
        let was_empty = self.playlist.is_empty();
        self.playlist.push(uri.to_string());
        if was_empty {
            self.current_index = Some(0);
            self.select_current_uri();
        }
    }

    /// Remove the entry at `index`; out-of-bounds indices are ignored
    ///
    /// Removing at or before the current index shifts the selection down
    /// one (floored at zero), and the current track URI is re-pointed to
    /// whatever now occupies the adjusted index - playback follows the
    /// playlist, even mid-track.
    pub fn remove_from_playlist(&mut self, index: usize) {
        if index >= self.playlist.len() {
            return;
        }
        self.playlist.remove(index);

        if let Some(current) = self.current_index {
            if self.playlist.is_empty() {
                self.current_index = None;
            } else {
                let adjusted = if index <= current {
                    current.saturating_sub(1)
                } else {
                    current
                };
                self.current_index = Some(adjusted);
                self.select_current_uri();
            }
        }
    }

    /// Set the repeat mode
    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.repeat_mode = mode;
    }

    /// Toggle shuffle
    pub fn toggle_shuffle(&mut self) {
        self.shuffle_enabled = !self.shuffle_enabled;
    }

    /// Advance to the next track
    ///
    /// Shuffle picks uniformly among the other playlist indices (a
    /// single-entry playlist has no other index, so this is a no-op);
    /// sequential order wraps from the last entry to the first. The
    /// chosen entry becomes current and starts playing.
    pub fn next(&mut self) {
        let Some(target) = self.pick_next_index() else {
            return;
        };
        self.current_index = Some(target);
        let uri = self.playlist[target].clone();
        self.play(Some(&uri), None);
    }

    /// Go to the previous track
    ///
    /// More than three seconds in, this restarts the current track in
    /// place (the no-URI `play` form) without changing the selection.
    /// Earlier than that it moves back one entry - wrapping from the
    /// first to the last, or picking a random other index under shuffle.
    pub fn previous(&mut self) {
        if self.playlist.is_empty() {
            return;
        }
        if self.current_time > self.config.previous_restart_threshold {
            self.play(None, None);
            return;
        }

        let target = if self.shuffle_enabled {
            match self.pick_shuffle_index() {
                Some(index) => index,
                None => return,
            }
        } else {
            let len = self.playlist.len();
            let current = self.current_index.unwrap_or(0);
            (current + len - 1) % len
        };
        self.current_index = Some(target);
        let uri = self.playlist[target].clone();
        self.play(Some(&uri), None);
    }

    /// Restore the configured initial state
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }

    // ===== Software clock =====

    /// Advance the software clock by one tick of `delta` seconds
    ///
    /// Frozen while buffering (the mechanism that holds the position
    /// steady during loading). Once the position reaches the duration the
    /// end-of-track policy applies: repeat-track rewinds, repeat-playlist
    /// or a remaining next entry advances via [`PlaybackStore::next`],
    /// and otherwise playback stops. Returns whether the clock should
    /// keep running.
    pub fn tick(&mut self, delta: f64) -> bool {
        if !self.is_playing {
            return false;
        }
        if self.is_buffering {
            return true;
        }
        if self.current_time < self.duration {
            self.current_time += delta;
            return true;
        }

        match self.repeat_mode {
            RepeatMode::Track => {
                self.current_time = 0.0;
                true
            }
            RepeatMode::Playlist => {
                self.next();
                true
            }
            RepeatMode::Off => {
                let has_next = self
                    .current_index
                    .is_some_and(|i| i + 1 < self.playlist.len());
                if has_next {
                    self.next();
                    true
                } else {
                    tracing::debug!("playlist exhausted, stopping");
                    self.is_playing = false;
                    false
                }
            }
        }
    }

    // ===== State Queries =====

    /// Produce a read-only copy of the full state
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            current_track_uri: self.current_track_uri.clone(),
            current_track_title: self.current_track_title.clone(),
            current_track_key: self.current_track_key.clone(),
            is_playing: self.is_playing,
            is_buffering: self.is_buffering,
            current_time: self.current_time,
            duration: self.duration,
            volume: self.volume,
            playback_rate: self.playback_rate,
            seek_target: self.seek_target,
            playlist: self.playlist.clone(),
            current_track_index: self.current_index,
            repeat_mode: self.repeat_mode,
            shuffle_enabled: self.shuffle_enabled,
        }
    }

    /// URI of the active track
    pub fn current_track_uri(&self) -> Option<&str> {
        self.current_track_uri.as_deref()
    }

    /// Whether playback is intended to progress
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Whether the track is still waiting for the real output
    pub fn is_buffering(&self) -> bool {
        self.is_buffering
    }

    /// Canonical position in seconds
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Canonical duration in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Volume in [0, 1]
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Playback rate in [0.5, 2.0]
    pub fn playback_rate(&self) -> f64 {
        self.playback_rate
    }

    /// Pending one-shot seek request, if any
    pub fn seek_target(&self) -> Option<f64> {
        self.seek_target
    }

    /// Playlist entries in playback order
    pub fn playlist(&self) -> &[String] {
        &self.playlist
    }

    /// Selected playlist index
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    // ===== Internals =====

    /// Re-point the current track URI at the selected playlist entry
    fn select_current_uri(&mut self) {
        if let Some(uri) = self.current_index.and_then(|i| self.playlist.get(i)) {
            if self.current_track_uri.as_deref() != Some(uri.as_str()) {
                self.current_track_uri = Some(uri.clone());
                self.current_track_key = None;
            }
        }
    }

    fn pick_next_index(&self) -> Option<usize> {
        if self.playlist.is_empty() {
            return None;
        }
        if self.shuffle_enabled {
            self.pick_shuffle_index()
        } else {
            let current = self.current_index.unwrap_or(0);
            Some((current + 1) % self.playlist.len())
        }
    }

    /// Uniform pick among all indices except the current one
    fn pick_shuffle_index(&self) -> Option<usize> {
        let len = self.playlist.len();
        if len <= 1 {
            return None;
        }
        let mut rng = rand::thread_rng();
        match self.current_index {
            Some(current) if current < len => {
                let mut candidate = rng.gen_range(0..len - 1);
                if candidate >= current {
                    candidate += 1;
                }
                Some(candidate)
            }
            _ => Some(rng.gen_range(0..len)),
        }
    }
}

impl Default for PlaybackStore {
    fn default() -> Self {
        Self::new(PlayerConfig::default())
    }
}
