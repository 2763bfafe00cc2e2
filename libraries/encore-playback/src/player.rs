//! Shared player handle
//!
//! [`Player`] is the single observable front door to the canonical
//! state: every UI surface, the media binding and the tool layer hold
//! clones of one `Player` and act through its commands. Internally it is
//! an `Arc` around the mutex-guarded [`PlaybackStore`] plus the
//! publication channels and the software-clock task.
//!
//! Exactly one `Player` exists per session - enforced by the composition
//! root that constructs it, not by a global.
//!
//! # Clock ownership
//!
//! The progress clock is a spawned tokio task driving
//! [`PlaybackStore::tick`] on the configured period. Commands that start
//! playback cancel any previous clock task before spawning a fresh one,
//! and pause/stop/reset cancel it outright, so at most one clock task is
//! ever alive. Every critical section is O(1) and the store lock is
//! never held across an await point.

use crate::events::PlayerEvent;
use crate::store::PlaybackStore;
use crate::types::{PlayerConfig, PlayerSnapshot, RepeatMode};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Capacity of the lossy event channel
const EVENT_CHANNEL_CAPACITY: usize = 64;

struct PlayerInner {
    store: Mutex<PlaybackStore>,
    snapshot_tx: watch::Sender<PlayerSnapshot>,
    events_tx: broadcast::Sender<PlayerEvent>,
    clock_task: Mutex<Option<JoinHandle<()>>>,
    tick_interval: Duration,
}

impl PlayerInner {
    /// Publish the post-command state: watch snapshot plus any
    /// transition events derived from the before/after diff.
    fn publish(&self, before: &PlayerSnapshot, after: PlayerSnapshot) {
        if after.is_playing != before.is_playing {
            let _ = self.events_tx.send(PlayerEvent::StateChanged {
                is_playing: after.is_playing,
            });
        }
        if after.current_track_uri != before.current_track_uri {
            let _ = self.events_tx.send(PlayerEvent::TrackChanged {
                uri: after.current_track_uri.clone(),
            });
        }
        if after.playlist != before.playlist {
            let _ = self.events_tx.send(PlayerEvent::PlaylistChanged {
                length: after.playlist.len(),
            });
        }
        if after.volume != before.volume {
            let _ = self.events_tx.send(PlayerEvent::VolumeChanged {
                volume: after.volume,
            });
        }
        self.snapshot_tx.send_replace(after);
    }
}

/// Shared, observable playback engine handle
///
/// Cheap to clone; all clones act on the same canonical state.
#[derive(Clone)]
pub struct Player {
    inner: Arc<PlayerInner>,
}

impl Player {
    /// Create a player with the given configuration
    ///
    /// Construction is synchronous; a tokio runtime is only required
    /// once a command starts the progress clock.
    pub fn new(config: PlayerConfig) -> Self {
        let tick_interval = config.tick_interval;
        let store = PlaybackStore::new(config);
        let (snapshot_tx, _) = watch::channel(store.snapshot());
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(PlayerInner {
                store: Mutex::new(store),
                snapshot_tx,
                events_tx,
                clock_task: Mutex::new(None),
                tick_interval,
            }),
        }
    }

    // ===== Observation =====

    /// Current state snapshot
    pub fn snapshot(&self) -> PlayerSnapshot {
        self.inner.store.lock().unwrap().snapshot()
    }

    /// Subscribe to state snapshots
    ///
    /// The receiver always observes the latest state; intermediate
    /// snapshots may be skipped under load.
    pub fn subscribe(&self) -> watch::Receiver<PlayerSnapshot> {
        self.inner.snapshot_tx.subscribe()
    }

    /// Subscribe to discrete transition events
    pub fn events(&self) -> broadcast::Receiver<PlayerEvent> {
        self.inner.events_tx.subscribe()
    }

    // ===== Playback Control =====

    /// Start or resume playback (see [`PlaybackStore::play`])
    pub fn play(&self, uri: Option<&str>, title: Option<&str>) {
        self.cancel_clock();
        let playing = self.apply(|store| {
            store.play(uri, title);
            store.is_playing()
        });
        if playing {
            self.start_clock();
        }
    }

    /// Pause playback
    pub fn pause(&self) {
        self.cancel_clock();
        self.apply(PlaybackStore::pause);
    }

    /// Toggle between play and pause
    pub fn toggle_play_pause(&self) {
        self.cancel_clock();
        let playing = self.apply(|store| {
            store.toggle_play_pause();
            store.is_playing()
        });
        if playing {
            self.start_clock();
        }
    }

    /// Stop playback and rewind
    pub fn stop(&self) {
        self.cancel_clock();
        self.apply(PlaybackStore::stop);
    }

    /// Advance to the next track
    pub fn next(&self) {
        self.cancel_clock();
        let playing = self.apply(|store| {
            store.next();
            store.is_playing()
        });
        if playing {
            self.start_clock();
        }
    }

    /// Go to the previous track (or restart past the threshold)
    pub fn previous(&self) {
        self.cancel_clock();
        let playing = self.apply(|store| {
            store.previous();
            store.is_playing()
        });
        if playing {
            self.start_clock();
        }
    }

    /// Restore the configured initial state
    pub fn reset(&self) {
        self.cancel_clock();
        self.apply(PlaybackStore::reset);
    }

    // ===== Seek & Position =====

    /// Request a seek (optimistic position plus one-shot target)
    pub fn seek_to(&self, time: f64) {
        self.apply(|store| store.seek_to(time));
    }

    /// Clear the one-shot seek target (media binding)
    pub fn clear_seek(&self) {
        self.apply(PlaybackStore::clear_seek);
    }

    /// Skip forward by `seconds` (configured default when `None`)
    pub fn skip_forward(&self, seconds: Option<f64>) {
        self.apply(|store| store.skip_forward(seconds));
    }

    /// Skip backward by `seconds` (configured default when `None`)
    pub fn skip_backward(&self, seconds: Option<f64>) {
        self.apply(|store| store.skip_backward(seconds));
    }

    /// Report the real playback position (media binding)
    pub fn set_current_time(&self, time: f64) {
        self.apply(|store| store.set_current_time(time));
    }

    /// Report the real track duration (media binding)
    pub fn set_duration(&self, duration: f64) {
        self.apply(|store| store.set_duration(duration));
    }

    /// Set or clear the buffering flag (media binding)
    pub fn set_buffering(&self, buffering: bool) {
        self.apply(|store| store.set_buffering(buffering));
    }

    /// Set or clear the logical-track key (tool layer)
    pub fn set_track_key(&self, key: Option<String>) {
        self.apply(|store| store.set_track_key(key));
    }

    // ===== Volume & Rate =====

    /// Set volume, clamped to [0, 1]
    pub fn set_volume(&self, volume: f64) {
        self.apply(|store| store.set_volume(volume));
    }

    /// Toggle mute (unmute restores the fixed configured level)
    pub fn toggle_mute(&self) {
        self.apply(PlaybackStore::toggle_mute);
    }

    /// Set playback rate, clamped to [0.5, 2.0]
    pub fn set_playback_rate(&self, rate: f64) {
        self.apply(|store| store.set_playback_rate(rate));
    }

    // ===== Playlist =====

    /// Replace the playlist
    pub fn set_playlist(&self, tracks: Vec<String>) {
        self.apply(|store| store.set_playlist(tracks));
    }

    /// Append a track to the playlist
    pub fn add_to_playlist(&self, uri: &str) {
        self.apply(|store| store.add_to_playlist(uri));
    }

    /// Remove the playlist entry at `index`
    pub fn remove_from_playlist(&self, index: usize) {
        self.apply(|store| store.remove_from_playlist(index));
    }

    /// Set the repeat mode
    pub fn set_repeat_mode(&self, mode: RepeatMode) {
        self.apply(|store| store.set_repeat_mode(mode));
    }

    /// Toggle shuffle
    pub fn toggle_shuffle(&self) {
        self.apply(PlaybackStore::toggle_shuffle);
    }

    // ===== Failure reporting =====

    /// Surface a reportable device failure
    ///
    /// Called by the media binding for non-benign playback errors. Logs,
    /// clears buffering so the UI cannot hang on a hard failure, and
    /// broadcasts an [`PlayerEvent::Error`]. Play intent is left alone;
    /// the normal event flow reconciles it.
    pub fn report_error(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "playback failure reported");
        self.apply(|store| store.set_buffering(false));
        let _ = self
            .inner
            .events_tx
            .send(PlayerEvent::Error { message });
    }

    // ===== Internals =====

    /// Run a command under the store lock and publish the result
    fn apply<R>(&self, command: impl FnOnce(&mut PlaybackStore) -> R) -> R {
        let mut store = self.inner.store.lock().unwrap();
        let before = store.snapshot();
        let result = command(&mut store);
        let after = store.snapshot();
        drop(store);
        self.inner.publish(&before, after);
        result
    }

    /// Cancel the clock task, if any
    fn cancel_clock(&self) {
        if let Some(task) = self.inner.clock_task.lock().unwrap().take() {
            task.abort();
        }
    }

    /// Spawn a fresh clock task, cancelling any predecessor
    fn start_clock(&self) {
        let inner = Arc::clone(&self.inner);
        let period = self.inner.tick_interval;
        let delta = period.as_secs_f64();

        let mut slot = self.inner.clock_task.lock().unwrap();
        if let Some(task) = slot.take() {
            task.abort();
        }
        *slot = Some(tokio::spawn(async move {
            let mut timer = tokio::time::interval(period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first interval tick completes immediately; consume it
            // so the clock advances one full period per step.
            timer.tick().await;
            loop {
                timer.tick().await;
                let keep_running = {
                    let mut store = inner.store.lock().unwrap();
                    let before = store.snapshot();
                    let keep = store.tick(delta);
                    let after = store.snapshot();
                    drop(store);
                    inner.publish(&before, after);
                    keep
                };
                if !keep_running {
                    break;
                }
            }
        }));
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PlayerConfig::default())
    }
}
