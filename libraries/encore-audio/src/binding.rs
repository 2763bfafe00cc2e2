//! Media binding - reconciles canonical state against the real output
//!
//! The store's software clock is an optimistic prediction; the real
//! output device is authoritative once available. [`MediaBinding`] is
//! the single component allowed to bridge the two: it observes player
//! snapshots and imperatively drives the one [`MediaHandle`], while
//! feeding the backend's real signals (actual progress, real duration,
//! buffering resolution, natural end-of-track) back into the player.
//!
//! Only one binding may be active per session - two bindings on
//! different handles would produce audible double playback. Enforcing
//! that is the application shell's job; this module only provides the
//! component.

use crate::handle::{MediaEvent, MediaHandle};
use encore_playback::{Player, PlayerSnapshot};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Reconciliation task bound to one media handle
///
/// Dropping the binding aborts the task and releases the handle.
pub struct MediaBinding {
    task: JoinHandle<()>,
}

impl MediaBinding {
    /// Bind a player to a media handle
    ///
    /// `media_events` is the backend's signal channel; the binding runs
    /// until the backend disconnects (the channel closes) or the binding
    /// is dropped.
    pub fn spawn(
        player: Player,
        handle: Box<dyn MediaHandle>,
        media_events: mpsc::Receiver<MediaEvent>,
    ) -> Self {
        let task = tokio::spawn(run(player, handle, media_events));
        Self { task }
    }

    /// Whether the reconciliation task has exited
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Tear the binding down, releasing the handle
    pub fn shutdown(self) {}
}

impl Drop for MediaBinding {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    player: Player,
    mut handle: Box<dyn MediaHandle>,
    mut media_events: mpsc::Receiver<MediaEvent>,
) {
    let mut snapshots = player.subscribe();

    // Apply whatever state existed before the binding attached.
    let mut last = snapshots.borrow_and_update().clone();
    reconcile(&player, handle.as_mut(), None, &last);

    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = snapshots.borrow_and_update().clone();
                reconcile(&player, handle.as_mut(), Some(&last), &current);
                last = current;
            }
            event = media_events.recv() => {
                match event {
                    Some(event) => apply_media_event(&player, event),
                    None => {
                        tracing::debug!("media backend disconnected, binding exits");
                        break;
                    }
                }
            }
        }
    }
}

/// Drive the handle toward the target snapshot
///
/// `prev` is the last snapshot this binding applied; `None` means a
/// fresh handle with nothing applied yet. Each concern reconciles
/// independently, but a track switch always settles before any play
/// attempt so a stale buffer can never race the new source.
fn reconcile(
    player: &Player,
    handle: &mut dyn MediaHandle,
    prev: Option<&PlayerSnapshot>,
    next: &PlayerSnapshot,
) {
    let track_changed = match prev {
        Some(prev) => prev.current_track_uri != next.current_track_uri,
        None => next.current_track_uri.is_some(),
    };

    if track_changed {
        match &next.current_track_uri {
            Some(uri) => {
                // Silence the old source before loading the new one.
                if let Err(error) = handle.pause() {
                    tracing::debug!(%error, "pause before load failed");
                }
                tracing::debug!(%uri, "loading source");
                if let Err(error) = handle.load(uri) {
                    player.report_error(format!("failed to load {uri}: {error}"));
                }
                player.set_current_time(0.0);
            }
            None => {
                // Track cleared: stop driving the handle.
                if let Err(error) = handle.pause() {
                    tracing::debug!(%error, "pause after track clear failed");
                }
            }
        }
    }

    let play_changed = match prev {
        Some(prev) => prev.is_playing != next.is_playing,
        None => next.is_playing,
    };

    if next.is_playing {
        if (play_changed || track_changed) && next.current_track_uri.is_some() {
            match handle.play() {
                Ok(()) => {}
                Err(error) if error.is_benign() => {
                    tracing::debug!(%error, "ignoring superseded play request");
                }
                Err(error) => {
                    player.report_error(format!("playback failed: {error}"));
                }
            }
        }
    } else if play_changed {
        if let Err(error) = handle.pause() {
            tracing::debug!(%error, "pause failed");
        }
    }

    let volume_changed = match prev {
        Some(prev) => prev.volume != next.volume,
        None => true,
    };
    if volume_changed {
        if let Err(error) = handle.set_volume(next.volume) {
            tracing::debug!(%error, "volume sync failed");
        }
    }

    // One-shot seek consumption: apply, then clear, so the binding never
    // fights an in-progress drag gesture with continuous re-seeks.
    if let Some(target) = next.seek_target {
        if let Err(error) = handle.seek(target) {
            tracing::debug!(%error, "seek failed");
        }
        player.clear_seek();
    }
}

/// Feed a real backend signal into the canonical state
fn apply_media_event(player: &Player, event: MediaEvent) {
    match event {
        MediaEvent::TimeUpdate { position } => player.set_current_time(position),
        MediaEvent::Playing => player.set_buffering(false),
        MediaEvent::LoadedMetadata { duration } => player.set_duration(duration),
        MediaEvent::Ended => {
            // Secondary end-of-track path: the store's own clock owns
            // repeat/advance policy, this only keeps the device's ended
            // signal from leaving stale state behind.
            player.pause();
            player.set_current_time(0.0);
        }
    }
}
