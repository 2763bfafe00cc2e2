//! Integration tests for the shared player
//!
//! Exercises the full command surface through [`Player`], including the
//! software progress clock. Clock tests run on tokio's paused clock so
//! tick behavior is driven deterministically by virtual time.

use encore_playback::{Player, PlayerConfig, RepeatMode};
use std::time::Duration;

/// Let the clock task run for `ms` of virtual time
async fn run_clock_for(ms: u64) {
    tokio::task::yield_now().await;
    tokio::time::sleep(Duration::from_millis(ms)).await;
    tokio::task::yield_now().await;
}

fn playlist(tracks: &[&str]) -> Vec<String> {
    tracks.iter().map(|t| (*t).to_string()).collect()
}

// ===== Software clock =====

#[tokio::test(start_paused = true)]
async fn clock_advances_position_while_playing() {
    let player = Player::default();
    player.play(Some("u"), None);
    player.set_buffering(false);

    run_clock_for(1050).await;

    let time = player.snapshot().current_time;
    assert!(
        (0.9..=1.2).contains(&time),
        "expected ~1s of progress, got {time}"
    );
}

#[tokio::test(start_paused = true)]
async fn clock_is_frozen_while_buffering() {
    let player = Player::default();
    player.play(Some("u"), None);
    assert!(player.snapshot().is_buffering);

    run_clock_for(1050).await;
    assert_eq!(player.snapshot().current_time, 0.0);

    // Confirming real playback un-freezes the clock.
    player.set_buffering(false);
    run_clock_for(550).await;
    assert!(player.snapshot().current_time > 0.3);
}

#[tokio::test(start_paused = true)]
async fn pause_halts_the_clock() {
    let player = Player::default();
    player.play(Some("u"), None);
    player.set_buffering(false);
    run_clock_for(350).await;

    player.pause();
    let frozen = player.snapshot().current_time;
    run_clock_for(1050).await;
    assert_eq!(player.snapshot().current_time, frozen);
}

#[tokio::test(start_paused = true)]
async fn repeated_play_commands_keep_a_single_clock() {
    let player = Player::default();
    player.play(Some("u"), None);
    player.set_buffering(false);

    // Each play cancels the previous clock before starting a new one; if
    // ticks ever stacked, the position would advance at a multiple of
    // real time.
    for _ in 0..5 {
        player.play(None, None);
    }

    run_clock_for(1050).await;
    let time = player.snapshot().current_time;
    assert!(
        (0.8..=1.3).contains(&time),
        "stacked ticks? position {time} after ~1s"
    );
}

#[tokio::test(start_paused = true)]
async fn track_end_advances_to_next_entry() {
    let player = Player::default();
    player.set_playlist(playlist(&["a", "b"]));
    player.play(None, None);
    player.set_buffering(false);
    player.set_duration(0.3);

    run_clock_for(500).await;

    let snap = player.snapshot();
    assert_eq!(snap.current_track_uri.as_deref(), Some("b"));
    assert_eq!(snap.current_track_index, Some(1));
    assert!(snap.is_playing);
    assert!(snap.is_buffering, "new track must re-enter buffering");
    assert_eq!(snap.current_time, 0.0);
}

#[tokio::test(start_paused = true)]
async fn track_end_with_repeat_track_rewinds() {
    let player = Player::default();
    player.set_repeat_mode(RepeatMode::Track);
    player.play(Some("u"), None);
    player.set_buffering(false);
    player.set_duration(0.2);

    run_clock_for(350).await;

    let snap = player.snapshot();
    assert_eq!(snap.current_track_uri.as_deref(), Some("u"));
    assert!(snap.is_playing);
    assert!(snap.current_time < 0.2, "position should have rewound");
}

#[tokio::test(start_paused = true)]
async fn track_end_with_repeat_playlist_wraps() {
    let player = Player::default();
    player.set_playlist(playlist(&["a", "b"]));
    player.set_repeat_mode(RepeatMode::Playlist);
    player.next();
    player.set_buffering(false);
    player.set_duration(0.2);

    run_clock_for(400).await;

    let snap = player.snapshot();
    assert_eq!(snap.current_track_uri.as_deref(), Some("a"));
    assert_eq!(snap.current_track_index, Some(0));
    assert!(snap.is_playing);
}

#[tokio::test(start_paused = true)]
async fn playlist_end_without_repeat_stops() {
    let player = Player::default();
    player.set_playlist(playlist(&["a"]));
    player.play(None, None);
    player.set_buffering(false);
    player.set_duration(0.2);

    run_clock_for(500).await;

    let snap = player.snapshot();
    assert!(!snap.is_playing, "no auto-wrap past a non-repeating playlist");
    assert_eq!(snap.current_track_index, Some(0));

    // The clock is gone; nothing moves any more.
    let frozen = player.snapshot().current_time;
    run_clock_for(1000).await;
    assert_eq!(player.snapshot().current_time, frozen);
}

#[tokio::test(start_paused = true)]
async fn reset_cancels_the_clock() {
    let player = Player::default();
    player.play(Some("u"), None);
    player.set_buffering(false);
    run_clock_for(350).await;

    player.reset();
    assert_eq!(player.snapshot(), Player::default().snapshot());

    run_clock_for(1000).await;
    assert_eq!(player.snapshot().current_time, 0.0);
    assert!(!player.snapshot().is_playing);
}

#[tokio::test(start_paused = true)]
async fn custom_tick_interval_is_respected() {
    let config = PlayerConfig {
        tick_interval: Duration::from_millis(250),
        ..Default::default()
    };
    let player = Player::new(config);
    player.play(Some("u"), None);
    player.set_buffering(false);

    run_clock_for(1100).await;

    // Four 250 ms ticks in ~1.1 s, each advancing 0.25 s.
    let time = player.snapshot().current_time;
    assert!(
        (0.9..=1.3).contains(&time),
        "expected ~1s of progress, got {time}"
    );
}

// ===== End-to-end command scenarios =====

#[tokio::test]
async fn setting_a_playlist_selects_the_first_track() {
    let player = Player::default();
    player.set_playlist(playlist(&["a", "b", "c"]));

    let snap = player.snapshot();
    assert_eq!(snap.playlist, vec!["a", "b", "c"]);
    assert_eq!(snap.current_track_index, Some(0));
    assert_eq!(snap.current_track_uri.as_deref(), Some("a"));
    assert!(!snap.is_playing);
}

#[tokio::test]
async fn playing_a_uri_sets_track_and_title() {
    let player = Player::default();
    player.play(Some("https://x/track.mp3"), Some("T"));

    let snap = player.snapshot();
    assert_eq!(snap.current_track_uri.as_deref(), Some("https://x/track.mp3"));
    assert_eq!(snap.current_track_title.as_deref(), Some("T"));
    assert!(snap.is_playing);
}

#[tokio::test]
async fn pause_then_bare_play_resumes_same_track() {
    let player = Player::default();
    player.play(Some("u"), None);
    player.pause();
    assert!(!player.snapshot().is_playing);

    player.play(None, None);
    let snap = player.snapshot();
    assert_eq!(snap.current_track_uri.as_deref(), Some("u"));
    assert!(snap.is_playing);
}

#[tokio::test]
async fn volume_is_clamped_both_ways() {
    let player = Player::default();
    player.set_volume(1.5);
    assert_eq!(player.snapshot().volume, 1.0);
    player.set_volume(-0.5);
    assert_eq!(player.snapshot().volume, 0.0);
}

#[tokio::test]
async fn unmute_restores_the_fixed_level() {
    let player = Player::default();
    player.set_volume(0.0);
    player.toggle_mute();
    assert_eq!(player.snapshot().volume, 0.7);
}

#[tokio::test]
async fn removal_shifts_the_current_index() {
    let player = Player::default();
    player.set_playlist(playlist(&["a", "b", "c"]));
    player.next();
    player.next();
    assert_eq!(player.snapshot().current_track_index, Some(2));

    player.remove_from_playlist(0);
    let snap = player.snapshot();
    assert_eq!(snap.playlist, vec!["b", "c"]);
    assert_eq!(snap.current_track_index, Some(1));
}

#[tokio::test]
async fn reset_matches_documented_defaults() {
    let player = Player::default();
    player.set_playlist(playlist(&["a", "b"]));
    player.play(Some("x"), Some("X"));
    player.set_volume(0.2);
    player.set_playback_rate(1.75);
    player.seek_to(42.0);
    player.set_repeat_mode(RepeatMode::Track);
    player.toggle_shuffle();

    player.reset();

    let snap = player.snapshot();
    assert_eq!(snap.current_track_uri, None);
    assert!(!snap.is_playing);
    assert!(!snap.is_buffering);
    assert_eq!(snap.current_time, 0.0);
    assert_eq!(snap.duration, 180.0);
    assert_eq!(snap.volume, 1.0);
    assert_eq!(snap.playback_rate, 1.0);
    assert_eq!(snap.seek_target, None);
    assert!(snap.playlist.is_empty());
    assert_eq!(snap.current_track_index, None);
    assert_eq!(snap.repeat_mode, RepeatMode::Off);
    assert!(!snap.shuffle_enabled);
}

#[tokio::test]
async fn seek_round_trip_leaves_position() {
    let player = Player::default();
    player.seek_to(30.0);
    assert_eq!(player.snapshot().seek_target, Some(30.0));
    assert_eq!(player.snapshot().current_time, 30.0);

    player.clear_seek();
    assert_eq!(player.snapshot().seek_target, None);
    assert_eq!(player.snapshot().current_time, 30.0);
}

#[tokio::test]
async fn skip_operations_clamp_against_bounds() {
    let player = Player::default();
    player.set_duration(100.0);
    player.set_current_time(95.0);
    player.skip_forward(None);
    assert_eq!(player.snapshot().current_time, 100.0);

    player.set_current_time(3.0);
    player.skip_backward(None);
    assert_eq!(player.snapshot().current_time, 0.0);
}
