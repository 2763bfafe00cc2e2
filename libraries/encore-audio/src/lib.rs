//! Encore - Media Output Binding
//!
//! Bridges the platform-agnostic playback engine (`encore-playback`) to
//! exactly one real audio output.
//!
//! This crate provides:
//! - [`MediaHandle`] - the capability interface a concrete media backend
//!   implements (load, play, pause, seek, volume)
//! - [`MediaEvent`] - the real playback signals the backend reports
//! - [`MediaBinding`] - the single reconciliation task driving the
//!   handle from player snapshots and correcting the player with real
//!   device progress
//!
//! # Example
//!
//! ```rust,no_run
//! use encore_audio::{MediaBinding, MediaEvent, MediaHandle};
//! use encore_playback::Player;
//! use tokio::sync::mpsc;
//!
//! # struct SystemOutput;
//! # impl MediaHandle for SystemOutput {
//! #     fn load(&mut self, _uri: &str) -> encore_audio::Result<()> { Ok(()) }
//! #     fn play(&mut self) -> encore_audio::Result<()> { Ok(()) }
//! #     fn pause(&mut self) -> encore_audio::Result<()> { Ok(()) }
//! #     fn seek(&mut self, _position: f64) -> encore_audio::Result<()> { Ok(()) }
//! #     fn set_volume(&mut self, _volume: f64) -> encore_audio::Result<()> { Ok(()) }
//! # }
//! # async fn example() {
//! let player = Player::default();
//! let (event_tx, event_rx) = mpsc::channel::<MediaEvent>(32);
//!
//! // The backend keeps `event_tx` and reports real playback signals.
//! let backend = SystemOutput;
//! let _binding = MediaBinding::spawn(player.clone(), Box::new(backend), event_rx);
//!
//! player.play(Some("https://cdn.example.com/audio/rel-1.mp3"), None);
//! # }
//! ```

mod binding;
mod handle;

// Public exports
pub use binding::MediaBinding;
pub use handle::{MediaError, MediaEvent, MediaHandle, Result};
