//! Media output capability interface
//!
//! Abstracts the one real audio output the binding drives. Any concrete
//! backend (an OS media element, a native output stream, a test double)
//! implements [`MediaHandle`] for the imperative side and pushes its
//! real playback signals through an [`MediaEvent`] channel.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Media backend errors
#[derive(Debug, Error)]
pub enum MediaError {
    /// A playback request was superseded by a newer request before it
    /// could complete. Expected when sources change rapidly; safe to
    /// ignore.
    #[error("Playback request superseded by a newer request")]
    Aborted,

    /// Genuine backend failure
    #[error("Media backend error: {0}")]
    Backend(String),
}

impl MediaError {
    /// Whether this failure is the benign superseded-by-newer case
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}

/// Result type for media handle operations
pub type Result<T> = std::result::Result<T, MediaError>;

/// The one real audio output
///
/// All methods are imperative requests; the backend reports what
/// actually happened through [`MediaEvent`]s. Requests may resolve (or
/// fail) after canonical state has already moved on - the binding
/// tolerates and discards stale completions.
pub trait MediaHandle: Send {
    /// Assign a new source and begin loading it
    fn load(&mut self, uri: &str) -> Result<()>;

    /// Request playback of the loaded source
    fn play(&mut self) -> Result<()>;

    /// Request pause
    fn pause(&mut self) -> Result<()>;

    /// Move the output position, in seconds
    fn seek(&mut self, position: f64) -> Result<()>;

    /// Apply an output volume in [0, 1]
    fn set_volume(&mut self, volume: f64) -> Result<()>;
}

/// Real playback signals emitted by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MediaEvent {
    /// Actual output position progressed
    TimeUpdate {
        /// Position in seconds
        position: f64,
    },

    /// Audible playback has actually started
    Playing,

    /// Source metadata arrived
    LoadedMetadata {
        /// Real track duration in seconds
        duration: f64,
    },

    /// The source finished playing naturally
    Ended,
}
