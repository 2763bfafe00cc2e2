//! Error types for the tool-calling surface
//!
//! The store itself is total: every command clamps or no-ops instead of
//! failing. Errors only exist where an external collaborator can let a
//! caller down (catalog resolution).

use thiserror::Error;

/// Tool-call errors
#[derive(Debug, Error)]
pub enum ToolError {
    /// The catalog has no entry for the requested release
    #[error("Unknown release: {0}")]
    UnknownRelease(String),

    /// The release exists but has no playable audio
    #[error("Release has no playable audio: {0}")]
    NoPlayableAudio(String),
}

/// Result type for tool operations
pub type Result<T> = std::result::Result<T, ToolError>;
