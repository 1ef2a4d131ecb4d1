//! Error types for the best-effort capabilities
//!
//! None of these ever reach the user; callers log them and carry on.

use thiserror::Error;

/// Failure of the local key-value store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Storage is disabled, blocked by privacy mode, or missing entirely
    #[error("storage unavailable")]
    Unavailable,

    /// The store refused the operation (quota exceeded, security error)
    #[error("storage rejected the operation: {0}")]
    Rejected(String),
}

/// Failure to start background music
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// Platform policy refused playback (usually no prior user gesture)
    #[error("playback rejected: {0}")]
    Rejected(String),

    /// No audio element to play
    #[error("no audio source")]
    Unavailable,
}
