//! Error handling for varispeed.
//!
//! Only one engine-side failure is modeled: track load failure. Everything
//! else the engine does is treated as infallible, so the remaining variants
//! cover construction and session I/O.

use thiserror::Error;

/// Result type alias for varispeed operations
pub type Result<T> = std::result::Result<T, VarispeedError>;

/// Main error type for varispeed operations
#[derive(Error, Debug)]
pub enum VarispeedError {
    /// The engine reported that the bundled track could not be loaded.
    #[error("failed to load track '{title}': {reason}")]
    LoadFailed { title: String, reason: String },

    /// The track source reference has no file name to derive a title from.
    #[error("track source has no file name: '{source_ref}'")]
    InvalidTrackSource { source_ref: String },

    /// The position poller was asked for a zero-length interval.
    #[error("poll interval must be non-zero")]
    ZeroPollInterval,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VarispeedError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            VarispeedError::LoadFailed { .. } => "LOAD_FAILED",
            VarispeedError::InvalidTrackSource { .. } => "INVALID_TRACK_SOURCE",
            VarispeedError::ZeroPollInterval => "ZERO_POLL_INTERVAL",
            VarispeedError::Io(_) => "IO_ERROR",
        }
    }
}
