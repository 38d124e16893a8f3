//! Error types for the randomization pipeline.

use thiserror::Error;

/// Errors raised while producing today's order.
///
/// The roster filter never fails; these come from the permutation client
/// and are passed through the randomizer untouched.
#[derive(Error, Debug)]
pub enum StandupError {
    /// Missing or invalid endpoint, credential or client setting.
    ///
    /// Raised before any network call is made.
    #[error("configuration error: {0}")]
    Config(String),

    /// The remote call could not complete (timeout, refused, DNS, HTTP status).
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered, but the answer is malformed or invalid.
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl StandupError {
    /// Returns true for transport failures.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns true for protocol violations.
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol(_))
    }

    /// Returns true for configuration failures.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, StandupError>;
