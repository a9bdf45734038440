use thiserror::Error;

/// Errors returned by the frame-tree subsystem (§7).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpatialError {
    /// Non-finite numbers, or a zero-norm quaternion.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// `apply_config`'s document root name disagreed with the receiver,
    /// the JSON was malformed, or a required field was missing.
    #[error("config mismatch: {reason}")]
    ConfigMismatch { reason: String },

    /// Change-of-basis was requested between frames of different trees.
    #[error("logic error: {reason}")]
    LogicError { reason: String },
}

impl SpatialError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn config_mismatch(reason: impl Into<String>) -> Self {
        Self::ConfigMismatch {
            reason: reason.into(),
        }
    }

    pub fn logic_error(reason: impl Into<String>) -> Self {
        Self::LogicError {
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SpatialError>;
