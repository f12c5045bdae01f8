//! Configuration errors.
//!
//! The collision pass itself never fails; the only fallible step is
//! accepting a configuration at setup time.

use thiserror::Error;

/// Errors raised when a configuration is rejected at setup time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("skin width must be positive and finite, got {0}")]
    InvalidSkinWidth(f32),

    #[error("{name} must be within [0, 90) degrees, got {value}")]
    InvalidAngle { name: &'static str, value: f32 },

    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },

    #[error("minimum {name} ({min}) exceeds the maximum ({max})")]
    InvertedRange { name: &'static str, min: f32, max: f32 },

    #[error("tick rate must be positive")]
    ZeroTickRate,
}

/// Reject values that are not strictly positive and finite.
pub(crate) fn ensure_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

/// Reject negative or non-finite values.
pub(crate) fn ensure_non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}
