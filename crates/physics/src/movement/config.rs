//! Mover configuration.
//!
//! Skin width and slope thresholds are shared by every actor; ray counts are
//! per actor. Values are world units and degrees.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ensure_positive};

/// Smallest number of rays allowed along an edge.
pub const MIN_RAY_COUNT: usize = 2;

/// Configuration shared by every kinematic controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoverConfig {
    /// Inset applied to ray origins and subtracted from every hit distance.
    /// Must be positive so boxes never exactly touch geometry.
    pub skin_width: f32,

    /// Steepest slope (degrees) an actor walks up instead of being blocked.
    pub max_climb_angle: f32,

    /// Steepest slope (degrees) an actor sticks to while walking down.
    pub max_descend_angle: f32,
}

impl Default for MoverConfig {
    fn default() -> Self {
        Self {
            skin_width: 0.015,
            max_climb_angle: 80.0,
            max_descend_angle: 75.0,
        }
    }
}

impl MoverConfig {
    /// Check the configuration before handing it to a controller.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.skin_width.is_finite() && self.skin_width > 0.0) {
            return Err(ConfigError::InvalidSkinWidth(self.skin_width));
        }
        check_angle("max_climb_angle", self.max_climb_angle)?;
        check_angle("max_descend_angle", self.max_descend_angle)?;
        Ok(())
    }
}

fn check_angle(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..90.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidAngle { name, value })
    }
}

/// Number of rays fired along each edge of an actor's box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RayCounts {
    /// Rays along the left/right edges (horizontal movement).
    pub horizontal: usize,

    /// Rays along the top/bottom edges (vertical movement).
    pub vertical: usize,
}

impl Default for RayCounts {
    fn default() -> Self {
        Self {
            horizontal: 4,
            vertical: 4,
        }
    }
}

impl RayCounts {
    /// Create ray counts, clamping each axis to at least two rays.
    pub fn new(horizontal: usize, vertical: usize) -> Self {
        Self {
            horizontal,
            vertical,
        }
        .clamped()
    }

    /// Ray counts with each axis raised to [`MIN_RAY_COUNT`].
    pub fn clamped(self) -> Self {
        Self {
            horizontal: self.horizontal.max(MIN_RAY_COUNT),
            vertical: self.vertical.max(MIN_RAY_COUNT),
        }
    }
}

/// Validate an actor's half extents.
pub(crate) fn check_half_extents(half_width: f32, half_height: f32) -> Result<(), ConfigError> {
    ensure_positive("half_extents.x", half_width)?;
    ensure_positive("half_extents.y", half_height)
}
