//! Jump tuning and button edge detection.
//!
//! Gravity and jump speeds are derived from jump heights and time-to-apex:
//!
//! - `gravity = -2h / t²`
//! - `max_jump_velocity = |gravity| * t`
//! - `min_jump_velocity = sqrt(2 |gravity| h_min)`

use serde::{Deserialize, Serialize};

use super::config::PlayerConfig;

/// Gravity and jump speeds derived from a [`PlayerConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpProfile {
    /// Vertical acceleration (negative).
    pub gravity: f32,

    /// Take-off speed of a jump or head hop.
    pub max_jump_velocity: f32,

    /// Speed a released jump is cut to.
    pub min_jump_velocity: f32,

    /// Speed a released head hop is cut to.
    pub min_hop_velocity: f32,
}

impl JumpProfile {
    pub fn new(
        max_jump_height: f32,
        min_jump_height: f32,
        min_hop_height: f32,
        time_to_apex: f32,
    ) -> Self {
        let gravity = -(2.0 * max_jump_height) / (time_to_apex * time_to_apex);
        let magnitude = gravity.abs();

        Self {
            gravity,
            max_jump_velocity: magnitude * time_to_apex,
            min_jump_velocity: (2.0 * magnitude * min_jump_height).sqrt(),
            min_hop_velocity: (2.0 * magnitude * min_hop_height).sqrt(),
        }
    }

    pub fn from_config(config: &PlayerConfig) -> Self {
        Self::new(
            config.max_jump_height,
            config.min_jump_height,
            config.min_hop_height,
            config.time_to_apex,
        )
    }

    /// Cut a rising velocity to the short-jump (or short-hop) speed.
    ///
    /// Never raises `velocity_y`.
    pub fn cut(&self, velocity_y: f32, hopping: bool) -> f32 {
        let floor = if hopping {
            self.min_hop_velocity
        } else {
            self.min_jump_velocity
        };
        velocity_y.min(floor)
    }
}

/// Press and release edges of the jump button for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonEdges {
    pub pressed: bool,
    pub released: bool,
}

/// Tracks a button between ticks.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ButtonState {
    /// Previous tick's input.
    held: bool,
}

impl ButtonState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this tick's button state and get its edges.
    pub fn update(&mut self, pressed: bool) -> ButtonEdges {
        let edges = ButtonEdges {
            pressed: pressed && !self.held,
            released: !pressed && self.held,
        };
        self.held = pressed;
        edges
    }

    /// Whether the button was down last tick.
    #[inline]
    pub fn is_held(&self) -> bool {
        self.held
    }
}

// ============================================================================
// Tests
// ============================================================================
