//! Per-actor collision state produced by one move.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Contacts and slope state found during the last move.
///
/// Written only by the [`KinematicController`](super::KinematicController)
/// while a move runs; motion policies read it afterwards to decide
/// grounded-dependent behaviour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollisionInfo {
    /// Hit something moving up.
    pub above: bool,

    /// Standing on something (floor, slope, or another actor).
    pub below: bool,

    /// Hit something moving left.
    pub left: bool,

    /// Hit something moving right.
    pub right: bool,

    /// Slope under the actor this move, in degrees (0 = flat).
    pub slope_angle: f32,

    /// `slope_angle` from the previous move.
    pub previous_slope_angle: f32,

    /// Walking up a slope this move.
    pub climbing_slope: bool,

    /// Walking down a slope this move.
    pub descending_slope: bool,

    /// Displacement requested at the start of this move, before resolution.
    pub previous_velocity: Vec2,

    /// Set by `reset`, cleared when a move begins. Keeps repeated resets
    /// from overwriting `previous_slope_angle` with zero.
    #[serde(skip)]
    reset_since_move: bool,
}

impl CollisionInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear contact flags, carrying `slope_angle` into `previous_slope_angle`.
    ///
    /// Calling this again before the next move changes nothing.
    pub fn reset(&mut self) {
        if !self.reset_since_move {
            self.previous_slope_angle = self.slope_angle;
        }
        self.above = false;
        self.below = false;
        self.left = false;
        self.right = false;
        self.climbing_slope = false;
        self.descending_slope = false;
        self.slope_angle = 0.0;
        self.reset_since_move = true;
    }

    /// Reset and record the requested displacement for a new move.
    pub(crate) fn begin_move(&mut self, velocity: Vec2) {
        self.reset();
        self.previous_velocity = velocity;
        self.reset_since_move = false;
    }

    /// Touching anything on either side.
    #[inline]
    pub fn sides(&self) -> bool {
        self.left || self.right
    }
}
