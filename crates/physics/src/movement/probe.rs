//! Geometry probe: ray origins and spacing along an actor's box.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::config::RayCounts;

/// An actor's axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Center of the box.
    pub center: Vec2,

    /// Half-size in each axis.
    pub half_extents: Vec2,
}

impl Body {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Bottom-left corner.
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    /// Top-right corner.
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    /// Box shrunk by `inset` on every side. Never inverts.
    pub fn inset(&self, inset: f32) -> Self {
        Self {
            center: self.center,
            half_extents: (self.half_extents - Vec2::splat(inset)).max(Vec2::ZERO),
        }
    }
}

/// Corner points the movement rays start from, inset by the skin width.
///
/// Recomputed at the start of every move; never stored between frames.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RaycastOrigins {
    pub top_left: Vec2,
    pub top_right: Vec2,
    pub bottom_left: Vec2,
    pub bottom_right: Vec2,
}

impl RaycastOrigins {
    /// Compute the four inset corners of `body`.
    pub fn from_body(body: &Body, skin_width: f32) -> Self {
        let bounds = body.inset(skin_width);
        let min = bounds.min();
        let max = bounds.max();

        Self {
            top_left: Vec2::new(min.x, max.y),
            top_right: Vec2::new(max.x, max.y),
            bottom_left: Vec2::new(min.x, min.y),
            bottom_right: Vec2::new(max.x, min.y),
        }
    }

    /// Bottom corner on the side of travel (`direction` is `1` or `-1`).
    #[inline]
    pub fn bottom_leading(&self, direction: f32) -> Vec2 {
        if direction < 0.0 {
            self.bottom_left
        } else {
            self.bottom_right
        }
    }

    /// Bottom corner opposite the side of travel.
    #[inline]
    pub fn bottom_trailing(&self, direction: f32) -> Vec2 {
        if direction < 0.0 {
            self.bottom_right
        } else {
            self.bottom_left
        }
    }
}

/// Distance between neighbouring rays along each edge.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RaySpacing {
    /// Spacing of horizontal rays, measured up the left/right edge.
    pub horizontal: f32,

    /// Spacing of vertical rays, measured along the top/bottom edge.
    pub vertical: f32,
}

impl RaySpacing {
    /// Spread `counts` rays evenly over the inset box, corners included.
    ///
    /// Counts are expected to be clamped already.
    pub fn compute(body: &Body, skin_width: f32, counts: RayCounts) -> Self {
        let size = body.inset(skin_width).half_extents * 2.0;

        Self {
            horizontal: size.y / (counts.horizontal - 1) as f32,
            vertical: size.x / (counts.vertical - 1) as f32,
        }
    }
}
