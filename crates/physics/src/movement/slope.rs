//! Slope handling.
//!
//! Walking into a climbable slope redirects horizontal displacement along the
//! slope instead of blocking it. Walking off the top of a descendable slope
//! pulls the actor down along it so it stays grounded instead of skipping
//! off in small hops.

use glam::Vec2;

use crate::collision::{RayFilter, RaycastQuery};

use super::collisions::CollisionInfo;
use super::config::MoverConfig;
use super::probe::RaycastOrigins;

/// Sign of `value` as `1` or `-1`. Zero counts as positive.
#[inline]
pub(crate) fn direction_of(value: f32) -> f32 {
    if value < 0.0 { -1.0 } else { 1.0 }
}

/// Redirect horizontal displacement up a slope of `slope_angle` degrees.
///
/// Does nothing if the actor is already rising faster than the slope would
/// lift it (a jump through a slope keeps its arc).
pub(crate) fn climb_slope(velocity: &mut Vec2, slope_angle: f32, collisions: &mut CollisionInfo) {
    let move_distance = velocity.x.abs();
    let (sin, cos) = slope_angle.to_radians().sin_cos();
    let climb_velocity_y = sin * move_distance;

    if velocity.y < climb_velocity_y {
        velocity.y = climb_velocity_y;
        velocity.x = cos * move_distance * direction_of(velocity.x);
        collisions.below = true;
        collisions.climbing_slope = true;
        collisions.slope_angle = slope_angle;
    }
}

/// Pull a falling, horizontally moving actor down along the slope under its
/// trailing corner.
///
/// Applies only when the slope is between flat and `max_descend_angle`, faces
/// the direction of travel, and is close enough to reach this move.
pub(crate) fn descend_slope<Q: RaycastQuery + ?Sized>(
    world: &Q,
    origins: &RaycastOrigins,
    filter: &RayFilter,
    config: &MoverConfig,
    velocity: &mut Vec2,
    collisions: &mut CollisionInfo,
) {
    let direction = direction_of(velocity.x);
    let origin = origins.bottom_trailing(direction);

    let Some(hit) = world.cast(origin, Vec2::NEG_Y, f32::MAX, filter) else {
        return;
    };

    let slope_angle = hit.slope_angle();
    if slope_angle == 0.0 || slope_angle > config.max_descend_angle {
        return;
    }
    if direction_of(hit.normal.x) != direction {
        return;
    }

    let radians = slope_angle.to_radians();
    let move_distance = velocity.x.abs();
    if hit.distance - config.skin_width > radians.tan() * move_distance {
        return;
    }

    let (sin, cos) = radians.sin_cos();
    velocity.x = cos * move_distance * direction;
    velocity.y -= sin * move_distance;

    collisions.slope_angle = slope_angle;
    collisions.descending_slope = true;
    collisions.below = true;
}
