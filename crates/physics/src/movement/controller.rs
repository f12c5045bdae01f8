//! Kinematic movement controller.
//!
//! This is the main entry point for moving an actor. It takes the
//! displacement an actor wants this frame, resolves it against the world one
//! axis at a time, and moves the actor's body.

use std::sync::Arc;

use glam::Vec2;

use crate::collision::{ActorId, RayFilter, RaycastQuery};
use crate::error::ConfigError;

use super::collisions::CollisionInfo;
use super::config::{MoverConfig, RayCounts};
use super::probe::{Body, RaySpacing, RaycastOrigins};
use super::slope::{climb_slope, descend_slope, direction_of};

/// Result of one [`KinematicController::move_body`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoveOutcome {
    /// Displacement actually applied to the body.
    pub displacement: Vec2,

    /// Player actors whose bodies this actor landed on, in hit order.
    /// Each actor appears at most once.
    pub landed_on: Vec<ActorId>,
}

/// Raycast movement controller for a single actor.
///
/// # Example
///
/// ```ignore
/// let mut controller = KinematicController::new(Arc::new(MoverConfig::default()), RayCounts::default())?;
/// let filter = RayFilter::for_actor(id, CollisionLayers::MASK_PLAYER);
///
/// // Each frame:
/// let outcome = controller.move_body(&world, &mut body, &filter, velocity * delta_time);
/// if controller.collisions.below { /* grounded */ }
/// ```
#[derive(Debug, Clone)]
pub struct KinematicController {
    config: Arc<MoverConfig>,

    rays: RayCounts,

    /// Contacts found by the last move.
    pub collisions: CollisionInfo,

    spacing: RaySpacing,

    /// Half extents `spacing` was computed for.
    spaced_for: Option<Vec2>,
}

impl KinematicController {
    /// Create a controller, rejecting an invalid mover configuration.
    ///
    /// Ray counts below two are raised to two.
    pub fn new(config: Arc<MoverConfig>, rays: RayCounts) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            config,
            rays: rays.clamped(),
            collisions: CollisionInfo::default(),
            spacing: RaySpacing::default(),
            spaced_for: None,
        })
    }

    /// Create a controller with the default configuration.
    pub fn with_default_config() -> Self {
        Self {
            config: Arc::new(MoverConfig::default()),
            rays: RayCounts::default(),
            collisions: CollisionInfo::default(),
            spacing: RaySpacing::default(),
            spaced_for: None,
        }
    }

    pub fn config(&self) -> &MoverConfig {
        &self.config
    }

    /// Effective ray counts, already clamped.
    pub fn ray_counts(&self) -> RayCounts {
        self.rays
    }

    pub fn set_ray_counts(&mut self, rays: RayCounts) {
        self.rays = rays.clamped();
        self.spaced_for = None;
    }

    /// Move `body` by up to `velocity` this frame.
    ///
    /// `velocity` is a displacement (already scaled by the frame time).
    /// Resolution order is fixed: descend check, horizontal, vertical.
    /// The collision pass never fails; the returned displacement is always
    /// safe to apply, and has been applied to `body.center`.
    pub fn move_body<Q: RaycastQuery + ?Sized>(
        &mut self,
        world: &Q,
        body: &mut Body,
        filter: &RayFilter,
        velocity: Vec2,
    ) -> MoveOutcome {
        let origins = RaycastOrigins::from_body(body, self.config.skin_width);
        if self.spaced_for != Some(body.half_extents) {
            self.spacing = RaySpacing::compute(body, self.config.skin_width, self.rays);
            self.spaced_for = Some(body.half_extents);
        }

        self.collisions.begin_move(velocity);

        let mut velocity = velocity;
        let mut landed_on = Vec::new();

        if velocity.y < 0.0 {
            descend_slope(
                world,
                &origins,
                filter,
                &self.config,
                &mut velocity,
                &mut self.collisions,
            );
        }
        if velocity.x != 0.0 {
            self.horizontal_collisions(world, &origins, filter, &mut velocity);
        }
        if velocity.y != 0.0 {
            self.vertical_collisions(world, &origins, filter, &mut velocity, &mut landed_on);
        }

        body.center += velocity;

        log::trace!(
            "move {:?} -> {:?} below={} above={} left={} right={} slope={:.1}",
            self.collisions.previous_velocity,
            velocity,
            self.collisions.below,
            self.collisions.above,
            self.collisions.left,
            self.collisions.right,
            self.collisions.slope_angle
        );

        MoveOutcome {
            displacement: velocity,
            landed_on,
        }
    }

    // ========================================================================
    // Horizontal
    // ========================================================================

    fn horizontal_collisions<Q: RaycastQuery + ?Sized>(
        &mut self,
        world: &Q,
        origins: &RaycastOrigins,
        filter: &RayFilter,
        velocity: &mut Vec2,
    ) {
        let skin = self.config.skin_width;
        let max_climb = self.config.max_climb_angle;
        let direction = direction_of(velocity.x);
        let ray_direction = Vec2::X * direction;
        let mut ray_length = velocity.x.abs() + skin;

        for i in 0..self.rays.horizontal {
            let origin =
                origins.bottom_leading(direction) + Vec2::Y * (self.spacing.horizontal * i as f32);

            let Some(hit) = world.cast(origin, ray_direction, ray_length, filter) else {
                continue;
            };

            let slope_angle = hit.slope_angle();

            // Only the lowest ray can start a climb
            if i == 0 && slope_angle > 0.0 && slope_angle <= max_climb {
                // Walking off one slope straight onto another (a V): drop the
                // descent and climb from the requested displacement
                if self.collisions.descending_slope {
                    self.collisions.descending_slope = false;
                    *velocity = self.collisions.previous_velocity;
                }

                // Close the gap to a new slope before climbing it
                let mut distance_to_slope = 0.0;
                if slope_angle != self.collisions.previous_slope_angle {
                    distance_to_slope = hit.distance - skin;
                    velocity.x -= distance_to_slope * direction;
                }
                climb_slope(velocity, slope_angle, &mut self.collisions);
                velocity.x += distance_to_slope * direction;
            }

            if !self.collisions.climbing_slope || slope_angle > max_climb {
                velocity.x = (hit.distance - skin) * direction;
                ray_length = hit.distance;

                // Blocked part way up a slope: stay on its surface
                if self.collisions.climbing_slope {
                    velocity.y = self.collisions.slope_angle.to_radians().tan() * velocity.x.abs();
                }

                self.collisions.left = direction < 0.0;
                self.collisions.right = direction > 0.0;
            }
        }
    }

    // ========================================================================
    // Vertical
    // ========================================================================

    fn vertical_collisions<Q: RaycastQuery + ?Sized>(
        &mut self,
        world: &Q,
        origins: &RaycastOrigins,
        filter: &RayFilter,
        velocity: &mut Vec2,
        landed_on: &mut Vec<ActorId>,
    ) {
        let skin = self.config.skin_width;
        let direction = direction_of(velocity.y);
        let ray_direction = Vec2::Y * direction;
        let mut ray_length = velocity.y.abs() + skin;

        for i in 0..self.rays.vertical {
            let base = if direction < 0.0 {
                origins.bottom_left
            } else {
                origins.top_left
            };
            // Probe where the box will be after the horizontal move
            let origin = base + Vec2::X * (self.spacing.vertical * i as f32 + velocity.x);

            let Some(hit) = world.cast(origin, ray_direction, ray_length, filter) else {
                continue;
            };

            velocity.y = (hit.distance - skin) * direction;
            ray_length = hit.distance;

            if self.collisions.climbing_slope {
                let tan = self.collisions.slope_angle.to_radians().tan();
                if tan > f32::EPSILON {
                    velocity.x = velocity.y / tan * direction_of(velocity.x);
                }
            }

            self.collisions.below = direction < 0.0;
            self.collisions.above = direction > 0.0;

            if self.collisions.below {
                if let Some(victim) = hit.player_actor() {
                    if !landed_on.contains(&victim) {
                        landed_on.push(victim);
                    }
                }
            }
        }

        if self.collisions.climbing_slope {
            self.recheck_slope_ahead(world, origins, filter, velocity);
        }
    }

    /// Re-cast from the resolved height so a change of slope between two
    /// rays is not skipped for a frame.
    fn recheck_slope_ahead<Q: RaycastQuery + ?Sized>(
        &mut self,
        world: &Q,
        origins: &RaycastOrigins,
        filter: &RayFilter,
        velocity: &mut Vec2,
    ) {
        let skin = self.config.skin_width;
        let direction = direction_of(velocity.x);
        let ray_length = velocity.x.abs() + skin;
        let origin = origins.bottom_leading(direction) + Vec2::Y * velocity.y;

        if let Some(hit) = world.cast(origin, Vec2::X * direction, ray_length, filter) {
            let slope_angle = hit.slope_angle();
            if slope_angle != self.collisions.slope_angle {
                velocity.x = (hit.distance - skin) * direction;
                self.collisions.slope_angle = slope_angle;
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
