//! Ball motion policy.
//!
//! The ball is always airborne-capable: it rebounds off the floor losing a
//! fixed amount of speed per bounce, drifts horizontally under linear drag,
//! and is launched by hits from players.

use std::sync::Arc;

use glam::Vec2;

use crate::collision::{ActorId, ActorKind, RayFilter, RaycastQuery};
use crate::error::ConfigError;
use crate::movement::{Body, CollisionInfo, Deadline, KinematicController, MoveOutcome, MoverConfig};

use super::config::BallConfig;
use super::events::MotionEvent;

/// The ball actor.
#[derive(Debug, Clone)]
pub struct Ball {
    id: ActorId,
    config: BallConfig,

    /// Bounding box in world space.
    pub body: Body,

    /// Velocity in units per second.
    pub velocity: Vec2,

    controller: KinematicController,
    filter: RayFilter,
    paused: bool,
    stun: Deadline,
    hit_cooldown: Deadline,
}

impl Ball {
    /// Create a paused ball centered on `spawn`.
    pub fn new(
        id: ActorId,
        config: BallConfig,
        mover: Arc<MoverConfig>,
        spawn: Vec2,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let controller = KinematicController::new(mover, config.rays)?;

        Ok(Self {
            id,
            body: Body::new(spawn, config.half_extents),
            velocity: Vec2::ZERO,
            controller,
            filter: RayFilter::for_actor(id, ActorKind::Ball.default_mask()),
            paused: true,
            stun: Deadline::NONE,
            hit_cooldown: Deadline::NONE,
            config,
        })
    }

    /// Run one tick and move the ball. Does nothing while paused or stunned.
    pub fn update<Q: RaycastQuery + ?Sized>(
        &mut self,
        world: &Q,
        now: f64,
        delta_time: f32,
        events: &mut Vec<MotionEvent>,
    ) -> MoveOutcome {
        if self.paused || self.stun.is_pending(now) {
            return MoveOutcome::default();
        }

        let collisions = &self.controller.collisions;
        let (below, left, right) = (collisions.below, collisions.left, collisions.right);

        if below {
            self.velocity.y = bounce_velocity(
                self.velocity.y,
                self.config.bounce_decay,
                self.config.min_vertical_velocity,
            );
            log::debug!("ball bounced at {:.2}", self.velocity.y);
            events.push(MotionEvent::BallBounce {
                velocity: self.velocity,
            });
        }
        if left {
            self.bounce_right();
            events.push(MotionEvent::BallBounce {
                velocity: self.velocity,
            });
        } else if right {
            self.bounce_left();
            events.push(MotionEvent::BallBounce {
                velocity: self.velocity,
            });
        }

        self.velocity.x = apply_drag(
            self.velocity.x,
            self.config.horizontal_decay * delta_time,
            self.config.min_horizontal_velocity,
        );
        self.velocity.y += self.config.gravity * delta_time;

        self.controller.move_body(
            world,
            &mut self.body,
            &self.filter,
            self.velocity * delta_time,
        )
    }

    /// Launch the ball away from `origin` with speed `magnitude`, plus a share
    /// of `added_force`'s upward component.
    ///
    /// Returns `false` and does nothing while the ball is on hit cooldown.
    pub fn hit(
        &mut self,
        magnitude: f32,
        origin: Vec2,
        added_force: Vec2,
        stun: bool,
        now: f64,
        events: &mut Vec<MotionEvent>,
    ) -> bool {
        if self.hit_cooldown.is_pending(now) {
            return false;
        }

        let force = (self.body.center - origin).normalize_or_zero() * magnitude;
        self.velocity.x = force.x;
        self.velocity.y = force.y + (added_force.y * self.config.added_hit_force_ratio).max(0.0);

        if stun {
            self.stun.arm(now, self.config.hit_stun_duration);
        }
        self.hit_cooldown.arm(now, self.config.hit_cooldown);

        log::debug!("ball hit from {:?} -> velocity {:?}", origin, self.velocity);
        events.push(MotionEvent::BallHit {
            magnitude,
            origin,
            added_force,
        });
        true
    }

    /// Guarantee leftward movement.
    pub fn bounce_left(&mut self) {
        self.velocity.x = -self.velocity.x.abs();
    }

    /// Guarantee rightward movement.
    pub fn bounce_right(&mut self) {
        self.velocity.x = self.velocity.x.abs();
    }

    /// Freeze the ball for `duration` seconds, replacing any current stun.
    pub fn stun_for(&mut self, now: f64, duration: f32) {
        self.stun.arm(now, duration);
    }

    /// Put the ball at `spawn`, at rest, ready to be hit.
    pub fn respawn(&mut self, spawn: Vec2) {
        self.body.center = spawn;
        self.velocity = Vec2::ZERO;
        self.stun.cancel();
        self.hit_cooldown.cancel();
        self.controller.collisions = CollisionInfo::default();
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn config(&self) -> &BallConfig {
        &self.config
    }

    pub fn collisions(&self) -> &CollisionInfo {
        &self.controller.collisions
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_stunned(&self, now: f64) -> bool {
        self.stun.is_pending(now)
    }

    pub fn can_be_hit(&self, now: f64) -> bool {
        !self.hit_cooldown.is_pending(now)
    }
}

/// Invert a landing velocity and take `decay` off it, never rebounding
/// slower than `min_velocity`.
pub fn bounce_velocity(velocity_y: f32, decay: f32, min_velocity: f32) -> f32 {
    (-velocity_y - decay).max(min_velocity)
}

/// Slow `velocity_x` by `decay` toward `min_speed` without flipping its sign.
fn apply_drag(velocity_x: f32, decay: f32, min_speed: f32) -> f32 {
    if velocity_x > 0.0 {
        (velocity_x - decay).max(min_speed)
    } else if velocity_x < 0.0 {
        (velocity_x + decay).min(-min_speed)
    } else {
        0.0
    }
}

// ============================================================================
// Tests
// ============================================================================
