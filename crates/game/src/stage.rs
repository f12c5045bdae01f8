//! Arena geometry and spawn points.

use glam::Vec2;
use headhop_physics::actor::Facing;
use headhop_physics::collision::RampDirection;
use headhop_physics::{CollisionLayers, CollisionWorld};
use serde::{Deserialize, Serialize};

/// A stage: static collision geometry plus where actors appear.
#[derive(Debug)]
pub struct Stage {
    /// Display name.
    pub name: String,

    /// Collision world for physics. Actor bodies are added by the simulation.
    pub collision: CollisionWorld,

    /// Player spawn points, used in order.
    pub spawn_points: Vec<SpawnPoint>,

    /// Where the ball is served from.
    pub ball_spawn: Vec2,
}

/// A player spawn point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Body center in world space.
    pub position: Vec2,

    /// Initial facing.
    pub facing: Facing,
}

impl Stage {
    /// Create an empty stage.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            collision: CollisionWorld::new(),
            spawn_points: Vec::new(),
            ball_spawn: Vec2::ZERO,
        }
    }

    /// The standard two-player arena.
    ///
    /// Floor top at `y = 0`, walls at `x = ±12`, corner ramps and two
    /// floating platforms.
    pub fn arena() -> Self {
        let mut stage = Self::new("Arena");
        let half_width = 12.0;
        let wall_height = 14.0;

        // Floor
        stage.collision.add_box(
            Vec2::new(0.0, -1.0),
            Vec2::new(half_width + 2.0, 1.0),
            CollisionLayers::STAGE,
        );

        // Walls
        for side in [-1.0, 1.0] {
            stage.collision.add_box(
                Vec2::new(side * (half_width + 1.0), wall_height / 2.0),
                Vec2::new(1.0, wall_height / 2.0),
                CollisionLayers::STAGE,
            );
        }

        // Ceiling
        stage.collision.add_box(
            Vec2::new(0.0, wall_height + 1.0),
            Vec2::new(half_width + 2.0, 1.0),
            CollisionLayers::STAGE,
        );

        // Corner ramps, about 18 degrees
        stage.collision.add_ramp(
            Vec2::new(-half_width, 0.0),
            3.0,
            1.0,
            RampDirection::RisingLeft,
            CollisionLayers::STAGE,
        );
        stage.collision.add_ramp(
            Vec2::new(half_width - 3.0, 0.0),
            3.0,
            1.0,
            RampDirection::RisingRight,
            CollisionLayers::STAGE,
        );

        // Platforms
        for side in [-1.0, 1.0] {
            stage.collision.add_box(
                Vec2::new(side * 6.5, 5.0),
                Vec2::new(1.5, 0.25),
                CollisionLayers::STAGE,
            );
        }

        stage.spawn_points.push(SpawnPoint {
            position: Vec2::new(-4.0, 4.0),
            facing: Facing::Right,
        });
        stage.spawn_points.push(SpawnPoint {
            position: Vec2::new(4.0, 4.0),
            facing: Facing::Left,
        });
        stage.ball_spawn = Vec2::new(0.0, 8.0);

        stage
    }

    /// Spawn point for the `index`th player, wrapping around.
    pub fn player_spawn(&self, index: usize) -> Option<&SpawnPoint> {
        if self.spawn_points.is_empty() {
            return None;
        }
        self.spawn_points.get(index % self.spawn_points.len())
    }

    /// Get the number of player spawn points.
    pub fn player_spawn_count(&self) -> usize {
        self.spawn_points.len()
    }
}
