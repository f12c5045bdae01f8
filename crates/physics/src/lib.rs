//! Head-hop movement engine
//!
//! A deterministic 2D kinematic movement and collision engine for a two-player
//! arena game. Two players and one ball move under gravity, collide with static
//! stage geometry, and interact with each other through the same raycast
//! collision primitive.
//!
//! # Architecture
//!
//! The engine is split into three systems:
//!
//! - **Collision**: Casts rays through the stage and actor bodies, returns hit information
//! - **Movement**: Uses those rays to resolve one frame of displacement per actor,
//!   including slope climbing and descending
//! - **Actor**: Per-actor motion policies (player, ball) that produce the velocity
//!   handed to the mover, plus the cross-actor head-hop hook
//!
//! # Design Principles
//!
//! 1. **Determinism**: Same inputs always produce same outputs, fixed resolution order
//! 2. **Platformer feel**: Discrete per-frame raycasts, not continuous physics
//! 3. **No hidden globals**: All tunables live in explicit configuration structs
//! 4. **No blocking timers**: Stuns and cooldowns are deadlines polled against a frame clock

pub mod actor;
pub mod collision;
pub mod error;
pub mod movement;

// Re-export commonly used types
pub use actor::{
    dispatch_head_hops, Ball, BallConfig, HeadHop, JumpProfile, MotionEvent, Player,
    PlayerCommand, PlayerConfig, PlayerState,
};
pub use collision::{
    ActorId, ActorKind, CollisionLayers, CollisionWorld, RayFilter, RayHit, RaycastQuery,
};
pub use error::ConfigError;
pub use movement::{
    Body, CollisionInfo, Deadline, FrameClock, KinematicController, MoveOutcome, MoverConfig,
    RayCounts,
};
