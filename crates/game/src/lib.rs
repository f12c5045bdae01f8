//! Head-hop match driver
//!
//! This crate runs a two-player match on top of the movement engine:
//!
//! - Per-tick player input
//! - Stage geometry and spawn points
//! - Round phases (drop-in, play, victory)
//! - Event fan-out to presentation subscribers
//!
//! # Architecture
//!
//! The match is a deterministic, frame-stepped simulation. All state updates
//! are driven by player inputs and a fixed timestep.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Match Simulation                        │
//! │  ┌─────────┐    ┌───────────────┐    ┌────────────────────┐  │
//! │  │ Input   │───►│ Players, then │───►│ Motion events      │  │
//! │  │ per tick│    │ head hops,    │    │ (returned and sent │  │
//! │  └─────────┘    │ ball hits,    │    │  to subscribers)   │  │
//! │                 │ ball          │    └────────────────────┘  │
//! │                 └───────────────┘                            │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod input;
pub mod simulation;
pub mod stage;

// Re-export main types
pub use input::{ActionInput, DirectionKeys, PlayerInput};
pub use simulation::{RoundPhase, Simulation, SimulationConfig, BALL_ID};
pub use stage::{SpawnPoint, Stage};

// Re-export physics types for convenience
pub use headhop_physics::{
    ActorId, Ball, ConfigError, MotionEvent, Player, PlayerCommand, PlayerState,
};
