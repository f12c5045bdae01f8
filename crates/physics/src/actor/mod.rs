//! Actor motion policies.
//!
//! Each actor owns a [`KinematicController`](crate::KinematicController) and
//! turns its own rules (input, gravity, bounces, stuns) into the displacement
//! handed to it every tick.
//!
//! # Key Types
//!
//! - [`Player`]: Input-driven movement with jumps, head hops and knockdowns
//! - [`Ball`]: Bouncing projectile launched by player hits
//! - [`HeadHop`]: Applies one player landing on another
//! - [`MotionEvent`]: What happened this tick, for presentation collaborators

mod ball;
mod config;
mod events;
mod hop;
mod jump;
mod player;

pub use ball::{bounce_velocity, Ball};
pub use config::{BallConfig, PlayerConfig};
pub use events::MotionEvent;
pub use hop::{dispatch_head_hops, HeadHop};
pub use jump::{ButtonEdges, ButtonState, JumpProfile};
pub use player::{Facing, Player, PlayerCommand, PlayerFlags, PlayerState};
