//! Kinematic movement system.
//!
//! This module implements raycast platformer movement with:
//!
//! - Per-axis resolution (horizontal first, then vertical)
//! - A skin margin so boxes never sit exactly on geometry
//! - Slope climbing and descending
//! - Contact reporting for grounded-dependent behaviour
//!
//! # Design
//!
//! Movement is driven by the [`KinematicController`], which takes the
//! displacement an actor wants this frame and a [`RaycastQuery`](crate::RaycastQuery),
//! and reports what it touched through [`CollisionInfo`].
//!
//! All movement is deterministic: the same inputs always produce the same
//! outputs.

mod clock;
mod collisions;
mod config;
mod controller;
mod probe;
mod slope;

pub use clock::{Deadline, FrameClock};
pub use collisions::CollisionInfo;
pub(crate) use config::check_half_extents;
pub use config::{MoverConfig, RayCounts, MIN_RAY_COUNT};
pub use controller::{KinematicController, MoveOutcome};
pub use probe::{Body, RaySpacing, RaycastOrigins};
