//! Collision queries for the mover.
//!
//! This module provides raycasts against stage geometry and actor bodies.
//! The mover only depends on the [`RaycastQuery`] trait; [`CollisionWorld`]
//! is the `parry2d`-backed implementation used by the game.
//!
//! # Key Types
//!
//! - [`CollisionWorld`]: Stage brushes plus actor bodies
//! - [`RayHit`]: Distance, normal and owner of the closest hit
//! - [`RayFilter`]: Layer mask plus the actor to ignore
//! - [`CollisionLayers`]: Filter set bits

mod flags;
mod trace;
mod world;

pub use flags::CollisionLayers;
pub use trace::{ActorId, ActorKind, RayFilter, RayHit, RaycastQuery};
pub use world::{CollisionBrush, CollisionWorld, RampDirection};
