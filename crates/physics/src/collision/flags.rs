//! Collision layers for ray filtering.
//!
//! Every brush and actor body lives on one or more layers, and every ray
//! carries a mask of the layers it collides with. This is the collision
//! filter set of an actor.

use serde::{Deserialize, Serialize};

/// Layer bits describing what a collider is.
///
/// Used to filter raycasts - a player's rays test the stage and the other
/// player's body, while the ball only tests the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CollisionLayers(pub u32);

impl CollisionLayers {
    /// Nothing.
    pub const EMPTY: Self = Self(0);

    /// Static stage geometry - floor, walls, ramps, platforms.
    pub const STAGE: Self = Self(1 << 0);

    /// Body of a player actor. Landing on one triggers a head hop.
    pub const PLAYER_BODY: Self = Self(1 << 1);

    /// Body of the ball actor.
    pub const BALL_BODY: Self = Self(1 << 2);

    /// Stage geometry that only blocks the ball (e.g. goal mouths).
    pub const BALL_CLIP: Self = Self(1 << 3);

    /// Standard mask for player movement rays.
    pub const MASK_PLAYER: Self = Self(Self::STAGE.0 | Self::PLAYER_BODY.0);

    /// Standard mask for ball movement rays.
    pub const MASK_BALL: Self = Self(Self::STAGE.0 | Self::BALL_CLIP.0);

    /// Check if these layers contain all of `other`.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if any of the given layers are set.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Remove layers from this set.
    #[inline]
    pub fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl std::ops::BitOr for CollisionLayers {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for CollisionLayers {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}
