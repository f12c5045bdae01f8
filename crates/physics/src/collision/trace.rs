//! Ray hits, ray filters and the raycast query seam.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::flags::CollisionLayers;

/// Unique identifier for actors (players and the ball).
pub type ActorId = u32;

/// What kind of actor a body belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    Player,
    Ball,
}

impl ActorKind {
    /// Layer an actor of this kind occupies.
    pub fn body_layer(self) -> CollisionLayers {
        match self {
            Self::Player => CollisionLayers::PLAYER_BODY,
            Self::Ball => CollisionLayers::BALL_BODY,
        }
    }

    /// Layers an actor of this kind collides with.
    pub fn default_mask(self) -> CollisionLayers {
        match self {
            Self::Player => CollisionLayers::MASK_PLAYER,
            Self::Ball => CollisionLayers::MASK_BALL,
        }
    }
}

/// Result of a single raycast that hit something.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    /// Distance from the ray origin to the hit point.
    pub distance: f32,

    /// Surface normal at the hit point, pointing away from the surface.
    pub normal: Vec2,

    /// Layers of the collider that was hit.
    pub layers: CollisionLayers,

    /// Actor that owns the hit collider, `None` for stage geometry.
    pub actor: Option<ActorId>,
}

impl RayHit {
    /// Create a hit against stage geometry.
    pub fn stage(distance: f32, normal: Vec2) -> Self {
        Self {
            distance,
            normal,
            layers: CollisionLayers::STAGE,
            actor: None,
        }
    }

    /// Create a hit against an actor body.
    pub fn actor(distance: f32, normal: Vec2, actor: ActorId, kind: ActorKind) -> Self {
        Self {
            distance,
            normal,
            layers: kind.body_layer(),
            actor: Some(actor),
        }
    }

    /// Angle between the surface normal and world up, in degrees.
    ///
    /// `0` is flat ground, `90` is a vertical wall.
    pub fn slope_angle(&self) -> f32 {
        let normal = self.normal.normalize_or_zero();
        if normal == Vec2::ZERO {
            return 0.0;
        }
        normal.y.clamp(-1.0, 1.0).acos().to_degrees()
    }

    /// Player actor this hit landed on, if any.
    #[inline]
    pub fn player_actor(&self) -> Option<ActorId> {
        if self.layers.intersects(CollisionLayers::PLAYER_BODY) {
            self.actor
        } else {
            None
        }
    }
}

/// Which colliders a ray may hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RayFilter {
    /// Layers the ray collides with.
    pub layers: CollisionLayers,

    /// Actor body to ignore, normally the casting actor's own.
    pub exclude: Option<ActorId>,
}

impl RayFilter {
    /// Filter for an actor casting its own movement rays.
    pub fn for_actor(id: ActorId, layers: CollisionLayers) -> Self {
        Self {
            layers,
            exclude: Some(id),
        }
    }

    /// Whether a collider passes this filter.
    #[inline]
    pub fn accepts(&self, layers: CollisionLayers, actor: Option<ActorId>) -> bool {
        if !self.layers.intersects(layers) {
            return false;
        }
        match (self.exclude, actor) {
            (Some(excluded), Some(id)) => excluded != id,
            _ => true,
        }
    }
}

/// The geometry query the mover runs its rays against.
///
/// Returns the closest hit within `max_distance` along `direction` (a unit
/// vector), or `None`. Implementations are read-only; the mover never
/// mutates the world.
pub trait RaycastQuery {
    fn cast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        filter: &RayFilter,
    ) -> Option<RayHit>;
}

impl<F> RaycastQuery for F
where
    F: Fn(Vec2, Vec2, f32, &RayFilter) -> Option<RayHit>,
{
    fn cast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        filter: &RayFilter,
    ) -> Option<RayHit> {
        self(origin, direction, max_distance, filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slope_angle() {
        let flat = RayHit::stage(1.0, Vec2::Y);
        assert_eq!(flat.slope_angle(), 0.0);

        let wall = RayHit::stage(1.0, -Vec2::X);
        assert!((wall.slope_angle() - 90.0).abs() < 1e-4);

        let (sin, cos) = 30.0_f32.to_radians().sin_cos();
        let ramp = RayHit::stage(1.0, Vec2::new(-sin, cos));
        assert!((ramp.slope_angle() - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_player_actor() {
        let hit = RayHit::actor(0.5, Vec2::Y, 7, ActorKind::Player);
        assert_eq!(hit.player_actor(), Some(7));

        let ball = RayHit::actor(0.5, Vec2::Y, 9, ActorKind::Ball);
        assert_eq!(ball.player_actor(), None);

        assert_eq!(RayHit::stage(0.5, Vec2::Y).player_actor(), None);
    }

    #[test]
    fn test_filter_excludes_self() {
        let filter = RayFilter::for_actor(1, CollisionLayers::MASK_PLAYER);

        assert!(filter.accepts(CollisionLayers::STAGE, None));
        assert!(filter.accepts(CollisionLayers::PLAYER_BODY, Some(2)));
        assert!(!filter.accepts(CollisionLayers::PLAYER_BODY, Some(1)));
        assert!(!filter.accepts(CollisionLayers::BALL_BODY, Some(3)));
    }

    #[test]
    fn test_closure_query() {
        let floor = |origin: Vec2, direction: Vec2, max: f32, _: &RayFilter| {
            let distance = origin.y;
            (direction == -Vec2::Y && distance <= max).then(|| RayHit::stage(distance, Vec2::Y))
        };

        let filter = RayFilter::default();
        assert!(floor.cast(Vec2::new(0.0, 1.0), -Vec2::Y, 2.0, &filter).is_some());
        assert!(floor.cast(Vec2::new(0.0, 3.0), -Vec2::Y, 2.0, &filter).is_none());
    }
}
