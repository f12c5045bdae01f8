//! Collision world containing stage geometry and actor bodies.
//!
//! The collision world stores all collidable geometry and answers the
//! raycast queries the mover fires every frame.

use glam::Vec2;
use parry2d::math::{Isometry, Point, Real, Vector};
use parry2d::query::Ray;
use parry2d::shape::SharedShape;
use serde::{Deserialize, Serialize};

use super::flags::CollisionLayers;
use super::trace::{ActorId, ActorKind, RayFilter, RayHit, RaycastQuery};

/// A piece of static stage geometry.
#[derive(Clone)]
pub struct CollisionBrush {
    /// Unique identifier for this brush.
    pub id: u32,
    /// The collision shape.
    pub shape: SharedShape,
    /// Position in world space.
    pub transform: Isometry<Real>,
    /// Layers this brush occupies.
    pub layers: CollisionLayers,
}

impl std::fmt::Debug for CollisionBrush {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollisionBrush")
            .field("id", &self.id)
            .field("translation", &self.transform.translation.vector)
            .field("layers", &self.layers)
            .finish()
    }
}

/// The axis-aligned box of an actor, mirrored into the world so other
/// actors' rays can hit it.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ActorBody {
    id: ActorId,
    kind: ActorKind,
    center: Vec2,
    half_extents: Vec2,
}

/// Which way a ramp rises when walking left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RampDirection {
    /// Low on the left, high on the right.
    RisingRight,
    /// High on the left, low on the right.
    RisingLeft,
}

/// The collision world containing all geometry.
///
/// Supports:
/// - Axis-aligned box brushes (floors, walls, platforms)
/// - Right-angle ramps and arbitrary convex polygons (slopes)
/// - Actor bodies, updated every tick as actors move
///
/// Stage brushes are immutable once the round starts; only actor bodies
/// change between moves.
#[derive(Debug, Default)]
pub struct CollisionWorld {
    /// Static stage brushes.
    brushes: Vec<CollisionBrush>,
    /// Actor boxes in insertion order.
    bodies: Vec<ActorBody>,
    /// Next brush ID to assign.
    next_id: u32,
}

impl CollisionWorld {
    /// Create an empty collision world.
    pub fn new() -> Self {
        Self {
            brushes: Vec::new(),
            bodies: Vec::new(),
            next_id: 0,
        }
    }

    /// Add an axis-aligned box to the stage.
    pub fn add_box(&mut self, center: Vec2, half_extents: Vec2, layers: CollisionLayers) -> u32 {
        let shape = SharedShape::cuboid(half_extents.x, half_extents.y);
        self.push_brush(shape, Isometry::translation(center.x, center.y), layers)
    }

    /// Add a right-angle ramp whose base starts at `base_left`.
    ///
    /// The slope angle is `atan(height / width)`.
    pub fn add_ramp(
        &mut self,
        base_left: Vec2,
        width: f32,
        height: f32,
        direction: RampDirection,
        layers: CollisionLayers,
    ) -> u32 {
        let left = Point::new(base_left.x, base_left.y);
        let right = Point::new(base_left.x + width, base_left.y);
        let top = match direction {
            RampDirection::RisingRight => Point::new(base_left.x + width, base_left.y + height),
            RampDirection::RisingLeft => Point::new(base_left.x, base_left.y + height),
        };
        let shape = SharedShape::triangle(left, right, top);
        self.push_brush(shape, Isometry::identity(), layers)
    }

    /// Add a convex polygon to the stage.
    ///
    /// Returns `None` if the points do not form a valid convex polygon.
    pub fn add_convex_polygon(&mut self, points: &[Vec2], layers: CollisionLayers) -> Option<u32> {
        let parry_points: Vec<Point<Real>> = points.iter().map(|p| Point::new(p.x, p.y)).collect();
        let shape = SharedShape::convex_polyline(parry_points)?;
        Some(self.push_brush(shape, Isometry::identity(), layers))
    }

    /// Insert or move an actor's body.
    pub fn set_actor_body(&mut self, id: ActorId, kind: ActorKind, center: Vec2, half_extents: Vec2) {
        let body = ActorBody {
            id,
            kind,
            center,
            half_extents,
        };
        match self.bodies.iter_mut().find(|b| b.id == id) {
            Some(existing) => *existing = body,
            None => self.bodies.push(body),
        }
    }

    /// Remove an actor's body. Returns whether it existed.
    pub fn remove_actor_body(&mut self, id: ActorId) -> bool {
        let before = self.bodies.len();
        self.bodies.retain(|b| b.id != id);
        self.bodies.len() != before
    }

    /// Remove all collision geometry and bodies.
    pub fn clear(&mut self) {
        self.brushes.clear();
        self.bodies.clear();
    }

    /// Get the number of stage brushes.
    pub fn brush_count(&self) -> usize {
        self.brushes.len()
    }

    /// Get the number of actor bodies.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    // ========================================================================
    // Private helpers
    // ========================================================================

    fn push_brush(
        &mut self,
        shape: SharedShape,
        transform: Isometry<Real>,
        layers: CollisionLayers,
    ) -> u32 {
        let id = self.next_id;
        self.next_id += 1;

        self.brushes.push(CollisionBrush {
            id,
            shape,
            transform,
            layers,
        });

        id
    }

    /// Cast against one shape, returning distance and outward normal.
    fn cast_shape(
        shape: &SharedShape,
        transform: &Isometry<Real>,
        ray: &Ray,
        direction: Vec2,
        max_distance: f32,
    ) -> Option<(f32, Vec2)> {
        let distance = shape.cast_ray(transform, ray, max_distance, true)?;

        // Rays starting inside a shape report a zero normal
        let normal = shape
            .cast_ray_and_get_normal(transform, ray, max_distance, true)
            .map(|intersection| Vec2::new(intersection.normal.x, intersection.normal.y))
            .filter(|n| n.length_squared() > 1.0e-8)
            .unwrap_or(-direction);

        Some((distance, normal))
    }
}

impl RaycastQuery for CollisionWorld {
    fn cast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        filter: &RayFilter,
    ) -> Option<RayHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec2::ZERO || max_distance.is_nan() || max_distance <= 0.0 {
            return None;
        }

        let ray = Ray::new(Point::new(origin.x, origin.y), Vector::new(dir.x, dir.y));
        let mut closest: Option<RayHit> = None;

        for brush in &self.brushes {
            if !filter.accepts(brush.layers, None) {
                continue;
            }

            if let Some((distance, normal)) =
                Self::cast_shape(&brush.shape, &brush.transform, &ray, dir, max_distance)
            {
                if closest.map_or(true, |c| distance < c.distance) {
                    closest = Some(RayHit {
                        distance,
                        normal,
                        layers: brush.layers,
                        actor: None,
                    });
                }
            }
        }

        for body in &self.bodies {
            if !filter.accepts(body.kind.body_layer(), Some(body.id)) {
                continue;
            }

            let shape = SharedShape::cuboid(body.half_extents.x, body.half_extents.y);
            let transform = Isometry::translation(body.center.x, body.center.y);

            if let Some((distance, normal)) =
                Self::cast_shape(&shape, &transform, &ray, dir, max_distance)
            {
                if closest.map_or(true, |c| distance < c.distance) {
                    closest = Some(RayHit::actor(distance, normal, body.id, body.kind));
                }
            }
        }

        closest
    }
}

// ============================================================================
// Tests
// ============================================================================
