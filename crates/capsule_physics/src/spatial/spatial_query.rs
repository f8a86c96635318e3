//! Abstract spatial query interface for broad-phase collision detection
//!
//! The collision world only talks to its broad phase through this trait, so
//! the uniform grid can be swapped for another partitioning scheme without
//! touching the cast code.

use crate::foundation::collections::ColliderHandle;
use crate::foundation::math::Vec3;
use crate::physics::collision::Aabb;

/// Broad-phase index over colliders that do not move
pub trait SpatialQuery: Send + Sync {
    /// Index a collider under every region its bounds touch
    fn insert(&mut self, handle: ColliderHandle, bounds: &Aabb);

    /// Colliders that may lie within `radius` of `center`
    ///
    /// May return extra candidates but never misses a collider whose bounds
    /// reach into the query region. Each handle appears at most once.
    fn query_radius(&self, center: &Vec3, radius: f32) -> Vec<ColliderHandle>;

    /// Drop every indexed collider
    fn clear(&mut self);

    /// Number of distinct colliders indexed
    fn len(&self) -> usize;

    /// Whether nothing is indexed
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
