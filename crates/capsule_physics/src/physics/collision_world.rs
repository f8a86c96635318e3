//! Collision world
//!
//! Central registry of static and dynamic colliders plus the swept capsule
//! cast everything else is built on.
//!
//! Static colliders are indexed by a [`SpatialQuery`] implementation and never
//! move. Dynamic colliders are few (one per character) and are tested
//! exhaustively on every query.

use crate::core::config::WorldConfig;
use crate::foundation::collections::{ColliderHandle, ColliderMap};
use crate::foundation::math::utils::{horizontal, lerp_vec, try_normalize, DEGENERATE_LENGTH_SQ};
use crate::foundation::math::Vec3;
use crate::physics::collision::{Aabb, CapsuleCollider, Collider};
use crate::spatial::{SpatialHash, SpatialQuery};

/// Which collection a collider belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColliderKind {
    /// Level geometry, indexed by the broad phase and immutable
    Static,
    /// Moving collider whose pose is written by its owner every step
    Dynamic,
}

/// Result of a swept capsule cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Last sampled capsule centre that was still clear
    pub position: Vec3,
    /// Horizontal unit vector pointing from the struck collider towards the capsule
    pub normal: Vec3,
    /// Distance travelled from the cast start to `position`
    pub distance: f32,
    /// Collider that was struck
    pub collider: ColliderHandle,
}

/// Errors raised when mutating the world through a handle
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// The handle does not belong to this world (or was cleared)
    #[error("Unknown collider handle {0:?}")]
    UnknownCollider(ColliderHandle),

    /// Static colliders are baked into the spatial index and cannot move
    #[error("Collider {0:?} is static and cannot be moved")]
    StaticColliderImmutable(ColliderHandle),
}

#[derive(Debug, Clone)]
struct WorldCollider {
    collider: Collider,
    kind: ColliderKind,
}

/// Registry of colliders with broad-phase acceleration for static geometry
pub struct CollisionWorld {
    config: WorldConfig,

    /// Storage for every collider, static or dynamic
    colliders: ColliderMap<WorldCollider>,

    /// Insertion-ordered handles per collection
    statics: Vec<ColliderHandle>,
    dynamics: Vec<ColliderHandle>,

    /// Broad phase over static colliders only
    spatial_query: Box<dyn SpatialQuery>,
}

impl CollisionWorld {
    /// Create an empty world backed by a [`SpatialHash`] of `config.cell_size`
    pub fn new(config: WorldConfig) -> Self {
        let spatial_query = Box::new(SpatialHash::new(config.cell_size));
        Self::with_spatial_query(config, spatial_query)
    }

    /// Create an empty world with a custom broad phase
    pub fn with_spatial_query(config: WorldConfig, spatial_query: Box<dyn SpatialQuery>) -> Self {
        Self {
            config,
            colliders: ColliderMap::with_key(),
            statics: Vec::new(),
            dynamics: Vec::new(),
            spatial_query,
        }
    }

    /// World configuration
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Register level geometry
    pub fn add_static(&mut self, collider: Collider) -> ColliderHandle {
        let bounds = collider.bounds();
        let handle = self.colliders.insert(WorldCollider {
            collider,
            kind: ColliderKind::Static,
        });
        self.spatial_query.insert(handle, &bounds);
        self.statics.push(handle);

        log::debug!("Added static collider {:?} with bounds {:?}", handle, bounds);
        handle
    }

    /// Register a moving collider
    pub fn add_dynamic(&mut self, collider: Collider) -> ColliderHandle {
        let handle = self.colliders.insert(WorldCollider {
            collider,
            kind: ColliderKind::Dynamic,
        });
        self.dynamics.push(handle);

        log::debug!("Added dynamic collider {:?}", handle);
        handle
    }

    /// Move a dynamic collider
    pub fn set_dynamic_position(
        &mut self,
        handle: ColliderHandle,
        position: Vec3,
    ) -> Result<(), WorldError> {
        let entry = self
            .colliders
            .get_mut(handle)
            .ok_or(WorldError::UnknownCollider(handle))?;

        if entry.kind == ColliderKind::Static {
            return Err(WorldError::StaticColliderImmutable(handle));
        }
        entry.collider.set_position(position);
        Ok(())
    }

    /// Look up a collider
    pub fn collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.colliders.get(handle).map(|entry| &entry.collider)
    }

    /// Collection a collider belongs to
    pub fn kind(&self, handle: ColliderHandle) -> Option<ColliderKind> {
        self.colliders.get(handle).map(|entry| entry.kind)
    }

    /// Number of static colliders
    pub fn static_count(&self) -> usize {
        self.statics.len()
    }

    /// Number of dynamic colliders
    pub fn dynamic_count(&self) -> usize {
        self.dynamics.len()
    }

    /// Static colliders in insertion order
    pub fn get_all_static(&self) -> impl Iterator<Item = (ColliderHandle, &Collider)> + '_ {
        self.iter_handles(&self.statics)
    }

    /// Dynamic colliders in insertion order
    pub fn get_all_dynamic(&self) -> impl Iterator<Item = (ColliderHandle, &Collider)> + '_ {
        self.iter_handles(&self.dynamics)
    }

    fn iter_handles<'a>(
        &'a self,
        handles: &'a [ColliderHandle],
    ) -> impl Iterator<Item = (ColliderHandle, &'a Collider)> + 'a {
        handles
            .iter()
            .filter_map(move |&handle| self.collider(handle).map(|collider| (handle, collider)))
    }

    /// Drop every dynamic collider, keeping level geometry
    pub fn clear_dynamics(&mut self) {
        for handle in self.dynamics.drain(..) {
            self.colliders.remove(handle);
        }
        log::info!("Cleared dynamic colliders");
    }

    /// Drop every collider and reset the broad phase
    pub fn clear(&mut self) {
        self.colliders.clear();
        self.statics.clear();
        self.dynamics.clear();
        self.spatial_query.clear();
        log::info!("Collision world cleared");
    }

    /// Broad-phase candidates around `position`
    ///
    /// Static colliders come from the spatial index; every dynamic collider is
    /// always included.
    pub fn query_around(&self, position: &Vec3, radius: f32) -> Vec<ColliderHandle> {
        let mut candidates = self.spatial_query.query_radius(position, radius);
        candidates.extend_from_slice(&self.dynamics);
        candidates
    }

    /// Plain AABB overlap helper
    pub fn overlap_aabb(a: &Aabb, b: &Aabb) -> bool {
        a.overlaps(b)
    }

    /// Colliders currently overlapping `shape`
    pub fn overlapping(&self, shape: &Collider, ignore: Option<ColliderHandle>) -> Vec<ColliderHandle> {
        let extents = shape.bounds().half_extents();
        let radius = extents.x.max(extents.z) + self.config.cast_query_padding;

        self.query_around(&shape.position(), radius)
            .into_iter()
            .filter(|&handle| Some(handle) != ignore)
            .filter(|&handle| {
                self.collider(handle)
                    .is_some_and(|collider| shape.intersects(collider))
            })
            .collect()
    }

    /// Sweep an upright capsule from `start` to `end`
    ///
    /// See [`cast_capsule_ignoring`](Self::cast_capsule_ignoring).
    pub fn cast_capsule(
        &self,
        start: &Vec3,
        end: &Vec3,
        radius: f32,
        half_height: f32,
    ) -> Option<Hit> {
        self.cast_capsule_ignoring(start, end, radius, half_height, None)
    }

    /// Sweep an upright capsule from `start` to `end`, skipping `ignore`
    ///
    /// The sweep is sampled at a fixed step no longer than
    /// [`WorldConfig::cast_step`]. On the first sample that overlaps a
    /// collider the previous (clear) sample is reported, so the hit position
    /// never penetrates but may stop up to one step short of the surface.
    ///
    /// Returns `None` for a degenerate sweep or when nothing is struck.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn cast_capsule_ignoring(
        &self,
        start: &Vec3,
        end: &Vec3,
        radius: f32,
        half_height: f32,
        ignore: Option<ColliderHandle>,
    ) -> Option<Hit> {
        let sweep = end - start;
        if sweep.magnitude_squared() < DEGENERATE_LENGTH_SQ || !(radius > 0.0) {
            return None;
        }

        let distance = sweep.magnitude();
        let direction = sweep / distance;
        let step = self.config.cast_step(radius);
        let steps = ((distance / step).ceil() as u32).max(1);
        let query_radius = radius + self.config.cast_query_padding;

        let mut probe = CapsuleCollider {
            position: *start,
            radius,
            half_height: half_height.max(0.0),
        };

        for i in 0..=steps {
            probe.position = lerp_vec(start, end, i as f32 / steps as f32);
            let shape = Collider::Capsule(probe);

            for handle in self.query_around(&probe.position, query_radius) {
                if Some(handle) == ignore {
                    continue;
                }
                let Some(other) = self.collider(handle) else {
                    continue;
                };
                if !shape.intersects(other) {
                    continue;
                }

                let clear_t = i.saturating_sub(1) as f32 / steps as f32;
                let normal = try_normalize(&horizontal(&(probe.position - other.position())))
                    .unwrap_or(-direction);

                let hit = Hit {
                    position: lerp_vec(start, end, clear_t),
                    normal,
                    distance: distance * clear_t,
                    collider: handle,
                };
                log::trace!(
                    "Cast hit {:?} at sample {}/{} (distance {:.3})",
                    handle,
                    i,
                    steps,
                    hit.distance
                );
                return Some(hit);
            }
        }

        None
    }
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}
