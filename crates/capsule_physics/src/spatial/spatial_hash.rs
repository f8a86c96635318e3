//! Uniform grid over the XZ plane
//!
//! Static colliders are bucketed by the integer cells their bounds cover.
//! Height is ignored: levels are a single floor, so a 2D projection prunes
//! just as well as a 3D grid and needs far fewer cells.

use std::collections::{HashMap, HashSet};

use crate::foundation::collections::ColliderHandle;
use crate::foundation::math::Vec3;
use crate::physics::collision::Aabb;
use super::spatial_query::SpatialQuery;

/// Integer cell coordinate `(x, z)`
pub type CellCoord = (i32, i32);

/// Uniform-grid broad phase
///
/// A collider spanning several cells is stored in each of them; queries
/// deduplicate.
#[derive(Debug, Clone)]
pub struct SpatialHash {
    cell_size: f32,
    cells: HashMap<CellCoord, Vec<ColliderHandle>>,
    indexed: HashSet<ColliderHandle>,
}

impl SpatialHash {
    /// Create an empty grid with square cells of `cell_size` world units
    pub fn new(cell_size: f32) -> Self {
        debug_assert!(cell_size > 0.0, "cell size must be positive");
        Self {
            cell_size,
            cells: HashMap::new(),
            indexed: HashSet::new(),
        }
    }

    /// Edge length of one cell
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of non-empty cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Cell containing the world-space coordinate `(x, z)`
    #[allow(clippy::cast_possible_truncation)]
    pub fn cell_coord(&self, x: f32, z: f32) -> CellCoord {
        (
            (x / self.cell_size).floor() as i32,
            (z / self.cell_size).floor() as i32,
        )
    }

    /// Handles stored in one cell
    pub fn cell(&self, coord: CellCoord) -> &[ColliderHandle] {
        self.cells.get(&coord).map_or(&[], Vec::as_slice)
    }
}

impl Default for SpatialHash {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl SpatialQuery for SpatialHash {
    fn insert(&mut self, handle: ColliderHandle, bounds: &Aabb) {
        let (min_x, min_z) = self.cell_coord(bounds.min.x, bounds.min.z);
        let (max_x, max_z) = self.cell_coord(bounds.max.x, bounds.max.z);

        for x in min_x..=max_x {
            for z in min_z..=max_z {
                self.cells.entry((x, z)).or_default().push(handle);
            }
        }
        self.indexed.insert(handle);

        log::trace!(
            "Indexed {:?} into {} cells",
            handle,
            (max_x - min_x + 1) * (max_z - min_z + 1)
        );
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn query_radius(&self, center: &Vec3, radius: f32) -> Vec<ColliderHandle> {
        let (center_x, center_z) = self.cell_coord(center.x, center.z);
        let span = (radius.max(0.0) / self.cell_size).ceil();

        let mut seen = HashSet::new();
        let mut results = Vec::new();
        let mut collect = |handles: &[ColliderHandle]| {
            for &handle in handles {
                if seen.insert(handle) {
                    results.push(handle);
                }
            }
        };

        let window = (2.0 * span + 1.0) * (2.0 * span + 1.0);
        if window <= self.cells.len() as f32 {
            let span = span as i32;
            for x in center_x - span..=center_x + span {
                for z in center_z - span..=center_z + span {
                    collect(self.cell((x, z)));
                }
            }
        } else {
            // Window covers more cells than are occupied: visit those instead,
            // in the same x-then-z order as the scan above
            let within = |coord: i32, center: i32| ((i64::from(coord) - i64::from(center)).abs() as f32) <= span;
            let mut coords: Vec<CellCoord> = self
                .cells
                .keys()
                .copied()
                .filter(|&(x, z)| within(x, center_x) && within(z, center_z))
                .collect();
            coords.sort_unstable();
            for coord in coords {
                collect(self.cell(coord));
            }
        }

        results
    }

    fn clear(&mut self) {
        self.cells.clear();
        self.indexed.clear();
    }

    fn len(&self) -> usize {
        self.indexed.len()
    }
}
