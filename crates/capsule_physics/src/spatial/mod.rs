//! Spatial partitioning data structures
//!
//! Broad-phase indexing for static level geometry.

pub mod spatial_query;
mod spatial_hash;

pub use spatial_hash::{CellCoord, SpatialHash};
pub use spatial_query::SpatialQuery;
