//! Narrow-phase collision detection
//!
//! Exact overlap tests between the supported collider shapes.
//!
//! # Module Organization
//!
//! - [`primitives`] - Bounding boxes and closest-point/distance routines
//! - [`shape`] - Box and capsule colliders and the pairwise dispatch
//!
//! # Key Types
//!
//! - [`Collider`] - Closed sum of every shape the world can hold
//! - [`Aabb`] - Axis-aligned bounds used by the broad phase

pub mod primitives;
pub mod shape;

// Re-export commonly used types
pub use primitives::{
    Aabb,
    closest_points_between_segments,
    point_segment_distance,
    segment_segment_distance,
};
pub use shape::{BoxCollider, CapsuleCollider, Collider, ShapeError};
