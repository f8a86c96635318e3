//! Collider shapes and the narrow-phase dispatch table
//!
//! A [`Collider`] is a closed set of upright shapes. Pairwise tests are plain
//! functions selected by an exhaustive `match` on the variant pair, so adding
//! a shape forces every pairing to be handled.

use crate::foundation::math::{Vec3, UP};
use super::primitives::{point_segment_distance, segment_segment_distance, Aabb};

/// Errors raised when a collider is built with impossible dimensions
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// Capsule radius was zero, negative or NaN
    #[error("Capsule radius must be positive, got {0}")]
    NonPositiveRadius(f32),

    /// Capsule half-height was negative or NaN
    #[error("Capsule half-height cannot be negative, got {0}")]
    NegativeHalfHeight(f32),

    /// A box half-extent was zero, negative or NaN
    #[error("Box half-extents must be positive on every axis, got {0:?}")]
    NonPositiveExtents([f32; 3]),
}

/// Axis-aligned box collider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCollider {
    /// Center of the box
    pub position: Vec3,
    /// Half-size per axis
    pub half_extents: Vec3,
}

impl BoxCollider {
    /// Creates a box, rejecting non-positive extents
    pub fn new(position: Vec3, half_extents: Vec3) -> Result<Self, ShapeError> {
        if !half_extents.iter().all(|e| *e > 0.0) {
            return Err(ShapeError::NonPositiveExtents([
                half_extents.x,
                half_extents.y,
                half_extents.z,
            ]));
        }
        Ok(Self { position, half_extents })
    }

    /// Creates a box from its full size, the way level geometry is authored
    pub fn from_size(position: Vec3, size: Vec3) -> Result<Self, ShapeError> {
        Self::new(position, size * 0.5)
    }

    /// World-space bounds (exact for a box)
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_half_extents(self.position, self.half_extents)
    }
}

/// Upright capsule collider
///
/// The central segment always runs along the world Y axis from
/// `position - half_height` to `position + half_height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapsuleCollider {
    /// Center of the central segment
    pub position: Vec3,
    /// Radius around the central segment
    pub radius: f32,
    /// Half-length of the central segment
    pub half_height: f32,
}

impl CapsuleCollider {
    /// Creates a capsule, rejecting a non-positive radius or negative half-height
    pub fn new(position: Vec3, radius: f32, half_height: f32) -> Result<Self, ShapeError> {
        if !(radius > 0.0) {
            return Err(ShapeError::NonPositiveRadius(radius));
        }
        if !(half_height >= 0.0) {
            return Err(ShapeError::NegativeHalfHeight(half_height));
        }
        Ok(Self { position, radius, half_height })
    }

    /// Bottom end of the central segment
    pub fn segment_bottom(&self) -> Vec3 {
        self.position - UP * self.half_height
    }

    /// Top end of the central segment
    pub fn segment_top(&self) -> Vec3 {
        self.position + UP * self.half_height
    }

    /// Loose world-space bounds
    ///
    /// Always contains the whole capsule; pruning relies on that.
    pub fn bounds(&self) -> Aabb {
        let extent = Vec3::new(self.radius, self.half_height + self.radius, self.radius);
        Aabb::from_center_half_extents(self.position, extent)
    }
}

/// Collider shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collider {
    /// Axis-aligned box
    Box(BoxCollider),
    /// Upright capsule
    Capsule(CapsuleCollider),
}

impl Collider {
    /// Creates a box collider from center and half-extents
    pub fn cuboid(position: Vec3, half_extents: Vec3) -> Result<Self, ShapeError> {
        BoxCollider::new(position, half_extents).map(Self::Box)
    }

    /// Creates a capsule collider
    pub fn capsule(position: Vec3, radius: f32, half_height: f32) -> Result<Self, ShapeError> {
        CapsuleCollider::new(position, radius, half_height).map(Self::Capsule)
    }

    /// Center position
    pub fn position(&self) -> Vec3 {
        match self {
            Self::Box(b) => b.position,
            Self::Capsule(c) => c.position,
        }
    }

    /// Move the collider
    pub fn set_position(&mut self, position: Vec3) {
        match self {
            Self::Box(b) => b.position = position,
            Self::Capsule(c) => c.position = position,
        }
    }

    /// World-space bounding box used by the broad phase
    pub fn bounds(&self) -> Aabb {
        match self {
            Self::Box(b) => b.bounds(),
            Self::Capsule(c) => c.bounds(),
        }
    }

    /// Test if this shape overlaps another shape
    pub fn intersects(&self, other: &Collider) -> bool {
        match (self, other) {
            (Self::Box(a), Self::Box(b)) => box_box(a, b),

            (Self::Box(aabb), Self::Capsule(capsule)) |
            (Self::Capsule(capsule), Self::Box(aabb)) => box_capsule(aabb, capsule),

            (Self::Capsule(a), Self::Capsule(b)) => capsule_capsule(a, b),
        }
    }
}

impl From<BoxCollider> for Collider {
    fn from(value: BoxCollider) -> Self {
        Self::Box(value)
    }
}

impl From<CapsuleCollider> for Collider {
    fn from(value: CapsuleCollider) -> Self {
        Self::Capsule(value)
    }
}

fn box_box(a: &BoxCollider, b: &BoxCollider) -> bool {
    a.bounds().overlaps(&b.bounds())
}

fn box_capsule(aabb: &BoxCollider, capsule: &CapsuleCollider) -> bool {
    let bounds = aabb.bounds();
    let bottom = capsule.segment_bottom();
    let top = capsule.segment_top();

    // Point of the axis nearest the box's vertical span. X and Z are fixed
    // for an upright axis, so only Y has to be chosen.
    let axis_y = capsule
        .position
        .y
        .clamp(bounds.min.y, bounds.max.y)
        .clamp(bottom.y, top.y);
    let axis_point = Vec3::new(capsule.position.x, axis_y, capsule.position.z);

    let on_box = bounds.closest_point(&axis_point);
    point_segment_distance(&on_box, &bottom, &top) <= capsule.radius
}

fn capsule_capsule(a: &CapsuleCollider, b: &CapsuleCollider) -> bool {
    let distance = segment_segment_distance(
        &a.segment_bottom(),
        &a.segment_top(),
        &b.segment_bottom(),
        &b.segment_top(),
    );
    distance <= a.radius + b.radius
}
