//! Primitive geometry and distance algorithms
//!
//! Axis-aligned boxes plus the closest-point routines the narrow phase is
//! built from. Everything here is allocation-free and works in world space.

use crate::foundation::math::Vec3;

/// Segments shorter than this are treated as points
pub const SEGMENT_EPSILON: f32 = 1.0e-4;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Creates a box from its corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Creates a box from its center and half-size per axis
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Center point
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half-size per axis
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Overlap test; touching faces count as overlapping
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Box grown by `margin` on every side
    pub fn expanded(&self, margin: f32) -> Aabb {
        let margin = Vec3::new(margin, margin, margin);
        Aabb::new(self.min - margin, self.max + margin)
    }

    /// The point of the box closest to `point`
    pub fn closest_point(&self, point: &Vec3) -> Vec3 {
        Vec3::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
            point.z.clamp(self.min.z, self.max.z),
        )
    }
}

/// Distance from `point` to the segment `start`-`end`
pub fn point_segment_distance(point: &Vec3, start: &Vec3, end: &Vec3) -> f32 {
    let segment = end - start;
    let length = segment.magnitude();

    if length < SEGMENT_EPSILON {
        return (point - start).magnitude();
    }

    let direction = segment / length;
    let t = (point - start).dot(&direction).clamp(0.0, length);
    let closest = start + direction * t;
    (point - closest).magnitude()
}

/// Closest points between segments `a1`-`a2` and `b1`-`b2`
///
/// Solves the 2×2 system for the segment parameters `s` (on A) and `t`
/// (on B), clamping each to `[0, 1]` and re-solving the other one whenever
/// a clamp kicks in. Degenerate (point-like) segments fall back to
/// point-to-segment math.
pub fn closest_points_between_segments(
    a1: &Vec3,
    a2: &Vec3,
    b1: &Vec3,
    b2: &Vec3,
) -> (Vec3, Vec3) {
    let da = a2 - a1;
    let db = b2 - b1;
    let r = a1 - b1;

    let len_a = da.magnitude_squared();
    let len_b = db.magnitude_squared();
    let eps = SEGMENT_EPSILON * SEGMENT_EPSILON;

    // Both segments collapsed to points
    if len_a <= eps && len_b <= eps {
        return (*a1, *b1);
    }

    let f = db.dot(&r);

    let (s, t) = if len_a <= eps {
        // A is a point: project it onto B
        (0.0, (f / len_b).clamp(0.0, 1.0))
    } else {
        let c = da.dot(&r);
        if len_b <= eps {
            // B is a point: project it onto A
            ((-c / len_a).clamp(0.0, 1.0), 0.0)
        } else {
            let b = da.dot(&db);
            let denom = len_a * len_b - b * b;

            // Parallel segments have no unique solution; start from s = 0
            let mut s = if denom > eps {
                ((b * f - c * len_b) / denom).clamp(0.0, 1.0)
            } else {
                0.0
            };

            let mut t = (b * s + f) / len_b;
            if t < 0.0 {
                t = 0.0;
                s = (-c / len_a).clamp(0.0, 1.0);
            } else if t > 1.0 {
                t = 1.0;
                s = ((b - c) / len_a).clamp(0.0, 1.0);
            }
            (s, t)
        }
    };

    (a1 + da * s, b1 + db * t)
}

/// Minimum distance between segments `a1`-`a2` and `b1`-`b2`
pub fn segment_segment_distance(a1: &Vec3, a2: &Vec3, b1: &Vec3, b2: &Vec3) -> f32 {
    let (on_a, on_b) = closest_points_between_segments(a1, a2, b1, b2);
    (on_a - on_b).magnitude()
}
