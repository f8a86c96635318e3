//! Math utilities and types
//!
//! Thin aliases over nalgebra plus the handful of vector helpers the
//! collision code leans on.

pub use nalgebra::{Vector3, Vector4, Quaternion, Unit};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type (RGBA colors)
pub type Vec4 = Vector4<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// World up axis. Capsules are always aligned with it.
pub const UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Position, rotation and scale of an entity
///
/// The physics core only reads and writes `position`. Rotation and scale are
/// carried for the renderer and never influence collision (colliders do not
/// rotate).
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

/// Math utility functions
pub mod utils {
    use super::Vec3;

    /// Squared length below which a vector is treated as zero
    pub const DEGENERATE_LENGTH_SQ: f32 = 1.0e-4;

    /// Linear interpolation between two points
    pub fn lerp_vec(a: &Vec3, b: &Vec3, t: f32) -> Vec3 {
        a + (b - a) * t
    }

    /// Copy of `v` with the vertical component removed
    pub fn horizontal(v: &Vec3) -> Vec3 {
        Vec3::new(v.x, 0.0, v.z)
    }

    /// Remove the component of `v` along the unit `normal`
    pub fn project_on_plane(v: &Vec3, normal: &Vec3) -> Vec3 {
        v - normal * v.dot(normal)
    }

    /// Normalize `v`, or `None` when it is too short to have a direction
    pub fn try_normalize(v: &Vec3) -> Option<Vec3> {
        if v.magnitude_squared() < DEGENERATE_LENGTH_SQ {
            None
        } else {
            Some(v.normalize())
        }
    }
}
