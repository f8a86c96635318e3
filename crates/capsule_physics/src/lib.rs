//! # Capsule Physics
//!
//! Discrete collision detection and character movement for upright capsules
//! moving through a world of axis-aligned boxes.
//!
//! ## Features
//!
//! - **Narrow Phase**: Box/box, box/capsule and capsule/capsule overlap tests
//! - **Broad Phase**: Uniform XZ grid over static level geometry
//! - **Swept Casts**: Sampled capsule casts that report the last clear position
//! - **Character Motor**: Gravity, sweep-and-slide, ground snapping and jumping
//! - **Debug Extraction**: Wireframe shapes for an external renderer
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use capsule_physics::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut world = CollisionWorld::new(WorldConfig::default());
//!     world.add_static(Collider::cuboid(Vec3::zeros(), Vec3::new(15.0, 0.05, 15.0))?);
//!
//!     let mut motor = CharacterMotor::new(MotorConfig::default());
//!     let mut transform = Transform::from_position(Vec3::new(0.0, 3.0, 0.0));
//!
//!     for _ in 0..120 {
//!         motor.move_and_slide(&mut world, &mut transform, Vec3::new(1.0, 0.0, 0.0), 1.0 / 60.0);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;

pub mod config;
pub mod foundation;
pub mod spatial;
pub mod physics;
pub mod debug;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        foundation::{
            collections::ColliderHandle,
            math::{Vec3, Transform},
        },
        physics::{
            Aabb, BoxCollider, CapsuleCollider, Collider, ShapeError,
            CollisionWorld, ColliderKind, Hit, WorldError,
            CharacterMotor, MotorState, SlideResult,
        },
        spatial::{SpatialHash, SpatialQuery},
        debug::{CollisionDebugVisualizer, DebugDrawSystem, DebugShape},
        config::{Config, ConfigError},
        core::config::{MotorConfig, PhysicsConfig, WorldConfig},
    };
}
