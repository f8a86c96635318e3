//! Debug visualization
//!
//! Wireframe extraction for an external renderer. The physics core never
//! calls into a renderer; callers own the shape buffer and flush it once per
//! frame.

pub mod draw;
pub mod collision_debug;

pub use draw::{DebugShape, DebugDrawSystem, DebugShapeId};
pub use collision_debug::{CollisionDebugColors, CollisionDebugVisualizer};
