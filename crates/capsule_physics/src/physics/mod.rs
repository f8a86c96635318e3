//! Physics module for collision detection and character movement
//!
//! Provides narrow-phase shape tests, a collision world with a swept capsule
//! cast, and a sweep-and-slide character motor built on top of it.

pub mod collision;
pub mod collision_world;
pub mod character_motor;

#[cfg(test)]
mod tests;

pub use collision::{
    Aabb,
    BoxCollider,
    CapsuleCollider,
    Collider,
    ShapeError,
};
pub use collision_world::{CollisionWorld, ColliderKind, Hit, WorldError};
pub use character_motor::{CharacterMotor, MotorState, SlideResult};
