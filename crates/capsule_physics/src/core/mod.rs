//! # Core Module
//!
//! Shared abstractions used by every subsystem of the crate.
//!
//! ## Organization
//!
//! - **Config**: Tuning parameters for the collision world and character motors
//! - **Foundation**: Low-level utilities (math, handles, time, logging)

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;

// Re-export commonly used config types
pub use config::{
    MotorConfig,
    PhysicsConfig,
    WorldConfig,
};
pub use crate::config::{Config, ConfigError};
