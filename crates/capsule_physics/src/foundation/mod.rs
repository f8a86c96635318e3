//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types and operations
//! - Stable handles for colliders
//! - Fixed-timestep time management
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod time;
pub mod logging;
