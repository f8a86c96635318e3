//! Cross-module behaviour tests for the collision world and character motor

mod shape_properties;
mod movement;
