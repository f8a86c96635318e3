//! # Physics Configuration
//!
//! Tuning parameters for the collision world and character motors. Every
//! struct is serde-serializable so a scene can ship its own TOML or RON file
//! and fall back to the defaults for anything it leaves out.
//!
//! ## Configuration Categories
//!
//! - **World Config**: Spatial grid resolution and swept-cast sampling
//! - **Motor Config**: Character footprint, gravity and ground handling
//! - **Physics Config**: Top-level file format bundling the above

use serde::{Serialize, Deserialize};

use crate::config::{Config, ConfigError};

/// # World Configuration
///
/// Broad-phase grid resolution and the sampling parameters of
/// [`CollisionWorld::cast_capsule`](crate::physics::CollisionWorld::cast_capsule).
///
/// The cast constants are empirical: the step is kept well below the capsule
/// radius so a cast cannot skip over geometry thinner than roughly one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Edge length of one spatial grid cell in world units
    pub cell_size: f32,
    /// Upper bound on the distance between two cast samples
    pub cast_max_step: f32,
    /// Cast step as a fraction of the swept capsule's radius
    pub cast_step_fraction: f32,
    /// Extra radius added to each per-sample broad-phase query
    pub cast_query_padding: f32,
}

impl WorldConfig {
    /// Create the default world configuration
    pub fn new() -> Self {
        Self {
            cell_size: 1.0,
            cast_max_step: 0.05,
            cast_step_fraction: 0.1,
            cast_query_padding: 1.0,
        }
    }

    /// Set the spatial grid cell size
    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Step length used when sweeping a capsule of `radius`
    pub fn cast_step(&self, radius: f32) -> f32 {
        (radius * self.cast_step_fraction).min(self.cast_max_step)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cell_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "cell_size must be positive, got {}",
                self.cell_size
            )));
        }
        if !(self.cast_max_step > 0.0) || !(self.cast_step_fraction > 0.0) {
            return Err(ConfigError::Invalid(
                "cast step parameters must be positive".to_string(),
            ));
        }
        if self.cast_query_padding < 0.0 {
            return Err(ConfigError::Invalid(
                "cast_query_padding cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Motor Configuration
///
/// Footprint and movement constants of a
/// [`CharacterMotor`](crate::physics::CharacterMotor).
///
/// `height` is the full height of the capsule from its lowest to its highest
/// point, so a grounded motor's centre rests `height / 2 + ground_clearance`
/// above the surface it stands on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotorConfig {
    /// Capsule radius
    pub radius: f32,
    /// Full capsule height including both hemispherical caps
    pub height: f32,
    /// Downward acceleration while airborne (units/s²)
    pub gravity: f32,
    /// Maximum fall speed (units/s)
    pub terminal_velocity: f32,
    /// How far below the feet the ground probe looks
    pub ground_snap_distance: f32,
    /// Gap kept between the feet and the ground after snapping
    pub ground_clearance: f32,
    /// Iteration cap for one sweep-and-slide pass
    pub max_slide_iterations: u32,
    /// Distance kept from a surface after a blocked sweep
    pub skin_width: f32,
    /// Upward speed above which the ground probe refuses to snap
    pub ascend_threshold: f32,
}

impl MotorConfig {
    /// Create the default motor configuration (a 1.8 unit tall humanoid)
    pub fn new() -> Self {
        Self {
            radius: 0.5,
            height: 1.8,
            gravity: 20.0,
            terminal_velocity: 30.0,
            ground_snap_distance: 0.1,
            ground_clearance: 0.05,
            max_slide_iterations: 3,
            skin_width: 0.002,
            ascend_threshold: 0.1,
        }
    }

    /// Set the capsule footprint
    pub fn with_size(mut self, radius: f32, height: f32) -> Self {
        self.radius = radius;
        self.height = height;
        self
    }

    /// Set gravity and terminal fall speed
    pub fn with_gravity(mut self, gravity: f32, terminal_velocity: f32) -> Self {
        self.gravity = gravity;
        self.terminal_velocity = terminal_velocity;
        self
    }

    /// Set the sweep-and-slide iteration cap
    pub fn with_max_slide_iterations(mut self, iterations: u32) -> Self {
        self.max_slide_iterations = iterations;
        self
    }

    /// Distance from the capsule centre to its lowest point
    pub fn half_extent(&self) -> f32 {
        self.height * 0.5
    }

    /// Half-length of the capsule's central segment
    pub fn segment_half_height(&self) -> f32 {
        (self.height * 0.5 - self.radius).max(0.0)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "motor radius must be positive, got {}",
                self.radius
            )));
        }
        if self.height < self.radius * 2.0 {
            return Err(ConfigError::Invalid(format!(
                "motor height {} is shorter than its diameter {}",
                self.height,
                self.radius * 2.0
            )));
        }
        if self.gravity < 0.0 || self.terminal_velocity < 0.0 {
            return Err(ConfigError::Invalid(
                "gravity and terminal_velocity cannot be negative".to_string(),
            ));
        }
        if self.max_slide_iterations == 0 {
            return Err(ConfigError::Invalid(
                "max_slide_iterations must be at least 1".to_string(),
            ));
        }
        if self.skin_width < 0.0 || self.ground_clearance < 0.0 || self.ground_snap_distance < 0.0 {
            return Err(ConfigError::Invalid(
                "skin_width, ground_clearance and ground_snap_distance cannot be negative"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Physics Configuration
///
/// Top-level configuration file for a simulation: logging, the world, the
/// player motor and the fixed timestep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Default log filter (overridden by `RUST_LOG`)
    pub log_level: String,
    /// Collision world settings
    pub world: WorldConfig,
    /// Player motor settings
    pub player: MotorConfig,
    /// Simulation step in seconds
    pub fixed_timestep: f32,
}

impl PhysicsConfig {
    /// Create a new physics configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            world: WorldConfig::default(),
            player: MotorConfig::default(),
            fixed_timestep: 1.0 / 60.0,
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.world.validate()?;
        self.player.validate()?;

        if !(self.fixed_timestep > 0.0) || self.fixed_timestep > 0.25 {
            return Err(ConfigError::Invalid(format!(
                "fixed_timestep must be in (0, 0.25], got {}",
                self.fixed_timestep
            )));
        }
        Ok(())
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for PhysicsConfig {}
impl Config for WorldConfig {}
impl Config for MotorConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_are_valid() {
        assert!(PhysicsConfig::default().validate().is_ok());
    }

    #[test]
    fn test_cast_step_is_capped() {
        let config = WorldConfig::default();

        assert_relative_eq!(config.cast_step(0.1), 0.01);
        assert_relative_eq!(config.cast_step(2.0), 0.05);
    }

    #[test]
    fn test_motor_segment_never_negative() {
        let config = MotorConfig::default().with_size(0.5, 1.0);

        assert_relative_eq!(config.segment_half_height(), 0.0);
        assert_relative_eq!(config.half_extent(), 0.5);
    }

    #[test]
    fn test_rejects_short_motor() {
        let config = MotorConfig::default().with_size(1.0, 1.0);

        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let text = r#"
            log_level = "debug"

            [player]
            radius = 0.4
        "#;

        let config = PhysicsConfig::parse("scene.toml", text).unwrap();

        assert_eq!(config.log_level, "debug");
        assert_relative_eq!(config.player.radius, 0.4);
        assert_relative_eq!(config.player.height, 1.8);
        assert_eq!(config.world, WorldConfig::default());
    }

    #[test]
    fn test_ron_round_trip_through_parse() {
        let config = PhysicsConfig::default().with_log_level("warn");
        let text = ron::ser::to_string(&config).unwrap();

        let parsed = PhysicsConfig::parse("scene.ron", &text).unwrap();

        assert_eq!(parsed, config);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let result = PhysicsConfig::parse("scene.json", "{}");

        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
