//! Sweep-and-slide character motor
//!
//! Turns a desired velocity into a collision-respecting displacement once per
//! fixed step. Horizontal and vertical movement are resolved in two separate
//! passes so walking is never blocked by the floor the vertical pass already
//! handles, then a short downward probe decides whether the character stands
//! on something.
//!
//! The motor owns no position of its own: the caller's [`Transform`] is the
//! canonical pose and the motor's capsule merely mirrors it.

use crate::core::config::MotorConfig;
use crate::foundation::collections::ColliderHandle;
use crate::foundation::math::utils::{horizontal, project_on_plane, try_normalize, DEGENERATE_LENGTH_SQ};
use crate::foundation::math::{Transform, Vec3, UP};
use crate::physics::collision::{CapsuleCollider, Collider};
use crate::physics::collision_world::{CollisionWorld, ColliderKind, Hit};

/// Ground probe capsule radius relative to the motor radius
const PROBE_RADIUS_SCALE: f32 = 0.8;

/// Extra probe reach below the snap distance, also the tolerance for feet
/// slightly below the supporting surface
const PROBE_MARGIN: f32 = 0.1;

/// Remaining slide distance below which a pass stops
const MIN_SLIDE_DISTANCE: f32 = 0.001;

/// Grounding state, recomputed from a fresh probe every step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotorState {
    /// Resting on a surface; gravity is suspended
    Grounded,
    /// Falling or jumping
    #[default]
    Airborne,
}

/// Outcome of one sweep-and-slide pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideResult {
    /// Where the capsule ended up
    pub position: Vec3,
    /// Movement left over when the pass stopped
    pub remaining: Vec3,
    /// Casts performed
    pub iterations: u32,
    /// Last surface struck during the pass
    pub last_hit: Option<Hit>,
}

/// Kinematic capsule controller with gravity, sliding, ground snap and jumping
#[derive(Debug, Clone)]
pub struct CharacterMotor {
    config: MotorConfig,

    /// Built on first use from the transform it is first given
    capsule: Option<CapsuleCollider>,

    /// Own dynamic collider, skipped by every cast this motor issues
    handle: Option<ColliderHandle>,

    vertical_velocity: f32,
    state: MotorState,
    last_hit: Option<Hit>,
}

impl CharacterMotor {
    /// Create a motor; the capsule is built lazily on first use
    pub fn new(config: MotorConfig) -> Self {
        Self {
            config,
            capsule: None,
            handle: None,
            vertical_velocity: 0.0,
            state: MotorState::Airborne,
            last_hit: None,
        }
    }

    /// Motor configuration
    pub fn config(&self) -> &MotorConfig {
        &self.config
    }

    /// Current grounding state
    pub fn state(&self) -> MotorState {
        self.state
    }

    /// Whether the last ground probe found support
    pub fn is_grounded(&self) -> bool {
        self.state == MotorState::Grounded
    }

    /// Accumulated vertical velocity (positive is up)
    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    /// Cached capsule shape, if it has been built yet
    pub fn capsule(&self) -> Option<&CapsuleCollider> {
        self.capsule.as_ref()
    }

    /// Handle of the motor's dynamic collider, if registered
    pub fn handle(&self) -> Option<ColliderHandle> {
        self.handle
    }

    /// Last surface struck during the most recent move
    pub fn last_hit(&self) -> Option<&Hit> {
        self.last_hit.as_ref()
    }

    /// Add the motor's capsule to `world` as a dynamic collider
    ///
    /// Other motors then collide with this one, while this motor's own casts
    /// skip it. Registering twice returns the existing handle.
    pub fn register(&mut self, world: &mut CollisionWorld, transform: &Transform) -> ColliderHandle {
        if let Some(handle) = self.handle {
            if world.kind(handle) == Some(ColliderKind::Dynamic) {
                return handle;
            }
        }

        let mut capsule = self.ensure_capsule(&transform.position);
        capsule.position = transform.position;
        self.capsule = Some(capsule);

        let handle = world.add_dynamic(Collider::Capsule(capsule));
        self.handle = Some(handle);
        handle
    }

    /// Move by `desired_velocity` (only XZ is used) over `dt` seconds
    pub fn move_and_slide(
        &mut self,
        world: &mut CollisionWorld,
        transform: &mut Transform,
        desired_velocity: Vec3,
        dt: f32,
    ) {
        self.ensure_capsule(&transform.position);

        match self.state {
            MotorState::Airborne => {
                self.vertical_velocity = (self.vertical_velocity - self.config.gravity * dt)
                    .max(-self.config.terminal_velocity);
            }
            MotorState::Grounded => self.vertical_velocity = 0.0,
        }

        let horizontal_movement = horizontal(&desired_velocity) * dt;
        let vertical_movement = UP * (self.vertical_velocity * dt);

        let after_horizontal = self.slide(world, &transform.position, &horizontal_movement);
        let after_vertical = self.slide(world, &after_horizontal.position, &vertical_movement);
        self.last_hit = after_vertical.last_hit.or(after_horizontal.last_hit);

        transform.position = self.probe_ground(world, after_vertical.position);
        self.sync(world, transform);

        log::trace!(
            "Motor at {:?}, {:?}, vertical velocity {:.3}",
            transform.position,
            self.state,
            self.vertical_velocity
        );
    }

    /// Jump with upward speed `force`; ignored unless grounded
    pub fn jump(&mut self, force: f32) {
        if self.state == MotorState::Grounded {
            self.vertical_velocity = force;
            self.state = MotorState::Airborne;
            log::debug!("Jump with force {}", force);
        }
    }

    /// One sweep-and-slide pass of `movement` starting at `from`
    ///
    /// Each iteration casts along the remaining movement, stops a skin width
    /// short of the contact and redirects what is left along the struck
    /// surface. Movement too short to sweep is taken whole when the capsule
    /// fits at its end. Movement still left after the iteration cap is dropped.
    pub fn slide(&self, world: &CollisionWorld, from: &Vec3, movement: &Vec3) -> SlideResult {
        let radius = self.config.radius;
        let half_height = self.config.segment_half_height();

        let mut position = *from;
        let mut remaining = *movement;
        let mut iterations = 0;
        let mut last_hit = None;

        while iterations < self.config.max_slide_iterations && remaining != Vec3::zeros() {
            // Too short to sweep; take it whole unless it ends inside something
            if remaining.magnitude_squared() <= DEGENERATE_LENGTH_SQ {
                let target = position + remaining;
                if self.is_clear_at(world, &target) {
                    position = target;
                }
                remaining = Vec3::zeros();
                break;
            }

            iterations += 1;
            let target = position + remaining;

            let Some(hit) = world.cast_capsule_ignoring(&position, &target, radius, half_height, self.handle) else {
                position = target;
                remaining = Vec3::zeros();
                break;
            };

            let length = remaining.magnitude();
            let used = (hit.distance - self.config.skin_width).max(0.0);
            position += remaining * (used / length);

            let left = length - used;
            remaining = if left > MIN_SLIDE_DISTANCE {
                try_normalize(&project_on_plane(&remaining, &hit.normal))
                    .map_or_else(Vec3::zeros, |direction| direction * left)
            } else {
                Vec3::zeros()
            };

            log::debug!(
                "Slide iteration {} hit {:?}, {:.3} left",
                iterations,
                hit.collider,
                remaining.magnitude()
            );
            last_hit = Some(hit);
        }

        SlideResult {
            position,
            remaining,
            iterations,
            last_hit,
        }
    }

    /// Mirror `transform` into the cached capsule and the world collider
    pub fn sync(&mut self, world: &mut CollisionWorld, transform: &Transform) {
        if let Some(capsule) = self.capsule.as_mut() {
            capsule.position = transform.position;
        }

        if let Some(handle) = self.handle {
            if let Err(err) = world.set_dynamic_position(handle, transform.position) {
                log::warn!("Dropping motor collider registration: {}", err);
                self.handle = None;
            }
        }
    }

    /// Probe below `position` and snap onto supporting ground
    fn probe_ground(&mut self, world: &CollisionWorld, position: Vec3) -> Vec3 {
        let probe_radius = self.config.radius * PROBE_RADIUS_SCALE;
        // The slimmer probe's lowest point sits above the feet by the radius difference
        let depth = (self.config.radius - probe_radius) + self.config.ground_snap_distance + PROBE_MARGIN;
        let end = position - UP * depth;
        let half_extent = self.config.half_extent();
        let feet = position.y - half_extent;

        let surface = world
            .cast_capsule_ignoring(&position, &end, probe_radius, self.config.segment_half_height(), self.handle)
            .and_then(|hit| world.collider(hit.collider))
            .map(|ground| ground.bounds().max.y)
            .filter(|surface| {
                let gap = feet - surface;
                (-PROBE_MARGIN..=self.config.ground_snap_distance + PROBE_MARGIN).contains(&gap)
            })
            .filter(|_| self.vertical_velocity <= self.config.ascend_threshold);

        match surface {
            Some(surface) => {
                if self.state == MotorState::Airborne {
                    log::debug!("Landed on surface at y = {:.3}", surface);
                }
                self.state = MotorState::Grounded;
                self.vertical_velocity = 0.0;
                Vec3::new(position.x, surface + half_extent + self.config.ground_clearance, position.z)
            }
            None => {
                self.state = MotorState::Airborne;
                position
            }
        }
    }

    fn is_clear_at(&self, world: &CollisionWorld, position: &Vec3) -> bool {
        let capsule = Collider::Capsule(CapsuleCollider {
            position: *position,
            radius: self.config.radius,
            half_height: self.config.segment_half_height(),
        });
        world.overlapping(&capsule, self.handle).is_empty()
    }

    fn ensure_capsule(&mut self, position: &Vec3) -> CapsuleCollider {
        let config = &self.config;
        *self.capsule.get_or_insert_with(|| CapsuleCollider {
            position: *position,
            radius: config.radius,
            half_height: config.segment_half_height(),
        })
    }
}

impl Default for CharacterMotor {
    fn default() -> Self {
        Self::new(MotorConfig::default())
    }
}
