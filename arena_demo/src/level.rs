//! Arena level geometry
//!
//! A walled 30 x 30 floor with four box obstacles and a trigger volume in
//! the north-east corner. Sizes are full edge lengths, as a level editor
//! would author them.

use capsule_physics::foundation::math::Vec3;
use capsule_physics::physics::{Aabb, BoxCollider, Collider, ShapeError};
use capsule_physics::prelude::{ColliderHandle, CollisionWorld};

/// Height of the floor's top face
pub const FLOOR_TOP: f32 = 0.05;

const FLOOR: ([f32; 3], [f32; 3]) = ([0.0, 0.0, 0.0], [30.0, 0.1, 30.0]);

const OUTER_WALLS: [([f32; 3], [f32; 3]); 4] = [
    ([0.0, 2.5, 15.0], [30.0, 5.0, 1.0]),  // North
    ([0.0, 2.5, -15.0], [30.0, 5.0, 1.0]), // South
    ([15.0, 2.5, 0.0], [1.0, 5.0, 30.0]),  // East
    ([-15.0, 2.5, 0.0], [1.0, 5.0, 30.0]), // West
];

const OBSTACLES: [([f32; 3], [f32; 3]); 4] = [
    ([5.0, 1.5, 5.0], [3.0, 3.0, 3.0]),
    ([-5.0, 1.5, -5.0], [3.0, 3.0, 3.0]),
    ([8.0, 1.5, -8.0], [2.0, 3.0, 4.0]),
    ([-8.0, 1.5, 8.0], [4.0, 3.0, 2.0]),
];

const TRIGGER: ([f32; 3], [f32; 3]) = ([12.0, 1.0, 12.0], [2.0, 2.0, 2.0]);

/// Handles of everything [`generate_arena`] placed
#[derive(Debug, Clone)]
pub struct ArenaLevel {
    pub floor: ColliderHandle,
    pub walls: Vec<ColliderHandle>,
    pub obstacles: Vec<ColliderHandle>,
    /// Solid box that ends the level when the player reaches it
    pub trigger: ColliderHandle,
    /// Where the player drops in, above the floor centre
    pub player_spawn: Vec3,
}

impl ArenaLevel {
    /// World-space bounds of the trigger volume
    pub fn trigger_bounds(&self, world: &CollisionWorld) -> Option<Aabb> {
        world.collider(self.trigger).map(Collider::bounds)
    }
}

fn add_box(world: &mut CollisionWorld, (center, size): ([f32; 3], [f32; 3])) -> Result<ColliderHandle, ShapeError> {
    let collider = BoxCollider::from_size(Vec3::from(center), Vec3::from(size))?;
    Ok(world.add_static(collider.into()))
}

/// Build the arena into `world` through `add_static`
pub fn generate_arena(world: &mut CollisionWorld) -> Result<ArenaLevel, ShapeError> {
    let walls = OUTER_WALLS
        .iter()
        .map(|&wall| add_box(world, wall))
        .collect::<Result<Vec<_>, _>>()?;
    let obstacles = OBSTACLES
        .iter()
        .map(|&obstacle| add_box(world, obstacle))
        .collect::<Result<Vec<_>, _>>()?;
    let trigger = add_box(world, TRIGGER)?;
    let floor = add_box(world, FLOOR)?;

    log::info!(
        "Generated arena: {} walls, {} obstacles, trigger and floor",
        walls.len(),
        obstacles.len()
    );

    Ok(ArenaLevel {
        floor,
        walls,
        obstacles,
        trigger,
        player_spawn: Vec3::new(0.0, 3.0, 0.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use capsule_physics::prelude::*;

    #[test]
    fn test_arena_layout() {
        let mut world = CollisionWorld::default();
        let level = generate_arena(&mut world).unwrap();

        assert_eq!(world.static_count(), 10);
        assert_eq!(level.walls.len(), 4);
        assert_eq!(level.obstacles.len(), 4);
        assert_relative_eq!(world.collider(level.floor).unwrap().bounds().max.y, FLOOR_TOP);

        let trigger = level.trigger_bounds(&world).unwrap();
        assert_eq!(trigger.min, Vec3::new(11.0, 0.0, 11.0));
        assert_eq!(trigger.max, Vec3::new(13.0, 2.0, 13.0));
    }

    #[test]
    fn test_spawn_is_clear_and_lands_on_floor() {
        let mut world = CollisionWorld::default();
        let level = generate_arena(&mut world).unwrap();
        let config = MotorConfig::default();

        let probe = Collider::capsule(level.player_spawn, config.radius, config.segment_half_height()).unwrap();
        assert!(world.overlapping(&probe, None).is_empty());

        let mut motor = CharacterMotor::new(config.clone());
        let mut transform = Transform::from_position(level.player_spawn);
        for _ in 0..120 {
            motor.move_and_slide(&mut world, &mut transform, Vec3::zeros(), 1.0 / 60.0);
        }

        assert!(motor.is_grounded());
        assert_relative_eq!(
            transform.position.y,
            FLOOR_TOP + config.half_extent() + config.ground_clearance,
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_outer_wall_stops_motor() {
        let mut world = CollisionWorld::default();
        let level = generate_arena(&mut world).unwrap();
        let mut motor = CharacterMotor::default();
        let mut transform = Transform::from_position(level.player_spawn);

        // Run west along z = 0, clear of every obstacle
        for _ in 0..600 {
            motor.move_and_slide(&mut world, &mut transform, Vec3::new(-6.0, 0.0, 0.0), 1.0 / 60.0);
        }

        // West wall inner face is at x = -14.5
        assert!(transform.position.x > -14.0, "x = {}", transform.position.x);
        assert!(transform.position.x < -13.5, "x = {}", transform.position.x);
        assert!(motor.is_grounded());
    }
}
