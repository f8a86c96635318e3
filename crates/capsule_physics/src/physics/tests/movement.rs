use approx::assert_relative_eq;

use crate::core::config::MotorConfig;
use crate::foundation::math::{Transform, Vec3};
use crate::foundation::time::FixedTimestep;
use crate::physics::{CharacterMotor, Collider, CollisionWorld, MotorState};

const DT: f32 = 1.0 / 60.0;

/// Wall whose face towards the origin lies on x = 1.5
fn wall_world() -> CollisionWorld {
    let mut world = CollisionWorld::default();
    world.add_static(Collider::cuboid(Vec3::new(2.0, 1.0, 0.0), Vec3::new(0.5, 1.0, 5.0)).unwrap());
    world
}

/// Floor whose top face lies on y = `height`
fn floor_world(height: f32) -> CollisionWorld {
    let mut world = CollisionWorld::default();
    world.add_static(
        Collider::cuboid(Vec3::new(0.0, height - 0.05, 0.0), Vec3::new(15.0, 0.05, 15.0)).unwrap(),
    );
    world
}

#[test]
fn test_head_on_slide_leaves_nothing() {
    let world = wall_world();
    let motor = CharacterMotor::default();

    let result = motor.slide(&world, &Vec3::new(0.0, 1.0, 0.0), &Vec3::new(2.0, 0.0, 0.0));

    assert!(result.last_hit.is_some());
    assert!(result.remaining.magnitude() < 1e-3, "remaining {:?}", result.remaining);
    assert!(result.position.x < 1.0);
    assert!(result.position.x > 0.9);
}

#[test]
fn test_diagonal_slide_runs_along_wall() {
    let world = wall_world();
    let motor = CharacterMotor::new(MotorConfig::default().with_max_slide_iterations(1));
    let wall_normal = Vec3::new(-1.0, 0.0, 0.0);

    // Reaches the wall face level with the wall centre
    let result = motor.slide(&world, &Vec3::new(0.0, 1.0, -1.0), &Vec3::new(1.5, 0.0, 1.5));

    let hit = result.last_hit.unwrap();
    assert_eq!(result.iterations, 1);
    assert!(result.remaining.magnitude() > 0.1);

    let direction = result.remaining.normalize();
    assert_relative_eq!(direction.dot(&hit.normal), 0.0, epsilon = 1e-4);
    assert!(direction.dot(&wall_normal).abs() < 0.05);
    assert!(direction.z > 0.99);
}

#[test]
fn test_diagonal_slide_never_penetrates() {
    let world = wall_world();
    let motor = CharacterMotor::default();

    let result = motor.slide(&world, &Vec3::new(0.0, 1.0, -1.0), &Vec3::new(1.5, 0.0, 1.5));
    let capsule = Collider::capsule(result.position, 0.5, 0.4).unwrap();

    assert!(result.iterations >= 1 && result.iterations <= 3);
    assert!(result.position.x < 1.0);
    assert!(world.overlapping(&capsule, None).is_empty());
}

#[test]
fn test_dropped_motor_settles_on_floor() {
    let floor = 0.4;
    let mut world = floor_world(floor);
    let mut motor = CharacterMotor::default();
    let mut transform = Transform::from_position(Vec3::new(3.0, 6.0, -2.0));
    let config = motor.config().clone();

    let mut steps = 0;
    while !motor.is_grounded() {
        motor.move_and_slide(&mut world, &mut transform, Vec3::zeros(), DT);
        steps += 1;
        assert!(steps < 300, "never landed, y = {}", transform.position.y);
    }

    let rest = floor + config.half_extent() + config.ground_clearance;
    assert_relative_eq!(transform.position.y, rest, epsilon = 1e-5);
    assert_eq!(motor.vertical_velocity(), 0.0);

    let settled = transform.position.y;
    for _ in 0..60 {
        motor.move_and_slide(&mut world, &mut transform, Vec3::zeros(), DT);
        assert_eq!(transform.position.y, settled);
        assert!(motor.is_grounded());
    }
    assert_eq!(transform.position.x, 3.0);
    assert_eq!(transform.position.z, -2.0);
}

#[test]
fn test_grounded_walk_keeps_height() {
    let mut world = floor_world(0.0);
    let mut motor = CharacterMotor::default();
    let mut transform = Transform::from_position(Vec3::new(0.0, 0.95, 0.0));

    let mut timestep = FixedTimestep::from_hz(60.0);
    let mut frames = 0;
    while timestep.total_steps() < 90 {
        // Uneven frame times still drive whole fixed steps
        let frame = if frames % 2 == 0 { 0.013 } else { 0.021 };
        for _ in 0..timestep.advance(frame) {
            motor.move_and_slide(&mut world, &mut transform, Vec3::new(2.0, 0.0, 1.0), timestep.step());
        }
        frames += 1;
    }

    assert!(motor.is_grounded());
    assert_relative_eq!(transform.position.y, 0.95, epsilon = 1e-5);
    assert!(transform.position.x > 2.5);
}

#[test]
fn test_jump_gating() {
    let mut world = floor_world(0.0);
    let mut motor = CharacterMotor::default();
    let mut transform = Transform::from_position(Vec3::new(0.0, 2.0, 0.0));

    for _ in 0..120 {
        motor.move_and_slide(&mut world, &mut transform, Vec3::zeros(), DT);
    }
    assert_eq!(motor.state(), MotorState::Grounded);

    motor.jump(8.0);
    assert_eq!(motor.vertical_velocity(), 8.0);
    assert_eq!(motor.state(), MotorState::Airborne);

    motor.move_and_slide(&mut world, &mut transform, Vec3::zeros(), DT);
    assert!(!motor.is_grounded());
    assert!(transform.position.y > 0.95);

    // Airborne: a second jump is ignored
    let velocity = motor.vertical_velocity();
    motor.jump(8.0);
    assert_eq!(motor.vertical_velocity(), velocity);

    // Eventually lands again
    for _ in 0..120 {
        motor.move_and_slide(&mut world, &mut transform, Vec3::zeros(), DT);
    }
    assert!(motor.is_grounded());
    assert_relative_eq!(transform.position.y, 0.95, epsilon = 1e-5);
}

#[test]
fn test_short_unobstructed_slide_is_applied() {
    let world = wall_world();
    let motor = CharacterMotor::default();
    let from = Vec3::new(-3.0, 1.0, 0.0);

    let result = motor.slide(&world, &from, &Vec3::new(0.009, 0.0, 0.0));

    assert_relative_eq!(result.position, from + Vec3::new(0.009, 0.0, 0.0));
    assert_eq!(result.remaining, Vec3::zeros());
    assert!(result.last_hit.is_none());
}

#[test]
fn test_slow_walk_covers_distance() {
    let mut world = floor_world(0.0);
    let mut motor = CharacterMotor::default();
    let mut transform = Transform::from_position(Vec3::new(0.0, 0.95, 0.0));

    for _ in 0..120 {
        motor.move_and_slide(&mut world, &mut transform, Vec3::new(0.5, 0.0, 0.0), DT);
    }

    assert!(motor.is_grounded());
    assert_relative_eq!(transform.position.x, 1.0, epsilon = 1e-3);
    assert_relative_eq!(transform.position.y, 0.95, epsilon = 1e-5);
}

#[test]
fn test_small_timestep_walk_covers_distance() {
    let mut world = floor_world(0.0);
    let mut motor = CharacterMotor::default();
    let mut transform = Transform::from_position(Vec3::new(0.0, 0.95, 0.0));

    for _ in 0..240 {
        motor.move_and_slide(&mut world, &mut transform, Vec3::new(2.0, 0.0, 0.0), 1.0 / 240.0);
    }

    assert!(motor.is_grounded());
    assert_relative_eq!(transform.position.x, 2.0, epsilon = 1e-3);
}

#[test]
fn test_short_steps_stop_at_wall() {
    let world = wall_world();
    let motor = CharacterMotor::default();
    let mut position = Vec3::new(0.0, 1.0, 0.0);

    // Creep towards the wall in steps too short to sweep
    for _ in 0..400 {
        position = motor.slide(&world, &position, &Vec3::new(0.007, 0.0, 0.0)).position;
    }

    let capsule = Collider::capsule(position, 0.5, 0.4).unwrap();
    assert!(world.overlapping(&capsule, None).is_empty());
    assert!(position.x > 0.99, "x = {}", position.x);
    assert!(position.x < 1.0, "x = {}", position.x);
}
