//! Arena demo
//!
//! Headless driver for the capsule physics crate: builds the arena, drops a
//! scripted player and a few chasers into it and steps everything on a fixed
//! timestep, logging what happens. Pass a `.toml` or `.ron` physics config as
//! the first argument to override the defaults.

mod level;

use capsule_physics::foundation::logging;
use capsule_physics::foundation::math::utils::{horizontal, try_normalize};
use capsule_physics::foundation::time::FixedTimestep;
use capsule_physics::prelude::*;
use rand::Rng;

use level::{generate_arena, ArenaLevel};

const SIMULATED_SECONDS: f32 = 20.0;
const PLAYER_SPEED: f32 = 5.0;
const CHASER_SPEED: f32 = 3.0;
const CHASER_COUNT: usize = 3;
const JUMP_FORCE: f32 = 7.0;
const JUMP_INTERVAL: f32 = 2.0;
const WAYPOINT_RADIUS: f32 = 0.5;
/// How close the player's bounds must come to the trigger to fire it
const TRIGGER_REACH: f32 = 0.25;
/// Height of the debug markers over the spawn point and trigger
const MARKER_HEIGHT: f32 = 3.0;

/// Player route through the arena, ending at the trigger
const ROUTE: [[f32; 2]; 3] = [[10.0, 0.0], [10.0, 10.0], [12.0, 12.0]];

struct Actor {
    motor: CharacterMotor,
    transform: Transform,
}

impl Actor {
    fn spawn(world: &mut CollisionWorld, config: MotorConfig, position: Vec3) -> Self {
        let mut motor = CharacterMotor::new(config);
        let transform = Transform::from_position(position);
        motor.register(world, &transform);
        Self { motor, transform }
    }

    fn step(&mut self, world: &mut CollisionWorld, desired_velocity: Vec3, dt: f32) {
        self.motor.move_and_slide(world, &mut self.transform, desired_velocity, dt);
    }
}

struct ArenaDemo {
    config: PhysicsConfig,
    world: CollisionWorld,
    level: ArenaLevel,
    player: Actor,
    chasers: Vec<Actor>,
    waypoint: usize,
    jump_timer: f32,
    transitions: u32,
    visualizer: CollisionDebugVisualizer,
    debug_draw: DebugDrawSystem,
}

impl ArenaDemo {
    fn new(config: PhysicsConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let mut world = CollisionWorld::new(config.world.clone());
        let level = generate_arena(&mut world)?;
        log::debug!(
            "Floor {:?}, walls {:?}, obstacles {:?}",
            level.floor,
            level.walls,
            level.obstacles
        );
        let player = Actor::spawn(&mut world, config.player.clone(), level.player_spawn);

        let mut demo = Self {
            config,
            world,
            level,
            player,
            chasers: Vec::new(),
            waypoint: 0,
            jump_timer: JUMP_INTERVAL,
            transitions: 0,
            visualizer: CollisionDebugVisualizer::new(),
            debug_draw: DebugDrawSystem::new(),
        };
        demo.spawn_chasers()?;
        Ok(demo)
    }

    /// Drop chasers at random free spots on the floor
    fn spawn_chasers(&mut self) -> Result<(), ShapeError> {
        let config = self.config.player.clone().with_size(0.4, 1.6);
        let mut rng = rand::thread_rng();

        for _ in 0..CHASER_COUNT {
            for _ in 0..32 {
                let position = Vec3::new(
                    rng.gen_range(-12.0..12.0),
                    level::FLOOR_TOP + config.height + 0.5,
                    rng.gen_range(-12.0..12.0),
                );
                let probe = Collider::capsule(position, config.radius, config.segment_half_height())?;
                if self.world.overlapping(&probe, None).is_empty() {
                    log::debug!("Spawning chaser at {:?}", position);
                    self.chasers.push(Actor::spawn(&mut self.world, config.clone(), position));
                    break;
                }
            }
        }

        log::info!("Spawned {} chasers", self.chasers.len());
        Ok(())
    }

    fn run(mut self) -> Result<(), Box<dyn std::error::Error>> {
        let mut timestep = FixedTimestep::new(self.config.fixed_timestep);
        let mut rng = rand::thread_rng();
        let mut last_report = 0;

        while timestep.simulated_time().as_secs_f32() < SIMULATED_SECONDS {
            // Jittered frame times, as a real render loop would produce
            let frame_time = timestep.step() * rng.gen_range(0.6..1.6);
            for _ in 0..timestep.advance(frame_time) {
                self.step(timestep.step())?;
            }

            let second = timestep.simulated_time().as_secs();
            if second > last_report {
                last_report = second;
                self.report(second);
            }
        }

        log::info!(
            "Simulated {} steps, {} level transition(s)",
            timestep.total_steps(),
            self.transitions
        );
        self.world.clear_dynamics();
        Ok(())
    }

    fn step(&mut self, dt: f32) -> Result<(), Box<dyn std::error::Error>> {
        let desired = self.player_input();

        self.jump_timer -= dt;
        if self.jump_timer <= 0.0 && self.player.motor.is_grounded() {
            self.player.motor.jump(JUMP_FORCE);
            self.jump_timer = JUMP_INTERVAL;
        }
        self.player.step(&mut self.world, desired, dt);

        let target = self.player.transform.position;
        for chaser in &mut self.chasers {
            let toward = horizontal(&(target - chaser.transform.position));
            let desired = try_normalize(&toward).map_or_else(Vec3::zeros, |dir| dir * CHASER_SPEED);
            chaser.step(&mut self.world, desired, dt);
        }

        if self.player_reached_trigger() {
            self.transition()?;
        }
        Ok(())
    }

    /// Steer along the route, one waypoint at a time
    fn player_input(&mut self) -> Vec3 {
        let Some(&[x, z]) = ROUTE.get(self.waypoint) else {
            return Vec3::zeros();
        };

        let position = self.player.transform.position;
        let offset = horizontal(&(Vec3::new(x, 0.0, z) - position));
        if offset.magnitude() < WAYPOINT_RADIUS {
            self.waypoint += 1;
            log::debug!("Player reached waypoint {}", self.waypoint);
        }

        try_normalize(&offset).map_or_else(Vec3::zeros, |dir| dir * PLAYER_SPEED)
    }

    fn player_reached_trigger(&self) -> bool {
        let Some(trigger) = self.level.trigger_bounds(&self.world) else {
            return false;
        };
        let Some(capsule) = self.player.motor.capsule() else {
            return false;
        };
        CollisionWorld::overlap_aabb(&capsule.bounds().expanded(TRIGGER_REACH), &trigger)
    }

    /// Tear the level down and rebuild it, respawning everyone
    fn transition(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.transitions += 1;
        log::info!("Trigger reached, reloading arena (transition {})", self.transitions);

        self.world.clear();
        self.level = generate_arena(&mut self.world)?;
        self.player = Actor::spawn(&mut self.world, self.config.player.clone(), self.level.player_spawn);
        self.chasers.clear();
        self.spawn_chasers()?;
        self.waypoint = 0;
        Ok(())
    }

    fn report(&mut self, second: u64) {
        let player = &self.player;
        log::info!(
            "t={}s player at ({:.2}, {:.2}, {:.2}) {:?}, waypoint {}",
            second,
            player.transform.position.x,
            player.transform.position.y,
            player.transform.position.z,
            player.motor.state(),
            self.waypoint
        );
        for (i, chaser) in self.chasers.iter().enumerate() {
            log::debug!(
                "  chaser {} at {:?} {:?}",
                i,
                chaser.transform.position,
                chaser.motor.state()
            );
        }

        self.visualizer.draw_world(&self.world, &mut self.debug_draw);
        self.visualizer.draw_motor(&player.motor, &mut self.debug_draw);

        let marker = self.visualizer.colors().grounded;
        self.visualizer
            .draw_marker(&mut self.debug_draw, self.level.player_spawn, MARKER_HEIGHT, marker);
        if let Some(trigger) = self.level.trigger_bounds(&self.world) {
            let marker = self.visualizer.colors().hit;
            self.visualizer
                .draw_marker(&mut self.debug_draw, trigger.center(), MARKER_HEIGHT, marker);
        }

        let lines: usize = self
            .debug_draw
            .flush()
            .iter()
            .map(|shape| shape.to_lines().len())
            .sum();
        log::debug!("Debug frame: {} wireframe lines", lines);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => PhysicsConfig::load_from_file(&path)?,
        None => PhysicsConfig::default(),
    };

    logging::init_with_level(&config.log_level);
    config.validate()?;

    log::info!("=== Capsule Arena Demo ===");
    let demo = ArenaDemo::new(config)?;
    demo.run()
}
