//! Collision-specific debug visualization
//!
//! Reads the collision world and motors through their public accessors and
//! queues wireframes into a caller-owned [`DebugDrawSystem`].

use crate::debug::draw::DebugDrawSystem;
use crate::foundation::math::{Vec3, Vec4};
use crate::physics::{CharacterMotor, Collider, CollisionWorld, Hit};

/// Color scheme for collision visualization
#[derive(Clone, Debug)]
pub struct CollisionDebugColors {
    /// Level geometry
    pub static_shape: Vec4,

    /// Moving colliders
    pub dynamic_shape: Vec4,

    /// Broad-phase bounds drawn around every collider
    pub bounds: Vec4,

    /// Cast contact point and normal
    pub hit: Vec4,

    /// Motor capsule while standing on something
    pub grounded: Vec4,

    /// Motor capsule while falling or jumping
    pub airborne: Vec4,
}

impl Default for CollisionDebugColors {
    fn default() -> Self {
        Self {
            static_shape: Vec4::new(0.0, 1.0, 0.0, 1.0),   // Green
            dynamic_shape: Vec4::new(1.0, 1.0, 0.0, 1.0),  // Yellow
            bounds: Vec4::new(0.5, 0.8, 1.0, 0.3),         // Light blue, transparent
            hit: Vec4::new(1.0, 0.0, 0.0, 1.0),            // Red
            grounded: Vec4::new(0.0, 1.0, 1.0, 1.0),       // Cyan
            airborne: Vec4::new(1.0, 0.0, 1.0, 1.0),       // Magenta
        }
    }
}

/// Collision-specific debug visualizer
///
/// Stateless apart from its settings, so one visualizer can feed any number
/// of worlds and buffers.
#[derive(Clone, Debug)]
pub struct CollisionDebugVisualizer {
    colors: CollisionDebugColors,

    /// Show static colliders
    pub show_static: bool,

    /// Show dynamic colliders
    pub show_dynamic: bool,

    /// Show broad-phase bounds
    pub show_bounds: bool,

    /// Show cast hits
    pub show_hits: bool,

    /// Length of drawn hit normals
    pub normal_length: f32,
}

impl CollisionDebugVisualizer {
    /// Create a new collision debug visualizer
    pub fn new() -> Self {
        Self {
            colors: CollisionDebugColors::default(),
            show_static: true,
            show_dynamic: true,
            show_bounds: false,
            show_hits: true,
            normal_length: 0.5,
        }
    }

    /// Color scheme in use
    pub fn colors(&self) -> &CollisionDebugColors {
        &self.colors
    }

    /// Queue one collider for this frame
    pub fn draw_collider(&self, draw: &mut DebugDrawSystem, collider: &Collider, color: Vec4) {
        match collider {
            Collider::Box(b) => draw.draw_box(b.position, b.half_extents, color, 0.0),
            Collider::Capsule(c) => {
                draw.draw_capsule(c.segment_bottom(), c.segment_top(), c.radius, color, 0.0);
            }
        }

        if self.show_bounds {
            let bounds = collider.bounds();
            draw.draw_box(bounds.center(), bounds.half_extents(), self.colors.bounds, 0.0);
        }
    }

    /// Queue every collider in `world` for this frame
    pub fn draw_world(&self, world: &CollisionWorld, draw: &mut DebugDrawSystem) {
        if self.show_static {
            for (_, collider) in world.get_all_static() {
                self.draw_collider(draw, collider, self.colors.static_shape);
            }
        }

        if self.show_dynamic {
            for (_, collider) in world.get_all_dynamic() {
                self.draw_collider(draw, collider, self.colors.dynamic_shape);
            }
        }
    }

    /// Queue a cast hit: the clear position and the contact normal
    pub fn draw_hit(&self, hit: &Hit, draw: &mut DebugDrawSystem) {
        if !self.show_hits {
            return;
        }

        draw.draw_point(hit.position, self.colors.hit, 0.2, 0.0);
        draw.draw_line(
            hit.position,
            hit.position + hit.normal * self.normal_length,
            self.colors.hit,
            0.0,
        );
    }

    /// Queue a motor's capsule, colored by grounding state, and its last hit
    pub fn draw_motor(&self, motor: &CharacterMotor, draw: &mut DebugDrawSystem) {
        let Some(capsule) = motor.capsule() else {
            return;
        };

        let color = if motor.is_grounded() {
            self.colors.grounded
        } else {
            self.colors.airborne
        };
        draw.draw_capsule(capsule.segment_bottom(), capsule.segment_top(), capsule.radius, color, 0.0);

        if let Some(hit) = motor.last_hit() {
            self.draw_hit(hit, draw);
        }
    }

    /// Queue a vertical marker, e.g. for a spawn point or trigger
    pub fn draw_marker(&self, draw: &mut DebugDrawSystem, position: Vec3, height: f32, color: Vec4) {
        draw.draw_line(position, position + Vec3::new(0.0, height, 0.0), color, 0.0);
    }
}

impl Default for CollisionDebugVisualizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::draw::DebugShape;
    use crate::foundation::math::Transform;
    use crate::foundation::collections::ColliderMap;

    fn small_world() -> CollisionWorld {
        let mut world = CollisionWorld::default();
        world.add_static(Collider::cuboid(Vec3::zeros(), Vec3::new(5.0, 0.05, 5.0)).unwrap());
        world.add_static(Collider::cuboid(Vec3::new(2.0, 1.0, 0.0), Vec3::new(0.5, 1.0, 0.5)).unwrap());
        world.add_dynamic(Collider::capsule(Vec3::new(0.0, 1.0, 0.0), 0.5, 0.4).unwrap());
        world
    }

    #[test]
    fn test_draw_world_emits_every_collider() {
        let world = small_world();
        let visualizer = CollisionDebugVisualizer::new();
        let mut draw = DebugDrawSystem::new();

        visualizer.draw_world(&world, &mut draw);
        let frame = draw.flush();

        assert_eq!(frame.len(), 3);
        let capsules = frame
            .iter()
            .filter(|shape| matches!(shape, DebugShape::Capsule { .. }))
            .count();
        assert_eq!(capsules, 1);
        assert_eq!(draw.shape_count(), 0);
    }

    #[test]
    fn test_filters_and_bounds() {
        let world = small_world();
        let mut visualizer = CollisionDebugVisualizer::new();
        visualizer.show_dynamic = false;
        visualizer.show_bounds = true;
        let mut draw = DebugDrawSystem::new();

        visualizer.draw_world(&world, &mut draw);

        // Two statics, each with its bounds
        assert_eq!(draw.shape_count(), 4);
    }

    #[test]
    fn test_draw_hit() {
        let mut handles = ColliderMap::with_key();
        let hit = Hit {
            position: Vec3::new(1.0, 1.0, 0.0),
            normal: Vec3::new(-1.0, 0.0, 0.0),
            distance: 1.0,
            collider: handles.insert(()),
        };
        let visualizer = CollisionDebugVisualizer::new();
        let mut draw = DebugDrawSystem::new();

        visualizer.draw_hit(&hit, &mut draw);

        let shapes = draw.shapes();
        assert_eq!(shapes.len(), 2);
        assert!(shapes.iter().any(|shape| matches!(
            shape,
            DebugShape::Line { end, .. } if *end == Vec3::new(0.5, 1.0, 0.0)
        )));
    }

    #[test]
    fn test_draw_marker_is_vertical_line() {
        let visualizer = CollisionDebugVisualizer::new();
        let mut draw = DebugDrawSystem::new();
        let color = visualizer.colors().hit;

        visualizer.draw_marker(&mut draw, Vec3::new(12.0, 1.0, 12.0), 3.0, color);

        let frame = draw.flush();
        assert_eq!(frame.len(), 1);
        assert!(matches!(
            &frame[0],
            DebugShape::Line { start, end, .. }
                if *start == Vec3::new(12.0, 1.0, 12.0) && *end == Vec3::new(12.0, 4.0, 12.0)
        ));
    }

    #[test]
    fn test_draw_motor_uses_state_color() {
        let mut world = small_world();
        let mut motor = CharacterMotor::default();
        let mut transform = Transform::from_position(Vec3::new(-2.0, 1.0, -2.0));
        let visualizer = CollisionDebugVisualizer::new();
        let mut draw = DebugDrawSystem::new();

        visualizer.draw_motor(&motor, &mut draw);
        assert_eq!(draw.shape_count(), 0);

        for _ in 0..60 {
            motor.move_and_slide(&mut world, &mut transform, Vec3::zeros(), 1.0 / 60.0);
        }
        visualizer.draw_motor(&motor, &mut draw);

        let frame = draw.flush();
        assert_eq!(frame[0].color(), visualizer.colors().grounded);
    }
}
