//! Debug drawing primitives and buffer
//!
//! Shapes are collected into a caller-owned [`DebugDrawSystem`] during a frame
//! and handed to the renderer with [`DebugDrawSystem::flush`]. Nothing here
//! renders; renderers that only draw lines can expand every shape with
//! [`DebugShape::to_lines`].

use std::collections::HashMap;
use std::f32::consts::{PI, TAU};

use crate::foundation::math::{Vec3, Vec4};

/// Unique identifier for persistent debug shapes
pub type DebugShapeId = String;

/// Segments used to approximate a full circle
const CIRCLE_SEGMENTS: usize = 16;

/// Debug shape primitives that can be rendered for visualization
#[derive(Clone, Debug, PartialEq)]
pub enum DebugShape {
    /// Line segment from start to end
    Line {
        start: Vec3,
        end: Vec3,
        color: Vec4,
        duration: f32,
    },

    /// Axis-aligned box at center with half-extents
    Box {
        center: Vec3,
        extents: Vec3,
        color: Vec4,
        duration: f32,
    },

    /// Capsule around the segment start-end
    Capsule {
        start: Vec3,
        end: Vec3,
        radius: f32,
        color: Vec4,
        duration: f32,
    },

    /// Point at position, drawn as a small cross
    Point {
        position: Vec3,
        color: Vec4,
        size: f32,
        duration: f32,
    },
}

impl DebugShape {
    /// Get remaining duration
    pub fn duration(&self) -> f32 {
        match self {
            DebugShape::Line { duration, .. }
            | DebugShape::Box { duration, .. }
            | DebugShape::Capsule { duration, .. }
            | DebugShape::Point { duration, .. } => *duration,
        }
    }

    /// Color of the shape
    pub fn color(&self) -> Vec4 {
        match self {
            DebugShape::Line { color, .. }
            | DebugShape::Box { color, .. }
            | DebugShape::Capsule { color, .. }
            | DebugShape::Point { color, .. } => *color,
        }
    }

    /// Decrease duration by delta_time, returns true if expired
    pub fn tick(&mut self, delta_time: f32) -> bool {
        match self {
            DebugShape::Line { duration, .. }
            | DebugShape::Box { duration, .. }
            | DebugShape::Capsule { duration, .. }
            | DebugShape::Point { duration, .. } => {
                *duration -= delta_time;
                *duration <= 0.0
            }
        }
    }

    /// Expand into wireframe line segments
    pub fn to_lines(&self) -> Vec<(Vec3, Vec3)> {
        match self {
            DebugShape::Line { start, end, .. } => vec![(*start, *end)],
            DebugShape::Box { center, extents, .. } => box_lines(center, extents),
            DebugShape::Capsule { start, end, radius, .. } => capsule_lines(start, end, *radius),
            DebugShape::Point { position, size, .. } => {
                let h = size * 0.5;
                vec![
                    (position - Vec3::new(h, 0.0, 0.0), position + Vec3::new(h, 0.0, 0.0)),
                    (position - Vec3::new(0.0, h, 0.0), position + Vec3::new(0.0, h, 0.0)),
                    (position - Vec3::new(0.0, 0.0, h), position + Vec3::new(0.0, 0.0, h)),
                ]
            }
        }
    }
}

fn box_lines(center: &Vec3, extents: &Vec3) -> Vec<(Vec3, Vec3)> {
    let corner = |sx: f32, sy: f32, sz: f32| {
        center + Vec3::new(extents.x * sx, extents.y * sy, extents.z * sz)
    };

    let mut lines = Vec::with_capacity(12);
    for &sy in &[-1.0, 1.0] {
        // Horizontal rectangle at the bottom and top
        lines.push((corner(-1.0, sy, -1.0), corner(1.0, sy, -1.0)));
        lines.push((corner(1.0, sy, -1.0), corner(1.0, sy, 1.0)));
        lines.push((corner(1.0, sy, 1.0), corner(-1.0, sy, 1.0)));
        lines.push((corner(-1.0, sy, 1.0), corner(-1.0, sy, -1.0)));
    }
    for &(sx, sz) in &[(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
        lines.push((corner(sx, -1.0, sz), corner(sx, 1.0, sz)));
    }
    lines
}

/// Upright capsule wireframe: a ring at each segment end, four side lines
/// and two half-circle arcs per cap
#[allow(clippy::cast_precision_loss)]
fn capsule_lines(start: &Vec3, end: &Vec3, radius: f32) -> Vec<(Vec3, Vec3)> {
    let (bottom, top) = if start.y <= end.y { (*start, *end) } else { (*end, *start) };
    let mut lines = Vec::new();

    for center in [bottom, top] {
        for i in 0..CIRCLE_SEGMENTS {
            let a0 = TAU * i as f32 / CIRCLE_SEGMENTS as f32;
            let a1 = TAU * (i + 1) as f32 / CIRCLE_SEGMENTS as f32;
            lines.push((
                center + Vec3::new(a0.cos(), 0.0, a0.sin()) * radius,
                center + Vec3::new(a1.cos(), 0.0, a1.sin()) * radius,
            ));
        }
    }

    for offset in [
        Vec3::new(radius, 0.0, 0.0),
        Vec3::new(-radius, 0.0, 0.0),
        Vec3::new(0.0, 0.0, radius),
        Vec3::new(0.0, 0.0, -radius),
    ] {
        lines.push((bottom + offset, top + offset));
    }

    let half = CIRCLE_SEGMENTS / 2;
    for (center, up) in [(top, 1.0), (bottom, -1.0)] {
        for axis in [Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)] {
            for i in 0..half {
                let a0 = PI * i as f32 / half as f32;
                let a1 = PI * (i + 1) as f32 / half as f32;
                let point = |a: f32| center + (axis * a.cos() + Vec3::new(0.0, up * a.sin(), 0.0)) * radius;
                lines.push((point(a0), point(a1)));
            }
        }
    }
    lines
}

/// Caller-owned debug shape buffer
///
/// Supports one-frame shapes (zero duration), timed shapes that expire
/// through [`update`](Self::update) and persistent shapes that stay until
/// removed by id.
#[derive(Debug, Clone)]
pub struct DebugDrawSystem {
    /// Temporary shapes that expire after their duration
    temporary_shapes: Vec<DebugShape>,

    /// Persistent shapes that remain until manually removed
    persistent_shapes: HashMap<DebugShapeId, DebugShape>,

    /// Master enable/disable flag
    pub enabled: bool,
}

impl DebugDrawSystem {
    /// Create a new debug draw system
    pub fn new() -> Self {
        Self {
            temporary_shapes: Vec::new(),
            persistent_shapes: HashMap::new(),
            enabled: true,
        }
    }

    /// Queue any shape (temporary)
    pub fn draw(&mut self, shape: DebugShape) {
        if self.enabled {
            self.temporary_shapes.push(shape);
        }
    }

    /// Draw a line segment (temporary)
    pub fn draw_line(&mut self, start: Vec3, end: Vec3, color: Vec4, duration: f32) {
        self.draw(DebugShape::Line { start, end, color, duration });
    }

    /// Draw an axis-aligned box (temporary)
    pub fn draw_box(&mut self, center: Vec3, extents: Vec3, color: Vec4, duration: f32) {
        self.draw(DebugShape::Box { center, extents, color, duration });
    }

    /// Draw a capsule (temporary)
    pub fn draw_capsule(&mut self, start: Vec3, end: Vec3, radius: f32, color: Vec4, duration: f32) {
        self.draw(DebugShape::Capsule { start, end, radius, color, duration });
    }

    /// Draw a point (temporary)
    pub fn draw_point(&mut self, position: Vec3, color: Vec4, size: f32, duration: f32) {
        self.draw(DebugShape::Point { position, color, size, duration });
    }

    /// Draw a persistent shape that remains until explicitly removed
    pub fn draw_persistent(&mut self, id: impl Into<String>, shape: DebugShape) {
        if !self.enabled {
            return;
        }

        self.persistent_shapes.insert(id.into(), shape);
    }

    /// Remove a persistent shape
    pub fn clear_persistent(&mut self, id: &str) {
        self.persistent_shapes.remove(id);
    }

    /// Update shape lifetimes and remove expired temporary shapes
    pub fn update(&mut self, delta_time: f32) {
        if !self.enabled {
            return;
        }

        self.temporary_shapes.retain_mut(|shape| !shape.tick(delta_time));
    }

    /// All shapes currently queued (temporary and persistent)
    pub fn shapes(&self) -> Vec<&DebugShape> {
        if !self.enabled {
            return Vec::new();
        }

        self.temporary_shapes.iter()
            .chain(self.persistent_shapes.values())
            .collect()
    }

    /// End-of-frame hand-off to the renderer
    ///
    /// Returns every shape visible this frame. One-frame shapes are consumed;
    /// timed and persistent shapes stay queued.
    pub fn flush(&mut self) -> Vec<DebugShape> {
        if !self.enabled {
            self.temporary_shapes.clear();
            return Vec::new();
        }

        let frame: Vec<DebugShape> = self.shapes().into_iter().cloned().collect();
        self.temporary_shapes.retain(|shape| shape.duration() > 0.0);
        frame
    }

    /// Get the number of active shapes
    pub fn shape_count(&self) -> usize {
        self.temporary_shapes.len() + self.persistent_shapes.len()
    }

    /// Clear all shapes (temporary and persistent)
    pub fn clear(&mut self) {
        self.temporary_shapes.clear();
        self.persistent_shapes.clear();
    }
}

impl Default for DebugDrawSystem {
    fn default() -> Self {
        Self::new()
    }
}
