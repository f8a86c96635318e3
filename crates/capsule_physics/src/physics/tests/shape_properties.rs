use crate::foundation::math::Vec3;
use crate::physics::{Collider, CollisionWorld};
use crate::core::config::WorldConfig;

/// Deterministic spread of boxes and capsules around the origin
fn sample_shapes() -> Vec<Collider> {
    let mut shapes = Vec::new();
    let offsets = [-1.73, -0.91, -0.27, 0.03, 0.41, 1.12, 2.29];

    for (i, &x) in offsets.iter().enumerate() {
        for (j, &z) in offsets.iter().enumerate() {
            let y = offsets[(i + j) % offsets.len()] * 0.5;
            let position = Vec3::new(x, y, z);
            let size = 0.21 + 0.17 * ((i * 3 + j) % 5) as f32;

            if (i + j) % 2 == 0 {
                shapes.push(
                    Collider::cuboid(position, Vec3::new(size, size * 1.5, size * 0.7)).unwrap(),
                );
            } else {
                let half_height = 0.1 * ((i + 2 * j) % 6) as f32;
                shapes.push(Collider::capsule(position, size, half_height).unwrap());
            }
        }
    }
    shapes
}

#[test]
fn test_intersection_implies_bounds_overlap() {
    let shapes = sample_shapes();
    let mut intersecting = 0;

    for a in &shapes {
        for b in &shapes {
            if a.intersects(b) {
                intersecting += 1;
                assert!(
                    a.bounds().overlaps(&b.bounds()),
                    "{:?} intersects {:?} without overlapping bounds",
                    a,
                    b
                );
            }
        }
    }

    // The sample must exercise more than self-intersection
    assert!(intersecting > shapes.len());
}

#[test]
fn test_intersection_is_symmetric() {
    let shapes = sample_shapes();

    for a in &shapes {
        for b in &shapes {
            assert_eq!(a.intersects(b), b.intersects(a), "asymmetric for {:?} / {:?}", a, b);
        }
    }
}

#[test]
fn test_parallel_capsules_intersect_by_horizontal_distance() {
    let radii = [(0.5, 0.5), (0.3, 0.7), (1.0, 0.25)];
    let half_heights = [(0.0, 0.0), (0.4, 1.5), (2.0, 0.1)];
    let vertical_offsets = [0.0, 0.05, -0.08];

    for &(r1, r2) in &radii {
        for &(h1, h2) in &half_heights {
            for &dy in &vertical_offsets {
                // Vertical extents of the central segments must overlap
                if h1 + h2 < f32::abs(dy) {
                    continue;
                }
                let sum = r1 + r2;
                for d in [sum * 0.5, sum - 0.01, sum + 0.01, sum * 2.0] {
                    let a = Collider::capsule(Vec3::zeros(), r1, h1).unwrap();
                    let b = Collider::capsule(Vec3::new(d, dy, 0.0), r2, h2).unwrap();

                    assert_eq!(
                        a.intersects(&b),
                        d <= sum,
                        "r = ({}, {}), h = ({}, {}), d = {}",
                        r1,
                        r2,
                        h1,
                        h2,
                        d
                    );
                }
            }
        }
    }
}

#[test]
fn test_cast_into_box_stops_short() {
    let mut world = CollisionWorld::new(WorldConfig::default());
    world.add_static(Collider::cuboid(Vec3::new(5.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 1.0)).unwrap());

    let start = Vec3::new(0.0, 1.0, 0.0);

    // Unobstructed: parallel to the box, well clear of it
    let clear_end = Vec3::new(0.0, 1.0, 6.0);
    assert!(world.cast_capsule(&start, &clear_end, 0.5, 0.3).is_none());

    // Ends strictly inside the box
    let end = Vec3::new(5.0, 1.0, 0.0);
    let length = (end - start).magnitude();
    let hit = world.cast_capsule(&start, &end, 0.5, 0.3).unwrap();

    assert!(hit.distance >= 0.0);
    assert!(hit.distance < length);
    assert!(hit.position.x < 3.51);
}

#[test]
fn test_spatial_index_has_no_false_negatives() {
    let mut world = CollisionWorld::new(WorldConfig::default().with_cell_size(1.5));
    let mut statics = Vec::new();

    for i in -3..=3 {
        for j in -3..=3 {
            let center = Vec3::new(i as f32 * 2.7 + 0.3, 0.5, j as f32 * 2.1 - 0.6);
            let half = Vec3::new(0.2 + 0.1 * (i + 3) as f32, 0.5, 0.15 + 0.2 * (j + 3) as f32);
            let collider = Collider::cuboid(center, half).unwrap();
            statics.push((world.add_static(collider), collider.bounds()));
        }
    }

    for qx in -8..=8 {
        for qz in -8..=8 {
            let position = Vec3::new(qx as f32 * 1.13, 0.0, qz as f32 * 0.97);
            for radius in [0.1, 0.75, 2.4] {
                let found = world.query_around(&position, radius);

                for (handle, bounds) in &statics {
                    let overlaps = bounds.min.x <= position.x + radius
                        && bounds.max.x >= position.x - radius
                        && bounds.min.z <= position.z + radius
                        && bounds.max.z >= position.z - radius;
                    if overlaps {
                        assert!(
                            found.contains(handle),
                            "missing {:?} for query at {:?} radius {}",
                            handle,
                            position,
                            radius
                        );
                    }
                }

                assert_eq!(found, world.query_around(&position, radius));
            }
        }
    }
}
