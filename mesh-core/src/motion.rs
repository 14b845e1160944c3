//! Per-tick motion for the mesh.
//!
//! Every vertex performs a bounded random walk inside its mesh bounds:
//! 1. Its position advances by last tick's velocity.
//! 2. [`move_axis`] updates each velocity component: a random kick with
//!    probability `entropy`, gravity on the y axis, a clamp to
//!    `max_velocity`, and a sign flip when the new position has crossed
//!    an edge.
//!
//! [`tick_mesh`] applies this to every vertex and returns a new mesh.

use crate::{config::Settings, mesh::Mesh, mesh::Vertex};
use glam::Vec2;
use rand::Rng;

/// Computes the next velocity for one axis of one vertex.
///
/// `pos` must already be advanced by the incoming `vel`. The steps are:
///
/// 1. With probability `settings.entropy`, add a kick drawn from
///    `[-d_velocity / 2, d_velocity / 2)`.
/// 2. If `apply_gravity`, add `settings.gravity`.
/// 3. Clamp to `[-max_velocity, max_velocity]`.
/// 4. If the vertex is heading out through an edge (positive and past
///    `extent - radius`, or negative and before `radius`), negate.
///
/// Gravity is not applied again after the flip.
///
/// ### Parameters
/// - `pos` - Position on this axis after the move.
/// - `vel` - Velocity on this axis used for that move.
/// - `radius` - Vertex radius, used as the edge margin.
/// - `extent` - Size of the bounds on this axis.
/// - `apply_gravity` - Whether `settings.gravity` applies to this axis.
///
/// ### Returns
/// The velocity for the next tick. Its magnitude never exceeds
/// `settings.max_velocity`.
pub fn move_axis(
    pos: f32,
    vel: f32,
    radius: f32,
    extent: f32,
    apply_gravity: bool,
    settings: &Settings,
    rng: &mut impl Rng,
) -> f32 {
    let mut v = vel;

    if rng.random::<f32>() < settings.entropy {
        v += (rng.random::<f32>() - 0.5) * settings.d_velocity;
    }

    if apply_gravity {
        v += settings.gravity;
    }

    if v > settings.max_velocity {
        v = settings.max_velocity;
    } else if v < -settings.max_velocity {
        v = -settings.max_velocity;
    }

    if (v > 0.0 && pos > extent - radius) || (v < 0.0 && pos < radius) {
        return -v;
    }
    v
}

/// Advances a single vertex by one tick within `extent`.
fn tick_vertex(v: &Vertex, extent: Vec2, settings: &Settings, rng: &mut impl Rng) -> Vertex {
    let pos = v.pos + v.vel;
    let dx = move_axis(pos.x, v.vel.x, v.radius, extent.x, false, settings, rng);
    let dy = move_axis(pos.y, v.vel.y, v.radius, extent.y, true, settings, rng);

    Vertex::new(pos, Vec2::new(dx, dy), v.radius)
}

/// Advances every vertex of `mesh` by one tick.
///
/// The result has the same bounds and vertex count as `mesh`; the input
/// is left untouched so the previous frame can still be drawn while the
/// next one is computed.
pub fn tick_mesh(mesh: &Mesh, settings: &Settings, rng: &mut impl Rng) -> Mesh {
    let extent = mesh.bounds.extent();
    let vertices = mesh
        .vertices
        .iter()
        .map(|v| tick_vertex(v, extent, settings, rng))
        .collect();

    Mesh::new(mesh.bounds, vertices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{mesh::build_mesh, types::Bounds};
    use rand::{SeedableRng, rngs::StdRng};

    fn still_settings() -> Settings {
        Settings {
            entropy: 0.0,
            gravity: 0.0,
            ..Settings::default()
        }
    }

    #[test]
    fn move_axis_never_exceeds_max_velocity() {
        let mut rng = StdRng::seed_from_u64(42);
        let settings = Settings {
            entropy: 1.0,
            d_velocity: 4.0,
            gravity: 0.7,
            ..Settings::default()
        };

        for _ in 0..5000 {
            let vel = rng.random_range(-20.0..20.0);
            let pos = rng.random_range(-10.0..110.0);
            let gravity = rng.random_bool(0.5);
            let out = move_axis(pos, vel, 5.0, 100.0, gravity, &settings, &mut rng);
            assert!(
                out.abs() <= settings.max_velocity,
                "vel {vel} at {pos} became {out}"
            );
        }
    }

    #[test]
    fn move_axis_without_entropy_or_gravity_keeps_velocity() {
        let mut rng = StdRng::seed_from_u64(0);
        let settings = still_settings();

        assert_eq!(move_axis(50.0, 0.3, 5.0, 100.0, true, &settings, &mut rng), 0.3);
        assert_eq!(move_axis(50.0, -1.2, 5.0, 100.0, false, &settings, &mut rng), -1.2);
        // Only the clamp changes it.
        assert_eq!(move_axis(50.0, 9.0, 5.0, 100.0, false, &settings, &mut rng), 1.5);
    }

    #[test]
    fn move_axis_reflects_at_far_edge() {
        let mut rng = StdRng::seed_from_u64(17);
        let settings = Settings {
            entropy: 0.5,
            d_velocity: 0.05,
            ..Settings::default()
        };

        for _ in 0..200 {
            // Past maxX - r while moving right.
            let out = move_axis(96.0, 0.5, 5.0, 100.0, false, &settings, &mut rng);
            assert!(out < 0.0, "expected a flip, got {out}");
        }
    }

    #[test]
    fn move_axis_reflects_at_near_edge() {
        let mut rng = StdRng::seed_from_u64(18);
        let settings = still_settings();

        assert_eq!(move_axis(4.0, -0.5, 5.0, 100.0, false, &settings, &mut rng), 0.5);
        // Moving inward from the edge zone is left alone.
        assert_eq!(move_axis(4.0, 0.5, 5.0, 100.0, false, &settings, &mut rng), 0.5);
    }

    #[test]
    fn move_axis_reflects_the_clamped_velocity() {
        let mut rng = StdRng::seed_from_u64(19);
        let settings = still_settings();

        assert_eq!(move_axis(99.0, 3.0, 5.0, 100.0, false, &settings, &mut rng), -1.5);
    }

    #[test]
    fn move_axis_entropy_kick_is_bounded() {
        let mut rng = StdRng::seed_from_u64(23);
        let settings = Settings {
            entropy: 1.0,
            d_velocity: 0.2,
            ..Settings::default()
        };

        let mut changed = 0;
        for _ in 0..1000 {
            let out = move_axis(50.0, 0.0, 5.0, 100.0, false, &settings, &mut rng);
            assert!(out.abs() <= 0.1);
            if out != 0.0 {
                changed += 1;
            }
        }
        assert!(changed > 900, "entropy 1.0 should almost always kick");
    }

    #[test]
    fn gravity_only_applies_to_y() {
        let mut rng = StdRng::seed_from_u64(29);
        let settings = Settings {
            gravity: 0.25,
            ..still_settings()
        };
        let mesh = Mesh::new(
            Bounds::new(100.0, 100.0),
            vec![Vertex::new(Vec2::new(50.0, 50.0), Vec2::new(0.1, 0.1), 5.0)],
        );

        let next = tick_mesh(&mesh, &settings, &mut rng);
        let v = next.vertices[0];

        assert_eq!(v.pos, mesh.vertices[0].pos + mesh.vertices[0].vel);
        assert_eq!(v.vel.x, 0.1);
        assert!((v.vel.y - 0.35).abs() < 1e-6);
    }

    #[test]
    fn tick_mesh_moves_by_previous_velocity() {
        let mut rng = StdRng::seed_from_u64(31);
        let settings = Settings {
            entropy: 1.0,
            ..Settings::default()
        };
        let mesh = build_mesh(400.0, 300.0, &settings, &mut rng);

        let next = tick_mesh(&mesh, &settings, &mut rng);

        for (before, after) in mesh.vertices.iter().zip(&next.vertices) {
            assert_eq!(after.pos, before.pos + before.vel);
            assert_eq!(after.radius, before.radius);
        }
    }

    #[test]
    fn tick_mesh_keeps_bounds_and_count_and_leaves_input_alone() {
        let mut rng = StdRng::seed_from_u64(37);
        let settings = Settings {
            vertex_count: 12,
            ..Settings::default()
        };
        let mesh = build_mesh(640.0, 480.0, &settings, &mut rng);
        let snapshot = mesh.clone();

        let mut current = mesh.clone();
        for _ in 0..100 {
            current = tick_mesh(&current, &settings, &mut rng);
            assert_eq!(current.bounds, mesh.bounds);
            assert_eq!(current.len(), 12);
        }

        assert_eq!(mesh, snapshot);
    }

    #[test]
    fn vertices_stay_near_bounds_over_many_ticks() {
        let mut rng = StdRng::seed_from_u64(41);
        let settings = Settings {
            vertex_count: 20,
            velocity: 3.0,
            entropy: 1.0,
            d_velocity: 0.5,
            ..Settings::default()
        };
        let mut mesh = build_mesh(120.0, 80.0, &settings, &mut rng);

        for _ in 0..2000 {
            mesh = tick_mesh(&mesh, &settings, &mut rng);
        }

        // A vertex can overshoot an edge by at most a couple of ticks of
        // travel before the reflected velocity brings it back.
        let slack = 2.0 * settings.max_velocity;
        for v in &mesh.vertices {
            assert!(v.pos.x > -slack && v.pos.x < 120.0 + slack, "{:?}", v);
            assert!(v.pos.y > -slack && v.pos.y < 80.0 + slack, "{:?}", v);
        }
    }
}
