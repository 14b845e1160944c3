//! Mesh data and random construction.
//!
//! A [`Mesh`] is rebuilt wholesale whenever its bounds go stale; vertex
//! order defines which vertices get connected.

use crate::{config::Settings, types::Bounds};
use glam::Vec2;
use rand::Rng;

/// One simulated point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub pos: Vec2,
    /// Displacement applied on the next tick.
    pub vel: Vec2,
    pub radius: f32,
}

/// A set of vertices plus the bounds they were generated for.
///
/// The order of `vertices` matters: connecting lines are drawn between
/// neighbours by index. A mesh is only meaningful for its own `bounds`;
/// when the container size changes a new mesh must be built.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    pub bounds: Bounds,
    pub vertices: Vec<Vertex>,
}

impl Vertex {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }
}

impl Mesh {
    pub fn new(bounds: Bounds, vertices: Vec<Vertex>) -> Self {
        Self { bounds, vertices }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Index pairs `(i, (i + skip) % len)` for every vertex, in index order.
    ///
    /// A single-vertex mesh yields self-loops; an empty mesh yields nothing.
    pub fn connections(&self, skip: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (i, (i + skip) % n))
    }
}

/// Uniform sample from `[0, extent)`, or `0` for a non-positive extent.
fn sample_extent(extent: f32, rng: &mut impl Rng) -> f32 {
    if extent > 0.0 {
        rng.random_range(0.0..extent)
    } else {
        0.0
    }
}

/// Places a vertex uniformly inside `[0, max_x) × [0, max_y)`.
///
/// Each velocity component is drawn independently from
/// `[-velocity / 2, velocity / 2)`, and the radius is `settings.radius`.
pub fn build_vertex(max_x: f32, max_y: f32, settings: &Settings, rng: &mut impl Rng) -> Vertex {
    let pos = Vec2::new(sample_extent(max_x, rng), sample_extent(max_y, rng));
    let dx = (rng.random::<f32>() - 0.5) * settings.velocity;
    let dy = (rng.random::<f32>() - 0.5) * settings.velocity;

    Vertex::new(pos, Vec2::new(dx, dy), settings.radius)
}

/// Builds a mesh of `settings.vertex_count` independent vertices.
///
/// A non-positive count gives an empty mesh, which is valid and renders
/// nothing.
pub fn build_mesh(max_x: f32, max_y: f32, settings: &Settings, rng: &mut impl Rng) -> Mesh {
    let vertices = (0..settings.vertex_len())
        .map(|_| build_vertex(max_x, max_y, settings, rng))
        .collect();

    Mesh::new(Bounds::new(max_x, max_y), vertices)
}
