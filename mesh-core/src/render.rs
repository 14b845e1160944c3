//! Projection of a [`Mesh`] onto drawing primitives.
//!
//! A frame is drawn as three passes, in this order:
//! 1. skip-1 lines, vertex `i` to vertex `(i + 1) % n`;
//! 2. skip-2 lines, vertex `i` to vertex `(i + 2) % n`;
//! 3. one circle per vertex.
//!
//! Circles come last so they sit on top of the lines.

use crate::{config::Settings, mesh::Mesh};
use glam::Vec2;

/// A drawing target that understands lines and circles.
///
/// Colors are passed through exactly as they appear in [`Settings`];
/// interpreting them is up to the implementation.
pub trait Surface {
    fn draw_line(&mut self, from: Vec2, to: Vec2, stroke: &str, width: f32);

    fn draw_circle(&mut self, center: Vec2, radius: f32, fill: &str, stroke: &str, stroke_width: f32);
}

/// A single recorded drawing primitive.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Vec2,
        to: Vec2,
        stroke: String,
        width: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        fill: String,
        stroke: String,
        stroke_width: f32,
    },
}

impl Surface for Vec<DrawCommand> {
    fn draw_line(&mut self, from: Vec2, to: Vec2, stroke: &str, width: f32) {
        self.push(DrawCommand::Line {
            from,
            to,
            stroke: stroke.to_string(),
            width,
        });
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, fill: &str, stroke: &str, stroke_width: f32) {
        self.push(DrawCommand::Circle {
            center,
            radius,
            fill: fill.to_string(),
            stroke: stroke.to_string(),
            stroke_width,
        });
    }
}

/// Emits the lines and circles for `mesh` onto `surface`.
pub fn render(mesh: &Mesh, settings: &Settings, surface: &mut impl Surface) {
    for skip in [1, 2] {
        for (a, b) in mesh.connections(skip) {
            surface.draw_line(
                mesh.vertices[a].pos,
                mesh.vertices[b].pos,
                &settings.line_stroke,
                settings.line_stroke_width,
            );
        }
    }

    for v in &mesh.vertices {
        surface.draw_circle(
            v.pos,
            v.radius,
            &settings.vertex_fill,
            &settings.vertex_stroke,
            settings.vertex_stroke_width,
        );
    }
}

/// Collects the draw commands for `mesh` into a list.
pub fn draw_commands(mesh: &Mesh, settings: &Settings) -> Vec<DrawCommand> {
    let mut out = Vec::with_capacity(mesh.len() * 3);
    render(mesh, settings, &mut out);
    out
}
