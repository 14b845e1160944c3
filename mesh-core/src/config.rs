//! Session settings.

use serde::{Deserialize, Serialize};

/// Simulation and styling parameters for one mesh session.
///
/// Deserializing a partial object fills every missing field from
/// [`Settings::default`], so a host can pass only the values it cares
/// about. In Rust code the same merge is spelled with struct update
/// syntax: `Settings { fps: 30.0, ..Settings::default() }`.
///
/// Nothing here is validated. Negative or zero values are accepted and
/// simply produce an empty or motionless mesh.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Upper bound on simulation ticks per second.
    pub fps: f64,
    /// Number of vertices in a freshly built mesh.
    pub vertex_count: i32,
    /// Scale of the initial per-axis velocity.
    pub velocity: f32,
    /// Velocity is clamped to `[-max_velocity, max_velocity]` on each axis.
    pub max_velocity: f32,
    /// Probability that a random kick is applied to an axis on a tick.
    pub entropy: f32,
    /// Draw radius, also used as the collision margin at the edges.
    pub radius: f32,
    /// Scale of an entropy kick.
    pub d_velocity: f32,
    pub vertex_fill: String,
    pub vertex_stroke: String,
    pub vertex_stroke_width: f32,
    pub line_stroke: String,
    pub line_stroke_width: f32,
    /// Constant downward acceleration per tick, y axis only.
    pub gravity: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: 15.0,
            vertex_count: 5,
            velocity: 0.1,
            max_velocity: 1.5,
            entropy: 0.9,
            radius: 5.0,
            d_velocity: 0.05,
            vertex_fill: "white".to_string(),
            vertex_stroke: "white".to_string(),
            vertex_stroke_width: 0.0,
            line_stroke: "white".to_string(),
            line_stroke_width: 2.0,
            gravity: 0.0,
        }
    }
}

impl Settings {
    /// Minimum time between two simulation ticks, in milliseconds.
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.fps
    }

    /// Vertex count as a length; non-positive counts mean an empty mesh.
    pub fn vertex_len(&self) -> usize {
        usize::try_from(self.vertex_count).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_merges_over_defaults() {
        let s: Settings = serde_json::from_str(r#"{ "fps": 30, "vertexCount": 8 }"#).unwrap();

        assert_eq!(s.fps, 30.0);
        assert_eq!(s.vertex_count, 8);
        // Everything else keeps its default.
        assert_eq!(s.max_velocity, 1.5);
        assert_eq!(s.line_stroke, "white");
        assert_eq!(s.line_stroke_width, 2.0);
    }

    #[test]
    fn empty_json_is_default() {
        let s: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn frame_interval_follows_fps() {
        let s = Settings::default();
        assert!((s.frame_interval_ms() - 1000.0 / 15.0).abs() < 1e-9);
    }

    #[test]
    fn negative_vertex_count_has_zero_len() {
        let s = Settings {
            vertex_count: -3,
            ..Settings::default()
        };
        assert_eq!(s.vertex_len(), 0);
    }
}
