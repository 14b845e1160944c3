//! Core simulation for an animated mesh of bouncing, connected vertices.
//!
//! Main components:
//! - [`mesh`] — vertices, meshes and random construction.
//! - [`motion`] — the per-tick bounded random walk with edge reflection.
//! - [`driver`] — the frame-capped animation state machine.
//! - [`render`] — projection of a mesh onto line/circle primitives.
//! - [`config`] — session settings and their defaults.
//! - [`types`] — shared small types (bounds, frame handles, timestamps).

pub mod config;
pub mod driver;
pub mod mesh;
pub mod motion;
pub mod render;
pub mod types;
