//! Splitting Comets - a survival arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `config`: Data-driven tunables (screen size, speeds, intervals)
//! - `settings`: Audio preferences consumed by the presentation layer
//!
//! The crate contains no rendering, audio, or input-polling code. The
//! embedding layer samples controls once per frame, calls [`sim::tick`],
//! reads the [`sim::WorldState`] snapshot to draw, and drains
//! [`sim::GameEvent`]s to play sounds.

pub mod config;
pub mod settings;
pub mod sim;

pub use config::Config;
pub use settings::Settings;

use glam::Vec2;

/// Unit vector pointing along `angle` (radians, screen coordinates)
#[inline]
pub fn vec_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Unit vector perpendicular to `angle` (rotated +90 degrees)
#[inline]
pub fn perp_from_angle(angle: f32) -> Vec2 {
    Vec2::new(-angle.sin(), angle.cos())
}
