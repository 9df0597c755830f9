//! Procedural comet silhouettes
//!
//! A comet's outline is a polygon whose vertices sit at fixed, evenly
//! spaced angles but at jittered radii that oscillate over time. Keeping
//! the angles fixed preserves winding order, so the presentation layer can
//! fan-triangulate the points directly.

use rand::Rng;

/// Vertices in a normal comet silhouette
pub const COMET_SEGMENTS: usize = 12;
/// Vertices in a big comet silhouette (more segments, rounder look)
pub const BIG_COMET_SEGMENTS: usize = 18;

/// One vertex of a comet silhouette, generated once at spawn.
#[derive(Debug, Clone, Copy)]
pub struct ShapePoint {
    /// Fixed angular position: `i * 2π / segments`
    pub angle: f32,
    /// Base radius multiplier
    pub factor: f32,
    /// Oscillation frequency of the radius
    pub frequency: f32,
    /// Oscillation phase offset
    pub phase: f32,
}

/// Generate a jittered-radius polygon descriptor.
pub fn generate_shape<R: Rng>(rng: &mut R, segments: usize) -> Vec<ShapePoint> {
    let mut shape = Vec::with_capacity(segments);
    for i in 0..segments {
        shape.push(ShapePoint {
            angle: i as f32 * std::f32::consts::TAU / segments as f32,
            factor: 1.0 + (rng.random_range(0.0..1.0) * 0.3 - 0.15),
            frequency: rng.random_range(1.0..3.0) * 2.0,
            phase: rng.random_range(0.0..std::f32::consts::TAU),
        });
    }
    shape
}

/// Generate a big comet silhouette: more segments, radius variance damped
/// to 5% and frequency to 30% so the result reads as a slowly churning
/// near-circle.
pub fn big_comet_shape<R: Rng>(rng: &mut R) -> Vec<ShapePoint> {
    let mut shape = generate_shape(rng, BIG_COMET_SEGMENTS);
    for point in &mut shape {
        point.factor = 1.0 + (point.factor - 1.0) * 0.05;
        point.frequency *= 0.3;
    }
    shape
}

/// Time-varying radius multiplier for a vertex.
///
/// The presentation layer multiplies this by the comet radius to place
/// each polygon point.
pub fn silhouette_factor(point: &ShapePoint, rotation_speed: f32, game_time: f32) -> f32 {
    point.factor + 0.1 * (game_time * point.frequency * rotation_speed + point.phase).sin()
}
