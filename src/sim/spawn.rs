//! Entity spawning
//!
//! Comets and power-ups enter from the top or bottom screen edge, biased
//! away from the quadrant the ship currently occupies. Big comets enter
//! from any edge on a trajectory aimed through the central band of the
//! screen so they reliably cross the play area.

use glam::Vec2;
use rand::Rng;

use super::shape;
use super::state::{
    BIG_COMET_COLOR, BigComet, COMET_COLOR, Comet, PowerUp, Star, WorldState,
};
use crate::config::Config;
use crate::vec_from_angle;

/// Attempts at finding a spawn point outside the ship's quadrant before
/// accepting whatever came last. Bounded so a degenerate screen size can
/// never loop forever.
pub const SPAWN_RETRY_CAP: u32 = 10;

/// Power-up drift speed band (pixels/sec, per axis)
const POWERUP_DRIFT: f32 = 50.0;

/// Screen quadrant relative to the midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Which quadrant a point falls in. Points exactly on a midline count as
/// the right/bottom side.
pub fn quadrant_of(pos: Vec2, config: &Config) -> Quadrant {
    let mid_x = config.screen_width / 2.0;
    let mid_y = config.screen_height / 2.0;
    match (pos.x < mid_x, pos.y < mid_y) {
        (true, true) => Quadrant::TopLeft,
        (false, true) => Quadrant::TopRight,
        (true, false) => Quadrant::BottomLeft,
        (false, false) => Quadrant::BottomRight,
    }
}

/// Edge-biased, quadrant-avoiding spawn point: uniform x along the top or
/// bottom edge, retried up to [`SPAWN_RETRY_CAP`] times to land outside
/// the ship's quadrant. The last candidate is accepted if every retry
/// failed.
pub fn spawn_location(state: &mut WorldState) -> Vec2 {
    let ship_quadrant = quadrant_of(state.ship.pos, &state.config);
    let width = state.config.screen_width;
    let height = state.config.screen_height;

    let mut attempt = 0;
    loop {
        let x = state.rng.random_range(0.0..width);
        let y = if state.rng.random_range(0.0..1.0) < 0.5 {
            0.0
        } else {
            height
        };
        let candidate = Vec2::new(x, y);

        attempt += 1;
        if quadrant_of(candidate, &state.config) != ship_quadrant || attempt > SPAWN_RETRY_CAP {
            return candidate;
        }
    }
}

/// Append a comet of the given tier. Position and velocity default to the
/// spawn-location policy and a random direction at full comet speed;
/// splits pass explicit values.
pub fn spawn_comet(state: &mut WorldState, tier: u8, pos: Option<Vec2>, vel: Option<Vec2>) {
    let pos = match pos {
        Some(p) => p,
        None => spawn_location(state),
    };
    let vel = match vel {
        Some(v) => v,
        None => {
            let angle = state.rng.random_range(0.0..std::f32::consts::TAU);
            let speed = state
                .rng
                .random_range(state.config.comet_speed_min..state.config.comet_speed_max);
            vec_from_angle(angle) * speed
        }
    };

    let shape = shape::generate_shape(&mut state.rng, shape::COMET_SEGMENTS);
    let comet = Comet {
        pos,
        vel,
        radius: state.config.comet_radius(tier),
        tier,
        color: COMET_COLOR,
        hit_points: state.config.comet_hit_points(tier),
        hit_effect_timer: 0.0,
        slow_effect_timer: 0.0,
        indestructable_timer: 0.0,
        trail: Vec::new(),
        trail_timer: 0.0,
        shape,
        rotation_speed: state.rng.random_range(1.0..3.0),
    };
    state.comets.push(comet);
}

/// Append a big comet just off a random screen edge, aimed at a point in
/// the central 30-70% band so it crosses the play area. Big comets travel
/// at 70% of their nominal speed band for longer on-screen dwell.
pub fn spawn_big_comet(state: &mut WorldState) {
    let width = state.config.screen_width;
    let height = state.config.screen_height;
    let radius = state.config.big_comet_radius();

    let (x, y, angle) = if state.rng.random_range(0.0..1.0) < 0.5 {
        // Left or right edge, aimed across the screen's horizontal middle
        let x = if state.rng.random_range(0.0..1.0) < 0.5 {
            -radius
        } else {
            width + radius
        };
        let target_y = height * (0.3 + state.rng.random_range(0.0..1.0) * 0.4);
        let y = state.rng.random_range(0.0..height);
        (x, y, (target_y - y).atan2(width / 2.0 - x))
    } else {
        // Top or bottom edge
        let y = if state.rng.random_range(0.0..1.0) < 0.5 {
            -radius
        } else {
            height + radius
        };
        let target_x = width * (0.3 + state.rng.random_range(0.0..1.0) * 0.4);
        let x = state.rng.random_range(0.0..width);
        (x, y, (height / 2.0 - y).atan2(target_x - x))
    };

    let speed = state.rng.random_range(
        state.config.big_comet_speed_min * 0.7..state.config.big_comet_speed_max * 0.7,
    );

    let shape = shape::big_comet_shape(&mut state.rng);
    let big = BigComet {
        pos: Vec2::new(x, y),
        vel: vec_from_angle(angle) * speed,
        radius,
        color: BIG_COMET_COLOR,
        shape,
        rotation_speed: state.rng.random_range(0.3..0.5),
    };
    state.big_comets.push(big);
}

/// Append a power-up at a policy location with a small random drift.
pub fn spawn_power_up(state: &mut WorldState) {
    let pos = spawn_location(state);
    let vel = Vec2::new(
        state.rng.random_range(-POWERUP_DRIFT..POWERUP_DRIFT),
        state.rng.random_range(-POWERUP_DRIFT..POWERUP_DRIFT),
    );
    let power_up = PowerUp {
        pos,
        vel,
        lifetime: state.config.powerup_lifetime,
        radius: state.config.powerup_radius,
    };
    state.power_ups.push(power_up);
}

/// Rebuild the starfield. About 70% of stars flicker.
pub fn init_starfield(state: &mut WorldState) {
    let count = state.config.star_count;
    state.stars.clear();
    state.stars.reserve(count);
    for _ in 0..count {
        let pos = Vec2::new(
            state.rng.random_range(0.0..state.config.screen_width),
            state.rng.random_range(0.0..state.config.screen_height),
        );
        let flicker = state.rng.random_range(0.0..1.0) < 0.7;
        let star = Star {
            pos,
            base_size: state.rng.random_range(0.5..2.5),
            flicker,
            size_variation: if flicker {
                state.rng.random_range(0.2..1.2)
            } else {
                0.0
            },
            size_speed: if flicker {
                state.rng.random_range(0.2..0.7)
            } else {
                0.0
            },
            size_time: if flicker {
                state.rng.random_range(0.0..std::f32::consts::TAU)
            } else {
                0.0
            },
        };
        state.stars.push(star);
    }
}
