//! Per-frame update orchestrator
//!
//! Advances the world by one frame in a fixed order: ambient animation,
//! power-up cadence and pickup, the win check, ship collisions (either of
//! which can end the round mid-frame), ship movement, shooting, pool
//! integration, combat resolution, and finally the spawn cadences. Frame
//! delta time is the sole time source; there is no fixed timestep.

use super::collision;
use super::physics;
use super::spawn;
use super::state::{Bullet, GamePhase, SoundKind, Spark, WorldState};
use crate::{perp_from_angle, vec_from_angle};
use rand::Rng;

/// Control signals for a single frame, sampled once by the input layer.
///
/// Firing is not a control: the ship shoots continuously while a round is
/// running, gated only by the cooldown.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlInput {
    pub forward: bool,
    pub reverse: bool,
    pub brake: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

/// Angular jitter on the outer gun barrels (radians)
const OUTER_GUN_JITTER: f32 = 0.05;
/// Angular jitter on the nose gun (radians)
const NOSE_GUN_JITTER: f32 = 0.03;
/// Sparks flare off roughly this far to either side of the nose
const SPARK_BASE_OFFSET: f32 = std::f32::consts::PI / 8.0;
const SPARK_LIFETIME: f32 = 0.2;

/// Advance the simulation by one frame.
pub fn tick(state: &mut WorldState, input: &ControlInput, dt: f32) {
    // The starfield and the ship's hit flash animate in every phase
    physics::update_starfield(state, dt);
    if state.ship.hit_flash_timer > 0.0 {
        state.ship.hit_flash_timer = (state.ship.hit_flash_timer - dt).max(0.0);
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.game_time += dt;

    // Power-ups: cadence, motion, pickup
    state.powerup_spawn_timer += dt;
    if state.powerup_spawn_timer >= state.config.powerup_interval {
        spawn::spawn_power_up(state);
        state.powerup_spawn_timer = 0.0;
    }
    physics::integrate_power_ups(state, dt);
    collect_power_ups(state);

    // Survived long enough and the sky is clear: the round is won
    if state.game_time >= state.config.survival_threshold
        && state.comets.is_empty()
        && !state.win_triggered
    {
        let pos = state.ship.pos;
        state.create_huge_explosion(pos);
        state.win_triggered = true;
        state.phase = GamePhase::Win;
        state.push_sound(SoundKind::Victory);
        log::info!(
            "Round won at t={:.1}s, score {}",
            state.game_time,
            state.score
        );
        return;
    }

    // Ship collisions; a fatal hit aborts the rest of the frame
    if collision::resolve_ship_comet(state) {
        return;
    }
    if collision::resolve_ship_big_comet(state) {
        return;
    }

    physics::integrate_ship(state, input, dt);

    update_shooting(state, dt);

    physics::update_sparks(state, dt);
    physics::integrate_bullets(state, dt);
    physics::integrate_comets(state, dt);
    physics::integrate_big_comets(state, dt);

    // Big comet cadence
    state.big_comet_spawn_timer += dt;
    if state.big_comet_spawn_timer >= state.config.big_comet_interval {
        for _ in 0..state.config.big_comet_batch {
            spawn::spawn_big_comet(state);
        }
        state.big_comet_spawn_timer = 0.0;
    }

    physics::update_explosion_particles(state, dt);

    collision::resolve_bullet_hits(state);
    collision::resolve_comet_comet(state);
    collision::resolve_big_comet_collisions(state);

    // Comet cadence, suppressed late in the round so the pool can drain
    // toward the win condition
    if state.game_time < state.config.spawn_cutoff {
        state.comet_spawn_timer += dt;
        if state.comet_spawn_timer > state.next_comet_spawn {
            let batch = comet_batch_size(state);
            log::debug!(
                "Spawning comet batch of {batch} at t={:.1}s",
                state.game_time
            );
            let tier = state.config.max_comet_tier;
            for _ in 0..batch {
                spawn::spawn_comet(state, tier, None, None);
            }
            state.comet_spawn_timer = 0.0;
            state.next_comet_spawn = state
                .rng
                .random_range(state.config.comet_spawn_min..state.config.comet_spawn_max);
        }
    }
}

/// Batch size for a comet spawn: a uniform draw from the configured band,
/// scaled by screen area (clamped to [0.5, 2.0]).
fn comet_batch_size(state: &mut WorldState) -> u32 {
    let range = (state.config.comet_batch_max - state.config.comet_batch_min + 1) as f32;
    let base = state.config.comet_batch_min + (state.rng.random_range(0.0..1.0) * range) as u32;
    (base as f32 * state.config.spawn_scale()) as u32
}

/// Heal the ship from any power-up it overlaps.
fn collect_power_ups(state: &mut WorldState) {
    let heal = state.config.powerup_heal;
    let max_hp = state.config.ship_max_hit_points;

    let mut index = state.power_ups.len();
    while index > 0 {
        index -= 1;
        let power_up = &state.power_ups[index];
        let pickup_range = state.ship.size / 2.0 + power_up.radius;
        if state.ship.pos.distance(power_up.pos) < pickup_range {
            state.ship.hit_points = (state.ship.hit_points + heal).min(max_hp);
            state.push_sound(SoundKind::PowerUp);
            state.power_ups.remove(index);
        }
    }
}

/// Accumulating-cooldown firing: once past the interval, emit a volley of
/// three bullets (nose, upper, lower gun) with independent angular jitter
/// and the ship's momentum folded in, plus one or two muzzle sparks.
fn update_shooting(state: &mut WorldState, dt: f32) {
    state.bullet_cooldown += dt;
    if state.bullet_cooldown <= state.config.bullet_interval {
        return;
    }
    state.bullet_cooldown = 0.0;

    let pos = state.ship.pos;
    let angle = state.ship.angle;
    let ship_vel = state.ship.vel;
    let size = state.ship.size;
    let bullet_speed = state.config.bullet_speed;
    let bullet_radius = state.config.bullet_radius;

    let dir = vec_from_angle(angle);
    let perp = perp_from_angle(angle);

    let guns = [
        (
            pos + dir * (size * 0.8) + perp * (size * 0.4),
            angle + state.rng.random_range(-OUTER_GUN_JITTER..OUTER_GUN_JITTER),
        ),
        (
            pos + dir * size,
            angle + state.rng.random_range(-NOSE_GUN_JITTER..NOSE_GUN_JITTER),
        ),
        (
            pos + dir * (size * 0.8) - perp * (size * 0.4),
            angle + state.rng.random_range(-OUTER_GUN_JITTER..OUTER_GUN_JITTER),
        ),
    ];

    for (gun_pos, gun_angle) in guns {
        state.bullets.push(Bullet {
            pos: gun_pos,
            vel: vec_from_angle(gun_angle) * bullet_speed + ship_vel,
            radius: bullet_radius,
        });
    }
    state.push_sound(SoundKind::Fire);

    // Muzzle sparks: one or two short-lived flares off the nose
    let spark_count = state.rng.random_range(1.0f32..3.0) as u32;
    for _ in 0..spark_count {
        let side = if state.rng.random_range(0.0..1.0) < 0.5 {
            SPARK_BASE_OFFSET
        } else {
            -SPARK_BASE_OFFSET
        };
        let spark = Spark {
            angle: angle + side + state.rng.random_range(-0.05..0.05),
            length: state.rng.random_range(2.0..5.0),
            lifetime: SPARK_LIFETIME,
        };
        state.sparks.push(spark);
    }
}
