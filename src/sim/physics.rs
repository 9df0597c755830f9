//! Per-kind physics integration
//!
//! Every movable entity advances `pos += vel * dt`, but the per-kind rules
//! differ enough that each pool gets its own pass: the ship has thrust and
//! soft wall bounces, comets have friction with a minimum-speed floor and
//! hard reflections, big comets fly straight until culled, bullets are
//! culled at the screen edge, power-ups bounce elastically.

use super::state::{TRAIL_LENGTH, WorldState};
use super::tick::ControlInput;
use crate::vec_from_angle;

/// Count a timer down, clamping at zero.
#[inline]
fn decay(timer: &mut f32, dt: f32) {
    if *timer > 0.0 {
        *timer = (*timer - dt).max(0.0);
    }
}

/// Advance flicker phases. Runs in every phase, not just Playing.
pub fn update_starfield(state: &mut WorldState, dt: f32) {
    for star in &mut state.stars {
        if star.flicker {
            star.size_time += dt * star.size_speed;
        }
    }
}

/// Apply controls and integrate the ship.
pub fn integrate_ship(state: &mut WorldState, input: &ControlInput, dt: f32) {
    let accel = state.config.ship_accel;
    let reverse = state.config.ship_reverse_accel;
    let rot_speed = state.config.ship_rot_speed;
    let friction = state.config.ship_friction;
    let restitution = state.config.ship_wall_restitution;
    let width = state.config.screen_width;
    let height = state.config.screen_height;
    let ship = &mut state.ship;

    if input.forward {
        ship.vel += vec_from_angle(ship.angle) * accel * dt;
    }
    if input.reverse {
        ship.vel -= vec_from_angle(ship.angle) * reverse * dt;
    }
    if input.brake {
        // Scale speed toward zero without ever reversing direction
        let speed = ship.vel.length();
        if speed > 0.0 {
            let new_speed = (speed - reverse * dt).max(0.0);
            ship.vel = ship.vel / speed * new_speed;
        }
    }
    if input.turn_left {
        ship.angle -= rot_speed * dt;
    }
    if input.turn_right {
        ship.angle += rot_speed * dt;
    }

    ship.pos += ship.vel * dt;
    ship.vel *= friction;

    // Soft bounce at the screen bounds
    if ship.pos.x - ship.size < 0.0 {
        ship.pos.x = ship.size;
        ship.vel.x = -ship.vel.x * restitution;
    }
    if ship.pos.x + ship.size > width {
        ship.pos.x = width - ship.size;
        ship.vel.x = -ship.vel.x * restitution;
    }
    if ship.pos.y - ship.size < 0.0 {
        ship.pos.y = ship.size;
        ship.vel.y = -ship.vel.y * restitution;
    }
    if ship.pos.y + ship.size > height {
        ship.pos.y = height - ship.size;
        ship.vel.y = -ship.vel.y * restitution;
    }
}

/// Integrate comets: timers, friction, the minimum-speed floor, edge
/// reflection, and the position trail.
pub fn integrate_comets(state: &mut WorldState, dt: f32) {
    let friction = state.config.comet_friction;
    let min_speed = state.config.comet_min_speed;
    let trail_interval = state.config.trail_interval;
    let width = state.config.screen_width;
    let height = state.config.screen_height;

    for comet in &mut state.comets {
        decay(&mut comet.slow_effect_timer, dt);
        decay(&mut comet.indestructable_timer, dt);
        decay(&mut comet.hit_effect_timer, dt);

        comet.pos += comet.vel * dt;
        comet.vel *= friction;

        // Comets never coast to a stop: rescale up to the floor while
        // preserving direction
        let speed = comet.vel.length();
        if speed > 0.0 && speed < min_speed {
            comet.vel *= min_speed / speed;
        }

        // Fully elastic reflection off the screen edges
        if comet.pos.x - comet.radius < 0.0 {
            comet.pos.x = comet.radius;
            comet.vel.x = -comet.vel.x;
        }
        if comet.pos.x + comet.radius > width {
            comet.pos.x = width - comet.radius;
            comet.vel.x = -comet.vel.x;
        }
        if comet.pos.y - comet.radius < 0.0 {
            comet.pos.y = comet.radius;
            comet.vel.y = -comet.vel.y;
        }
        if comet.pos.y + comet.radius > height {
            comet.pos.y = height - comet.radius;
            comet.vel.y = -comet.vel.y;
        }

        comet.trail_timer += dt;
        if comet.trail_timer >= trail_interval {
            comet.trail_timer -= trail_interval;
            comet.trail.push(comet.pos);
            if comet.trail.len() > TRAIL_LENGTH {
                comet.trail.remove(0);
            }
        }
    }
}

/// Integrate big comets and cull the ones fully past any edge. No
/// friction, no floor, no bouncing.
pub fn integrate_big_comets(state: &mut WorldState, dt: f32) {
    let width = state.config.screen_width;
    let height = state.config.screen_height;

    for big in &mut state.big_comets {
        big.pos += big.vel * dt;
    }
    state.big_comets.retain(|big| {
        big.pos.x >= -big.radius
            && big.pos.x <= width + big.radius
            && big.pos.y >= -big.radius
            && big.pos.y <= height + big.radius
    });
}

/// Integrate bullets and cull any whose center leaves the screen.
pub fn integrate_bullets(state: &mut WorldState, dt: f32) {
    let width = state.config.screen_width;
    let height = state.config.screen_height;

    for bullet in &mut state.bullets {
        bullet.pos += bullet.vel * dt;
    }
    state
        .bullets
        .retain(|b| b.pos.x >= 0.0 && b.pos.x <= width && b.pos.y >= 0.0 && b.pos.y <= height);
}

/// Integrate power-ups: lifetime countdown, drift, and elastic bounces.
/// Expired ones are removed; pickup is resolved by the orchestrator.
pub fn integrate_power_ups(state: &mut WorldState, dt: f32) {
    let width = state.config.screen_width;
    let height = state.config.screen_height;

    for power_up in &mut state.power_ups {
        power_up.lifetime -= dt;
        power_up.pos += power_up.vel * dt;

        if power_up.pos.x - power_up.radius < 0.0 {
            power_up.pos.x = power_up.radius;
            power_up.vel.x = -power_up.vel.x;
        }
        if power_up.pos.x + power_up.radius > width {
            power_up.pos.x = width - power_up.radius;
            power_up.vel.x = -power_up.vel.x;
        }
        if power_up.pos.y - power_up.radius < 0.0 {
            power_up.pos.y = power_up.radius;
            power_up.vel.y = -power_up.vel.y;
        }
        if power_up.pos.y + power_up.radius > height {
            power_up.pos.y = height - power_up.radius;
            power_up.vel.y = -power_up.vel.y;
        }
    }
    state.power_ups.retain(|p| p.lifetime > 0.0);
}

/// Integrate explosion particles; size decays multiplicatively.
pub fn update_explosion_particles(state: &mut WorldState, dt: f32) {
    for particle in &mut state.explosion_particles {
        particle.pos += particle.vel * dt;
        particle.lifetime -= dt;
        particle.size *= 0.98;
    }
    state.explosion_particles.retain(|p| p.lifetime > 0.0);
}

/// Count down spark lifetimes.
pub fn update_sparks(state: &mut WorldState, dt: f32) {
    for spark in &mut state.sparks {
        spark.lifetime -= dt;
    }
    state.sparks.retain(|s| s.lifetime > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sim::spawn;
    use crate::sim::state::{Bullet, PowerUp};
    use glam::Vec2;
    use proptest::prelude::*;

    const DT: f32 = 0.016;

    fn world(seed: u64) -> WorldState {
        WorldState::new(Config::default(), seed)
    }

    #[test]
    fn thrust_accelerates_along_facing() {
        let mut state = world(1);
        state.ship.angle = 0.0;
        let input = ControlInput {
            forward: true,
            ..Default::default()
        };
        integrate_ship(&mut state, &input, DT);
        assert!(state.ship.vel.x > 0.0);
        assert!(state.ship.vel.y.abs() < 1e-4);
    }

    #[test]
    fn brake_never_reverses_direction() {
        let mut state = world(2);
        state.ship.vel = Vec2::new(3.0, 0.0);
        let input = ControlInput {
            brake: true,
            ..Default::default()
        };
        // Well past the point where speed has hit zero
        for _ in 0..100 {
            integrate_ship(&mut state, &input, DT);
            assert!(state.ship.vel.x >= 0.0);
        }
        assert!(state.ship.vel.length() < 1e-3);
    }

    #[test]
    fn ship_bounces_softly_off_walls() {
        let mut state = world(3);
        state.ship.pos = Vec2::new(state.ship.size + 1.0, 300.0);
        state.ship.vel = Vec2::new(-500.0, 0.0);
        integrate_ship(&mut state, &ControlInput::default(), DT);
        assert_eq!(state.ship.pos.x, state.ship.size);
        assert!(state.ship.vel.x > 0.0);
        // Soft bounce keeps only a fraction of the speed
        assert!(state.ship.vel.x < 500.0 * state.config.ship_wall_restitution + 1.0);
    }

    #[test]
    fn comet_moves_and_stays_in_bounds() {
        let mut state = world(4);
        state.comets.clear();
        spawn::spawn_comet(
            &mut state,
            3,
            Some(Vec2::new(100.0, 100.0)),
            Some(Vec2::ZERO),
        );
        // Zero velocity stays zero (floor only applies once moving)
        integrate_comets(&mut state, DT);
        assert_eq!(state.comets[0].vel, Vec2::ZERO);
        assert_eq!(state.comets[0].pos, Vec2::new(100.0, 100.0));

        // Nudge it: the floor kicks in and the comet moves its way
        state.comets[0].vel = Vec2::new(1.0, 0.0);
        integrate_comets(&mut state, DT);
        let comet = &state.comets[0];
        assert!(comet.vel.length() >= state.config.comet_min_speed - 0.01);
        assert!(comet.pos.x > 100.0);
        assert!(comet.pos.x >= comet.radius);
        assert!(comet.pos.x <= state.config.screen_width - comet.radius);
    }

    #[test]
    fn comet_reflects_elastically_at_edges() {
        let mut state = world(5);
        state.comets.clear();
        spawn::spawn_comet(
            &mut state,
            3,
            Some(Vec2::new(20.0, 300.0)),
            Some(Vec2::new(-400.0, 0.0)),
        );
        integrate_comets(&mut state, DT);
        let comet = &state.comets[0];
        assert_eq!(comet.pos.x, comet.radius);
        assert!(comet.vel.x > 0.0);
    }

    #[test]
    fn comet_trail_is_bounded() {
        let mut state = world(6);
        state.comets.clear();
        spawn::spawn_comet(
            &mut state,
            3,
            Some(Vec2::new(600.0, 300.0)),
            Some(Vec2::new(300.0, 0.0)),
        );
        for _ in 0..200 {
            integrate_comets(&mut state, DT);
        }
        assert_eq!(state.comets[0].trail.len(), TRAIL_LENGTH);
    }

    #[test]
    fn big_comet_is_culled_once_fully_off_screen() {
        let mut state = world(7);
        state.big_comets.clear();
        spawn::spawn_big_comet(&mut state);
        let radius = state.big_comets[0].radius;
        state.big_comets[0].pos = Vec2::new(-radius - 1.0, 300.0);
        state.big_comets[0].vel = Vec2::new(-10.0, 0.0);
        integrate_big_comets(&mut state, DT);
        assert!(state.big_comets.is_empty());
    }

    #[test]
    fn bullets_are_culled_off_screen() {
        let mut state = world(8);
        state.bullets.push(Bullet {
            pos: Vec2::new(1279.0, 300.0),
            vel: Vec2::new(600.0, 0.0),
            radius: 4.0,
        });
        state.bullets.push(Bullet {
            pos: Vec2::new(600.0, 300.0),
            vel: Vec2::new(600.0, 0.0),
            radius: 4.0,
        });
        integrate_bullets(&mut state, DT);
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn power_up_expires_and_bounces() {
        let mut state = world(9);
        state.power_ups.push(PowerUp {
            pos: Vec2::new(31.0, 300.0),
            vel: Vec2::new(-100.0, 0.0),
            lifetime: 10.0,
            radius: 30.0,
        });
        integrate_power_ups(&mut state, DT);
        assert_eq!(state.power_ups[0].pos.x, 30.0);
        assert!(state.power_ups[0].vel.x > 0.0);

        state.power_ups[0].lifetime = 0.01;
        integrate_power_ups(&mut state, DT);
        assert!(state.power_ups.is_empty());
    }

    #[test]
    fn particles_shrink_and_expire() {
        let mut state = world(10);
        state.create_small_explosion(Vec2::new(100.0, 100.0));
        let initial_size = state.explosion_particles[0].size;
        update_explosion_particles(&mut state, DT);
        assert!(state.explosion_particles[0].size < initial_size);

        for _ in 0..100 {
            update_explosion_particles(&mut state, DT);
        }
        assert!(state.explosion_particles.is_empty());
    }

    proptest! {
        #[test]
        fn moving_comet_never_drops_below_floor(
            speed in 0.1f32..5000.0,
            angle in 0.0f32..std::f32::consts::TAU,
        ) {
            let mut state = world(11);
            state.comets.clear();
            spawn::spawn_comet(
                &mut state,
                3,
                Some(Vec2::new(640.0, 360.0)),
                Some(vec_from_angle(angle) * speed),
            );
            for _ in 0..20 {
                integrate_comets(&mut state, DT);
                let after = state.comets[0].vel.length();
                prop_assert!(after >= state.config.comet_min_speed - 0.01);
            }
        }

        #[test]
        fn comet_position_stays_within_bounds(
            x in 0.0f32..1280.0,
            y in 0.0f32..720.0,
            angle in 0.0f32..std::f32::consts::TAU,
        ) {
            let mut state = world(12);
            state.comets.clear();
            spawn::spawn_comet(
                &mut state,
                2,
                Some(Vec2::new(x, y)),
                Some(vec_from_angle(angle) * 600.0),
            );
            for _ in 0..50 {
                integrate_comets(&mut state, DT);
                let comet = &state.comets[0];
                prop_assert!(comet.pos.x >= comet.radius - 0.01);
                prop_assert!(comet.pos.x <= state.config.screen_width - comet.radius + 0.01);
                prop_assert!(comet.pos.y >= comet.radius - 0.01);
                prop_assert!(comet.pos.y <= state.config.screen_height - comet.radius + 0.01);
            }
        }
    }
}
