//! Collision detection and combat resolution
//!
//! The tricky part of Splitting Comets: every frame the resolver walks the
//! relevant pool pairs (comet-comet, big-big, big-comet, ship-comet,
//! ship-big, bullet-comet, bullet-big), applies elastic-bounce impulses or
//! damage, and runs the comet split cascade. Detection is plain pairwise
//! distance-vs-radius checks; entity counts stay small enough that O(n²)
//! is the right tool.
//!
//! Every normal here is computed from a center delta, so all paths guard
//! against coincident centers before dividing - a zero-distance pair is
//! skipped for the frame rather than poisoning the state with NaN.

use glam::Vec2;
use rand::Rng;

use super::spawn;
use super::state::{GamePhase, SoundKind, WorldState};
use crate::vec_from_angle;

/// Unit normal from `from` to `to` plus the center distance. `None` when
/// the centers coincide this frame.
#[inline]
fn contact_normal(from: Vec2, to: Vec2) -> Option<(Vec2, f32)> {
    let delta = to - from;
    let dist = delta.length();
    if dist > 0.0 {
        Some((delta / dist, dist))
    } else {
        None
    }
}

/// Comet-vs-comet. Any comet below max tier dies on contact (+5 score
/// each); two max-tier comets exchange a symmetric elastic impulse along
/// the contact normal instead.
pub fn resolve_comet_comet(state: &mut WorldState) {
    let max_tier = state.config.max_comet_tier;
    let mut destroyed: Vec<usize> = Vec::new();

    for i in 0..state.comets.len() {
        for j in (i + 1)..state.comets.len() {
            let (head, tail) = state.comets.split_at_mut(j);
            let c1 = &mut head[i];
            let c2 = &mut tail[0];

            let min_dist = c1.radius + c2.radius;
            let Some((normal, dist)) = contact_normal(c1.pos, c2.pos) else {
                continue;
            };
            if dist >= min_dist {
                continue;
            }

            if c1.tier < max_tier {
                destroyed.push(i);
            }
            if c2.tier < max_tier {
                destroyed.push(j);
            }

            if c1.tier == max_tier && c2.tier == max_tier {
                // Elastic impulse, only while the pair is closing
                let closing = (c1.vel - c2.vel).dot(normal);
                if closing <= 0.0 {
                    continue;
                }
                c1.vel -= closing * normal;
                c2.vel += closing * normal;

                let overlap = min_dist - dist;
                c1.pos -= normal * (overlap / 2.0);
                c2.pos += normal * (overlap / 2.0);
            }
        }
    }

    // One comet can overlap several others in the same frame; collapse the
    // duplicates, then erase from the back so indices stay valid.
    destroyed.sort_unstable_by(|a, b| b.cmp(a));
    destroyed.dedup();
    for index in destroyed {
        let pos = state.comets[index].pos;
        state.comets.remove(index);
        state.create_small_explosion(pos);
        state.add_score(5);
    }
}

/// Big-comet-vs-big-comet and big-comet-vs-comet. Big comets always
/// bounce and are never destroyed; a normal comet caught by one gets a
/// strong velocity reversal.
pub fn resolve_big_comet_collisions(state: &mut WorldState) {
    // Big vs big: symmetric de-overlap, impulse while closing
    for i in 0..state.big_comets.len() {
        for j in (i + 1)..state.big_comets.len() {
            let (head, tail) = state.big_comets.split_at_mut(j);
            let b1 = &mut head[i];
            let b2 = &mut tail[0];

            let min_dist = b1.radius + b2.radius;
            let Some((normal, dist)) = contact_normal(b1.pos, b2.pos) else {
                continue;
            };
            if dist >= min_dist {
                continue;
            }

            let overlap = min_dist - dist;
            b1.pos -= normal * (overlap / 2.0);
            b2.pos += normal * (overlap / 2.0);

            let closing = (b1.vel - b2.vel).dot(normal);
            if closing > 0.0 {
                b1.vel -= closing * normal;
                b2.vel += closing * normal;
            }
        }
    }

    // Big vs normal: the big comet shrugs, the small one rebounds hard
    for big in &mut state.big_comets {
        for comet in &mut state.comets {
            let min_dist = big.radius + comet.radius;
            let Some((normal, dist)) = contact_normal(big.pos, comet.pos) else {
                continue;
            };
            if dist >= min_dist {
                continue;
            }

            let overlap = min_dist - dist;
            comet.pos += normal * (overlap / 2.0);
            big.pos -= normal * (overlap / 2.0);
            comet.vel = -comet.vel * 0.5;
        }
    }
}

/// Ship-vs-comet. Returns `true` when the hit was fatal and the round is
/// over; the orchestrator must stop processing the frame.
pub fn resolve_ship_comet(state: &mut WorldState) -> bool {
    let hit_flash = state.config.ship_hit_flash_duration;

    for index in 0..state.comets.len() {
        let comet = &state.comets[index];
        let min_dist = state.ship.size + comet.radius;
        let Some((normal, dist)) = contact_normal(comet.pos, state.ship.pos) else {
            continue;
        };
        if dist >= min_dist {
            continue;
        }

        let overlap = min_dist - dist;
        state.ship.pos += normal * (overlap / 2.0);
        state.comets[index].pos -= normal * (overlap / 2.0);

        state.ship.vel = -state.ship.vel * 0.5;
        state.comets[index].vel = -state.comets[index].vel * 0.3;

        state.ship.hit_points -= 1;
        state.ship.hit_flash_timer = hit_flash;

        if state.ship.hit_points <= 0 {
            destroy_ship(state);
            return true;
        }
    }
    false
}

/// Ship-vs-big-comet. The ship's collision radius is inflated by 20%
/// against the big hazards; the same factor feeds the overlap so the
/// separation is consistent with the trigger. Returns `true` on a fatal
/// hit.
pub fn resolve_ship_big_comet(state: &mut WorldState) -> bool {
    let hit_flash = state.config.ship_hit_flash_duration;
    let effective_size = state.ship.size * 1.2;

    for index in 0..state.big_comets.len() {
        let big = &state.big_comets[index];
        let min_dist = effective_size + big.radius;
        let Some((normal, dist)) = contact_normal(big.pos, state.ship.pos) else {
            continue;
        };
        if dist >= min_dist {
            continue;
        }

        let overlap = min_dist - dist;
        state.ship.pos += normal * (overlap / 2.0);
        state.ship.vel = -state.ship.vel * 0.5;

        state.ship.hit_points -= 1;
        state.ship.hit_flash_timer = hit_flash;

        if state.ship.hit_points <= 0 {
            destroy_ship(state);
            return true;
        }
    }
    false
}

/// Fatal hit: clamp HP, clear every hazard pool, blow up the ship, and
/// end the round.
fn destroy_ship(state: &mut WorldState) {
    state.ship.hit_points = 0;
    state.comets.clear();
    state.big_comets.clear();
    state.bullets.clear();
    state.sparks.clear();

    let pos = state.ship.pos;
    state.create_huge_explosion(pos);
    log::info!("Ship destroyed at t={:.1}s, score {}", state.game_time, state.score);
    state.phase = GamePhase::GameOver;
    state.push_sound(SoundKind::Defeat);
}

/// Bullet-vs-comet and bullet-vs-big-comet. Each bullet is absorbed by
/// the first comet it overlaps; a comet driven to zero HP explodes and,
/// above tier 1, splits into a batch of smaller comets.
pub fn resolve_bullet_hits(state: &mut WorldState) {
    let max_tier = state.config.max_comet_tier;
    let slow_factor = state.config.slow_effect_factor;
    let slow_duration = state.config.slow_effect_duration;
    let hit_duration = state.config.hit_effect_duration;

    let mut bullet_idx = state.bullets.len();
    while bullet_idx > 0 {
        bullet_idx -= 1;
        let bullet_pos = state.bullets[bullet_idx].pos;
        let mut absorbed = false;

        let mut comet_idx = state.comets.len();
        while comet_idx > 0 {
            comet_idx -= 1;
            let comet = &state.comets[comet_idx];

            // Fresh split children ignore gunfire for a grace period
            if comet.indestructable_timer > 0.0 {
                continue;
            }
            if bullet_pos.distance(comet.pos) >= comet.radius {
                continue;
            }

            absorbed = true;
            state.push_sound(SoundKind::Hit);

            let comet = &mut state.comets[comet_idx];
            comet.hit_points -= 1;
            comet.hit_effect_timer = hit_duration;

            // Max-tier comets get slowed once per hit window
            if comet.tier == max_tier && comet.slow_effect_timer == 0.0 {
                comet.vel *= slow_factor;
                comet.slow_effect_timer = slow_duration;
            }

            if comet.hit_points <= 0 {
                destroy_comet(state, comet_idx);
            }
            break;
        }

        if !absorbed {
            // Big comets soak bullets without taking damage
            for big in &state.big_comets {
                if bullet_pos.distance(big.pos) < big.radius {
                    absorbed = true;
                    break;
                }
            }
        }

        if absorbed {
            state.bullets.remove(bullet_idx);
        }
    }
}

/// Remove a dead comet, with explosion, score, and the split cascade for
/// tiers above 1.
fn destroy_comet(state: &mut WorldState, index: usize) {
    let pos = state.comets[index].pos;
    let tier = state.comets[index].tier;
    let parent_speed = state.comets[index].vel.length();

    state.create_small_explosion(pos);

    if tier > 1 {
        let offset = state.config.split_offset;
        let grace = state.config.indestructable_grace;
        // Uniform float in [2, 6) truncated: 2 to 5 children
        let splits = state.rng.random_range(2.0f32..6.0) as u32;

        for _ in 0..splits {
            let angle = state.rng.random_range(0.0..std::f32::consts::TAU);
            let factor = state.rng.random_range(0.7..0.8);
            let extra = state.rng.random_range(1.2..1.5);
            let speed = parent_speed * factor * extra;
            let direction = vec_from_angle(angle);

            spawn::spawn_comet(
                state,
                tier - 1,
                Some(pos + direction * offset),
                Some(direction * speed),
            );
            // Grace so siblings don't instantly shred each other
            if let Some(child) = state.comets.last_mut() {
                child.indestructable_timer = grace;
            }
        }
    }

    state.add_score(10);
    // Children were appended past `index`, so the parent's slot is intact
    state.comets.remove(index);
}
