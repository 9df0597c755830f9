//! Game state and core simulation types
//!
//! Every entity pool, timer, and counter the simulation touches lives on
//! [`WorldState`]; there are no ambient globals. Entities are plain value
//! structs owned exclusively by their pool - relationships between them are
//! recomputed from positions each frame.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::shape::ShapePoint;
use super::spawn;
use crate::config::Config;

/// Current screen of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Menu,
    Settings,
    /// Active round
    Playing,
    /// Ship destroyed - terminal until restart
    GameOver,
    /// Survival threshold reached with an empty comet pool - terminal
    Win,
}

/// Sounds the presentation layer is asked to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundKind {
    Fire,
    Hit,
    Explosion,
    PowerUp,
    Victory,
    Defeat,
}

/// Fire-and-forget notifications for the presentation layer.
///
/// Purely informational; dropping them never affects the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PlaySound(SoundKind),
    ScoreDelta(u32),
}

pub const COMET_COLOR: [u8; 4] = [80, 80, 80, 255];
pub const BIG_COMET_COLOR: [u8; 4] = [205, 127, 50, 255];
pub const EXPLOSION_COLOR: [u8; 4] = [255, 161, 0, 255];

/// Maximum number of trail points a comet keeps
pub const TRAIL_LENGTH: usize = 5;

/// The player's ship
#[derive(Debug, Clone)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing angle (radians)
    pub angle: f32,
    pub size: f32,
    pub hit_points: i32,
    pub hit_flash_timer: f32,
}

impl Ship {
    /// Fresh ship at screen center with full hit points.
    pub fn new(config: &Config) -> Self {
        Self {
            pos: Vec2::new(config.screen_width / 2.0, config.screen_height / 2.0),
            vel: Vec2::ZERO,
            angle: 0.0,
            size: config.ship_size,
            hit_points: config.ship_max_hit_points,
            hit_flash_timer: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// A splitting comet. Tier 3 is the largest; destruction of tier > 1
/// spawns a batch of the tier below.
#[derive(Debug, Clone)]
pub struct Comet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub tier: u8,
    pub color: [u8; 4],
    pub hit_points: i32,
    /// Visual flash after absorbing a bullet
    pub hit_effect_timer: f32,
    /// Dampening already applied this window (tier 3 only)
    pub slow_effect_timer: f32,
    /// Post-split grace: immune to bullets while > 0
    pub indestructable_timer: f32,
    /// Recent positions, newest last, capped at [`TRAIL_LENGTH`]
    pub trail: Vec<Vec2>,
    pub trail_timer: f32,
    pub shape: Vec<ShapePoint>,
    pub rotation_speed: f32,
}

/// Large indestructible hazard. Crosses the screen once and is culled
/// when fully outside; never bounces off edges, never takes damage.
#[derive(Debug, Clone)]
pub struct BigComet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: [u8; 4],
    pub shape: Vec<ShapePoint>,
    pub rotation_speed: f32,
}

#[derive(Debug, Clone)]
pub struct PowerUp {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds until despawn
    pub lifetime: f32,
    pub radius: f32,
}

#[derive(Debug, Clone)]
pub struct ExplosionParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub lifetime: f32,
    pub size: f32,
    pub color: [u8; 4],
}

/// Muzzle-flash line drawn at the ship's nose for a fraction of a second
#[derive(Debug, Clone)]
pub struct Spark {
    /// Absolute angle of the spark line
    pub angle: f32,
    pub length: f32,
    pub lifetime: f32,
}

/// Background star. Position is fixed for the life of the process; the
/// flickering ones oscillate their size.
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub base_size: f32,
    pub flicker: bool,
    pub size_variation: f32,
    pub size_speed: f32,
    pub size_time: f32,
}

/// Complete world state, advanced by [`super::tick`].
///
/// All fields are public: the struct itself is the per-frame snapshot the
/// presentation layer reads.
#[derive(Debug, Clone)]
pub struct WorldState {
    pub config: Config,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,

    pub phase: GamePhase,
    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    pub sparks: Vec<Spark>,
    pub comets: Vec<Comet>,
    pub big_comets: Vec<BigComet>,
    pub power_ups: Vec<PowerUp>,
    pub explosion_particles: Vec<ExplosionParticle>,
    pub stars: Vec<Star>,

    /// Elapsed round time (sec); only advances while Playing
    pub game_time: f32,
    pub score: u32,
    /// One-shot latch so the win celebration fires once per round
    pub win_triggered: bool,

    pub bullet_cooldown: f32,
    pub comet_spawn_timer: f32,
    /// Threshold the comet spawn timer must pass, redrawn per batch
    pub next_comet_spawn: f32,
    pub big_comet_spawn_timer: f32,
    pub powerup_spawn_timer: f32,

    /// Pending notifications; drained by the caller each frame
    pub events: Vec<GameEvent>,
}

impl WorldState {
    /// Build a world in the menu phase with a seeded RNG, a fresh
    /// starfield, and one comet already drifting behind the menu.
    pub fn new(config: Config, seed: u64) -> Self {
        let mut state = Self {
            ship: Ship::new(&config),
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            bullets: Vec::new(),
            sparks: Vec::new(),
            comets: Vec::new(),
            big_comets: Vec::new(),
            power_ups: Vec::new(),
            explosion_particles: Vec::new(),
            stars: Vec::new(),
            game_time: 0.0,
            score: 0,
            win_triggered: false,
            bullet_cooldown: 0.0,
            comet_spawn_timer: 0.0,
            next_comet_spawn: 0.0,
            big_comet_spawn_timer: 0.0,
            powerup_spawn_timer: 0.0,
            events: Vec::new(),
        };
        state.next_comet_spawn = state
            .rng
            .random_range(state.config.comet_spawn_min..state.config.comet_spawn_max);
        let tier = state.config.max_comet_tier;
        spawn::init_starfield(&mut state);
        spawn::spawn_comet(&mut state, tier, None, None);
        state
    }

    /// Queue a sound request for the presentation layer.
    pub fn push_sound(&mut self, kind: SoundKind) {
        self.events.push(GameEvent::PlaySound(kind));
    }

    /// Add to the score and notify the presentation layer.
    pub fn add_score(&mut self, delta: u32) {
        self.score += delta;
        self.events.push(GameEvent::ScoreDelta(delta));
    }

    /// Take all pending events, leaving the queue empty.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Menu -> Playing. Score, round clock, and the win latch reset; the
    /// pools are left alone, so the menu-time comet carries into the round.
    pub fn start_game(&mut self) {
        if self.phase == GamePhase::Menu {
            log::info!("Round started");
            self.phase = GamePhase::Playing;
            self.score = 0;
            self.game_time = 0.0;
            self.win_triggered = false;
        }
    }

    /// Menu <-> Settings.
    pub fn open_settings(&mut self) {
        if self.phase == GamePhase::Menu || self.phase == GamePhase::Playing {
            self.phase = GamePhase::Settings;
        }
    }

    pub fn return_to_menu(&mut self) {
        if self.phase == GamePhase::Settings {
            self.phase = GamePhase::Menu;
        }
    }

    /// GameOver/Win -> Menu with a full world reset.
    pub fn restart_game(&mut self) {
        if self.phase == GamePhase::GameOver || self.phase == GamePhase::Win {
            log::info!("World reset (final score {})", self.score);
            self.reset();
        }
    }

    /// Reinitialize everything: ship, pools, timers, score, starfield,
    /// plus the single initial comet.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Menu;
        self.ship = Ship::new(&self.config);

        self.bullets.clear();
        self.sparks.clear();
        self.comets.clear();
        self.big_comets.clear();
        self.explosion_particles.clear();
        self.power_ups.clear();
        self.events.clear();

        self.bullet_cooldown = 0.0;
        self.comet_spawn_timer = 0.0;
        self.next_comet_spawn = self
            .rng
            .random_range(self.config.comet_spawn_min..self.config.comet_spawn_max);
        self.big_comet_spawn_timer = 0.0;
        self.powerup_spawn_timer = 0.0;
        self.score = 0;
        self.game_time = 0.0;
        self.win_triggered = false;

        let tier = self.config.max_comet_tier;
        spawn::spawn_comet(self, tier, None, None);
        spawn::init_starfield(self);
    }

    /// Small burst of particles at a destroyed comet.
    pub fn create_small_explosion(&mut self, pos: Vec2) {
        self.push_sound(SoundKind::Explosion);
        for _ in 0..10 {
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let speed = self.rng.random_range(50.0..150.0);
            let particle = ExplosionParticle {
                pos,
                vel: crate::vec_from_angle(angle) * speed,
                lifetime: self.rng.random_range(0.3..0.7),
                size: self.rng.random_range(2.0..4.0),
                color: EXPLOSION_COLOR,
            };
            self.explosion_particles.push(particle);
        }
    }

    /// Large burst used for the ship's death and the win celebration.
    pub fn create_huge_explosion(&mut self, pos: Vec2) {
        self.push_sound(SoundKind::Explosion);
        for _ in 0..50 {
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let speed = self.rng.random_range(100.0..300.0);
            let particle = ExplosionParticle {
                pos,
                vel: crate::vec_from_angle(angle) * speed,
                lifetime: self.rng.random_range(0.8..1.5),
                size: self.rng.random_range(5.0..10.0),
                color: EXPLOSION_COLOR,
            };
            self.explosion_particles.push(particle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> WorldState {
        WorldState::new(Config::default(), 42)
    }

    #[test]
    fn new_world_starts_in_menu_with_one_comet() {
        let state = world();
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.comets.len(), 1);
        assert_eq!(state.comets[0].tier, 3);
        assert_eq!(state.stars.len(), state.config.star_count);
        assert_eq!(state.ship.hit_points, 5);
    }

    #[test]
    fn start_game_resets_round_but_keeps_pools() {
        let mut state = world();
        state.score = 123;
        state.game_time = 45.0;
        state.win_triggered = true;
        state.start_game();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.game_time, 0.0);
        assert!(!state.win_triggered);
        // The menu-time comet is still there
        assert_eq!(state.comets.len(), 1);
    }

    #[test]
    fn restart_resets_everything() {
        let mut state = world();
        state.start_game();
        state.ship.hit_points = 0;
        state.ship.pos = Vec2::new(10.0, 10.0);
        state.score = 500;
        state.game_time = 77.0;
        state.bullets.push(Bullet {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: 4.0,
        });
        state.phase = GamePhase::GameOver;

        state.restart_game();

        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.score, 0);
        assert_eq!(state.game_time, 0.0);
        assert_eq!(state.ship.hit_points, 5);
        assert_eq!(
            state.ship.pos,
            Vec2::new(
                state.config.screen_width / 2.0,
                state.config.screen_height / 2.0
            )
        );
        assert!(state.bullets.is_empty());
        assert_eq!(state.comets.len(), 1);
    }

    #[test]
    fn restart_is_ignored_outside_terminal_phases() {
        let mut state = world();
        state.start_game();
        state.score = 10;
        state.restart_game();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn settings_round_trip() {
        let mut state = world();
        state.open_settings();
        assert_eq!(state.phase, GamePhase::Settings);
        state.return_to_menu();
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn drain_events_empties_queue() {
        let mut state = world();
        state.push_sound(SoundKind::Fire);
        state.add_score(10);
        assert_eq!(state.score, 10);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::PlaySound(SoundKind::Fire)));
        assert!(events.contains(&GameEvent::ScoreDelta(10)));
        assert!(state.events.is_empty());
    }

    #[test]
    fn same_seed_same_world() {
        let a = WorldState::new(Config::default(), 7);
        let b = WorldState::new(Config::default(), 7);
        assert_eq!(a.comets[0].pos, b.comets[0].pos);
        assert_eq!(a.comets[0].vel, b.comets[0].vel);
        assert_eq!(a.next_comet_spawn, b.next_comet_spawn);
    }
}
