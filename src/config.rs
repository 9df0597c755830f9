//! Data-driven game tunables
//!
//! Every constant the simulation depends on lives here so the core can run
//! at arbitrary resolutions and difficulty levels. Defaults reproduce the
//! shipped balance.

use serde::{Deserialize, Serialize};

/// Complete set of simulation tunables.
///
/// Owned by the `WorldState`; nothing in the sim reads ambient globals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Spaceship ===
    /// Half-extent used for collision and gun placement (pixels)
    pub ship_size: f32,
    /// Forward thrust (pixels/sec²)
    pub ship_accel: f32,
    /// Reverse thrust and brake deceleration (pixels/sec²)
    pub ship_reverse_accel: f32,
    /// Turn rate (radians/sec)
    pub ship_rot_speed: f32,
    /// Per-frame velocity damping
    pub ship_friction: f32,
    /// Velocity retained (and reversed) when clamped at a screen edge
    pub ship_wall_restitution: f32,
    pub ship_max_hit_points: i32,
    /// Hit flash duration after taking damage (sec)
    pub ship_hit_flash_duration: f32,

    // === Bullets ===
    pub bullet_speed: f32,
    pub bullet_radius: f32,
    /// Cooldown between volleys (sec)
    pub bullet_interval: f32,

    // === Comets ===
    pub comet_speed_min: f32,
    pub comet_speed_max: f32,
    /// Per-frame velocity damping
    pub comet_friction: f32,
    /// Comets never coast below this once moving (pixels/sec)
    pub comet_min_speed: f32,
    pub max_comet_tier: u8,
    /// Radius of a max-tier comet; lower tiers shrink by 0.6 per tier
    pub base_comet_radius: f32,
    /// Randomized spawn interval band (sec)
    pub comet_spawn_min: f32,
    pub comet_spawn_max: f32,
    pub comet_batch_min: u32,
    pub comet_batch_max: u32,
    /// Screen area that maps to a 1.0 batch multiplier (pixels²)
    pub spawn_area_reference: f32,
    /// Radial distance children spawn from a split parent (pixels)
    pub split_offset: f32,
    /// Post-split grace period during which children ignore bullets (sec)
    pub indestructable_grace: f32,
    /// One-time velocity dampening applied to a freshly hit max-tier comet
    pub slow_effect_factor: f32,
    pub slow_effect_duration: f32,
    pub hit_effect_duration: f32,
    /// Seconds between recorded trail points
    pub trail_interval: f32,

    // === Big comets ===
    pub big_comet_interval: f32,
    /// Big comets spawned per interval
    pub big_comet_batch: u32,
    pub big_comet_speed_min: f32,
    pub big_comet_speed_max: f32,
    /// Radius multiplier over `base_comet_radius`
    pub big_comet_scale: f32,

    // === Power-ups ===
    pub powerup_interval: f32,
    pub powerup_lifetime: f32,
    pub powerup_radius: f32,
    pub powerup_heal: i32,

    // === Round ===
    /// Surviving this long with an empty comet pool wins the round (sec)
    pub survival_threshold: f32,
    /// Comet spawning stops past this point (sec)
    pub spawn_cutoff: f32,

    // === Starfield ===
    pub star_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: 1280.0,
            screen_height: 720.0,

            ship_size: 30.0,
            ship_accel: 800.0,
            ship_reverse_accel: 400.0,
            ship_rot_speed: 6.0,
            ship_friction: 0.99,
            ship_wall_restitution: 0.3,
            ship_max_hit_points: 5,
            ship_hit_flash_duration: 0.3,

            bullet_speed: 600.0,
            bullet_radius: 4.0,
            bullet_interval: 0.03,

            comet_speed_min: 400.0,
            comet_speed_max: 700.0,
            comet_friction: 0.998,
            comet_min_speed: 250.0,
            max_comet_tier: 3,
            base_comet_radius: 30.0,
            comet_spawn_min: 2.0,
            comet_spawn_max: 3.0,
            comet_batch_min: 1,
            comet_batch_max: 3,
            spawn_area_reference: 480_000.0,
            split_offset: 50.0,
            indestructable_grace: 0.01,
            slow_effect_factor: 0.66,
            slow_effect_duration: 0.5,
            hit_effect_duration: 0.5,
            trail_interval: 0.05,

            big_comet_interval: 25.0,
            big_comet_batch: 1,
            big_comet_speed_min: 150.0,
            big_comet_speed_max: 200.0,
            big_comet_scale: 5.5,

            powerup_interval: 15.0,
            powerup_lifetime: 10.0,
            powerup_radius: 30.0,
            powerup_heal: 3,

            survival_threshold: 60.0,
            spawn_cutoff: 90.0,

            star_count: 500,
        }
    }
}

impl Config {
    /// Comet radius for a tier: shrinks by 0.6 per tier below the max.
    pub fn comet_radius(&self, tier: u8) -> f32 {
        self.base_comet_radius * 0.6_f32.powi((self.max_comet_tier - tier) as i32)
    }

    /// Starting hit points for a comet tier.
    pub fn comet_hit_points(&self, tier: u8) -> i32 {
        match tier {
            3 => 5,
            2 => 4,
            _ => 3,
        }
    }

    /// Radius of a big comet.
    pub fn big_comet_radius(&self) -> f32 {
        self.base_comet_radius * self.big_comet_scale
    }

    /// Batch multiplier for comet spawns, scaled by screen area and
    /// clamped to [0.5, 2.0].
    pub fn spawn_scale(&self) -> f32 {
        let area = self.screen_width * self.screen_height;
        (area / self.spawn_area_reference).clamp(0.5, 2.0)
    }

    /// Load a config from a JSON file, falling back to defaults on any
    /// error. Bad config is logged, never fatal.
    pub fn load_or_default(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {path}");
                    config
                }
                Err(e) => {
                    log::warn!("Invalid config in {path}: {e}; using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {path}: {e}; using defaults");
                Self::default()
            }
        }
    }
}
