//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, threaded through `WorldState`
//! - Single-threaded, frame-synchronous mutation
//! - No rendering or platform dependencies

pub mod collision;
pub mod physics;
pub mod shape;
pub mod spawn;
pub mod state;
pub mod tick;

pub use shape::{ShapePoint, generate_shape, silhouette_factor};
pub use state::{
    BigComet, Bullet, Comet, ExplosionParticle, GameEvent, GamePhase, PowerUp, Ship, SoundKind,
    Spark, Star, WorldState,
};
pub use tick::{ControlInput, tick};
