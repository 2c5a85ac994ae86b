//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Timed events counted in ticks, never wall-clock time
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, point_in_circle, wrap_position};
pub use state::{
    Asteroid, AsteroidTier, GameEvent, GamePhase, GameState, Laser, PendingEvent, Ship,
};
pub use tick::{TickInput, destroy_asteroid, fire_laser, generate_belt, tick};
