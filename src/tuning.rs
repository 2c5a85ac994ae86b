//! Data-driven game balance
//!
//! Defaults come from [`crate::consts`]. A JSON document may override any
//! subset of fields; missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Below this the three tier radii start to coincide
const MIN_ASTEROID_SIZE: f32 = 16.0;
const MAX_ASTEROID_VERT: u32 = 64;
const MAX_ASTEROID_NUM: u32 = 100;
/// Five minutes at 60 Hz
const MAX_DELAY_TICKS: u64 = 5 * 60 * 60;

/// Errors raised while loading tuning overrides
#[derive(Debug, Error)]
pub enum TuningError {
    /// The override document is not valid JSON for [`Tuning`]
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field is outside the range the simulation supports
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay constants. Speeds are per second, converted to per-tick with
/// [`FPS`] by the helper methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub ship_size: f32,
    pub ship_thrust: f32,
    /// Degrees per second
    pub ship_turn_speed: f32,
    pub friction: f32,
    pub ship_blink_ticks: u32,
    pub ship_blink_count: u32,
    pub starting_lives: u32,
    pub respawn_delay_ticks: u64,
    pub game_over_delay_ticks: u64,

    pub laser_max: usize,
    pub laser_speed: f32,
    /// Fraction of field width a laser may travel
    pub laser_dist: f32,

    pub asteroid_num: u32,
    pub asteroid_size: f32,
    pub asteroid_speed: f32,
    pub asteroid_vert: u32,
    pub asteroid_jag: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ship_size: SHIP_SIZE,
            ship_thrust: SHIP_THRUST,
            ship_turn_speed: SHIP_TURN_SPEED,
            friction: FRICTION,
            ship_blink_ticks: SHIP_BLINK_TICKS,
            ship_blink_count: SHIP_BLINK_COUNT,
            starting_lives: STARTING_LIVES,
            respawn_delay_ticks: RESPAWN_DELAY_TICKS,
            game_over_delay_ticks: GAME_OVER_DELAY_TICKS,

            laser_max: LASER_MAX,
            laser_speed: LASER_SPEED,
            laser_dist: LASER_DIST,

            asteroid_num: ASTEROID_NUM,
            asteroid_size: ASTEROID_SIZE,
            asteroid_speed: ASTEROID_SPEED,
            asteroid_vert: ASTEROID_VERT,
            asteroid_jag: ASTEROID_JAG,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON override document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Parse overrides, falling back to defaults (with a warning) on error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning overrides: {}", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |field, reason| Err(TuningError::Invalid { field, reason });

        if !(self.ship_size > 0.0) {
            return invalid("ship_size", "must be positive");
        }
        if !(self.asteroid_size >= MIN_ASTEROID_SIZE) {
            return invalid("asteroid_size", "must be at least 16");
        }
        if self.ship_thrust < 0.0 || self.ship_turn_speed < 0.0 {
            return invalid("ship_thrust", "ship speeds must not be negative");
        }
        if !(0.0..=FPS).contains(&self.friction) {
            return invalid("friction", "must be between 0 and FPS");
        }
        if self.ship_blink_ticks == 0 {
            return invalid("ship_blink_ticks", "must be at least 1");
        }
        if self.respawn_delay_ticks > MAX_DELAY_TICKS {
            return invalid("respawn_delay_ticks", "must be at most 18000");
        }
        if self.game_over_delay_ticks > MAX_DELAY_TICKS {
            return invalid("game_over_delay_ticks", "must be at most 18000");
        }
        if self.starting_lives == 0 {
            return invalid("starting_lives", "must be at least 1");
        }
        if self.laser_max == 0 {
            return invalid("laser_max", "must be at least 1");
        }
        if !(self.laser_speed > 0.0) {
            return invalid("laser_speed", "must be positive");
        }
        if !(self.laser_dist > 0.0) {
            return invalid("laser_dist", "must be positive");
        }
        if self.asteroid_speed < 0.0 {
            return invalid("asteroid_speed", "must not be negative");
        }
        // Smallest polygon has asteroid_vert / 2 vertices
        if !(6..=MAX_ASTEROID_VERT).contains(&self.asteroid_vert) {
            return invalid("asteroid_vert", "must be between 6 and 64");
        }
        if self.asteroid_num > MAX_ASTEROID_NUM {
            return invalid("asteroid_num", "must be at most 100");
        }
        if !(0.0..1.0).contains(&self.asteroid_jag) {
            return invalid("asteroid_jag", "must be in [0, 1)");
        }
        Ok(())
    }

    /// Radians turned per tick while a turn key is held
    pub fn turn_per_tick(&self) -> f32 {
        self.ship_turn_speed.to_radians() / FPS
    }

    /// Velocity gained per tick while thrusting
    pub fn thrust_per_tick(&self) -> f32 {
        self.ship_thrust / FPS
    }

    /// Fraction of velocity lost per tick while coasting
    pub fn friction_per_tick(&self) -> f32 {
        self.friction / FPS
    }

    pub fn laser_speed_per_tick(&self) -> f32 {
        self.laser_speed / FPS
    }

    /// Max per-axis asteroid speed per tick at the given level
    pub fn asteroid_speed_per_tick(&self, level: u32) -> f32 {
        self.asteroid_speed * (1.0 + level as f32 * LEVEL_SPEED_STEP) / FPS
    }

    /// Minimum belt spawn distance from the ship
    pub fn belt_safe_distance(&self) -> f32 {
        self.asteroid_size * 2.0 + self.ship_size / 2.0
    }

    /// Inclusive vertex count range for new asteroids
    pub fn vertex_range(&self) -> (usize, usize) {
        let half = self.asteroid_vert / 2;
        (half as usize, self.asteroid_vert.saturating_add(half) as usize)
    }
}
