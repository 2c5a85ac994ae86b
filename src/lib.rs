//! Neon Asteroids - A vector asteroids arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Input edge tracking and fixed-step clock
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation rate. Every per-second tuning value is divided by this.
    pub const FPS: f32 = 60.0;
    /// Fixed simulation timestep (seconds per tick)
    pub const SIM_DT: f32 = 1.0 / FPS;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest real frame time fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Canvas takes this fraction of the viewport in each dimension
    pub const VIEWPORT_FRACTION: f64 = 0.8;
    /// Field size used before the first canvas measurement (and natively)
    pub const DEFAULT_FIELD_WIDTH: f32 = 1024.0;
    pub const DEFAULT_FIELD_HEIGHT: f32 = 768.0;

    /// Ship defaults
    pub const SHIP_SIZE: f32 = 20.0;
    /// Acceleration while thrusting (pixels/s²)
    pub const SHIP_THRUST: f32 = 5.0;
    /// Degrees per second
    pub const SHIP_TURN_SPEED: f32 = 360.0;
    /// Velocity damping coefficient per second when not thrusting
    pub const FRICTION: f32 = 0.7;
    /// Ticks per blink phase of the invulnerability window
    pub const SHIP_BLINK_TICKS: u32 = 30;
    /// Blink phases after (re)spawn
    pub const SHIP_BLINK_COUNT: u32 = 5;
    pub const STARTING_LIVES: u32 = 3;
    /// 1.5 s at 60 Hz
    pub const RESPAWN_DELAY_TICKS: u64 = 90;
    /// 1.0 s at 60 Hz
    pub const GAME_OVER_DELAY_TICKS: u64 = 60;

    /// Laser defaults
    pub const LASER_MAX: usize = 10;
    /// Pixels per second
    pub const LASER_SPEED: f32 = 500.0;
    /// Max travel as a fraction of field width
    pub const LASER_DIST: f32 = 0.6;
    pub const LASER_RADIUS: f32 = 2.0;

    /// Asteroid defaults
    pub const ASTEROID_NUM: u32 = 3;
    /// Diameter of a large asteroid
    pub const ASTEROID_SIZE: f32 = 100.0;
    /// Max speed per axis (pixels/s) at level 0
    pub const ASTEROID_SPEED: f32 = 50.0;
    /// Average vertex count
    pub const ASTEROID_VERT: u32 = 10;
    /// Vertex radius jitter (0 = perfect polygon)
    pub const ASTEROID_JAG: f32 = 0.4;
    /// Speed multiplier gained per level
    pub const LEVEL_SPEED_STEP: f32 = 0.1;
    /// Placement attempts before falling back to the farthest candidate
    pub const BELT_PLACEMENT_ATTEMPTS: u32 = 64;
}

/// Unit vector for a ship-style heading on a y-down canvas
/// (angle 0 points right, π/2 points up the screen)
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), -angle.sin())
}

/// Unit vector for a polygon-style angle on a y-down canvas
/// (angle increases clockwise on screen)
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_heading_up_is_negative_y() {
        let up = heading(FRAC_PI_2);
        assert!(up.x.abs() < 1e-6);
        assert!((up.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_direction_is_unit() {
        for i in 0..16 {
            let d = direction(i as f32 * 0.4);
            assert!((d.length() - 1.0).abs() < 1e-5);
        }
    }
}
