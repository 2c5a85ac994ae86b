//! Scene assembly: turns a [`GameState`] into one triangle list

use glam::Vec2;

use super::shapes::{circle, glowing_outline};
use super::vertex::{Vertex, colors};
use crate::sim::{GameState, Laser, Ship};

/// Stroke width for outlines (pixels)
pub const LINE_WIDTH: f32 = 2.0;
/// Extra halo width around asteroid outlines
pub const ASTEROID_GLOW: f32 = 10.0;
/// Extra halo width around the ship outline
pub const SHIP_GLOW: f32 = 15.0;

const LASER_SEGMENTS: u32 = 8;
const EXPLOSION_SEGMENTS: u32 = 24;

/// Ship triangle: nose, then the two swept-back corners
pub fn ship_points(ship: &Ship) -> [Vec2; 3] {
    let (sin, cos) = ship.angle.sin_cos();
    let r = ship.radius;
    let Vec2 { x, y } = ship.pos;

    [
        ship.nose(),
        Vec2::new(
            x - r * (2.0 / 3.0 * cos + sin),
            y + r * (2.0 / 3.0 * sin - cos),
        ),
        Vec2::new(
            x - r * (2.0 / 3.0 * cos - sin),
            y + r * (2.0 / 3.0 * sin + cos),
        ),
    ]
}

/// Build every vertex for the current frame
pub fn build_scene(state: &GameState) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(
        state.asteroids.len() * 15 * 12 + state.lasers.len() * LASER_SEGMENTS as usize * 3 + 36,
    );

    for asteroid in &state.asteroids {
        vertices.extend(glowing_outline(
            &asteroid.outline(),
            LINE_WIDTH,
            ASTEROID_GLOW,
            colors::ASTEROID,
        ));
    }

    let ship = &state.ship;
    if ship.dead {
        vertices.extend(circle(
            ship.pos,
            ship.radius * 1.5,
            colors::EXPLOSION,
            EXPLOSION_SEGMENTS,
        ));
    } else if ship.blink_on() {
        vertices.extend(glowing_outline(
            &ship_points(ship),
            LINE_WIDTH,
            SHIP_GLOW,
            colors::SHIP,
        ));
    }

    for laser in &state.lasers {
        vertices.extend(circle(laser.pos, Laser::RADIUS, colors::LASER, LASER_SEGMENTS));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::AsteroidTier;

    fn quiet_state() -> GameState {
        let mut state = GameState::new(8, Vec2::new(800.0, 600.0));
        state.asteroids.clear();
        state
    }

    #[test]
    fn test_ship_points_nose_up() {
        let state = quiet_state();
        let [nose, left, right] = ship_points(&state.ship);
        let pos = state.ship.pos;
        assert!(nose.y < pos.y);
        // Aft corners sit behind and either side of the centre
        assert!(left.y > pos.y && right.y > pos.y);
        assert!((left.x - pos.x) * (right.x - pos.x) < 0.0);
    }

    #[test]
    fn test_ship_hidden_during_off_blink() {
        let mut state = quiet_state();
        state.ship.blink_num = 5;
        assert!(build_scene(&state).is_empty());

        state.ship.blink_num = 4;
        let shown = build_scene(&state);
        // Halo + core, three edges each
        assert_eq!(shown.len(), 2 * 3 * 6);
        assert!(shown.iter().all(|v| v.color[..3] == colors::SHIP[..3]));
    }

    #[test]
    fn test_dead_ship_draws_explosion() {
        let mut state = quiet_state();
        state.ship.dead = true;
        let vertices = build_scene(&state);
        assert_eq!(vertices.len(), (EXPLOSION_SEGMENTS * 3) as usize);
        assert!(vertices.iter().all(|v| v.color == colors::EXPLOSION));
    }

    #[test]
    fn test_asteroids_and_lasers() {
        let mut state = quiet_state();
        state.ship.dead = true;
        state.spawn_asteroid(Vec2::new(100.0, 100.0), AsteroidTier::Large);
        state.lasers.push(Laser::new(Vec2::new(50.0, 50.0), Vec2::ZERO));

        let n = state.asteroids[0].vertex_count();
        let vertices = build_scene(&state);
        let expected = 2 * n * 6
            + (EXPLOSION_SEGMENTS * 3) as usize
            + (LASER_SEGMENTS * 3) as usize;
        assert_eq!(vertices.len(), expected);
    }
}
