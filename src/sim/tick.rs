//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. One call to
//! [`tick`] is one frame at [`crate::consts::FPS`]; all velocities are
//! already expressed in pixels per tick.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::{circles_overlap, point_in_circle, wrap_position};
use super::state::{
    AsteroidTier, GameEvent, GamePhase, GameState, Laser, PendingEvent, Ship,
};
use crate::consts::BELT_PLACEMENT_ATTEMPTS;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Turn counter-clockwise
    pub rotate_left: bool,
    /// Turn clockwise
    pub rotate_right: bool,
    pub thrust: bool,
    /// A new fire press happened since the previous tick (already edge-detected)
    pub fire: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    process_pending(state);

    update_asteroids(state);

    if state.phase == GamePhase::GameOver {
        return;
    }

    update_lasers(state);

    if !state.ship.dead {
        update_ship(state, input);
        check_ship_collisions(state);
    }
}

/// Fire timed respawn / game-over events whose deadline has arrived
fn process_pending(state: &mut GameState) {
    let Some(event) = state.pending else { return };
    if state.time_ticks < event.at_tick() {
        return;
    }
    state.pending = None;

    match event {
        PendingEvent::Respawn { .. } => {
            state.ship = Ship::new(state.field, &state.tuning);
            state.events.push(GameEvent::ShipRespawned);
            log::info!("Ship respawned ({} lives left)", state.lives);
        }
        PendingEvent::EndGame { .. } => {
            state.phase = GamePhase::GameOver;
            state.lasers.clear();
            state.events.push(GameEvent::GameOver { score: state.score });
            log::info!(
                "Game over: score {} at level {}",
                state.score,
                state.level
            );
        }
    }
}

fn update_asteroids(state: &mut GameState) {
    let field = state.field;
    for asteroid in &mut state.asteroids {
        asteroid.pos = wrap_position(asteroid.pos + asteroid.vel, asteroid.radius, field);
    }
}

/// Move lasers, resolve laser/asteroid hits and expire spent lasers
fn update_lasers(state: &mut GameState) {
    let field = state.field;
    let max_dist = state.tuning.laser_dist * field.x;

    let mut i = 0;
    while i < state.lasers.len() {
        let laser = &mut state.lasers[i];
        laser.pos += laser.vel;
        laser.dist += laser.vel.length();
        let pos = laser.pos;

        // Newest asteroid first
        let hit = state
            .asteroids
            .iter()
            .rposition(|a| point_in_circle(pos, a.pos, a.radius));
        if let Some(index) = hit {
            state.lasers.remove(i);
            destroy_asteroid(state, index);
            continue;
        }

        let laser = &mut state.lasers[i];
        if laser.dist > max_dist {
            state.lasers.remove(i);
            continue;
        }
        laser.pos = wrap_position(laser.pos, 0.0, field);
        i += 1;
    }
}

/// Remove an asteroid, spawn its fragments, score it, and roll the level
/// over if the field is now clear
pub fn destroy_asteroid(state: &mut GameState, index: usize) {
    let asteroid = state.asteroids.remove(index);
    let tier = asteroid.tier;

    if let Some(fragment) = tier.split() {
        state.spawn_asteroid(asteroid.pos, fragment);
        state.spawn_asteroid(asteroid.pos, fragment);
    }

    let points = tier.points();
    state.events.push(GameEvent::AsteroidDestroyed { tier, points });
    state.add_score(points);
    log::debug!(
        "{:?} asteroid destroyed at ({:.0}, {:.0}), score {}",
        tier,
        asteroid.pos.x,
        asteroid.pos.y,
        state.score
    );

    if state.asteroids.is_empty() {
        state.level += 1;
        state.events.push(GameEvent::LevelCleared { level: state.level });
        log::info!("Level cleared, entering level {}", state.level);
        generate_belt(state);
    }
}

fn update_ship(state: &mut GameState, input: &TickInput) {
    let tuning = &state.tuning;
    let ship = &mut state.ship;

    ship.update_blink(tuning.ship_blink_ticks);

    let turn = tuning.turn_per_tick();
    if input.rotate_left {
        ship.angle += turn;
    }
    if input.rotate_right {
        ship.angle -= turn;
    }
    ship.angle = ship.angle.rem_euclid(std::f32::consts::TAU);

    if input.thrust {
        ship.vel += crate::heading(ship.angle) * tuning.thrust_per_tick();
    } else {
        ship.vel -= ship.vel * tuning.friction_per_tick();
    }

    if input.fire {
        fire_laser(state);
    }

    let ship = &mut state.ship;
    ship.pos = wrap_position(ship.pos + ship.vel, ship.radius, state.field);
}

/// Spawn a laser at the ship's nose. Returns false (and does nothing) when
/// the ship is dead or the laser cap is reached.
pub fn fire_laser(state: &mut GameState) -> bool {
    if state.ship.dead || state.lasers.len() >= state.tuning.laser_max {
        return false;
    }

    let vel = crate::heading(state.ship.angle) * state.tuning.laser_speed_per_tick();
    state.lasers.push(Laser::new(state.ship.nose(), vel));
    state.events.push(GameEvent::LaserFired);
    true
}

fn check_ship_collisions(state: &mut GameState) {
    let ship = &state.ship;
    if ship.is_invulnerable() {
        return;
    }

    let hit = state
        .asteroids
        .iter()
        .any(|a| circles_overlap(ship.pos, ship.radius, a.pos, a.radius));
    if hit {
        explode_ship(state);
    }
}

/// Kill the ship and schedule either a respawn or the end of the session
fn explode_ship(state: &mut GameState) {
    state.ship.dead = true;
    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::ShipDestroyed);
    state.events.push(GameEvent::LivesChanged(state.lives));

    state.pending = Some(if state.lives == 0 {
        PendingEvent::EndGame {
            at_tick: state.time_ticks.saturating_add(state.tuning.game_over_delay_ticks),
        }
    } else {
        PendingEvent::Respawn {
            at_tick: state.time_ticks.saturating_add(state.tuning.respawn_delay_ticks),
        }
    });

    log::info!("Ship destroyed, {} lives left", state.lives);
}

/// Replace the asteroid list with a fresh belt of large asteroids for the
/// current level, kept clear of the ship
pub fn generate_belt(state: &mut GameState) {
    state.asteroids.clear();

    let count = state.tuning.asteroid_num.saturating_add(state.level);
    let safe_distance = state.tuning.belt_safe_distance();

    for _ in 0..count {
        let pos = pick_belt_position(&mut state.rng, state.field, state.ship.pos, safe_distance);
        state.spawn_asteroid(pos, AsteroidTier::Large);
    }

    log::info!(
        "Level {} belt: {} asteroids, speed x{:.1}",
        state.level,
        count,
        1.0 + state.level as f32 * crate::consts::LEVEL_SPEED_STEP
    );
}

/// Rejection-sample a spawn point at least `safe_distance` from the ship.
/// Gives up after a fixed number of attempts and uses the farthest
/// candidate seen.
fn pick_belt_position(rng: &mut Pcg32, field: Vec2, ship_pos: Vec2, safe_distance: f32) -> Vec2 {
    let mut farthest: Option<(Vec2, f32)> = None;

    for _ in 0..BELT_PLACEMENT_ATTEMPTS {
        let candidate = Vec2::new(
            (rng.random::<f32>() * field.x).floor(),
            (rng.random::<f32>() * field.y).floor(),
        );
        let distance = candidate.distance(ship_pos);
        if distance >= safe_distance {
            return candidate;
        }
        if farthest.is_none_or(|(_, best)| distance > best) {
            farthest = Some((candidate, distance));
        }
    }

    log::warn!(
        "No belt position {:.0}px clear of the ship in a {:.0}x{:.0} field",
        safe_distance,
        field.x,
        field.y
    );
    farthest.map_or(Vec2::ZERO, |(pos, _)| pos)
}
