//! Game state and core simulation types
//!
//! Everything the simulation mutates is owned by [`GameState`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::LASER_RADIUS;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Active gameplay (ship may be dead and awaiting respawn)
    Playing,
    /// Out of lives; waiting for restart
    GameOver,
}

/// Deferred state change, fired at the start of the given tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PendingEvent {
    /// Replace the dead ship with a fresh one
    Respawn { at_tick: u64 },
    /// Enter [`GamePhase::GameOver`]
    EndGame { at_tick: u64 },
}

impl PendingEvent {
    pub fn at_tick(&self) -> u64 {
        match *self {
            PendingEvent::Respawn { at_tick } | PendingEvent::EndGame { at_tick } => at_tick,
        }
    }
}

/// Notifications for the HUD and logs, drained by the frame driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    LaserFired,
    AsteroidDestroyed { tier: AsteroidTier, points: u32 },
    ScoreChanged(u64),
    LivesChanged(u32),
    LevelCleared { level: u32 },
    ShipDestroyed,
    ShipRespawned,
    GameOver { score: u64 },
}

/// Asteroid size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AsteroidTier {
    Large,
    Medium,
    Small,
}

impl AsteroidTier {
    pub const ALL: [AsteroidTier; 3] = [AsteroidTier::Large, AsteroidTier::Medium, AsteroidTier::Small];

    /// Radius for an asteroid of this tier, given the large-asteroid diameter
    pub fn radius(&self, asteroid_size: f32) -> f32 {
        match self {
            AsteroidTier::Large => (asteroid_size / 2.0).ceil(),
            AsteroidTier::Medium => (asteroid_size / 4.0).ceil(),
            AsteroidTier::Small => (asteroid_size / 8.0).ceil(),
        }
    }

    /// Score awarded for destroying an asteroid of this tier
    pub fn points(&self) -> u32 {
        match self {
            AsteroidTier::Large => 20,
            AsteroidTier::Medium => 50,
            AsteroidTier::Small => 100,
        }
    }

    /// Tier of the two fragments spawned on destruction
    pub fn split(&self) -> Option<AsteroidTier> {
        match self {
            AsteroidTier::Large => Some(AsteroidTier::Medium),
            AsteroidTier::Medium => Some(AsteroidTier::Small),
            AsteroidTier::Small => None,
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading in radians (π/2 = nose up)
    pub angle: f32,
    pub radius: f32,
    /// Ticks left in the current blink phase
    pub blink_time: u32,
    /// Blink phases left; collisions are ignored until this reaches 0
    pub blink_num: u32,
    pub dead: bool,
}

impl Ship {
    /// Fresh ship at the centre of the field, nose up, invulnerable
    pub fn new(field: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos: field / 2.0,
            vel: Vec2::ZERO,
            angle: std::f32::consts::FRAC_PI_2,
            radius: tuning.ship_size / 2.0,
            blink_time: tuning.ship_blink_ticks,
            blink_num: tuning.ship_blink_count,
            dead: false,
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.blink_num > 0
    }

    /// Drawn during even blink phases only
    pub fn blink_on(&self) -> bool {
        self.blink_num % 2 == 0
    }

    /// Advance the invulnerability countdown by one tick
    pub fn update_blink(&mut self, blink_ticks: u32) {
        if self.blink_num == 0 {
            return;
        }
        self.blink_time = self.blink_time.saturating_sub(1);
        if self.blink_time == 0 {
            self.blink_time = blink_ticks;
            self.blink_num -= 1;
        }
    }

    /// Tip of the ship, where lasers spawn
    pub fn nose(&self) -> Vec2 {
        self.pos + crate::heading(self.angle) * (4.0 / 3.0 * self.radius)
    }
}

/// A jagged asteroid
#[derive(Debug, Clone, Serialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub tier: AsteroidTier,
    pub radius: f32,
    /// Base rotation of the silhouette (radians)
    pub angle: f32,
    /// Per-vertex radius multipliers, fixed at creation
    pub offsets: Vec<f32>,
}

impl Asteroid {
    /// Create an asteroid with random velocity, facing and silhouette.
    /// `max_speed` is the per-axis speed cap in pixels per tick.
    pub fn random(
        rng: &mut Pcg32,
        pos: Vec2,
        tier: AsteroidTier,
        max_speed: f32,
        tuning: &Tuning,
    ) -> Self {
        let mut axis_speed = || {
            let speed = rng.random::<f32>() * max_speed;
            if rng.random_bool(0.5) { speed } else { -speed }
        };
        let vel = Vec2::new(axis_speed(), axis_speed());
        let angle = rng.random::<f32>() * std::f32::consts::TAU;

        let (min_vert, max_vert) = tuning.vertex_range();
        let vert = rng.random_range(min_vert..=max_vert);
        let jag = tuning.asteroid_jag;
        let offsets = (0..vert)
            .map(|_| 1.0 - jag + rng.random::<f32>() * jag * 2.0)
            .collect();

        Self {
            pos,
            vel,
            tier,
            radius: tier.radius(tuning.asteroid_size),
            angle,
            offsets,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.offsets.len()
    }

    /// Outline vertices in field coordinates
    pub fn outline(&self) -> Vec<Vec2> {
        let n = self.offsets.len() as f32;
        self.offsets
            .iter()
            .enumerate()
            .map(|(i, offset)| {
                let theta = self.angle + i as f32 * std::f32::consts::TAU / n;
                self.pos + crate::direction(theta) * (self.radius * offset)
            })
            .collect()
    }
}

/// A laser bolt
#[derive(Debug, Clone, Serialize)]
pub struct Laser {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Distance travelled so far (survives wrapping)
    pub dist: f32,
}

impl Laser {
    pub const RADIUS: f32 = LASER_RADIUS;

    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel, dist: 0.0 }
    }
}

/// Complete session state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// Play field size in pixels (width, height)
    pub field: Vec2,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    /// Levels cleared so far (0-based)
    pub level: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub lasers: Vec<Laser>,
    pub pending: Option<PendingEvent>,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session with default tuning and generate the first belt
    pub fn new(seed: u64, field: Vec2) -> Self {
        Self::with_tuning(seed, field, Tuning::default())
    }

    pub fn with_tuning(seed: u64, field: Vec2, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            ship: Ship::new(field, &tuning),
            lives: tuning.starting_lives,
            tuning,
            field,
            phase: GamePhase::Playing,
            score: 0,
            level: 0,
            time_ticks: 0,
            asteroids: Vec::new(),
            lasers: Vec::new(),
            pending: None,
            events: Vec::new(),
        };

        super::tick::generate_belt(&mut state);

        state
    }

    /// Start a fresh session with a new seed, keeping field size and tuning
    pub fn restart(&mut self, seed: u64) {
        let field = self.field;
        let tuning = self.tuning.clone();
        *self = Self::with_tuning(seed, field, tuning);
        self.events.push(GameEvent::ScoreChanged(0));
        self.events.push(GameEvent::LivesChanged(self.lives));
        log::info!("Session restarted with seed {}", seed);
    }

    /// Follow a canvas resize. Entities keep their coordinates and wrap
    /// into the new bounds on their next move.
    pub fn resize_field(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.field = Vec2::new(width, height);
        }
    }

    /// Spawn an asteroid at `pos` using the current level's speed
    pub fn spawn_asteroid(&mut self, pos: Vec2, tier: AsteroidTier) {
        let max_speed = self.tuning.asteroid_speed_per_tick(self.level);
        let asteroid = Asteroid::random(&mut self.rng, pos, tier, max_speed, &self.tuning);
        self.asteroids.push(asteroid);
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn add_score(&mut self, points: u32) {
        self.score += u64::from(points);
        self.events.push(GameEvent::ScoreChanged(self.score));
    }
}
