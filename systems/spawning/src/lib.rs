#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system that keeps the arena populated and escalates difficulty.

use std::{f32::consts::TAU, time::Duration};

use cube_survivor_core::{
    Command, CubeKind, DifficultyPreset, EnemyTier, EnemyView, EntityId, EntityKind, Event,
    PlayerSnapshot,
};
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

const CUBES_PER_WAVE: usize = 2;

/// Health fraction at or below which the recovery-leaning cube table is used.
const LOW_HEALTH_FRACTION: f32 = 0.5;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    presence_interval: Duration,
    escalation_interval: Duration,
    cube_interval: Duration,
    cube_lifetime: Duration,
    spawn_radius: f32,
    rng_seed: u64,
    tier_pool: &'static [EnemyTier],
}

impl Config {
    /// Creates a configuration with the standard cadence, spawning within `spawn_radius`.
    #[must_use]
    pub const fn new(spawn_radius: f32, rng_seed: u64) -> Self {
        Self {
            presence_interval: Duration::from_millis(500),
            escalation_interval: Duration::from_secs(60),
            cube_interval: Duration::from_secs(5),
            cube_lifetime: Duration::from_secs(8),
            spawn_radius,
            rng_seed,
            tier_pool: &EnemyTier::ALL,
        }
    }

    /// Overrides how often the enemy population is topped up.
    #[must_use]
    pub const fn with_presence_interval(mut self, interval: Duration) -> Self {
        self.presence_interval = interval;
        self
    }

    /// Overrides how often the target population escalates.
    #[must_use]
    pub const fn with_escalation_interval(mut self, interval: Duration) -> Self {
        self.escalation_interval = interval;
        self
    }

    /// Overrides how often a fresh pair of cubes is spawned.
    #[must_use]
    pub const fn with_cube_interval(mut self, interval: Duration) -> Self {
        self.cube_interval = interval;
        self
    }

    /// Overrides how long an unconsumed cube survives.
    #[must_use]
    pub const fn with_cube_lifetime(mut self, lifetime: Duration) -> Self {
        self.cube_lifetime = lifetime;
        self
    }

    /// Restricts the tiers drawn for random top-up spawns.
    #[must_use]
    pub const fn with_tier_pool(mut self, tier_pool: &'static [EnemyTier]) -> Self {
        self.tier_pool = tier_pool;
        self
    }
}

/// Population target and its escalation schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DifficultyState {
    target_enemy_count: u32,
    increase_rate: u32,
    max_enemies: u32,
}

impl DifficultyState {
    /// Creates the difficulty state described by the preset.
    #[must_use]
    pub const fn from_preset(preset: DifficultyPreset) -> Self {
        let parameters = preset.parameters();
        Self {
            target_enemy_count: parameters.initial_enemies(),
            increase_rate: parameters.increase_rate(),
            max_enemies: parameters.max_enemies(),
        }
    }

    /// Number of enemies the controller keeps alive.
    #[must_use]
    pub const fn target_enemy_count(&self) -> u32 {
        self.target_enemy_count
    }

    /// Upper bound the target never exceeds.
    #[must_use]
    pub const fn max_enemies(&self) -> u32 {
        self.max_enemies
    }

    /// Raises the target by the preset's increase rate without exceeding the cap.
    pub fn escalate(&mut self) {
        self.target_enemy_count = self
            .target_enemy_count
            .saturating_add(self.increase_rate)
            .min(self.max_enemies);
    }
}

/// Lifecycle of the spawn controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerState {
    /// No session is running; time is ignored.
    NotStarted,
    /// A session is running with the provided difficulty.
    Running(DifficultyState),
}

/// Selects a cube kind from a uniform draw in `[0, 100)`.
///
/// Players at half health or less are far more likely to receive a health cube.
#[must_use]
pub fn select_cube(health_fraction: f32, draw: f32) -> CubeKind {
    if health_fraction <= LOW_HEALTH_FRACTION {
        match draw {
            d if d < 50.0 => CubeKind::Health,
            d if d < 65.0 => CubeKind::Speed,
            d if d < 80.0 => CubeKind::Frozen,
            d if d < 95.0 => CubeKind::Damage,
            _ => CubeKind::Ultimate,
        }
    } else {
        match draw {
            d if d < 25.0 => CubeKind::Speed,
            d if d < 50.0 => CubeKind::Frozen,
            d if d < 75.0 => CubeKind::Damage,
            d if d < 90.0 => CubeKind::Health,
            _ => CubeKind::Ultimate,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct TrackedCube {
    id: EntityId,
    remaining: Duration,
}

/// Pure system that deterministically emits enemy and cube spawn commands.
#[derive(Debug)]
pub struct Spawning {
    config: Config,
    state: ControllerState,
    presence_elapsed: Duration,
    escalation_elapsed: Duration,
    cube_elapsed: Duration,
    deferred: Duration,
    cubes: Vec<TrackedCube>,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: ControllerState::NotStarted,
            presence_elapsed: Duration::ZERO,
            escalation_elapsed: Duration::ZERO,
            cube_elapsed: Duration::ZERO,
            deferred: Duration::ZERO,
            cubes: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Current controller state.
    #[must_use]
    pub const fn state(&self) -> ControllerState {
        self.state
    }

    /// Consumes events and immutable views to emit spawn commands.
    ///
    /// Time from a batch that also pauses the game or ends it is carried over
    /// to the next running tick, so no wave or top-up is issued into a frozen
    /// world.
    pub fn handle(
        &mut self,
        events: &[Event],
        player: &PlayerSnapshot,
        enemies: &EnemyView,
        out: &mut Vec<Command>,
    ) {
        let halted = events.iter().any(|event| {
            matches!(
                event,
                Event::PauseChanged { paused: true } | Event::GameOver
            )
        });

        for event in events {
            match event {
                Event::SessionStarted { preset } => self.start(*preset, player, out),
                Event::GameOver | Event::ReturnedToMenu => self.stop(),
                Event::EntitySpawned {
                    entity,
                    kind: EntityKind::Cube(_),
                    ..
                } => self.cubes.push(TrackedCube {
                    id: *entity,
                    remaining: self.config.cube_lifetime,
                }),
                Event::EntityDestroyed {
                    entity,
                    kind: EntityKind::Cube(_),
                } => self.cubes.retain(|cube| cube.id != *entity),
                Event::TimeAdvanced { dt } if halted => {
                    self.deferred = self.deferred.saturating_add(*dt);
                }
                Event::TimeAdvanced { dt } => {
                    let dt = dt.saturating_add(std::mem::take(&mut self.deferred));
                    self.advance(dt, player, enemies, out);
                }
                _ => {}
            }
        }
    }

    fn start(&mut self, preset: DifficultyPreset, player: &PlayerSnapshot, out: &mut Vec<Command>) {
        let difficulty = DifficultyState::from_preset(preset);
        self.state = ControllerState::Running(difficulty);
        self.presence_elapsed = Duration::ZERO;
        self.escalation_elapsed = Duration::ZERO;
        self.cube_elapsed = Duration::ZERO;
        self.deferred = Duration::ZERO;
        self.cubes.clear();

        let initial = difficulty.target_enemy_count() as usize;
        for index in 0..initial {
            let tier = match EnemyTier::ALL.get(index) {
                Some(tier) => Some(*tier),
                None => self.random_tier(),
            };
            if let Some(tier) = tier {
                self.spawn_enemy(tier, player, out);
            }
        }
        self.spawn_cubes(player, out);
        debug!(?preset, initial, "spawn controller started");
    }

    fn stop(&mut self) {
        self.state = ControllerState::NotStarted;
        self.deferred = Duration::ZERO;
        self.cubes.clear();
    }

    fn advance(
        &mut self,
        dt: Duration,
        player: &PlayerSnapshot,
        enemies: &EnemyView,
        out: &mut Vec<Command>,
    ) {
        let ControllerState::Running(mut difficulty) = self.state else {
            return;
        };

        if interval_elapsed(
            &mut self.presence_elapsed,
            dt,
            self.config.presence_interval,
        ) {
            self.ensure_presence(&difficulty, player, enemies, out);
        }

        if !self.config.escalation_interval.is_zero() {
            self.escalation_elapsed = self.escalation_elapsed.saturating_add(dt);
            while self.escalation_elapsed >= self.config.escalation_interval {
                self.escalation_elapsed -= self.config.escalation_interval;
                difficulty.escalate();
                debug!(
                    target_enemy_count = difficulty.target_enemy_count(),
                    "difficulty escalated"
                );
            }
            self.state = ControllerState::Running(difficulty);
        }

        if interval_elapsed(&mut self.cube_elapsed, dt, self.config.cube_interval) {
            for cube in self.cubes.drain(..) {
                out.push(Command::DespawnCube { cube: cube.id });
            }
            self.spawn_cubes(player, out);
        }

        for cube in &mut self.cubes {
            cube.remaining = cube.remaining.saturating_sub(dt);
            if cube.remaining.is_zero() {
                out.push(Command::DespawnCube { cube: cube.id });
            }
        }
        self.cubes.retain(|cube| !cube.remaining.is_zero());
    }

    fn ensure_presence(
        &mut self,
        difficulty: &DifficultyState,
        player: &PlayerSnapshot,
        enemies: &EnemyView,
        out: &mut Vec<Command>,
    ) {
        let mut population = enemies.len();

        for tier in EnemyTier::ALL {
            if enemies.count(tier) == 0 {
                self.spawn_enemy(tier, player, out);
                population += 1;
            }
        }

        let target = difficulty.target_enemy_count() as usize;
        while population < target {
            let Some(tier) = self.random_tier() else {
                break;
            };
            self.spawn_enemy(tier, player, out);
            population += 1;
        }
    }

    fn random_tier(&mut self) -> Option<EnemyTier> {
        let pool = self.config.tier_pool;
        if pool.is_empty() {
            warn!("enemy tier pool is empty; skipping spawn");
            return None;
        }
        Some(pool[self.rng.gen_range(0..pool.len())])
    }

    fn spawn_enemy(&mut self, tier: EnemyTier, player: &PlayerSnapshot, out: &mut Vec<Command>) {
        let position = self.random_position(player.position);
        out.push(Command::SpawnEnemy { tier, position });
    }

    fn spawn_cubes(&mut self, player: &PlayerSnapshot, out: &mut Vec<Command>) {
        let health_fraction = player.health_fraction();
        for _ in 0..CUBES_PER_WAVE {
            let draw = self.rng.gen_range(0.0..100.0);
            let kind = select_cube(health_fraction, draw);
            let position = self.random_position(player.position);
            out.push(Command::SpawnCube { kind, position });
        }
    }

    /// Uniform point inside the spawn disk centred on `origin`, on the ground plane.
    fn random_position(&mut self, origin: Vec3) -> Vec3 {
        let angle = self.rng.gen_range(0.0..TAU);
        let distance = self.config.spawn_radius * self.rng.gen::<f32>().sqrt();
        origin + Vec3::new(distance * angle.cos(), 0.0, distance * angle.sin())
    }
}

/// Adds `dt` to `elapsed` and reports whether `interval` was reached.
///
/// Whole intervals are subtracted so the overshoot carries into the next
/// period; several missed periods still fire once.
fn interval_elapsed(elapsed: &mut Duration, dt: Duration, interval: Duration) -> bool {
    *elapsed = elapsed.saturating_add(dt);
    if *elapsed < interval {
        return false;
    }
    if interval.is_zero() {
        *elapsed = Duration::ZERO;
        return true;
    }
    while *elapsed >= interval {
        *elapsed -= interval;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escalation_stops_at_the_cap() {
        let mut difficulty = DifficultyState::from_preset(DifficultyPreset::Hard);
        for _ in 0..10 {
            difficulty.escalate();
        }
        assert_eq!(difficulty.target_enemy_count(), difficulty.max_enemies());
    }

    #[test]
    fn random_positions_stay_inside_the_disk() {
        let mut spawning = Spawning::new(Config::new(30.0, 7));
        let origin = Vec3::new(3.0, 1.0, -4.0);
        for _ in 0..256 {
            let position = spawning.random_position(origin);
            assert_eq!(position.y, origin.y);
            assert!(position.distance(origin) <= 30.0 + 1e-4);
        }
    }

    #[test]
    fn empty_pool_skips_random_spawns() {
        let mut spawning = Spawning::new(Config::new(30.0, 7).with_tier_pool(&[]));
        assert_eq!(spawning.random_tier(), None);
    }

    #[test]
    fn interval_overshoot_carries_into_the_next_period() {
        let interval = Duration::from_millis(500);
        let mut elapsed = Duration::ZERO;

        assert!(!interval_elapsed(&mut elapsed, Duration::from_millis(300), interval));
        assert!(interval_elapsed(&mut elapsed, Duration::from_millis(300), interval));
        assert_eq!(elapsed, Duration::from_millis(100));
        assert!(interval_elapsed(&mut elapsed, Duration::from_millis(400), interval));
        assert_eq!(elapsed, Duration::ZERO);

        assert!(interval_elapsed(&mut elapsed, Duration::from_millis(1_700), interval));
        assert_eq!(elapsed, Duration::from_millis(200));
    }
}
