use std::{collections::HashSet, fmt, time::Duration};

use cube_survivor_core::{
    DifficultyPreset, EntityId, EntityKind, Event, HudWidget, SessionPhase, UpgradeKind,
};
use cube_survivor_simulation::{Host, Simulation, SimulationConfig};
use cube_survivor_world::query;
use glam::{Vec2, Vec3};
use tracing::{debug, info};

use crate::session::SessionConfig;

/// Distance at which bodies are considered touching.
const CONTACT_DISTANCE: f32 = 1.0;
/// Enemies closer than this make the autopilot back away.
const FLEE_DISTANCE: f32 = 3.0;
/// Preferred upgrade order; fire-rate upgrades slow firing and come last.
const UPGRADE_PREFERENCE: [UpgradeKind; 4] = [
    UpgradeKind::Damage,
    UpgradeKind::MaxHealth,
    UpgradeKind::Speed,
    UpgradeKind::FireRate,
];

/// Host without a renderer that remembers what it was asked to present.
#[derive(Debug, Default)]
pub(crate) struct HeadlessHost {
    live_entities: usize,
    spawned_entities: usize,
    health_label: String,
}

impl Host for HeadlessHost {
    fn spawn_entity(&mut self, entity: EntityId, kind: EntityKind, position: Vec3) {
        self.live_entities += 1;
        self.spawned_entities += 1;
        debug!(entity = entity.get(), ?kind, %position, "spawn entity");
    }

    fn destroy_entity(&mut self, entity: EntityId) {
        self.live_entities = self.live_entities.saturating_sub(1);
        debug!(entity = entity.get(), "destroy entity");
    }

    fn set_text(&mut self, widget: HudWidget, value: &str) {
        if widget == HudWidget::Health {
            self.health_label = value.to_owned();
        }
        debug!(?widget, value, "set text");
    }

    fn set_visible(&mut self, widget: HudWidget, visible: bool) {
        debug!(?widget, visible, "set visible");
    }

    fn set_paused(&mut self, paused: bool) {
        debug!(paused, "set paused");
    }
}

/// Outcome of a headless session.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SessionSummary {
    pub(crate) banner: &'static str,
    pub(crate) preset: DifficultyPreset,
    pub(crate) seed: u64,
    pub(crate) elapsed: Duration,
    pub(crate) level: u32,
    pub(crate) xp: u32,
    pub(crate) kills: u32,
    pub(crate) cubes_collected: u32,
    pub(crate) upgrades: Vec<UpgradeKind>,
    pub(crate) survived: bool,
    pub(crate) health_label: String,
    pub(crate) entities_spawned: usize,
    pub(crate) entities_remaining: usize,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.banner)?;
        writeln!(f, "difficulty:      {:?}", self.preset)?;
        writeln!(f, "seed:            {:#x}", self.seed)?;
        writeln!(f, "elapsed:         {:.1}s", self.elapsed.as_secs_f32())?;
        writeln!(
            f,
            "outcome:         {}",
            if self.survived { "survived" } else { "game over" }
        )?;
        writeln!(f, "level:           {} ({} xp)", self.level, self.xp)?;
        writeln!(f, "enemies killed:  {}", self.kills)?;
        writeln!(f, "cubes collected: {}", self.cubes_collected)?;
        writeln!(
            f,
            "entities:        {} spawned, {} remaining",
            self.entities_spawned, self.entities_remaining
        )?;
        writeln!(f, "upgrades:        {:?}", self.upgrades)?;
        write!(f, "{}", self.health_label)
    }
}

/// Plays a session with a simple steering policy and reports how it went.
pub(crate) fn run(config: &SessionConfig) -> SessionSummary {
    let mut simulation = Simulation::new(SimulationConfig::new(config.seed), HeadlessHost::default());
    simulation.on_difficulty_selected(config.difficulty);
    info!(preset = ?config.difficulty, seed = config.seed, "headless session started");

    let dt = Duration::from_secs_f64(1.0 / f64::from(config.frame_rate));
    let mut elapsed = Duration::ZERO;
    let mut touching: HashSet<EntityId> = HashSet::new();
    let mut kills = 0;
    let mut cubes_collected = 0;
    let mut upgrades = Vec::new();

    for _ in 0..config.frame_budget() {
        steer(&mut simulation);
        simulation.tick(dt);
        elapsed += dt;
        report_contacts(&mut simulation, &mut touching);

        if let Some(options) = query::progression(simulation.world()).pending_offer {
            if let Some(upgrade) = UPGRADE_PREFERENCE
                .into_iter()
                .find(|upgrade| options.contains(upgrade))
            {
                simulation.on_upgrade_chosen(upgrade);
                upgrades.push(upgrade);
            }
        }

        for event in simulation.take_events() {
            match event {
                Event::EnemyKilled { .. } => kills += 1,
                Event::CubeConsumed { .. } => cubes_collected += 1,
                _ => {}
            }
        }

        if query::phase(simulation.world()) == SessionPhase::GameOver {
            break;
        }
    }

    let world = simulation.world();
    let progression = query::progression(world);
    let survived = query::phase(world) != SessionPhase::GameOver;
    let banner = query::welcome_banner(world);
    let host = simulation.into_host();
    info!(survived, level = progression.level, "headless session finished");

    SessionSummary {
        banner,
        preset: config.difficulty,
        seed: config.seed,
        elapsed,
        level: progression.level,
        xp: progression.xp,
        kills,
        cubes_collected,
        upgrades,
        survived,
        health_label: host.health_label,
        entities_spawned: host.spawned_entities,
        entities_remaining: host.live_entities,
    }
}

/// Backs away from nearby enemies, otherwise heads for the closest cube.
fn steer(simulation: &mut Simulation<HeadlessHost>) {
    let world = simulation.world();
    let player = query::player(world).position;

    let threat = query::enemy_view(world)
        .iter()
        .map(|enemy| enemy.position)
        .filter(|position| position.distance(player) < FLEE_DISTANCE)
        .min_by(|a, b| a.distance(player).total_cmp(&b.distance(player)));
    let cube = query::cubes(world)
        .into_iter()
        .map(|cube| cube.position)
        .min_by(|a, b| a.distance(player).total_cmp(&b.distance(player)));

    let heading = match (threat, cube) {
        (Some(enemy), _) => planar(player - enemy),
        (None, Some(cube)) => planar(cube - player),
        (None, None) => Vec2::ZERO,
    };
    simulation.on_move_input(heading);
}

/// Reports overlaps the way a physics engine would: triggers while touching,
/// collisions only on the frame contact begins.
fn report_contacts(simulation: &mut Simulation<HeadlessHost>, touching: &mut HashSet<EntityId>) {
    let world = simulation.world();
    let player = query::player(world);

    let cubes: Vec<EntityId> = query::cubes(world)
        .into_iter()
        .filter(|cube| cube.position.distance(player.position) <= CONTACT_DISTANCE)
        .map(|cube| cube.id)
        .collect();
    let enemies: HashSet<EntityId> = query::enemy_view(world)
        .iter()
        .filter(|enemy| enemy.position.distance(player.position) <= CONTACT_DISTANCE)
        .map(|enemy| enemy.id)
        .collect();

    for cube in cubes {
        simulation.on_trigger_enter(player.id, cube);
    }

    let mut entering: Vec<EntityId> = enemies.difference(touching).copied().collect();
    entering.sort_unstable();
    for enemy in entering {
        simulation.on_collision(enemy, player.id);
    }
    *touching = enemies;
}

fn planar(offset: Vec3) -> Vec2 {
    Vec2::new(offset.x, offset.z).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_configs_produce_identical_summaries() {
        let config = SessionConfig {
            seed: 42,
            difficulty: DifficultyPreset::Medium,
            duration_secs: 20.0,
            frame_rate: 30,
        };

        assert_eq!(run(&config), run(&config));
    }

    #[test]
    fn session_stops_at_the_frame_budget() {
        let config = SessionConfig {
            seed: 3,
            difficulty: DifficultyPreset::Easy,
            duration_secs: 2.0,
            frame_rate: 10,
        };

        let summary = run(&config);
        assert!(summary.elapsed <= Duration::from_secs(2) + Duration::from_millis(1));
        assert!(summary.entities_spawned >= 8, "player, enemies and cubes");
    }
}
