#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame driver that wires the Cube Survivor world and systems to a host engine.
//!
//! The host forwards input through the `on_*` entry points and advances time
//! with [`Simulation::tick`]. Every call applies the resulting command, feeds
//! the produced events to the pure systems and keeps applying the commands they
//! emit until the frame settles. Presentation side effects reach the host
//! through the [`Host`] trait.

use std::time::Duration;

use cube_survivor_core::{
    Command, ContactKind, DifficultyPreset, EntityId, EntityKind, Event, HudRequest, HudWidget,
    PlayerTarget, UpgradeKind,
};
use cube_survivor_system_combat::Combat;
use cube_survivor_system_hud::{self as hud, Hud};
use cube_survivor_system_spawning::{self as spawning, Spawning};
use cube_survivor_system_targeting::Targeting;
use cube_survivor_world::{self as world, query, World, WorldConfig};
use glam::{Vec2, Vec3};
use tracing::{debug, warn};

/// Spawn disk radius around the player used by the default configuration.
pub const DEFAULT_SPAWN_RADIUS: f32 = 30.0;

/// Presentation services supplied by the engine hosting the simulation.
pub trait Host {
    /// Instantiates the visual representation of a new entity.
    fn spawn_entity(&mut self, entity: EntityId, kind: EntityKind, position: Vec3);

    /// Removes the visual representation of an entity.
    fn destroy_entity(&mut self, entity: EntityId);

    /// Replaces the text displayed by a HUD widget.
    fn set_text(&mut self, widget: HudWidget, value: &str);

    /// Shows or hides a HUD widget.
    fn set_visible(&mut self, widget: HudWidget, visible: bool);

    /// Freezes or resumes the host's own clock.
    fn set_paused(&mut self, paused: bool);
}

/// Configuration bundle for the world and every system.
#[derive(Clone, Copy, Debug)]
pub struct SimulationConfig {
    world: WorldConfig,
    spawning: spawning::Config,
    hud: hud::Config,
}

impl SimulationConfig {
    /// Creates the standard configuration seeded with `rng_seed`.
    #[must_use]
    pub fn new(rng_seed: u64) -> Self {
        Self {
            world: WorldConfig::default(),
            spawning: spawning::Config::new(DEFAULT_SPAWN_RADIUS, rng_seed),
            hud: hud::Config::default(),
        }
    }

    /// Overrides the world configuration.
    #[must_use]
    pub fn with_world(mut self, world: WorldConfig) -> Self {
        self.world = world;
        self
    }

    /// Overrides the spawning configuration.
    #[must_use]
    pub fn with_spawning(mut self, spawning: spawning::Config) -> Self {
        self.spawning = spawning;
        self
    }

    /// Overrides the HUD configuration.
    #[must_use]
    pub fn with_hud(mut self, hud: hud::Config) -> Self {
        self.hud = hud;
        self
    }
}

/// Single-threaded simulation advanced one frame at a time by its host.
#[derive(Debug)]
pub struct Simulation<H> {
    world: World,
    spawning: Spawning,
    targeting: Targeting,
    combat: Combat,
    hud: Hud,
    host: H,
    targets: Vec<PlayerTarget>,
    hud_requests: Vec<HudRequest>,
    event_log: Vec<Event>,
}

impl<H: Host> Simulation<H> {
    /// Creates a simulation on the difficulty menu and presents the menu to the host.
    pub fn new(config: SimulationConfig, host: H) -> Self {
        let mut simulation = Self {
            world: World::with_config(config.world),
            spawning: Spawning::new(config.spawning),
            targeting: Targeting::new(),
            combat: Combat::new(),
            hud: Hud::new(config.hud),
            host,
            targets: Vec::new(),
            hud_requests: Vec::new(),
            event_log: Vec::new(),
        };
        simulation.hud.show_menu(&mut simulation.hud_requests);
        simulation.flush_hud();
        simulation
    }

    /// Read-only access to the authoritative world for queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Read-only access to the host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consumes the simulation, returning the host.
    pub fn into_host(self) -> H {
        self.host
    }

    /// Removes and returns every event produced since the previous call.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.event_log)
    }

    /// Advances the simulation by `dt`; ignored while paused or outside a session.
    pub fn tick(&mut self, dt: Duration) {
        self.submit(Command::Tick { dt });
    }

    /// Reports that two entities started overlapping trigger volumes.
    pub fn on_trigger_enter(&mut self, first: EntityId, second: EntityId) {
        self.submit(Command::ResolveContact {
            first,
            second,
            contact: ContactKind::Trigger,
        });
    }

    /// Reports that two entities' solid bodies collided.
    pub fn on_collision(&mut self, first: EntityId, second: EntityId) {
        self.submit(Command::ResolveContact {
            first,
            second,
            contact: ContactKind::Collision,
        });
    }

    /// Forwards the player's upgrade selection.
    pub fn on_upgrade_chosen(&mut self, upgrade: UpgradeKind) {
        self.submit(Command::ChooseUpgrade { upgrade });
    }

    /// Starts a session with the selected difficulty.
    pub fn on_difficulty_selected(&mut self, preset: DifficultyPreset) {
        self.submit(Command::StartSession { preset });
    }

    /// Updates the planar direction the player is steering towards.
    pub fn on_move_input(&mut self, heading: Vec2) {
        self.submit(Command::SetPlayerHeading { heading });
    }

    /// Abandons the current session and returns to the difficulty menu.
    pub fn on_return_to_menu(&mut self) {
        self.submit(Command::ReturnToMenu);
    }

    fn submit(&mut self, command: Command) {
        let mut pending = vec![command];

        while !pending.is_empty() {
            let mut events = Vec::new();
            for command in pending.drain(..) {
                world::apply(&mut self.world, command, &mut events);
            }

            if events.is_empty() {
                break;
            }

            self.dispatch(&events);

            let player = query::player(&self.world);
            let enemies = query::enemy_view(&self.world);
            self.spawning
                .handle(&events, &player, &enemies, &mut pending);
            self.targeting
                .handle(&player, &enemies, &mut self.targets);
            self.combat
                .handle(&events, &player, &self.targets, &mut pending);
            self.hud.handle(&events, &mut self.hud_requests);
            self.flush_hud();

            self.event_log.extend(events);
        }
    }

    fn dispatch(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::EntitySpawned {
                    entity,
                    kind,
                    position,
                } => self.host.spawn_entity(*entity, *kind, *position),
                Event::EntityDestroyed { entity, .. } => self.host.destroy_entity(*entity),
                Event::PauseChanged { paused } => self.host.set_paused(*paused),
                Event::UpgradeRejected { upgrade, reason } => {
                    warn!(?upgrade, %reason, "upgrade choice rejected");
                }
                Event::StartRejected { preset, reason } => {
                    warn!(?preset, %reason, "difficulty selection rejected");
                }
                Event::LevelUp { level } => debug!(level, "level reached"),
                _ => {}
            }
        }
    }

    fn flush_hud(&mut self) {
        for request in self.hud_requests.drain(..) {
            match request {
                HudRequest::SetText { widget, value } => self.host.set_text(widget, &value),
                HudRequest::SetVisible { widget, visible } => {
                    self.host.set_visible(widget, visible);
                }
            }
        }
    }
}
