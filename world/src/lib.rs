#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Cube Survivor.

mod combat;
mod effects;
mod progression;

use std::time::Duration;

use cube_survivor_core::{
    Command, ContactKind, CubeKind, DifficultyPreset, EnemyTier, EntityId, EntityKind, Event,
    SessionError, SessionPhase, UpgradeKind, ENEMY_FREEZE_DURATION, HEALTH_CUBE_AMOUNT,
    MAX_HEALTH_BONUS, MAX_MOVE_SPEED, MAX_PROJECTILE_DAMAGE, MIN_FIRE_RATE,
    PROJECTILE_HIT_DISTANCE, WELCOME_BANNER,
};
use glam::{Vec2, Vec3};
use tracing::{debug, info};

use combat::{DamageOutcome, FreezeState, Health};
use effects::{ActiveEffect, EffectTarget, EffectTimers, StatDelta};
use progression::{Progression, UpgradeStats};

const PLAYER_ID: EntityId = EntityId::new(0);
const ENEMY_MOVEMENT_DELAY: Duration = Duration::from_millis(500);
const ENEMY_LEASH_DISTANCE: f32 = 25.0;

/// Tunable parameters that shape the player and projectiles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldConfig {
    /// Maximum health the player starts with; health upgrades build on top of it.
    pub base_health: f32,
    /// Movement speed the player starts with, in world units per second.
    pub move_speed: f32,
    /// Shots per second the player starts with.
    pub fire_rate: f32,
    /// Radius within which the player can target enemies.
    pub shooting_radius: f32,
    /// Damage dealt by each projectile hit before upgrades and boosts.
    pub projectile_damage: f32,
    /// Projectile travel speed in world units per second.
    pub projectile_speed: f32,
    /// Position the player occupies when a session starts.
    pub spawn_point: Vec3,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            base_health: 100.0,
            move_speed: 6.0,
            fire_rate: 1.0,
            shooting_radius: 10.0,
            projectile_damage: 10.0,
            projectile_speed: 20.0,
            spawn_point: Vec3::ZERO,
        }
    }
}

/// Represents the authoritative Cube Survivor world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: WorldConfig,
    phase: SessionPhase,
    paused: bool,
    next_entity: u32,
    player: Player,
    enemies: Vec<Enemy>,
    projectiles: Vec<Projectile>,
    cubes: Vec<Cube>,
    effects: EffectTimers,
    progression: Progression,
    tick_index: u64,
}

impl World {
    /// Creates a new world waiting on the difficulty menu.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    /// Creates a new world using the provided configuration.
    #[must_use]
    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            banner: WELCOME_BANNER,
            player: Player::fresh(PLAYER_ID, &config),
            config,
            phase: SessionPhase::Menu,
            paused: false,
            next_entity: PLAYER_ID.get() + 1,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            cubes: Vec::new(),
            effects: EffectTimers::new(),
            progression: Progression::new(),
            tick_index: 0,
        }
    }

    fn is_live(&self) -> bool {
        self.phase == SessionPhase::Running && !self.paused
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId::new(self.next_entity);
        self.next_entity = self.next_entity.wrapping_add(1);
        id
    }

    fn enemy_index(&self, id: EntityId) -> Option<usize> {
        self.enemies.iter().position(|enemy| enemy.id == id)
    }

    fn projectile_index(&self, id: EntityId) -> Option<usize> {
        self.projectiles
            .iter()
            .position(|projectile| projectile.id == id)
    }

    fn cube_index(&self, id: EntityId) -> Option<usize> {
        self.cubes.iter().position(|cube| cube.id == id)
    }

    fn kind_of(&self, id: EntityId) -> Option<EntityKind> {
        if id == self.player.id {
            return Some(EntityKind::Player);
        }
        if let Some(enemy) = self.enemies.iter().find(|enemy| enemy.id == id) {
            return Some(enemy.tier.entity_kind());
        }
        if self.projectiles.iter().any(|projectile| projectile.id == id) {
            return Some(EntityKind::Projectile);
        }
        self.cubes
            .iter()
            .find(|cube| cube.id == id)
            .map(|cube| EntityKind::Cube(cube.kind))
    }

    fn set_paused(&mut self, paused: bool, out_events: &mut Vec<Event>) {
        if self.paused != paused {
            self.paused = paused;
            out_events.push(Event::PauseChanged { paused });
        }
    }

    fn reset_session(&mut self) {
        self.player = Player::fresh(self.player.id, &self.config);
        self.enemies.clear();
        self.projectiles.clear();
        self.cubes.clear();
        self.effects.clear();
        self.progression = Progression::new();
    }

    fn start_session(&mut self, preset: DifficultyPreset, out_events: &mut Vec<Event>) {
        if self.phase != SessionPhase::Menu {
            out_events.push(Event::StartRejected {
                preset,
                reason: SessionError::AlreadyStarted,
            });
            return;
        }

        self.reset_session();
        self.phase = SessionPhase::Running;
        info!(?preset, "session started");

        out_events.push(Event::SessionStarted { preset });
        out_events.push(Event::EntitySpawned {
            entity: self.player.id,
            kind: EntityKind::Player,
            position: self.player.position,
        });
        self.emit_health(out_events);
        self.emit_experience(out_events);
    }

    fn return_to_menu(&mut self, out_events: &mut Vec<Event>) {
        if self.phase == SessionPhase::Menu {
            return;
        }

        self.clear_arena(out_events);
        out_events.push(Event::EntityDestroyed {
            entity: self.player.id,
            kind: EntityKind::Player,
        });
        self.reset_session();
        self.phase = SessionPhase::Menu;
        self.set_paused(false, out_events);
        out_events.push(Event::ReturnedToMenu);
    }

    fn clear_arena(&mut self, out_events: &mut Vec<Event>) {
        for enemy in self.enemies.drain(..) {
            out_events.push(Event::EntityDestroyed {
                entity: enemy.id,
                kind: enemy.tier.entity_kind(),
            });
        }
        for projectile in self.projectiles.drain(..) {
            out_events.push(Event::EntityDestroyed {
                entity: projectile.id,
                kind: EntityKind::Projectile,
            });
        }
        for cube in self.cubes.drain(..) {
            out_events.push(Event::EntityDestroyed {
                entity: cube.id,
                kind: EntityKind::Cube(cube.kind),
            });
        }
    }

    fn spawn_enemy(&mut self, tier: EnemyTier, position: Vec3, out_events: &mut Vec<Event>) {
        let id = self.allocate_id();
        self.enemies.push(Enemy {
            id,
            tier,
            position,
            health: Health::full(tier.max_health()),
            freeze: FreezeState::default(),
            movement_delay: ENEMY_MOVEMENT_DELAY,
        });
        out_events.push(Event::EntitySpawned {
            entity: id,
            kind: tier.entity_kind(),
            position,
        });
    }

    fn spawn_cube(&mut self, kind: CubeKind, position: Vec3, out_events: &mut Vec<Event>) {
        let id = self.allocate_id();
        self.cubes.push(Cube { id, kind, position });
        out_events.push(Event::EntitySpawned {
            entity: id,
            kind: EntityKind::Cube(kind),
            position,
        });
    }

    fn despawn_cube(&mut self, cube: EntityId, out_events: &mut Vec<Event>) {
        let Some(index) = self.cube_index(cube) else {
            return;
        };
        let removed = self.cubes.remove(index);
        out_events.push(Event::EntityDestroyed {
            entity: removed.id,
            kind: EntityKind::Cube(removed.kind),
        });
    }

    fn fire_projectile(&mut self, target: EntityId, out_events: &mut Vec<Event>) {
        if self.enemy_index(target).is_none() {
            return;
        }

        let id = self.allocate_id();
        let position = self.player.position;
        self.projectiles.push(Projectile {
            id,
            target,
            position,
        });
        out_events.push(Event::EntitySpawned {
            entity: id,
            kind: EntityKind::Projectile,
            position,
        });
    }

    fn advance(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.move_player(dt);
        self.update_enemies(dt, out_events);
        let experience = self.update_projectiles(dt, out_events);
        self.expire_effects(dt, out_events);
        self.grant_experience(experience, out_events);
    }

    fn move_player(&mut self, dt: Duration) {
        let heading = self.player.heading.normalize_or_zero();
        if heading == Vec2::ZERO {
            return;
        }
        let step = self.player.stats.move_speed * dt.as_secs_f32();
        self.player.position += Vec3::new(heading.x, 0.0, heading.y) * step;
    }

    fn update_enemies(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let player_position = self.player.position;
        let seconds = dt.as_secs_f32();
        let mut strayed: Vec<EntityId> = Vec::new();

        for enemy in &mut self.enemies {
            let was_waiting = !enemy.movement_delay.is_zero();
            enemy.movement_delay = enemy.movement_delay.saturating_sub(dt);

            if enemy.freeze.is_frozen() {
                let _ = enemy.freeze.tick(dt);
                continue;
            }
            if was_waiting {
                continue;
            }

            let mut offset = player_position - enemy.position;
            offset.y = 0.0;
            let distance = offset.length();
            if distance > 0.0 {
                let step = (enemy.tier.move_speed() * seconds).min(distance);
                enemy.position += offset / distance * step;
            }

            if enemy.position.distance(player_position) > ENEMY_LEASH_DISTANCE {
                strayed.push(enemy.id);
            }
        }

        for id in strayed {
            if let Some(index) = self.enemy_index(id) {
                let enemy = self.enemies.remove(index);
                debug!(enemy = enemy.id.get(), "enemy strayed beyond the arena leash");
                out_events.push(Event::EntityDestroyed {
                    entity: enemy.id,
                    kind: enemy.tier.entity_kind(),
                });
            }
        }
    }

    fn update_projectiles(&mut self, dt: Duration, out_events: &mut Vec<Event>) -> u32 {
        let step = self.config.projectile_speed * dt.as_secs_f32();
        let mut orphaned: Vec<EntityId> = Vec::new();
        let mut arrived: Vec<EntityId> = Vec::new();

        for projectile in &mut self.projectiles {
            let Some(target) = self
                .enemies
                .iter()
                .find(|enemy| enemy.id == projectile.target)
            else {
                orphaned.push(projectile.id);
                continue;
            };

            let offset = target.position - projectile.position;
            let distance = offset.length();
            if step >= distance {
                projectile.position = target.position;
            } else {
                projectile.position += offset / distance * step;
            }

            if projectile.position.distance(target.position) < PROJECTILE_HIT_DISTANCE {
                arrived.push(projectile.id);
            }
        }

        for id in orphaned {
            if let Some(index) = self.projectile_index(id) {
                let projectile = self.projectiles.remove(index);
                out_events.push(Event::EntityDestroyed {
                    entity: projectile.id,
                    kind: EntityKind::Projectile,
                });
            }
        }

        arrived
            .into_iter()
            .map(|id| self.resolve_hit(id, out_events))
            .sum()
    }

    /// Resolves a projectile hit, returning the experience earned by a kill.
    ///
    /// A projectile resolves at most once: later calls for the same
    /// identifier find nothing and do nothing.
    fn resolve_hit(&mut self, projectile: EntityId, out_events: &mut Vec<Event>) -> u32 {
        let Some(index) = self.projectile_index(projectile) else {
            return 0;
        };
        let projectile = self.projectiles.remove(index);
        out_events.push(Event::EntityDestroyed {
            entity: projectile.id,
            kind: EntityKind::Projectile,
        });

        let Some(enemy_index) = self.enemy_index(projectile.target) else {
            return 0;
        };

        let damage = self.player.stats.projectile_damage;
        let freeze_on_hit = self.player.stats.freezes_on_hit();
        out_events.push(Event::ProjectileHit {
            projectile: projectile.id,
            target: projectile.target,
            damage,
        });

        let enemy = &mut self.enemies[enemy_index];
        match enemy.health.take_damage(damage) {
            DamageOutcome::Died => {
                let enemy = self.enemies.remove(enemy_index);
                let xp_reward = enemy.tier.xp_reward();
                out_events.push(Event::EnemyKilled {
                    enemy: enemy.id,
                    tier: enemy.tier,
                    xp_reward,
                });
                out_events.push(Event::EntityDestroyed {
                    entity: enemy.id,
                    kind: enemy.tier.entity_kind(),
                });
                xp_reward
            }
            DamageOutcome::Survived => {
                if freeze_on_hit && enemy.freeze.freeze(ENEMY_FREEZE_DURATION) {
                    out_events.push(Event::EnemyFrozen { enemy: enemy.id });
                }
                0
            }
            DamageOutcome::AlreadyDead => 0,
        }
    }

    fn expire_effects(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let mut expired: Vec<ActiveEffect> = Vec::new();
        self.effects.tick(dt, &mut expired);
        for effect in expired {
            self.revert_effect(effect, out_events);
        }
    }

    fn revert_effect(&mut self, effect: ActiveEffect, out_events: &mut Vec<Event>) {
        if effect.target != self.player.id {
            return;
        }
        self.player.stats.apply_delta(effect.delta.inverse());
        out_events.push(Event::BoostExpired { kind: effect.kind });
    }

    fn revert_all_boosts(&mut self, out_events: &mut Vec<Event>) {
        for effect in self.effects.drain_target(self.player.id) {
            self.revert_effect(effect, out_events);
        }
    }

    fn grant_experience(&mut self, amount: u32, out_events: &mut Vec<Event>) {
        if amount == 0 {
            return;
        }

        let gained = self.progression.gain_xp(amount);
        self.emit_experience(out_events);
        if gained == 0 {
            return;
        }

        let level = self.progression.level();
        for reached in (level + 1 - gained)..=level {
            out_events.push(Event::LevelUp { level: reached });
        }
        info!(level, "player levelled up");

        self.revert_all_boosts(out_events);
        let options = self.upgrade_stats().available();
        if self.progression.offer(options.clone()) {
            out_events.push(Event::UpgradeOffered { options });
            self.set_paused(true, out_events);
        }
    }

    fn upgrade_stats(&self) -> UpgradeStats {
        UpgradeStats {
            move_speed: self.player.stats.move_speed,
            fire_rate: self.player.stats.fire_rate,
            projectile_damage: self.player.stats.projectile_damage,
            max_health: self.player.health.max(),
            base_health: self.config.base_health,
        }
    }

    fn choose_upgrade(&mut self, upgrade: UpgradeKind, out_events: &mut Vec<Event>) {
        if let Err(reason) = self.progression.choose(upgrade) {
            out_events.push(Event::UpgradeRejected { upgrade, reason });
            return;
        }

        let stats = &mut self.player.stats;
        match upgrade {
            UpgradeKind::Speed => {
                stats.move_speed = (stats.move_speed + upgrade.step()).min(MAX_MOVE_SPEED);
            }
            UpgradeKind::FireRate => {
                stats.fire_rate = (stats.fire_rate + upgrade.step()).max(MIN_FIRE_RATE);
            }
            UpgradeKind::Damage => {
                stats.projectile_damage =
                    (stats.projectile_damage + upgrade.step()).min(MAX_PROJECTILE_DAMAGE);
            }
            UpgradeKind::MaxHealth => {
                let ceiling = self.config.base_health + MAX_HEALTH_BONUS;
                let max = (self.player.health.max() + upgrade.step()).min(ceiling);
                self.player.health.reset_max(max);
            }
        }
        debug!(?upgrade, "upgrade applied");

        out_events.push(Event::UpgradeChosen { upgrade });
        if upgrade == UpgradeKind::MaxHealth {
            self.emit_health(out_events);
        }
        if self.phase == SessionPhase::Running {
            self.set_paused(false, out_events);
        }
    }

    fn resolve_contact(
        &mut self,
        first: EntityId,
        second: EntityId,
        contact: ContactKind,
        out_events: &mut Vec<Event>,
    ) {
        let (Some(first_kind), Some(second_kind)) = (self.kind_of(first), self.kind_of(second))
        else {
            return;
        };

        for (this, this_kind, other, other_kind) in [
            (first, first_kind, second, second_kind),
            (second, second_kind, first, first_kind),
        ] {
            match (this_kind, other_kind) {
                (EntityKind::Player, EntityKind::Cube(_)) => {
                    if contact == ContactKind::Trigger {
                        self.consume_cube(other, out_events);
                    }
                    return;
                }
                (EntityKind::Player, kind) => {
                    if let (Some(tier), ContactKind::Collision) = (kind.enemy_tier(), contact) {
                        self.damage_player(tier.contact_damage(), out_events);
                        return;
                    }
                }
                (EntityKind::Projectile, kind) if kind.enemy_tier().is_some() => {
                    let targets_other = self
                        .projectiles
                        .iter()
                        .any(|projectile| projectile.id == this && projectile.target == other);
                    if targets_other {
                        let experience = self.resolve_hit(this, out_events);
                        self.grant_experience(experience, out_events);
                    }
                    return;
                }
                _ => {}
            }
        }
    }

    fn consume_cube(&mut self, cube: EntityId, out_events: &mut Vec<Event>) {
        let Some(index) = self.cube_index(cube) else {
            return;
        };
        let cube = self.cubes.remove(index);
        out_events.push(Event::CubeConsumed {
            cube: cube.id,
            kind: cube.kind,
        });
        out_events.push(Event::EntityDestroyed {
            entity: cube.id,
            kind: EntityKind::Cube(cube.kind),
        });

        match cube.kind.boost() {
            Some(effect) => {
                self.effects.apply(
                    self.player.id,
                    &mut self.player.stats,
                    effect,
                    StatDelta::for_effect(effect),
                    effect.duration(),
                );
                out_events.push(Event::BoostApplied { kind: effect });
            }
            None => {
                self.player.health.recover(HEALTH_CUBE_AMOUNT);
                self.emit_health(out_events);
            }
        }
    }

    fn damage_player(&mut self, amount: f32, out_events: &mut Vec<Event>) {
        match self.player.health.take_damage(amount) {
            DamageOutcome::Survived => self.emit_health(out_events),
            DamageOutcome::Died => {
                self.emit_health(out_events);
                self.end_session(out_events);
            }
            DamageOutcome::AlreadyDead => {}
        }
    }

    fn end_session(&mut self, out_events: &mut Vec<Event>) {
        if self.phase != SessionPhase::Running {
            return;
        }

        info!(
            level = self.progression.level(),
            ticks = self.tick_index,
            "player died"
        );
        self.phase = SessionPhase::GameOver;
        self.revert_all_boosts(out_events);
        self.clear_arena(out_events);
        self.player.position = self.config.spawn_point;
        self.player.heading = Vec2::ZERO;
        out_events.push(Event::GameOver);
        self.set_paused(true, out_events);
    }

    fn emit_health(&self, out_events: &mut Vec<Event>) {
        out_events.push(Event::PlayerHealthChanged {
            health: self.player.health.current(),
            max_health: self.player.health.max(),
        });
    }

    fn emit_experience(&self, out_events: &mut Vec<Event>) {
        out_events.push(Event::ExperienceChanged {
            xp: self.progression.xp(),
            level: self.progression.level(),
        });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StartSession { preset } => world.start_session(preset, out_events),
        Command::ReturnToMenu => world.return_to_menu(out_events),
        Command::Tick { dt } => {
            if !world.is_live() {
                return;
            }
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });
            world.advance(dt, out_events);
        }
        Command::SetPlayerHeading { heading } => {
            world.player.heading = heading;
        }
        Command::SpawnEnemy { tier, position } => {
            if world.is_live() {
                world.spawn_enemy(tier, position, out_events);
            }
        }
        Command::SpawnCube { kind, position } => {
            if world.is_live() {
                world.spawn_cube(kind, position, out_events);
            }
        }
        Command::DespawnCube { cube } => world.despawn_cube(cube, out_events),
        Command::FireProjectile { target } => {
            if world.is_live() {
                world.fire_projectile(target, out_events);
            }
        }
        Command::ResolveContact {
            first,
            second,
            contact,
        } => {
            if world.is_live() {
                world.resolve_contact(first, second, contact, out_events);
            }
        }
        Command::ChooseUpgrade { upgrade } => world.choose_upgrade(upgrade, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use cube_survivor_core::{
        CubeSnapshot, EffectKind, EnemySnapshot, EnemyView, EntityId, EntityKind,
        PlayerSnapshot, ProjectileSnapshot, SessionPhase, UpgradeKind,
    };

    use super::{World, WorldConfig};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the configuration the world was built with.
    #[must_use]
    pub fn config(world: &World) -> &WorldConfig {
        &world.config
    }

    /// Reports the current session phase.
    #[must_use]
    pub fn phase(world: &World) -> SessionPhase {
        world.phase
    }

    /// Reports whether ticks are currently ignored.
    #[must_use]
    pub fn is_paused(world: &World) -> bool {
        world.paused
    }

    /// Number of ticks advanced since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Captures the player's current state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        let player = &world.player;
        PlayerSnapshot {
            id: player.id,
            position: player.position,
            health: player.health.current(),
            max_health: player.health.max(),
            move_speed: player.stats.move_speed,
            fire_rate: player.stats.fire_rate,
            shooting_radius: player.stats.shooting_radius,
            projectile_damage: player.stats.projectile_damage,
            freeze_on_hit: player.stats.freezes_on_hit(),
        }
    }

    /// Captures a read-only view of the living enemies.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        let snapshots = world
            .enemies
            .iter()
            .map(|enemy| EnemySnapshot {
                id: enemy.id,
                tier: enemy.tier,
                position: enemy.position,
                health: enemy.health.current(),
                frozen: enemy.freeze.is_frozen(),
                freeze_remaining: enemy.freeze.remaining(),
            })
            .collect();
        EnemyView::from_snapshots(snapshots)
    }

    /// Captures the cubes waiting to be collected.
    #[must_use]
    pub fn cubes(world: &World) -> Vec<CubeSnapshot> {
        world
            .cubes
            .iter()
            .map(|cube| CubeSnapshot {
                id: cube.id,
                kind: cube.kind,
                position: cube.position,
            })
            .collect()
    }

    /// Captures the projectiles currently in flight.
    #[must_use]
    pub fn projectiles(world: &World) -> Vec<ProjectileSnapshot> {
        world
            .projectiles
            .iter()
            .map(|projectile| ProjectileSnapshot {
                id: projectile.id,
                target: projectile.target,
                position: projectile.position,
            })
            .collect()
    }

    /// Lists the boosts currently active on the player, in application order.
    #[must_use]
    pub fn active_boosts(world: &World) -> Vec<EffectKind> {
        world.effects.kinds().collect()
    }

    /// Resolves the kind of a live entity.
    #[must_use]
    pub fn entity_kind(world: &World, entity: EntityId) -> Option<EntityKind> {
        world.kind_of(entity)
    }

    /// Captures the player's experience and pending upgrade offer.
    #[must_use]
    pub fn progression(world: &World) -> ProgressionSnapshot {
        ProgressionSnapshot {
            xp: world.progression.xp(),
            level: world.progression.level(),
            pending_offer: world.progression.pending_offer().map(<[UpgradeKind]>::to_vec),
        }
    }

    /// Immutable representation of the player's progression.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct ProgressionSnapshot {
        /// Experience accumulated towards the next level.
        pub xp: u32,
        /// Current level.
        pub level: u32,
        /// Upgrades awaiting a choice, if a level-up offer is pending.
        pub pending_offer: Option<Vec<UpgradeKind>>,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PlayerStats {
    move_speed: f32,
    fire_rate: f32,
    shooting_radius: f32,
    projectile_damage: f32,
    freeze_grants: i32,
}

impl PlayerStats {
    fn freezes_on_hit(&self) -> bool {
        self.freeze_grants > 0
    }
}

impl EffectTarget for PlayerStats {
    fn apply_delta(&mut self, delta: StatDelta) {
        self.move_speed += delta.move_speed;
        self.projectile_damage += delta.projectile_damage;
        self.freeze_grants += delta.freeze_grants;
    }
}

#[derive(Clone, Debug)]
struct Player {
    id: EntityId,
    position: Vec3,
    heading: Vec2,
    health: Health,
    stats: PlayerStats,
}

impl Player {
    fn fresh(id: EntityId, config: &WorldConfig) -> Self {
        Self {
            id,
            position: config.spawn_point,
            heading: Vec2::ZERO,
            health: Health::full(config.base_health),
            stats: PlayerStats {
                move_speed: config.move_speed,
                fire_rate: config.fire_rate,
                shooting_radius: config.shooting_radius,
                projectile_damage: config.projectile_damage,
                freeze_grants: 0,
            },
        }
    }
}

#[derive(Clone, Debug)]
struct Enemy {
    id: EntityId,
    tier: EnemyTier,
    position: Vec3,
    health: Health,
    freeze: FreezeState,
    movement_delay: Duration,
}

#[derive(Clone, Copy, Debug)]
struct Projectile {
    id: EntityId,
    target: EntityId,
    position: Vec3,
}

#[derive(Clone, Copy, Debug)]
struct Cube {
    id: EntityId,
    kind: CubeKind,
    position: Vec3,
}
