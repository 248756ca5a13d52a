#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Cube Survivor engine.
//!
//! This crate defines the message surface that connects the host adapter,
//! the authoritative world, and pure systems. The host submits [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values for systems
//! to react to deterministically. Systems consume event streams, query
//! immutable snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Cube Survivor.";

/// Experience required to advance a single level.
pub const XP_PER_LEVEL: u32 = 50;

/// Distance at which a projectile is considered to have reached its target.
pub const PROJECTILE_HIT_DISTANCE: f32 = 0.2;

/// Duration an enemy stays immobilized after a freezing hit.
pub const ENEMY_FREEZE_DURATION: Duration = Duration::from_secs(2);

/// Health restored by consuming a health cube.
pub const HEALTH_CUBE_AMOUNT: f32 = 25.0;

/// Upper bound on the player's movement speed reachable through upgrades.
pub const MAX_MOVE_SPEED: f32 = 8.0;

/// Lower bound on the player's fire rate reachable through upgrades.
pub const MIN_FIRE_RATE: f32 = 0.5;

/// Upper bound on projectile damage reachable through upgrades.
pub const MAX_PROJECTILE_DAMAGE: f32 = 50.0;

/// Maximum health bonus the player may accumulate above the base health.
pub const MAX_HEALTH_BONUS: f32 = 50.0;

/// Lifecycle phase of a play session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// No session is active; the host shows the difficulty menu.
    Menu,
    /// Enemies spawn and the simulation advances with every tick.
    Running,
    /// The player died; the simulation stays frozen until the host returns to the menu.
    GameOver,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Starts a new session using the provided difficulty preset.
    StartSession {
        /// Preset selected by the player.
        preset: DifficultyPreset,
    },
    /// Abandons the current session and returns to the difficulty menu.
    ReturnToMenu,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Updates the planar direction the player walks towards.
    SetPlayerHeading {
        /// Desired heading on the ground plane, `x` mapping to world X and `y` to world Z.
        heading: Vec2,
    },
    /// Requests that an enemy of the provided tier enter the arena.
    SpawnEnemy {
        /// Tier of the enemy to create.
        tier: EnemyTier,
        /// World position the enemy appears at.
        position: Vec3,
    },
    /// Requests that a power-up cube be placed into the arena.
    SpawnCube {
        /// Boost granted when the cube is consumed.
        kind: CubeKind,
        /// World position the cube appears at.
        position: Vec3,
    },
    /// Requests removal of an unconsumed cube.
    DespawnCube {
        /// Identifier of the cube to remove.
        cube: EntityId,
    },
    /// Requests that the player launch a projectile at the provided enemy.
    FireProjectile {
        /// Enemy the projectile homes in on for its whole lifetime.
        target: EntityId,
    },
    /// Reports a physical contact between two entities detected by the host.
    ResolveContact {
        /// First entity participating in the contact.
        first: EntityId,
        /// Second entity participating in the contact.
        second: EntityId,
        /// Whether the contact was a trigger overlap or a solid collision.
        contact: ContactKind,
    },
    /// Applies the upgrade the player picked from the pending offer.
    ChooseUpgrade {
        /// Upgrade selected by the player.
        upgrade: UpgradeKind,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Announces that a session began with the provided preset.
    SessionStarted {
        /// Preset that configures enemy population and escalation.
        preset: DifficultyPreset,
    },
    /// Reports that a session start request was rejected.
    StartRejected {
        /// Preset provided in the rejected request.
        preset: DifficultyPreset,
        /// Specific reason the request failed.
        reason: SessionError,
    },
    /// Announces that the world returned to the difficulty menu.
    ReturnedToMenu,
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that an entity was created.
    EntitySpawned {
        /// Identifier assigned to the entity by the world.
        entity: EntityId,
        /// Kind of entity that was created.
        kind: EntityKind,
        /// World position the entity occupies after spawning.
        position: Vec3,
    },
    /// Confirms that an entity was removed from the world.
    EntityDestroyed {
        /// Identifier of the removed entity.
        entity: EntityId,
        /// Kind of the removed entity.
        kind: EntityKind,
    },
    /// Reports that a projectile resolved a hit against its target.
    ProjectileHit {
        /// Projectile that struck the enemy.
        projectile: EntityId,
        /// Enemy that received the damage.
        target: EntityId,
        /// Damage applied by the hit.
        damage: f32,
    },
    /// Reports that an enemy became immobilized.
    EnemyFrozen {
        /// Identifier of the frozen enemy.
        enemy: EntityId,
    },
    /// Reports that an enemy's health reached zero.
    EnemyKilled {
        /// Identifier of the defeated enemy.
        enemy: EntityId,
        /// Tier of the defeated enemy.
        tier: EnemyTier,
        /// Experience granted to the player for the kill.
        xp_reward: u32,
    },
    /// Confirms that the player consumed a power-up cube.
    CubeConsumed {
        /// Identifier of the consumed cube.
        cube: EntityId,
        /// Boost granted by the cube.
        kind: CubeKind,
    },
    /// Announces that a timed boost became active.
    BoostApplied {
        /// Boost that started.
        kind: EffectKind,
    },
    /// Announces that a timed boost ran out and its modifiers were reverted.
    BoostExpired {
        /// Boost that finished.
        kind: EffectKind,
    },
    /// Reports the player's current and maximum health after a change.
    PlayerHealthChanged {
        /// Current health.
        health: f32,
        /// Current maximum health.
        max_health: f32,
    },
    /// Reports the player's progression after gaining experience.
    ExperienceChanged {
        /// Experience accumulated towards the next level.
        xp: u32,
        /// Current level.
        level: u32,
    },
    /// Announces that the player reached a new level.
    LevelUp {
        /// Level reached.
        level: u32,
    },
    /// Presents the upgrades the player may choose between.
    UpgradeOffered {
        /// Upgrades still below their caps, in display order.
        options: Vec<UpgradeKind>,
    },
    /// Confirms that an upgrade was applied.
    UpgradeChosen {
        /// Upgrade that was applied.
        upgrade: UpgradeKind,
    },
    /// Reports that an upgrade request was rejected.
    UpgradeRejected {
        /// Upgrade provided in the rejected request.
        upgrade: UpgradeKind,
        /// Specific reason the request failed.
        reason: UpgradeError,
    },
    /// Announces that the simulation was paused or resumed.
    PauseChanged {
        /// Whether ticks are now ignored.
        paused: bool,
    },
    /// Announces that the player died and the session ended.
    GameOver,
}

/// Unique identifier assigned to an entity by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Kinds of entities the host is asked to present.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// The player-controlled survivor.
    Player,
    /// Slow, fragile enemy.
    EnemyEasy,
    /// Balanced enemy.
    EnemyMedium,
    /// Fast, durable enemy.
    EnemyHard,
    /// Homing projectile fired by the player.
    Projectile,
    /// Power-up cube carrying the boost it grants.
    Cube(CubeKind),
}

impl EntityKind {
    /// Returns the enemy tier represented by this kind, if any.
    #[must_use]
    pub const fn enemy_tier(self) -> Option<EnemyTier> {
        match self {
            Self::EnemyEasy => Some(EnemyTier::Easy),
            Self::EnemyMedium => Some(EnemyTier::Medium),
            Self::EnemyHard => Some(EnemyTier::Hard),
            _ => None,
        }
    }
}

/// Enemy difficulty tiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyTier {
    /// Slow, fragile enemy worth little experience.
    Easy,
    /// Balanced enemy.
    Medium,
    /// Fast, durable enemy worth the most experience.
    Hard,
}

impl EnemyTier {
    /// Every tier in spawn-priority order.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Entity kind used when presenting enemies of this tier.
    #[must_use]
    pub const fn entity_kind(self) -> EntityKind {
        match self {
            Self::Easy => EntityKind::EnemyEasy,
            Self::Medium => EntityKind::EnemyMedium,
            Self::Hard => EntityKind::EnemyHard,
        }
    }

    /// Movement speed in world units per second.
    #[must_use]
    pub const fn move_speed(self) -> f32 {
        match self {
            Self::Easy => 2.5,
            Self::Medium => 3.0,
            Self::Hard => 4.0,
        }
    }

    /// Health the enemy spawns with.
    #[must_use]
    pub const fn max_health(self) -> f32 {
        match self {
            Self::Easy => 50.0,
            Self::Medium => 100.0,
            Self::Hard => 150.0,
        }
    }

    /// Experience awarded to the player when the enemy is defeated.
    #[must_use]
    pub const fn xp_reward(self) -> u32 {
        match self {
            Self::Easy => 3,
            Self::Medium => 8,
            Self::Hard => 12,
        }
    }

    /// Damage dealt to the player when the enemy collides with them.
    #[must_use]
    pub const fn contact_damage(self) -> f32 {
        match self {
            Self::Easy => 10.0,
            Self::Medium => 20.0,
            Self::Hard => 30.0,
        }
    }
}

/// Power-up cube varieties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CubeKind {
    /// Temporarily increases movement speed.
    Speed,
    /// Temporarily makes projectiles freeze what they hit.
    Frozen,
    /// Restores health immediately.
    Health,
    /// Temporarily increases projectile damage.
    Damage,
    /// Combines speed, damage, and freezing for a longer duration.
    Ultimate,
}

impl CubeKind {
    /// Timed boost started by consuming the cube, if the cube grants one.
    #[must_use]
    pub const fn boost(self) -> Option<EffectKind> {
        match self {
            Self::Speed => Some(EffectKind::Speed),
            Self::Frozen => Some(EffectKind::Freeze),
            Self::Health => None,
            Self::Damage => Some(EffectKind::Damage),
            Self::Ultimate => Some(EffectKind::Ultimate),
        }
    }
}

/// Timed boosts that modify player stats until they expire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// +0.5 movement speed.
    Speed,
    /// Projectiles freeze enemies on hit.
    Freeze,
    /// +50 projectile damage.
    Damage,
    /// +1.0 movement speed, +50 projectile damage, and freezing projectiles.
    Ultimate,
}

impl EffectKind {
    /// Duration the boost stays active after being applied.
    #[must_use]
    pub const fn duration(self) -> Duration {
        match self {
            Self::Speed => Duration::from_secs(5),
            Self::Freeze | Self::Damage => Duration::from_secs(8),
            Self::Ultimate => Duration::from_secs(10),
        }
    }
}

/// Permanent stat upgrades offered on level-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    /// +0.05 movement speed, capped at [`MAX_MOVE_SPEED`].
    Speed,
    /// −0.05 fire rate, floored at [`MIN_FIRE_RATE`].
    FireRate,
    /// +5 projectile damage, capped at [`MAX_PROJECTILE_DAMAGE`].
    Damage,
    /// +5 maximum health, capped at the base health plus [`MAX_HEALTH_BONUS`].
    MaxHealth,
}

impl UpgradeKind {
    /// Every upgrade in display order.
    pub const ALL: [Self; 4] = [Self::Speed, Self::FireRate, Self::Damage, Self::MaxHealth];

    /// Signed change applied to the upgraded stat.
    #[must_use]
    pub const fn step(self) -> f32 {
        match self {
            Self::Speed => 0.05,
            Self::FireRate => -0.05,
            Self::Damage | Self::MaxHealth => 5.0,
        }
    }
}

/// Difficulty presets selectable from the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyPreset {
    /// Small population that grows slowly.
    Easy,
    /// Moderate population and escalation.
    Medium,
    /// Large population that grows quickly.
    Hard,
}

impl DifficultyPreset {
    /// Population parameters associated with the preset.
    #[must_use]
    pub const fn parameters(self) -> DifficultyParameters {
        match self {
            Self::Easy => DifficultyParameters::new(5, 1, 15),
            Self::Medium => DifficultyParameters::new(8, 2, 20),
            Self::Hard => DifficultyParameters::new(12, 3, 25),
        }
    }
}

/// Enemy population parameters derived from a [`DifficultyPreset`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DifficultyParameters {
    initial_enemies: u32,
    increase_rate: u32,
    max_enemies: u32,
}

impl DifficultyParameters {
    /// Creates a new parameter set.
    #[must_use]
    pub const fn new(initial_enemies: u32, increase_rate: u32, max_enemies: u32) -> Self {
        Self {
            initial_enemies,
            increase_rate,
            max_enemies,
        }
    }

    /// Enemy population targeted when the session starts.
    #[must_use]
    pub const fn initial_enemies(&self) -> u32 {
        self.initial_enemies
    }

    /// Amount the population target grows with every escalation.
    #[must_use]
    pub const fn increase_rate(&self) -> u32 {
        self.increase_rate
    }

    /// Ceiling the population target never exceeds.
    #[must_use]
    pub const fn max_enemies(&self) -> u32 {
        self.max_enemies
    }
}

/// Kind of physical contact reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContactKind {
    /// Overlap with a trigger volume.
    Trigger,
    /// Solid collision between two bodies.
    Collision,
}

/// Reasons a session start request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum SessionError {
    /// A session is running or awaiting a return to the menu.
    #[error("a session is already in progress")]
    AlreadyStarted,
}

/// Reasons an upgrade request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum UpgradeError {
    /// No level-up offer is waiting for a choice.
    #[error("no upgrade choice is pending")]
    NoPendingChoice,
    /// The requested upgrade already reached its cap and was not offered.
    #[error("upgrade was not offered")]
    NotOffered,
}

/// Widgets the host binds HUD output to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HudWidget {
    /// Game title shown on the menu.
    Title,
    /// Difficulty selection buttons.
    DifficultyMenu,
    /// Player health label.
    Health,
    /// Player experience label.
    Experience,
    /// Player level label.
    Level,
    /// Short gameplay hint shown when a session starts.
    Hint,
    /// Message announcing the most recent pickup.
    PickupMessage,
    /// Label shown after the player dies.
    GameOver,
    /// Button returning to the menu after game over.
    ReturnButton,
    /// Button selecting the associated upgrade.
    UpgradeButton(UpgradeKind),
}

/// Requests issued by the HUD system for the host's UI layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HudRequest {
    /// Replaces the text shown by a widget.
    SetText {
        /// Widget to update.
        widget: HudWidget,
        /// Text the widget should display.
        value: String,
    },
    /// Shows or hides a widget.
    SetVisible {
        /// Widget to update.
        widget: HudWidget,
        /// Whether the widget should be shown.
        visible: bool,
    },
}

/// Immutable representation of the player's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Identifier assigned to the player.
    pub id: EntityId,
    /// Current world position.
    pub position: Vec3,
    /// Current health.
    pub health: f32,
    /// Current maximum health, raised by upgrades.
    pub max_health: f32,
    /// Movement speed including active boosts.
    pub move_speed: f32,
    /// Shots per second; the fire cadence is `1 / fire_rate` seconds.
    pub fire_rate: f32,
    /// Radius within which enemies can be targeted.
    pub shooting_radius: f32,
    /// Damage dealt by each projectile hit, including active boosts.
    pub projectile_damage: f32,
    /// Whether projectile hits currently freeze enemies.
    pub freeze_on_hit: bool,
}

impl PlayerSnapshot {
    /// Fraction of maximum health remaining in the range `0.0..=1.0`.
    #[must_use]
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health).clamp(0.0, 1.0)
    }
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EntityId,
    /// Tier of the enemy.
    pub tier: EnemyTier,
    /// Current world position.
    pub position: Vec3,
    /// Remaining health.
    pub health: f32,
    /// Indicates whether the enemy is currently immobilized.
    pub frozen: bool,
    /// Time left before a frozen enemy moves again; zero when not frozen.
    pub freeze_remaining: Duration,
}

/// Read-only snapshot describing all living enemies.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of enemies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view contains no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Number of enemies of the provided tier.
    #[must_use]
    pub fn count(&self, tier: EnemyTier) -> usize {
        self.snapshots
            .iter()
            .filter(|snapshot| snapshot.tier == tier)
            .count()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of an unconsumed cube.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubeSnapshot {
    /// Identifier assigned to the cube.
    pub id: EntityId,
    /// Boost granted by the cube.
    pub kind: CubeKind,
    /// World position of the cube.
    pub position: Vec3,
}

/// Immutable representation of an in-flight projectile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier assigned to the projectile.
    pub id: EntityId,
    /// Enemy the projectile homes in on.
    pub target: EntityId,
    /// Current world position.
    pub position: Vec3,
}

/// Target assignment computed by the targeting system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerTarget {
    /// Enemy selected as the next shot's target.
    pub enemy: EntityId,
    /// Distance between the player and the enemy when selected.
    pub distance: f32,
}

#[cfg(test)]
mod tests {
    use super::{
        CubeKind, DifficultyPreset, EffectKind, EntityId, EntityKind, EnemyTier, SessionError,
        UpgradeError, UpgradeKind,
    };
    use serde::{de::DeserializeOwned, Serialize};
    use std::time::Duration;

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn entity_kind_round_trips_through_bincode() {
        assert_round_trip(&EntityKind::Cube(CubeKind::Ultimate));
        assert_round_trip(&EntityId::new(42));
    }

    #[test]
    fn rejection_reasons_round_trip_through_bincode() {
        assert_round_trip(&UpgradeError::NotOffered);
        assert_round_trip(&SessionError::AlreadyStarted);
    }

    #[test]
    fn difficulty_presets_match_published_table() {
        let easy = DifficultyPreset::Easy.parameters();
        let medium = DifficultyPreset::Medium.parameters();
        let hard = DifficultyPreset::Hard.parameters();

        assert_eq!(
            (easy.initial_enemies(), easy.increase_rate(), easy.max_enemies()),
            (5, 1, 15)
        );
        assert_eq!(
            (
                medium.initial_enemies(),
                medium.increase_rate(),
                medium.max_enemies()
            ),
            (8, 2, 20)
        );
        assert_eq!(
            (hard.initial_enemies(), hard.increase_rate(), hard.max_enemies()),
            (12, 3, 25)
        );
    }

    #[test]
    fn enemy_tiers_map_to_entity_kinds() {
        for tier in EnemyTier::ALL {
            assert_eq!(tier.entity_kind().enemy_tier(), Some(tier));
        }
        assert_eq!(EntityKind::Projectile.enemy_tier(), None);
    }

    #[test]
    fn only_health_cubes_lack_a_timed_boost() {
        assert_eq!(CubeKind::Health.boost(), None);
        assert_eq!(CubeKind::Frozen.boost(), Some(EffectKind::Freeze));
        assert_eq!(
            EffectKind::Ultimate.duration(),
            Duration::from_secs(10),
            "ultimate outlasts the single-stat boosts"
        );
    }

    #[test]
    fn fire_rate_upgrade_lowers_the_rate() {
        assert!(UpgradeKind::FireRate.step() < 0.0);
        assert!(UpgradeKind::ALL
            .iter()
            .filter(|kind| **kind != UpgradeKind::FireRate)
            .all(|kind| kind.step() > 0.0));
    }

    #[test]
    fn upgrade_errors_render_human_readable_messages() {
        assert_eq!(
            UpgradeError::NoPendingChoice.to_string(),
            "no upgrade choice is pending"
        );
    }
}
