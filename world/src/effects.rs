//! Timed stat modifiers that revert exactly what they applied.

use std::time::Duration;

use cube_survivor_core::{EffectKind, EntityId};

/// Additive change applied to a target's stats by a single effect.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct StatDelta {
    /// Change applied to movement speed.
    pub(crate) move_speed: f32,
    /// Change applied to projectile damage.
    pub(crate) projectile_damage: f32,
    /// Change applied to the number of active freeze-on-hit grants.
    pub(crate) freeze_grants: i32,
}

impl StatDelta {
    /// Delta granted by the provided boost.
    pub(crate) const fn for_effect(kind: EffectKind) -> Self {
        match kind {
            EffectKind::Speed => Self {
                move_speed: 0.5,
                projectile_damage: 0.0,
                freeze_grants: 0,
            },
            EffectKind::Freeze => Self {
                move_speed: 0.0,
                projectile_damage: 0.0,
                freeze_grants: 1,
            },
            EffectKind::Damage => Self {
                move_speed: 0.0,
                projectile_damage: 50.0,
                freeze_grants: 0,
            },
            EffectKind::Ultimate => Self {
                move_speed: 1.0,
                projectile_damage: 50.0,
                freeze_grants: 1,
            },
        }
    }

    /// Delta that undoes `self`.
    pub(crate) fn inverse(self) -> Self {
        Self {
            move_speed: -self.move_speed,
            projectile_damage: -self.projectile_damage,
            freeze_grants: -self.freeze_grants,
        }
    }
}

/// Stat holder that timed effects can modify.
pub(crate) trait EffectTarget {
    /// Adds the delta to the holder's stats.
    fn apply_delta(&mut self, delta: StatDelta);
}

/// Effect scheduled for reversal once its countdown elapses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ActiveEffect {
    pub(crate) target: EntityId,
    pub(crate) kind: EffectKind,
    pub(crate) delta: StatDelta,
    pub(crate) remaining: Duration,
}

/// Independent countdowns for every active effect.
///
/// Re-applying a kind that is already active adds a second timer instead of
/// refreshing the first one, so each application reverts only its own delta.
#[derive(Debug, Default)]
pub(crate) struct EffectTimers {
    active: Vec<ActiveEffect>,
}

impl EffectTimers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Applies the effect's delta to `holder` and schedules its reversal.
    pub(crate) fn apply(
        &mut self,
        target: EntityId,
        holder: &mut impl EffectTarget,
        kind: EffectKind,
        delta: StatDelta,
        duration: Duration,
    ) {
        holder.apply_delta(delta);
        self.active.push(ActiveEffect {
            target,
            kind,
            delta,
            remaining: duration,
        });
    }

    /// Advances every countdown, moving elapsed effects into `expired`.
    ///
    /// Callers revert the expired deltas; effects whose target no longer
    /// exists must be dropped without reverting.
    pub(crate) fn tick(&mut self, dt: Duration, expired: &mut Vec<ActiveEffect>) {
        for effect in &mut self.active {
            effect.remaining = effect.remaining.saturating_sub(dt);
        }

        let mut index = 0;
        while index < self.active.len() {
            if self.active[index].remaining.is_zero() {
                expired.push(self.active.remove(index));
            } else {
                index += 1;
            }
        }
    }

    /// Removes every effect attached to `target`, returning them in application order.
    pub(crate) fn drain_target(&mut self, target: EntityId) -> Vec<ActiveEffect> {
        let mut drained = Vec::new();
        self.active.retain(|effect| {
            if effect.target == target {
                drained.push(*effect);
                false
            } else {
                true
            }
        });
        drained
    }

    /// Discards every effect without reverting anything.
    pub(crate) fn clear(&mut self) {
        self.active.clear();
    }

    /// Kinds of the effects currently active, in application order.
    pub(crate) fn kinds(&self) -> impl Iterator<Item = EffectKind> + '_ {
        self.active.iter().map(|effect| effect.kind)
    }
}
