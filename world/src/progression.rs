//! Experience, levels, and the single-choice upgrade offer.

use cube_survivor_core::{
    UpgradeError, UpgradeKind, MAX_HEALTH_BONUS, MAX_MOVE_SPEED, MAX_PROJECTILE_DAMAGE,
    MIN_FIRE_RATE, XP_PER_LEVEL,
};

/// Player stats consulted when deciding which upgrades remain available.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct UpgradeStats {
    pub(crate) move_speed: f32,
    pub(crate) fire_rate: f32,
    pub(crate) projectile_damage: f32,
    pub(crate) max_health: f32,
    pub(crate) base_health: f32,
}

impl UpgradeStats {
    fn allows(&self, upgrade: UpgradeKind) -> bool {
        match upgrade {
            UpgradeKind::Speed => self.move_speed < MAX_MOVE_SPEED,
            UpgradeKind::FireRate => self.fire_rate > MIN_FIRE_RATE,
            UpgradeKind::Damage => self.projectile_damage < MAX_PROJECTILE_DAMAGE,
            UpgradeKind::MaxHealth => self.max_health < self.base_health + MAX_HEALTH_BONUS,
        }
    }

    /// Upgrades still below their caps, in display order.
    pub(crate) fn available(&self) -> Vec<UpgradeKind> {
        UpgradeKind::ALL
            .into_iter()
            .filter(|upgrade| self.allows(*upgrade))
            .collect()
    }
}

/// Experience ledger and pending upgrade offer.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Progression {
    xp: u32,
    level: u32,
    offer: Option<Vec<UpgradeKind>>,
}

impl Progression {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) const fn xp(&self) -> u32 {
        self.xp
    }

    pub(crate) const fn level(&self) -> u32 {
        self.level
    }

    pub(crate) fn pending_offer(&self) -> Option<&[UpgradeKind]> {
        self.offer.as_deref()
    }

    /// Adds experience and returns the number of levels gained.
    pub(crate) fn gain_xp(&mut self, amount: u32) -> u32 {
        self.xp = self.xp.saturating_add(amount);
        let mut gained = 0;
        while self.xp >= XP_PER_LEVEL {
            self.xp -= XP_PER_LEVEL;
            self.level += 1;
            gained += 1;
        }
        gained
    }

    /// Records an offer; an empty list leaves nothing pending and returns `false`.
    pub(crate) fn offer(&mut self, options: Vec<UpgradeKind>) -> bool {
        if options.is_empty() {
            self.offer = None;
            return false;
        }
        self.offer = Some(options);
        true
    }

    /// Consumes the pending offer if it contains `upgrade`.
    pub(crate) fn choose(&mut self, upgrade: UpgradeKind) -> Result<(), UpgradeError> {
        let options = self.offer.as_ref().ok_or(UpgradeError::NoPendingChoice)?;
        if !options.contains(&upgrade) {
            return Err(UpgradeError::NotOffered);
        }
        self.offer = None;
        Ok(())
    }
}
