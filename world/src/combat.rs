//! Health bookkeeping and enemy immobilization.

use std::time::Duration;

/// Result of applying damage to a health pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DamageOutcome {
    /// Health remains above zero.
    Survived,
    /// Health reached zero with this hit.
    Died,
    /// The pool was already depleted; the hit changed nothing.
    AlreadyDead,
}

/// Health pool whose ceiling may be raised at runtime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Health {
    current: f32,
    max: f32,
}

impl Health {
    /// Creates a full health pool.
    pub(crate) const fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    pub(crate) const fn current(&self) -> f32 {
        self.current
    }

    pub(crate) const fn max(&self) -> f32 {
        self.max
    }

    pub(crate) fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    /// Subtracts `amount`, clamping at zero.
    pub(crate) fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.is_depleted() {
            return DamageOutcome::AlreadyDead;
        }

        let remaining = self.current - amount;
        if remaining <= 0.0 {
            self.current = 0.0;
            DamageOutcome::Died
        } else {
            self.current = remaining;
            DamageOutcome::Survived
        }
    }

    /// Adds `amount` without exceeding the current maximum.
    pub(crate) fn recover(&mut self, amount: f32) {
        self.current = (self.current + amount.max(0.0)).min(self.max);
    }

    /// Replaces the maximum and refills the pool to it.
    pub(crate) fn reset_max(&mut self, max: f32) {
        self.max = max;
        self.current = max;
    }
}

/// Countdown that suspends an enemy's movement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct FreezeState {
    remaining: Option<Duration>,
}

impl FreezeState {
    pub(crate) fn is_frozen(&self) -> bool {
        self.remaining.is_some()
    }

    pub(crate) fn remaining(&self) -> Duration {
        self.remaining.unwrap_or(Duration::ZERO)
    }

    /// Starts a freeze; returns `false` when already frozen, leaving the countdown untouched.
    pub(crate) fn freeze(&mut self, duration: Duration) -> bool {
        if self.remaining.is_some() {
            return false;
        }
        self.remaining = Some(duration);
        true
    }

    /// Advances the countdown; returns `true` while still frozen after the update.
    pub(crate) fn tick(&mut self, dt: Duration) -> bool {
        let Some(remaining) = self.remaining else {
            return false;
        };

        let left = remaining.saturating_sub(dt);
        if left.is_zero() {
            self.remaining = None;
            false
        } else {
            self.remaining = Some(left);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_clamps_to_zero_and_reports_death_once() {
        let mut health = Health::full(50.0);

        assert_eq!(health.take_damage(30.0), DamageOutcome::Survived);
        assert_eq!(health.take_damage(30.0), DamageOutcome::Died);
        assert_eq!(health.current(), 0.0);
        assert_eq!(health.take_damage(30.0), DamageOutcome::AlreadyDead);
        assert_eq!(health.current(), 0.0);
    }

    #[test]
    fn recovery_never_exceeds_current_maximum() {
        let mut health = Health::full(100.0);
        let _ = health.take_damage(10.0);
        health.recover(25.0);
        assert_eq!(health.current(), 100.0);

        health.reset_max(105.0);
        let _ = health.take_damage(50.0);
        health.recover(1_000.0);
        assert_eq!(health.current(), 105.0);
    }

    #[test]
    fn exact_lethal_damage_kills() {
        let mut health = Health::full(40.0);
        assert_eq!(health.take_damage(40.0), DamageOutcome::Died);
        assert!(health.is_depleted());
    }

    #[test]
    fn refreezing_does_not_extend_duration() {
        let mut freeze = FreezeState::default();
        assert!(freeze.freeze(Duration::from_secs(2)));
        assert!(freeze.tick(Duration::from_millis(1_500)));
        let before = freeze.remaining();

        assert!(!freeze.freeze(Duration::from_secs(2)));

        assert_eq!(freeze.remaining(), before);
        assert_eq!(before, Duration::from_millis(500));
    }

    #[test]
    fn freeze_thaws_when_countdown_elapses() {
        let mut freeze = FreezeState::default();
        assert!(freeze.freeze(Duration::from_secs(2)));
        assert!(!freeze.tick(Duration::from_secs(2)));
        assert!(!freeze.is_frozen());
        assert!(freeze.freeze(Duration::from_secs(2)), "can freeze again after thawing");
    }
}
