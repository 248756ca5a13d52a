#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that emits projectile firing commands from targeting data.

use std::time::Duration;

use cube_survivor_core::{Command, Event, PlayerSnapshot, PlayerTarget};
use tracing::trace;

/// Player combat system that fires at the current target on a fixed cadence.
#[derive(Debug, Default)]
pub struct Combat {
    cooldown: Duration,
}

impl Combat {
    /// Creates a new combat system ready to fire on the first tick.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Time remaining before the next shot is attempted.
    #[must_use]
    pub const fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Emits `Command::FireProjectile` whenever the cooldown elapses.
    ///
    /// The cooldown restarts at `1 / fire_rate` seconds whether or not a
    /// target was available when it elapsed.
    pub fn handle(
        &mut self,
        events: &[Event],
        player: &PlayerSnapshot,
        targets: &[PlayerTarget],
        out: &mut Vec<Command>,
    ) {
        for event in events {
            match event {
                Event::SessionStarted { .. } | Event::ReturnedToMenu => {
                    self.cooldown = Duration::ZERO;
                }
                Event::TimeAdvanced { dt } => {
                    self.cooldown = self.cooldown.saturating_sub(*dt);
                    if !self.cooldown.is_zero() {
                        continue;
                    }

                    if let Some(target) = targets.first() {
                        trace!(enemy = target.enemy.get(), "firing projectile");
                        out.push(Command::FireProjectile {
                            target: target.enemy,
                        });
                    }
                    self.cooldown = fire_interval(player.fire_rate);
                }
                _ => {}
            }
        }
    }
}

fn fire_interval(fire_rate: f32) -> Duration {
    if fire_rate > 0.0 && fire_rate.is_finite() {
        Duration::from_secs_f32(1.0 / fire_rate)
    } else {
        Duration::MAX
    }
}
