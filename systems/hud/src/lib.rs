#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic HUD system that turns world events into widget updates.

use std::{collections::VecDeque, time::Duration};

use cube_survivor_core::{CubeKind, Event, HudRequest, HudWidget, UpgradeKind};

/// Hint displayed briefly when a session starts.
pub const HINT_TEXT: &str = "Move with WASD. Walk into cubes to power up!";

const SESSION_LABELS: [HudWidget; 3] = [HudWidget::Health, HudWidget::Experience, HudWidget::Level];

/// Message announcing a consumed cube.
#[must_use]
pub const fn pickup_message(kind: CubeKind) -> &'static str {
    match kind {
        CubeKind::Speed => "Speed Boost!",
        CubeKind::Frozen => "Freezing Bullets!",
        CubeKind::Health => "Health Restored!",
        CubeKind::Damage => "Damage Boost!",
        CubeKind::Ultimate => "Ultimate Power!",
    }
}

/// Configuration parameters required to construct the HUD system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    message_duration: Duration,
    hint_duration: Duration,
}

impl Config {
    /// Creates a configuration using the provided display durations.
    #[must_use]
    pub const fn new(message_duration: Duration, hint_duration: Duration) -> Self {
        Self {
            message_duration,
            hint_duration,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Duration::from_secs(2), Duration::from_secs(2))
    }
}

/// Pure HUD system that queues pickup messages and mirrors player state into labels.
#[derive(Debug)]
pub struct Hud {
    config: Config,
    pending_pickups: VecDeque<CubeKind>,
    message_remaining: Option<Duration>,
    hint_remaining: Option<Duration>,
}

impl Hud {
    /// Creates a new HUD system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            pending_pickups: VecDeque::new(),
            message_remaining: None,
            hint_remaining: None,
        }
    }

    /// Number of pickup messages waiting behind the one on screen.
    #[must_use]
    pub fn queued_messages(&self) -> usize {
        self.pending_pickups.len()
    }

    /// Emits the requests that present the difficulty menu and hide session widgets.
    pub fn show_menu(&mut self, out: &mut Vec<HudRequest>) {
        self.pending_pickups.clear();
        self.message_remaining = None;
        self.hint_remaining = None;

        for widget in SESSION_LABELS {
            set_visible(out, widget, false);
        }
        for widget in [
            HudWidget::Hint,
            HudWidget::PickupMessage,
            HudWidget::GameOver,
            HudWidget::ReturnButton,
        ] {
            set_visible(out, widget, false);
        }
        hide_upgrade_buttons(out);
        set_visible(out, HudWidget::Title, true);
        set_visible(out, HudWidget::DifficultyMenu, true);
    }

    /// Consumes world events and emits widget updates.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<HudRequest>) {
        for event in events {
            match event {
                Event::SessionStarted { .. } => self.start_session(out),
                Event::ReturnedToMenu => self.show_menu(out),
                Event::PlayerHealthChanged { health, .. } => {
                    set_text(out, HudWidget::Health, format!("Health: {health}"));
                }
                Event::ExperienceChanged { xp, level } => {
                    set_text(out, HudWidget::Experience, format!("XP: {xp}"));
                    set_text(out, HudWidget::Level, format!("Level: {level}"));
                }
                Event::CubeConsumed { kind, .. } => {
                    self.pending_pickups.push_back(*kind);
                    if self.message_remaining.is_none() {
                        self.show_next_message(out);
                    }
                }
                Event::UpgradeOffered { options } => {
                    for upgrade in UpgradeKind::ALL {
                        set_visible(
                            out,
                            HudWidget::UpgradeButton(upgrade),
                            options.contains(&upgrade),
                        );
                    }
                }
                Event::UpgradeChosen { .. } => hide_upgrade_buttons(out),
                Event::GameOver => self.game_over(out),
                Event::TimeAdvanced { dt } => self.advance(*dt, out),
                _ => {}
            }
        }
    }

    fn start_session(&mut self, out: &mut Vec<HudRequest>) {
        self.pending_pickups.clear();
        self.message_remaining = None;

        set_visible(out, HudWidget::Title, false);
        set_visible(out, HudWidget::DifficultyMenu, false);
        set_visible(out, HudWidget::GameOver, false);
        set_visible(out, HudWidget::ReturnButton, false);
        set_visible(out, HudWidget::PickupMessage, false);
        hide_upgrade_buttons(out);
        for widget in SESSION_LABELS {
            set_visible(out, widget, true);
        }

        set_text(out, HudWidget::Hint, HINT_TEXT.to_owned());
        set_visible(out, HudWidget::Hint, true);
        self.hint_remaining = Some(self.config.hint_duration);
    }

    fn game_over(&mut self, out: &mut Vec<HudRequest>) {
        self.pending_pickups.clear();
        self.message_remaining = None;
        self.hint_remaining = None;

        hide_upgrade_buttons(out);
        set_visible(out, HudWidget::Hint, false);
        set_visible(out, HudWidget::PickupMessage, false);
        set_visible(out, HudWidget::GameOver, true);
        set_visible(out, HudWidget::ReturnButton, true);
    }

    fn advance(&mut self, dt: Duration, out: &mut Vec<HudRequest>) {
        if let Some(remaining) = self.hint_remaining {
            let left = remaining.saturating_sub(dt);
            if left.is_zero() {
                self.hint_remaining = None;
                set_visible(out, HudWidget::Hint, false);
            } else {
                self.hint_remaining = Some(left);
            }
        }

        if let Some(remaining) = self.message_remaining {
            let left = remaining.saturating_sub(dt);
            if left.is_zero() {
                self.message_remaining = None;
                set_visible(out, HudWidget::PickupMessage, false);
                self.show_next_message(out);
            } else {
                self.message_remaining = Some(left);
            }
        }
    }

    fn show_next_message(&mut self, out: &mut Vec<HudRequest>) {
        let Some(kind) = self.pending_pickups.pop_front() else {
            return;
        };
        set_text(out, HudWidget::PickupMessage, pickup_message(kind).to_owned());
        set_visible(out, HudWidget::PickupMessage, true);
        self.message_remaining = Some(self.config.message_duration);
    }
}

fn hide_upgrade_buttons(out: &mut Vec<HudRequest>) {
    for upgrade in UpgradeKind::ALL {
        set_visible(out, HudWidget::UpgradeButton(upgrade), false);
    }
}

fn set_text(out: &mut Vec<HudRequest>, widget: HudWidget, value: String) {
    out.push(HudRequest::SetText { widget, value });
}

fn set_visible(out: &mut Vec<HudRequest>, widget: HudWidget, visible: bool) {
    out.push(HudRequest::SetVisible { widget, visible });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers_render_without_fraction() {
        let mut hud = Hud::new(Config::default());
        let mut out = Vec::new();
        hud.handle(
            &[Event::PlayerHealthChanged {
                health: 90.0,
                max_health: 100.0,
            }],
            &mut out,
        );
        assert_eq!(
            out,
            vec![HudRequest::SetText {
                widget: HudWidget::Health,
                value: "Health: 90".to_owned(),
            }]
        );
    }

    #[test]
    fn menu_hides_every_session_widget() {
        let mut hud = Hud::new(Config::default());
        let mut out = Vec::new();
        hud.show_menu(&mut out);

        assert!(out.contains(&HudRequest::SetVisible {
            widget: HudWidget::DifficultyMenu,
            visible: true,
        }));
        for upgrade in UpgradeKind::ALL {
            assert!(out.contains(&HudRequest::SetVisible {
                widget: HudWidget::UpgradeButton(upgrade),
                visible: false,
            }));
        }
    }
}
