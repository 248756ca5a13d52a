use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use cube_survivor_core::DifficultyPreset;
use serde::Deserialize;

/// Parameters describing a single headless session.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SessionConfig {
    /// Seed for the spawn controller's random stream.
    pub(crate) seed: u64,
    /// Difficulty preset selected on the menu.
    pub(crate) difficulty: DifficultyPreset,
    /// Upper bound on simulated time, in seconds.
    pub(crate) duration_secs: f32,
    /// Number of simulated frames per second.
    pub(crate) frame_rate: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 0x00c0_ffee,
            difficulty: DifficultyPreset::Easy,
            duration_secs: 180.0,
            frame_rate: 60,
        }
    }
}

impl SessionConfig {
    /// Loads a session file, falling back to defaults for missing keys.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read session file at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid session file at {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse session toml contents")
    }

    /// Rejects configurations that cannot drive a session.
    pub(crate) fn validate(self) -> Result<Self> {
        if self.frame_rate == 0 {
            bail!("frame rate must be positive");
        }
        if !(self.duration_secs.is_finite() && self.duration_secs > 0.0) {
            bail!(
                "session duration must be a positive number of seconds, got {}",
                self.duration_secs
            );
        }
        Ok(self)
    }

    /// Total number of frames the session may run for.
    pub(crate) fn frame_budget(&self) -> u64 {
        (f64::from(self.duration_secs) * f64::from(self.frame_rate)).ceil() as u64
    }
}
