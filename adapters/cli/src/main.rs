#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a headless Cube Survivor session.

mod autopilot;
mod session;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use cube_survivor_core::DifficultyPreset;
use tracing_subscriber::EnvFilter;

use crate::session::SessionConfig;

/// Difficulty presets accepted on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl From<Difficulty> for DifficultyPreset {
    fn from(value: Difficulty) -> Self {
        match value {
            Difficulty::Easy => Self::Easy,
            Difficulty::Medium => Self::Medium,
            Difficulty::Hard => Self::Hard,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "cube-survivor")]
#[command(author, version, about = "Headless Cube Survivor session runner")]
struct Args {
    /// TOML session file; flags override its values
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Seed for enemy and cube spawning
    #[arg(long)]
    seed: Option<u64>,

    /// Difficulty preset selected on the menu
    #[arg(long, short = 'd', value_enum)]
    difficulty: Option<Difficulty>,

    /// Maximum simulated time in seconds
    #[arg(long)]
    duration: Option<f32>,

    /// Simulated frames per second
    #[arg(long)]
    fps: Option<u32>,
}

impl Args {
    fn session_config(&self) -> Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::load(path)?,
            None => SessionConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty.into();
        }
        if let Some(duration) = self.duration {
            config.duration_secs = duration;
        }
        if let Some(fps) = self.fps {
            config.frame_rate = fps;
        }

        config.validate()
    }
}

/// Entry point for the Cube Survivor command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = args.session_config()?;
    let summary = autopilot::run(&config);
    println!("{summary}");
    Ok(())
}
