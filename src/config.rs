//! Driver configuration: environment defaults overridden by command-line flags.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};

use crate::types::DEFAULT_STEP_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    /// Seed for the shape source.
    pub seed: u32,
    /// Gravity cadence in milliseconds.
    pub step_ms: u64,
    /// Capture the mouse so a left drag moves the piece.
    pub mouse: bool,
}

impl DriverConfig {
    /// Load from `TILE_TETRIS_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup("TILE_TETRIS_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let step_ms = lookup("TILE_TETRIS_STEP_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u64| ms > 0)
            .unwrap_or(DEFAULT_STEP_MS);

        let mouse = lookup("TILE_TETRIS_MOUSE")
            .map(|v| !matches!(v.trim().to_lowercase().as_str(), "0" | "false" | "off"))
            .unwrap_or(true);

        Self {
            seed,
            step_ms,
            mouse,
        }
    }

    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_ms)
    }
}

/// Apply `--seed N`, `--step-ms N` and `--no-mouse` on top of `base`.
///
/// `args` excludes the program name.
pub fn parse_args(args: &[String], base: DriverConfig) -> Result<DriverConfig> {
    let mut config = base;
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("config: missing value for --seed"))?;
                config.seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("config: invalid --seed value: {}", v))?;
            }
            "--step-ms" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("config: missing value for --step-ms"))?;
                config.step_ms = v
                    .parse::<u64>()
                    .ok()
                    .filter(|&ms| ms > 0)
                    .ok_or_else(|| anyhow!("config: invalid --step-ms value: {}", v))?;
            }
            "--no-mouse" => config.mouse = false,
            other => {
                return Err(anyhow!("config: unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(config)
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32 ^ d.as_secs() as u32)
        .unwrap_or(1)
}
