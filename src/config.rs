//! Application configuration.
//!
//! Sources, lowest to highest priority:
//! 1. built-in defaults
//! 2. JSON file named by `TUI2048_CONFIG`
//! 3. `TUI2048_*` environment variables
//!
//! Bad values are reported, never silently replaced by a default.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Deserializer};

use crate::core::EngineConfig;
use crate::types::{
    EndPolicy, DEFAULT_ANIMATION_MS, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_WIN_EXPONENT,
    MAX_EXPONENT, MIN_WIN_EXPONENT,
};

pub const CONFIG_PATH_VAR: &str = "TUI2048_CONFIG";

/// Largest accepted grid side; keeps the board on an ordinary terminal.
pub const MAX_GRID_SIDE: u8 = 16;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub grid_width: u8,
    pub grid_height: u8,
    pub win_exponent: u8,
    pub animation_ms: u32,
    /// Spawn seed; derived from the clock when unset
    pub seed: Option<u32>,
    #[serde(deserialize_with = "deserialize_end_policy")]
    pub end_policy: EndPolicy,
    /// Log file; logging is off when unset
    pub log_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            win_exponent: DEFAULT_WIN_EXPONENT,
            animation_ms: DEFAULT_ANIMATION_MS,
            seed: None,
            end_policy: EndPolicy::AutoReset,
            log_path: None,
        }
    }
}

fn deserialize_end_policy<'de, D>(deserializer: D) -> std::result::Result<EndPolicy, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    EndPolicy::from_str(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("unknown end policy `{s}`")))
}

impl AppConfig {
    /// Load from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_sources(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` in place of the process environment.
    pub fn from_sources(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match non_empty(lookup(CONFIG_PATH_VAR)) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_env(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("parse config file {}", path.display()))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    fn apply_env(&mut self, lookup: &impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(v) = non_empty(lookup("TUI2048_GRID_WIDTH")) {
            self.grid_width = parse_var("TUI2048_GRID_WIDTH", &v)?;
        }
        if let Some(v) = non_empty(lookup("TUI2048_GRID_HEIGHT")) {
            self.grid_height = parse_var("TUI2048_GRID_HEIGHT", &v)?;
        }
        if let Some(v) = non_empty(lookup("TUI2048_WIN_EXPONENT")) {
            self.win_exponent = parse_var("TUI2048_WIN_EXPONENT", &v)?;
        }
        if let Some(v) = non_empty(lookup("TUI2048_ANIMATION_MS")) {
            self.animation_ms = parse_var("TUI2048_ANIMATION_MS", &v)?;
        }
        if let Some(v) = non_empty(lookup("TUI2048_SEED")) {
            self.seed = Some(parse_var("TUI2048_SEED", &v)?);
        }
        if let Some(v) = non_empty(lookup("TUI2048_END_POLICY")) {
            self.end_policy = EndPolicy::from_str(&v)
                .with_context(|| format!("TUI2048_END_POLICY: unknown end policy `{v}`"))?;
        }
        if let Some(v) = non_empty(lookup("TUI2048_LOG_PATH")) {
            self.log_path = Some(PathBuf::from(v));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        for (name, side) in [("grid_width", self.grid_width), ("grid_height", self.grid_height)] {
            if !(1..=MAX_GRID_SIDE).contains(&side) {
                bail!("{name} must be in 1..={MAX_GRID_SIDE}, got {side}");
            }
        }
        if !(MIN_WIN_EXPONENT..=MAX_EXPONENT).contains(&self.win_exponent) {
            bail!(
                "win_exponent must be in {MIN_WIN_EXPONENT}..={MAX_EXPONENT}, got {}",
                self.win_exponent
            );
        }
        Ok(())
    }

    /// Validated engine parameters; an unset seed is taken from the clock.
    pub fn engine_config(&self) -> Result<EngineConfig> {
        self.validate()?;
        Ok(EngineConfig {
            grid_width: self.grid_width,
            grid_height: self.grid_height,
            win_exponent: self.win_exponent,
            animation_ms: self.animation_ms,
            seed: self.seed.unwrap_or_else(clock_seed),
            end_policy: self.end_policy,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_var<T>(name: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse()
        .with_context(|| format!("{name}: invalid value `{value}`"))
}

fn clock_seed() -> u32 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1);
    (nanos ^ (nanos >> 32)) as u32
}
