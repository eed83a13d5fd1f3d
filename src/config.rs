//! User configuration management

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::sound::SoundConfig;
use crate::timer::Durations;

/// Overrides the application directory (config, tasks, debug log)
pub const APP_DIR_ENV: &str = "POMOFOCUS_HOME";

const APP_DIR_NAME: &str = ".pomofocus";

pub const DEFAULT_WORK_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;

/// Returns the application directory, creating it if needed.
pub fn get_app_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os(APP_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir()
            .ok_or_else(|| anyhow!("Cannot find home directory"))?
            .join(APP_DIR_NAME),
    };

    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,

    #[serde(default)]
    pub sound: SoundConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,

    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: DEFAULT_WORK_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
        }
    }
}

fn default_work_minutes() -> u32 {
    DEFAULT_WORK_MINUTES
}

fn default_break_minutes() -> u32 {
    DEFAULT_BREAK_MINUTES
}

impl TimerConfig {
    /// Initial timer durations. Zero minutes falls back to the default.
    pub fn durations(&self) -> Durations {
        let work = if self.work_minutes == 0 {
            warn!("timer.work_minutes must be positive, using {DEFAULT_WORK_MINUTES}");
            DEFAULT_WORK_MINUTES
        } else {
            self.work_minutes
        };
        let brk = if self.break_minutes == 0 {
            warn!("timer.break_minutes must be positive, using {DEFAULT_BREAK_MINUTES}");
            DEFAULT_BREAK_MINUTES
        } else {
            self.break_minutes
        };
        Durations::from_minutes(work, brk)
    }
}

fn config_path() -> Result<PathBuf> {
    Ok(get_app_dir()?.join("config.toml"))
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Like [`Config::load`], but a broken config file never blocks startup.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load config, using defaults: {}", e);
                Config::default()
            }
        }
    }
}
