//! TOML configuration parsing and validation.
//!
//! Only `[db]` is required. Every other section falls back to defaults, so
//! a minimal config is:
//!
//! ```toml
//! [db]
//! path = "./data/pantry.sqlite"
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use pantry_core::recipes::DEFAULT_CALORIES_PER_SERVING;
use pantry_core::search::{MatchParams, DEFAULT_MIN_MATCH_PERCENT};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub recipes: RecipesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_min_match_percent")]
    pub min_match_percent: f64,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_match_percent: DEFAULT_MIN_MATCH_PERCENT,
            limit: None,
        }
    }
}

fn default_min_match_percent() -> f64 {
    DEFAULT_MIN_MATCH_PERCENT
}

impl SearchConfig {
    /// Ranking parameters, with an optional per-request limit override.
    pub fn match_params(&self, limit: Option<usize>) -> MatchParams {
        MatchParams {
            min_match_percent: self.min_match_percent,
            limit: limit.or(self.limit),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecipesConfig {
    #[serde(default = "default_calories_per_serving")]
    pub default_calories_per_serving: f64,
}

impl Default for RecipesConfig {
    fn default() -> Self {
        Self {
            default_calories_per_serving: DEFAULT_CALORIES_PER_SERVING,
        }
    }
}

fn default_calories_per_serving() -> f64 {
    DEFAULT_CALORIES_PER_SERVING
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.db.path.as_os_str().is_empty() {
        bail!("db.path must not be empty");
    }

    if !(0.0..=100.0).contains(&config.search.min_match_percent) {
        bail!("search.min_match_percent must be in [0.0, 100.0]");
    }

    if config.search.limit == Some(0) {
        bail!("search.limit must be >= 1");
    }

    let cals = config.recipes.default_calories_per_serving;
    if !cals.is_finite() || cals < 0.0 {
        bail!("recipes.default_calories_per_serving must be a non-negative number");
    }

    match config.logging.level.to_ascii_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" | "off" => {}
        other => bail!(
            "Unknown logging.level: '{}'. Must be trace, debug, info, warn, error, or off.",
            other
        ),
    }

    Ok(())
}
