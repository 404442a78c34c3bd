//! Configuration loading from TOML.
//!
//! Reads `derby.toml` (or the file named by `DERBY_CONFIG`) and
//! deserializes into strongly-typed structs. A missing file falls back to
//! the built-in four-horse card.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::race::RaceCard;
use crate::types::{DerbyError, Entrant};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "derby.toml";

/// Env var overriding the config path.
pub const CONFIG_PATH_ENV: &str = "DERBY_CONFIG";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub race: RaceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RaceConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Symbol printed in front of stakes and payouts.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Fixed RNG seed. Unset means a fresh OS-seeded draw every run.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_entrants")]
    pub entrants: Vec<EntrantConfig>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct EntrantConfig {
    pub id: u32,
    /// Win chance in whole percent.
    pub chance: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default)]
    pub json: bool,
}

fn default_name() -> String {
    "Horse Race".to_string()
}

fn default_currency() -> String {
    "€".to_string()
}

fn default_filter() -> String {
    "derby=warn".to_string()
}

fn default_entrants() -> Vec<EntrantConfig> {
    [(1, 45), (2, 30), (3, 20), (4, 5)]
        .into_iter()
        .map(|(id, chance)| EntrantConfig { id, chance })
        .collect()
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            currency: default_currency(),
            seed: None,
            entrants: default_entrants(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        config
            .validate()
            .with_context(|| format!("Invalid race card in {path}"))?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise use the built-in card.
    /// Returns the config and whether it came from disk.
    pub fn load_or_default(path: &str) -> Result<(Self, bool)> {
        if !Path::new(path).exists() {
            return Ok((Self::default(), false));
        }
        Ok((Self::load(path)?, true))
    }

    /// Config path from `DERBY_CONFIG`, falling back to `derby.toml`.
    pub fn resolve_path() -> String {
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string())
    }

    /// Check the entrant table without building a card.
    pub fn validate(&self) -> Result<(), DerbyError> {
        self.race_card().map(|_| ())
    }

    /// Build the immutable race card from the configured entrants.
    pub fn race_card(&self) -> Result<RaceCard, DerbyError> {
        RaceCard::new(
            self.race
                .entrants
                .iter()
                .map(|e| Entrant::new(e.id, e.chance))
                .collect(),
        )
    }
}
