//! Bout configuration
//!
//! Every constant the orchestrator needs per bout lives here. Defaults match a
//! standard three-round professional bout.

use crate::{FightError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How a round with equal health loss is awarded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Uniform random pick between the corners
    #[default]
    CoinFlip,
    /// More strikes landed in the round wins; falls back to a coin flip when
    /// that is also level
    StrikeDifferential,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoutConfig {
    pub rounds: u32,
    pub round_seconds: u32,
    /// Maximum health of each body region
    pub max_health: f64,
    pub starting_stamina: f64,
    /// Stamina given back to each fighter at the start of every round
    pub stamina_restore: f64,
    /// Health given back to each body region between rounds
    pub health_recovery: f64,
    /// Longest combo, counted in strikes
    pub max_combo: u32,
    pub tie_break: TieBreak,
}

impl Default for BoutConfig {
    fn default() -> Self {
        BoutConfig {
            rounds: 3,
            round_seconds: 300,
            max_health: 100.0,
            starting_stamina: 100.0,
            stamina_restore: 20.0,
            health_recovery: 10.0,
            max_combo: 4,
            tie_break: TieBreak::CoinFlip,
        }
    }
}

impl BoutConfig {
    /// Load a configuration from a JSON file; absent fields take defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: BoutConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rounds == 0 {
            return Err(FightError::InvalidConfig("rounds must be at least 1".to_string()));
        }
        if self.round_seconds == 0 {
            return Err(FightError::InvalidConfig(
                "round_seconds must be at least 1".to_string(),
            ));
        }
        if !(self.max_health > 0.0) {
            return Err(FightError::InvalidConfig(format!(
                "max_health must be positive, got {}",
                self.max_health
            )));
        }
        if self.max_combo == 0 {
            return Err(FightError::InvalidConfig("max_combo must be at least 1".to_string()));
        }
        for (name, value) in [
            ("starting_stamina", self.starting_stamina),
            ("stamina_restore", self.stamina_restore),
            ("health_recovery", self.health_recovery),
        ] {
            if !(value >= 0.0) {
                return Err(FightError::InvalidConfig(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }
}
