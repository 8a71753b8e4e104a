//! Duel configuration with documented tunables
//!
//! Formula constants (damage weights, mitigation caps) live in
//! `combat::constants`. This struct only holds the values a host is
//! expected to change: round rules, AI thresholds, pacing and seeding.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::combat::constants::MAX_SELECTIONS;
use crate::core::error::{DuelError, Result};

/// Configuration for a single match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuelConfig {
    /// Round readiness rules
    pub rules: RulesConfig,

    /// Opponent strategy selector tuning
    pub ai: AiConfig,

    /// Presentation pacing
    pub pacing: PacingConfig,

    /// Seed for the match RNG
    ///
    /// `None` draws a fresh seed from the OS. Two matches built from the
    /// same seed, combatants and selections replay identically.
    pub seed: Option<u64>,
}

/// How many abilities a human side must commit before a round can start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Attacks required per round (1..=2)
    pub attacks_per_round: usize,

    /// Defenses required per round (1..=2)
    pub defenses_per_round: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            attacks_per_round: 2,
            defenses_per_round: 2,
        }
    }
}

/// Thresholds used by strategy classification and attack prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Health below which a side is considered in danger
    ///
    /// The AI turns Defensive when its own health drops below this,
    /// and Aggressive when the opponent's does.
    pub low_health_threshold: f64,

    /// Stat-total lead required to classify one side as stronger
    pub stat_advantage_margin: u32,

    /// A stat strictly above this marks the opponent as specialised in it
    pub prediction_stat_threshold: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            low_health_threshold: 30.0,
            stat_advantage_margin: 5,
            prediction_stat_threshold: 7,
        }
    }
}

/// Presentation pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Delay before the AI re-selects for the next round, in milliseconds
    ///
    /// Zero runs the selector immediately after the round resolves.
    pub ai_turn_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            ai_turn_delay_ms: 500,
        }
    }
}

impl PacingConfig {
    pub fn ai_turn_delay(&self) -> Duration {
        Duration::from_millis(self.ai_turn_delay_ms)
    }
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            rules: RulesConfig::default(),
            ai: AiConfig::default(),
            pacing: PacingConfig::default(),
            seed: None,
        }
    }
}

impl DuelConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Headless config: no AI delay, fixed seed
    pub fn headless(seed: u64) -> Self {
        Self {
            pacing: PacingConfig { ai_turn_delay_ms: 0 },
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: DuelConfig = toml::from_str(content)?;
        config.validate().map_err(DuelError::InvalidConfig)?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !(1..=MAX_SELECTIONS).contains(&self.rules.attacks_per_round) {
            return Err(format!(
                "attacks_per_round ({}) must be between 1 and {}",
                self.rules.attacks_per_round, MAX_SELECTIONS
            ));
        }

        if !(1..=MAX_SELECTIONS).contains(&self.rules.defenses_per_round) {
            return Err(format!(
                "defenses_per_round ({}) must be between 1 and {}",
                self.rules.defenses_per_round, MAX_SELECTIONS
            ));
        }

        if !self.ai.low_health_threshold.is_finite() || self.ai.low_health_threshold < 0.0 {
            return Err(format!(
                "low_health_threshold ({}) must be a non-negative number",
                self.ai.low_health_threshold
            ));
        }

        Ok(())
    }
}
