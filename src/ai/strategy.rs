//! Strategy archetypes
//!
//! Recomputed every round from the current health and stat totals.
//! Balanced and Adaptive weight identically; they differ only in name.

use serde::{Deserialize, Serialize};

use crate::combat::{Combatant, Dice};
use crate::core::config::AiConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    Aggressive,
    Defensive,
    Balanced,
    Adaptive,
    /// Uniform weights; only reachable through an explicit override
    Random,
}

impl Strategy {
    /// Pick an archetype for this round
    pub fn classify<D: Dice + ?Sized>(
        own: &Combatant,
        opponent: &Combatant,
        config: &AiConfig,
        dice: &mut D,
    ) -> Strategy {
        if own.health() < config.low_health_threshold {
            return Strategy::Defensive;
        }

        if opponent.health() < config.low_health_threshold {
            return Strategy::Aggressive;
        }

        let own_total = own.total_stats();
        let opponent_total = opponent.total_stats();

        if own_total > opponent_total + config.stat_advantage_margin {
            return Strategy::Aggressive;
        }
        if opponent_total > own_total + config.stat_advantage_margin {
            return Strategy::Defensive;
        }

        [Strategy::Balanced, Strategy::Adaptive][dice.pick_index(2)]
    }

    pub fn attack_multiplier(self) -> f64 {
        match self {
            Self::Aggressive => 1.3,
            Self::Defensive => 0.7,
            Self::Balanced | Self::Adaptive | Self::Random => 1.0,
        }
    }

    pub fn defense_multiplier(self) -> f64 {
        match self {
            Self::Defensive => 1.5,
            Self::Aggressive => 0.7,
            Self::Balanced | Self::Adaptive | Self::Random => 1.0,
        }
    }

    pub fn is_random(self) -> bool {
        matches!(self, Self::Random)
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Aggressive => "aggressive",
            Self::Defensive => "defensive",
            Self::Balanced => "balanced",
            Self::Adaptive => "adaptive",
            Self::Random => "random",
        };
        f.write_str(name)
    }
}
