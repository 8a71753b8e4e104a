//! Opponent AI for player-vs-AI duels
//!
//! Architecture: Trait + weighted scoring
//! - OpponentAi trait defines the interface for swappable implementations
//! - StrategySelector scores every kind and keeps the top two
//! - Strategy classifies the situation each round

pub mod selector;
pub mod strategy;

pub use selector::{
    attack_affinity, attack_weight, counter_bonus, defense_affinity, defense_weight,
    predict_opponent_attacks, top_two, StrategySelector,
};
pub use strategy::Strategy;

use serde::{Deserialize, Serialize};

use crate::combat::{AttackKind, Combatant, DefenseKind};

/// One round's worth of AI choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityPicks {
    pub strategy: Strategy,
    pub attacks: [AttackKind; 2],
    pub defenses: [DefenseKind; 2],
}

/// Trait for opponent AI implementations
pub trait OpponentAi {
    /// Choose two distinct attacks and two distinct defenses for `own`
    fn select_abilities(&mut self, own: &Combatant, opponent: &Combatant) -> AbilityPicks;

    fn name(&self) -> &str;
}
