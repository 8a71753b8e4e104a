//! Persisted character record
//!
//! Allocation rules: every stat in `[MIN_CREATION_STAT, MAX_CREATION_STAT]`
//! and the total within `BASE_STAT_POINTS + STARTING_EXTRA_POINTS +
//! total_bonus_points`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::combat::CoreStats;
use crate::core::error::{DuelError, Result};
use crate::progression::ledger::{self, BattleResult, LevelUpReport};

pub const MIN_CREATION_STAT: u32 = 5;
pub const MAX_CREATION_STAT: u32 = 10;
pub const BASE_STAT_POINTS: u32 = 25;
pub const STARTING_EXTRA_POINTS: u32 = 25;

fn default_level() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub stats: CoreStats,
    pub creation_date: DateTime<Utc>,
    #[serde(default)]
    pub battles_won: u32,
    #[serde(default)]
    pub battles_lost: u32,
    #[serde(default)]
    pub total_damage_dealt: f64,
    #[serde(default)]
    pub total_damage_taken: f64,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub experience: u32,
    #[serde(default)]
    pub total_bonus_points: u32,
}

impl Character {
    /// Create a level 1 character after checking the allocation rules
    pub fn new(name: impl Into<String>, stats: CoreStats) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DuelError::InvalidStats("character name is empty".into()));
        }
        validate_allocation(&stats, 0)?;

        Ok(Self {
            name,
            stats,
            creation_date: Utc::now(),
            battles_won: 0,
            battles_lost: 0,
            total_damage_dealt: 0.0,
            total_damage_taken: 0.0,
            level: 1,
            experience: 0,
            total_bonus_points: 0,
        })
    }

    pub fn total_stats(&self) -> u32 {
        self.stats.total()
    }

    pub fn battles_played(&self) -> u32 {
        self.battles_won + self.battles_lost
    }

    /// Win percentage (0 when no battles were played)
    pub fn win_rate(&self) -> f64 {
        let played = self.battles_played();
        if played == 0 {
            return 0.0;
        }
        self.battles_won as f64 / played as f64 * 100.0
    }

    pub fn experience_to_next_level(&self) -> u32 {
        ledger::experience_to_next_level(self.level)
    }

    pub fn total_available_points(&self) -> u32 {
        BASE_STAT_POINTS + STARTING_EXTRA_POINTS + self.total_bonus_points
    }

    pub fn unspent_points(&self) -> u32 {
        self.total_available_points().saturating_sub(self.stats.total())
    }

    /// Redistribute stats under the same rules as creation
    pub fn reallocate(&mut self, stats: CoreStats) -> Result<()> {
        validate_allocation(&stats, self.total_bonus_points)?;
        self.stats = stats;
        Ok(())
    }

    /// Fold a finished match into the record
    pub fn record_battle_result(
        &mut self,
        result: BattleResult,
        damage_dealt: f64,
        damage_taken: f64,
    ) -> LevelUpReport {
        if result.is_win() {
            self.battles_won += 1;
        } else {
            self.battles_lost += 1;
        }
        self.total_damage_dealt += damage_dealt.max(0.0);
        self.total_damage_taken += damage_taken.max(0.0);

        let award = ledger::experience_award(result, damage_dealt);
        ledger::grant_experience(self, award)
    }
}

/// Check a stat spread against the canonical allocation rules
pub fn validate_allocation(stats: &CoreStats, total_bonus_points: u32) -> Result<()> {
    if !stats.within(MIN_CREATION_STAT, MAX_CREATION_STAT) {
        return Err(DuelError::InvalidStats(format!(
            "each stat must be between {} and {}, got {:?}",
            MIN_CREATION_STAT,
            MAX_CREATION_STAT,
            stats.as_array()
        )));
    }

    let allowance = BASE_STAT_POINTS + STARTING_EXTRA_POINTS + total_bonus_points;
    if stats.total() > allowance {
        return Err(DuelError::InvalidStats(format!(
            "stat total {} exceeds allowance {}",
            stats.total(),
            allowance
        )));
    }

    Ok(())
}
