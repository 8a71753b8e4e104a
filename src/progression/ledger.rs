//! Experience awards and level-up arithmetic

use serde::{Deserialize, Serialize};

use crate::progression::Character;

pub const MAX_LEVEL: u32 = 50;
pub const BONUS_POINTS_PER_LEVEL: u32 = 2;

pub const WIN_BASE_EXPERIENCE: u32 = 80;
pub const WIN_DAMAGE_DIVISOR: f64 = 10.0;
pub const LOSS_BASE_EXPERIENCE: u32 = 20;
pub const LOSS_DAMAGE_DIVISOR: f64 = 20.0;

/// Match result from the persisted character's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleResult {
    Win,
    Loss,
    /// Awarded and counted exactly like a loss
    Draw,
}

impl BattleResult {
    pub fn is_win(self) -> bool {
        matches!(self, Self::Win)
    }
}

/// What one match end changed on the character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LevelUpReport {
    pub experience_gained: u32,
    pub levels_gained: u32,
    pub bonus_points_gained: u32,
    pub new_level: u32,
}

/// Experience required to leave `level`
pub fn experience_to_next_level(level: u32) -> u32 {
    level * 100 + 50
}

pub fn experience_award(result: BattleResult, damage_dealt: f64) -> u32 {
    let damage = damage_dealt.max(0.0);
    match result {
        BattleResult::Win => WIN_BASE_EXPERIENCE + (damage / WIN_DAMAGE_DIVISOR).floor() as u32,
        BattleResult::Loss | BattleResult::Draw => {
            LOSS_BASE_EXPERIENCE + (damage / LOSS_DAMAGE_DIVISOR).floor() as u32
        }
    }
}

/// Spend experience on levels until the next threshold is out of reach
///
/// Bonus points are granted after the loop for every level gained. At the
/// level cap leftover experience is discarded.
pub fn apply_level_ups(character: &mut Character) -> u32 {
    let mut levels_gained = 0;

    while character.level < MAX_LEVEL
        && character.experience >= experience_to_next_level(character.level)
    {
        character.experience -= experience_to_next_level(character.level);
        character.level += 1;
        levels_gained += 1;
    }

    if character.level >= MAX_LEVEL {
        character.experience = 0;
    }

    character.total_bonus_points += levels_gained * BONUS_POINTS_PER_LEVEL;
    levels_gained
}

/// Grant experience and resolve level-ups in one step
pub fn grant_experience(character: &mut Character, amount: u32) -> LevelUpReport {
    character.experience = character.experience.saturating_add(amount);
    let levels_gained = apply_level_ups(character);

    LevelUpReport {
        experience_gained: amount,
        levels_gained,
        bonus_points_gained: levels_gained * BONUS_POINTS_PER_LEVEL,
        new_level: character.level,
    }
}
