//! Long-term character progression
//!
//! Match outcomes become experience; experience becomes levels and stat
//! points. The live `Combatant` only mirrors these fields.

pub mod character;
pub mod ledger;
pub mod store;

pub use character::{
    validate_allocation, Character, BASE_STAT_POINTS, MAX_CREATION_STAT, MIN_CREATION_STAT,
    STARTING_EXTRA_POINTS,
};
pub use ledger::{
    apply_level_ups, experience_award, experience_to_next_level, grant_experience, BattleResult,
    LevelUpReport, BONUS_POINTS_PER_LEVEL, MAX_LEVEL,
};
pub use store::{CharacterStore, JsonCharacterStore, MemoryCharacterStore, DEFAULT_CHARACTER_PATH};
