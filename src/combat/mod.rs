//! Combat model - combatants, ability kinds and damage resolution

pub mod combatant;
pub mod constants;
pub mod damage;
pub mod dice;
pub mod kinds;
pub mod selection;
pub mod stats;

pub use combatant::{clamp_health, Combatant};
pub use damage::{
    attack_stat_bonus, base_damage, clamp_reduction, defense_effectiveness, defense_reduction,
    dodge_chance, endurance_reduction, mitigated_damage, resolve_attack_damage, roll_dodge,
    AttackHit, AttackResolution,
};
pub use dice::{pick_distinct, Dice, FixedDice};
pub use kinds::{AttackKind, DefenseKind};
pub use selection::Selection;
pub use stats::{CharacterPreset, CoreStats, Stat};
