//! Live match participant
//!
//! Health is private: every mutation goes through `set_health` /
//! `take_damage`, which clamp to `[0, max_health]`. Liveness is computed
//! from health on demand, so it can never disagree with it.

use serde::{Deserialize, Serialize};

use crate::combat::constants::{BASE_HEALTH, HEALTH_PER_ENDURANCE};
use crate::combat::{AttackKind, CharacterPreset, CoreStats, DefenseKind, Selection};
use crate::core::types::CombatantId;
use crate::progression::{validate_allocation, Character};

/// Clamp a health value to `[0, max_health]`
pub fn clamp_health(health: f64, max_health: f64) -> f64 {
    health.clamp(0.0, max_health.max(0.0))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "CombatantRecord")]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub stats: CoreStats,

    health: f64,
    selected_attacks: Selection<AttackKind>,
    selected_defenses: Selection<DefenseKind>,

    // Per-match counters
    damage_dealt: f64,
    damage_taken: f64,
    rounds_won: u32,

    // Progression mirror of the persisted character
    pub level: u32,
    pub experience: u32,
    pub total_bonus_points: u32,
}

/// Serialized shape of a `Combatant`; health is clamped on the way in
#[derive(Deserialize)]
struct CombatantRecord {
    id: CombatantId,
    name: String,
    stats: CoreStats,
    health: f64,
    selected_attacks: Selection<AttackKind>,
    selected_defenses: Selection<DefenseKind>,
    damage_dealt: f64,
    damage_taken: f64,
    rounds_won: u32,
    level: u32,
    experience: u32,
    total_bonus_points: u32,
}

impl From<CombatantRecord> for Combatant {
    fn from(record: CombatantRecord) -> Self {
        let mut combatant = Self {
            id: record.id,
            name: record.name,
            stats: record.stats,
            health: 0.0,
            selected_attacks: record.selected_attacks,
            selected_defenses: record.selected_defenses,
            damage_dealt: record.damage_dealt,
            damage_taken: record.damage_taken,
            rounds_won: record.rounds_won,
            level: record.level,
            experience: record.experience,
            total_bonus_points: record.total_bonus_points,
        };
        combatant.set_health(record.health);
        combatant
    }
}

impl Combatant {
    pub fn new(name: impl Into<String>, stats: CoreStats) -> Self {
        let mut combatant = Self {
            id: CombatantId::new(),
            name: name.into(),
            stats,
            health: 0.0,
            selected_attacks: Selection::new(),
            selected_defenses: Selection::new(),
            damage_dealt: 0.0,
            damage_taken: 0.0,
            rounds_won: 0,
            level: 1,
            experience: 0,
            total_bonus_points: 0,
        };
        combatant.health = combatant.max_health();
        combatant
    }

    pub fn from_preset(name: impl Into<String>, preset: CharacterPreset) -> Self {
        Self::new(name, preset.stats())
    }

    /// Rehydrate from a persisted character record
    pub fn from_character(character: &Character) -> Self {
        let mut combatant = Self::new(character.name.clone(), character.stats);
        combatant.refresh_progression(character);
        combatant
    }

    /// Copy progression fields from a freshly stored record
    pub fn refresh_progression(&mut self, character: &Character) {
        self.level = character.level;
        self.experience = character.experience;
        self.total_bonus_points = character.total_bonus_points;
    }

    // === HEALTH ===

    pub fn max_health(&self) -> f64 {
        BASE_HEALTH + self.stats.endurance as f64 * HEALTH_PER_ENDURANCE
    }

    pub fn health(&self) -> f64 {
        self.health
    }

    pub fn set_health(&mut self, health: f64) {
        self.health = clamp_health(health, self.max_health());
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn health_fraction(&self) -> f64 {
        let max = self.max_health();
        if max <= 0.0 {
            return 0.0;
        }
        self.health / max
    }

    /// Apply incoming damage. Returns the health actually lost.
    pub fn take_damage(&mut self, damage: f64) -> f64 {
        let before = self.health;
        self.set_health(before - damage.max(0.0));
        let lost = before - self.health;
        self.damage_taken += lost;
        lost
    }

    /// Record outbound damage
    pub fn deal_damage(&mut self, damage: f64) {
        self.damage_dealt += damage.max(0.0);
    }

    pub fn win_round(&mut self) {
        self.rounds_won += 1;
    }

    pub fn damage_dealt(&self) -> f64 {
        self.damage_dealt
    }

    pub fn damage_taken(&self) -> f64 {
        self.damage_taken
    }

    pub fn rounds_won(&self) -> u32 {
        self.rounds_won
    }

    /// Full health, zeroed counters, empty selections
    pub fn reset_for_new_match(&mut self) {
        self.health = self.max_health();
        self.damage_dealt = 0.0;
        self.damage_taken = 0.0;
        self.rounds_won = 0;
        self.reset_selections();
    }

    // === SELECTIONS ===

    pub fn selected_attacks(&self) -> &Selection<AttackKind> {
        &self.selected_attacks
    }

    pub fn selected_defenses(&self) -> &Selection<DefenseKind> {
        &self.selected_defenses
    }

    pub fn toggle_attack(&mut self, attack: AttackKind) -> bool {
        self.selected_attacks.toggle(attack)
    }

    pub fn toggle_defense(&mut self, defense: DefenseKind) -> bool {
        self.selected_defenses.toggle(defense)
    }

    /// Replace both selections (duplicates and overflow are dropped)
    pub fn set_selections(&mut self, attacks: &[AttackKind], defenses: &[DefenseKind]) {
        self.selected_attacks = Selection::from_kinds(attacks);
        self.selected_defenses = Selection::from_kinds(defenses);
    }

    pub fn reset_selections(&mut self) {
        self.selected_attacks.clear();
        self.selected_defenses.clear();
    }

    /// Exactly the required number of attacks and defenses are committed
    pub fn is_ready(&self, attacks: usize, defenses: usize) -> bool {
        self.selected_attacks.len() == attacks && self.selected_defenses.len() == defenses
    }

    // === STATS ===

    pub fn total_stats(&self) -> u32 {
        self.stats.total()
    }

    /// Stats satisfy the same allocation rules as a persisted character.
    /// Presets fall below the per-stat floor and only fight ephemerally.
    pub fn has_valid_stats(&self) -> bool {
        validate_allocation(&self.stats, self.total_bonus_points).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_health_from_endurance() {
        let c = Combatant::new("Tank", CoreStats::new(1, 1, 10, 1, 1));
        assert_eq!(c.max_health(), 100.0);
        assert_eq!(c.health(), 100.0);
        assert!(c.is_alive());
    }

    #[test]
    fn test_take_damage_clamps_and_tracks_actual_loss() {
        let mut c = Combatant::from_preset("Hero", CharacterPreset::Balanced);
        assert_eq!(c.take_damage(30.0), 30.0);
        assert_eq!(c.health(), 60.0);

        let lost = c.take_damage(500.0);
        assert_eq!(lost, 60.0);
        assert_eq!(c.health(), 0.0);
        assert!(!c.is_alive());
        assert_eq!(c.damage_taken(), 90.0);
    }

    #[test]
    fn test_negative_damage_does_not_heal() {
        let mut c = Combatant::from_preset("Hero", CharacterPreset::Balanced);
        c.take_damage(10.0);
        c.take_damage(-50.0);
        assert_eq!(c.health(), 80.0);
    }

    #[test]
    fn test_set_health_clamps_upper_bound() {
        let mut c = Combatant::from_preset("Hero", CharacterPreset::Balanced);
        c.set_health(1_000.0);
        assert_eq!(c.health(), c.max_health());
        c.set_health(-3.0);
        assert_eq!(c.health(), 0.0);
        assert!(!c.is_alive());
    }

    #[test]
    fn test_reset_for_new_match() {
        let mut c = Combatant::from_preset("Hero", CharacterPreset::Warrior);
        c.take_damage(40.0);
        c.deal_damage(12.0);
        c.win_round();
        c.toggle_attack(AttackKind::Weapon);

        c.reset_for_new_match();

        assert_eq!(c.health(), c.max_health());
        assert_eq!(c.damage_dealt(), 0.0);
        assert_eq!(c.damage_taken(), 0.0);
        assert_eq!(c.rounds_won(), 0);
        assert!(c.selected_attacks().is_empty());
    }

    #[test]
    fn test_readiness() {
        let mut c = Combatant::from_preset("Hero", CharacterPreset::Rogue);
        assert!(!c.is_ready(2, 2));
        c.set_selections(
            &[AttackKind::Lightning, AttackKind::Weapon],
            &[DefenseKind::Fire, DefenseKind::Psycho],
        );
        assert!(c.is_ready(2, 2));
        assert!(!c.is_ready(1, 1));
    }

    #[test]
    fn test_rehydrated_character_has_valid_stats() {
        let hero = Character::new("Hero", CoreStats::uniform(10)).unwrap();
        assert!(Combatant::from_character(&hero).has_valid_stats());

        let fresh = Character::new("Fresh", CoreStats::uniform(5)).unwrap();
        assert!(Combatant::from_character(&fresh).has_valid_stats());
    }

    #[test]
    fn test_presets_are_not_persistable_allocations() {
        assert!(!Combatant::from_preset("Mage", CharacterPreset::Mage).has_valid_stats());
        assert!(Combatant::from_preset("Even", CharacterPreset::Balanced).has_valid_stats());
    }

    #[test]
    fn test_stat_ceiling_and_bonus_points() {
        let mut c = Combatant::new("Hero", CoreStats::new(11, 10, 10, 10, 10));
        c.total_bonus_points = 10;
        assert!(!c.has_valid_stats());

        c.stats = CoreStats::new(10, 10, 10, 10, 10);
        assert!(c.has_valid_stats());
    }

    #[test]
    fn test_deserialize_clamps_health() {
        let c = Combatant::from_preset("Hero", CharacterPreset::Balanced);
        let mut value = serde_json::to_value(&c).unwrap();

        value["health"] = serde_json::json!(999.0);
        let restored: Combatant = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(restored.health(), restored.max_health());
        assert_eq!(restored.name, "Hero");

        value["health"] = serde_json::json!(-5.0);
        let restored: Combatant = serde_json::from_value(value).unwrap();
        assert_eq!(restored.health(), 0.0);
        assert!(!restored.is_alive());
    }
}
