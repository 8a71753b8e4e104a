//! Combat system constants - all tunable values in one place
//!
//! Tables are indexed by `AttackKind::index()` / `DefenseKind::index()`
//! and by stat column in `CoreStats::as_array()` order.

// Selection limits
pub const MAX_SELECTIONS: usize = 2;

// Health
pub const BASE_HEALTH: f64 = 80.0;
pub const HEALTH_PER_ENDURANCE: f64 = 2.0;

// Base damage = BASE_DAMAGE + STAT_BONUS_SCALE * (weights . stats)
pub const BASE_DAMAGE: f64 = 10.0;
pub const STAT_BONUS_SCALE: f64 = 0.5;

/// Stat weights per attack kind
///
/// Columns: strength, agility, endurance, wisdom, intellect.
/// Every row sums to 0.5, so a uniform stat spread yields the same base
/// damage for every kind and only specialisation separates them.
pub const ATTACK_STAT_WEIGHTS: [[f64; 5]; 5] = [
    // Fire
    [0.10, 0.05, 0.0, 0.20, 0.15],
    // Lightning
    [0.05, 0.15, 0.0, 0.15, 0.15],
    // Weapon
    [0.25, 0.15, 0.0, 0.05, 0.05],
    // Acid
    [0.10, 0.10, 0.0, 0.15, 0.15],
    // Psycho
    [0.05, 0.05, 0.0, 0.20, 0.20],
];

/// Defense effectiveness against each attack
///
/// Rows: attack kind. Columns: defense kind.
pub const DEFENSE_EFFECTIVENESS: [[f64; 5]; 5] = [
    // Fire attack vs Fire, Lightning, Weapon, Acid, Psycho defenses
    [0.8, 0.2, 0.1, 0.3, 0.1],
    // Lightning attack
    [0.2, 0.8, 0.1, 0.2, 0.3],
    // Weapon attack
    [0.1, 0.1, 0.8, 0.4, 0.1],
    // Acid attack
    [0.3, 0.2, 0.4, 0.8, 0.2],
    // Psycho attack
    [0.1, 0.3, 0.1, 0.2, 0.8],
];

// Mitigation
pub const ENDURANCE_REDUCTION_PER_POINT: f64 = 0.02;
pub const DEFENSE_EFFECTIVENESS_SCALE: f64 = 0.3;
pub const DODGE_CHANCE_PER_AGILITY: f64 = 0.01;
pub const DODGE_REDUCTION: f64 = 0.5;
pub const MAX_REDUCTION: f64 = 0.8;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_rows_sum_to_half() {
        for row in ATTACK_STAT_WEIGHTS {
            let sum: f64 = row.iter().sum();
            assert!((sum - 0.5).abs() < 1e-9, "row {:?} sums to {}", row, sum);
        }
    }

    #[test]
    fn test_same_element_defense_is_strongest() {
        for (attack, row) in DEFENSE_EFFECTIVENESS.iter().enumerate() {
            let best = row.iter().cloned().fold(f64::MIN, f64::max);
            assert_eq!(row[attack], best);
            assert!(row.iter().all(|e| (0.0..=1.0).contains(e)));
        }
    }

    #[test]
    fn test_mitigation_constants_reasonable() {
        assert!(MAX_REDUCTION > 0.0 && MAX_REDUCTION < 1.0);
        assert!(DODGE_REDUCTION < MAX_REDUCTION);
    }
}
