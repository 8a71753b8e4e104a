//! Damage resolution
//!
//! One direction of a round: every attack the attacker selected is rolled
//! independently against the defender's endurance, selected defenses and a
//! per-attack dodge roll. The resolver only reads combatant state.
//!
//! Clamps are exposed as separate functions so the bounds can be tested
//! without going through a whole resolution.

use serde::{Deserialize, Serialize};

use crate::combat::constants::{
    ATTACK_STAT_WEIGHTS, BASE_DAMAGE, DEFENSE_EFFECTIVENESS, DEFENSE_EFFECTIVENESS_SCALE,
    DODGE_CHANCE_PER_AGILITY, DODGE_REDUCTION, ENDURANCE_REDUCTION_PER_POINT, MAX_REDUCTION,
    STAT_BONUS_SCALE,
};
use crate::combat::dice::Dice;
use crate::combat::{AttackKind, Combatant, CoreStats, DefenseKind};

/// Outcome of a single attack kind against the defender
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackHit {
    pub attack: AttackKind,
    pub base_damage: f64,
    /// Final mitigation fraction after clamping
    pub reduction: f64,
    pub dodged: bool,
    pub damage: f64,
}

/// Total outbound damage with the per-attack breakdown
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttackResolution {
    pub total_damage: f64,
    pub hits: Vec<AttackHit>,
}

impl AttackResolution {
    pub fn dodges(&self) -> usize {
        self.hits.iter().filter(|h| h.dodged).count()
    }
}

/// Weighted stat sum for an attack kind
pub fn attack_stat_bonus(attack: AttackKind, stats: &CoreStats) -> f64 {
    ATTACK_STAT_WEIGHTS[attack.index()]
        .iter()
        .zip(stats.as_array())
        .map(|(weight, value)| weight * value as f64)
        .sum()
}

pub fn base_damage(attack: AttackKind, stats: &CoreStats) -> f64 {
    BASE_DAMAGE + STAT_BONUS_SCALE * attack_stat_bonus(attack, stats)
}

pub fn endurance_reduction(endurance: u32) -> f64 {
    endurance as f64 * ENDURANCE_REDUCTION_PER_POINT
}

pub fn defense_effectiveness(attack: AttackKind, defense: DefenseKind) -> f64 {
    DEFENSE_EFFECTIVENESS[attack.index()][defense.index()]
}

pub fn dodge_chance(agility: u32) -> f64 {
    agility as f64 * DODGE_CHANCE_PER_AGILITY
}

/// Roll once for an evasion against one attack
pub fn roll_dodge<D: Dice + ?Sized>(agility: u32, dice: &mut D) -> bool {
    dice.roll_unit() < dodge_chance(agility)
}

/// Clamp a mitigation fraction to `[0, MAX_REDUCTION]`
pub fn clamp_reduction(reduction: f64) -> f64 {
    reduction.clamp(0.0, MAX_REDUCTION)
}

/// Damage left after mitigation, never negative
pub fn mitigated_damage(base: f64, reduction: f64) -> f64 {
    (base * (1.0 - reduction)).max(0.0)
}

/// Mitigation fraction for one attack against a defender
pub fn defense_reduction(
    attack: AttackKind,
    defender_stats: &CoreStats,
    defenses: &[DefenseKind],
    dodged: bool,
) -> f64 {
    let mut reduction = endurance_reduction(defender_stats.endurance);

    for &defense in defenses {
        reduction += defense_effectiveness(attack, defense) * DEFENSE_EFFECTIVENESS_SCALE;
    }

    if dodged {
        reduction += DODGE_REDUCTION;
    }

    clamp_reduction(reduction)
}

/// Resolve the attacker's selected attacks against the defender
///
/// Reads only the two combatants; applying the damage is the caller's job.
pub fn resolve_attack_damage<D: Dice + ?Sized>(
    attacker: &Combatant,
    defender: &Combatant,
    dice: &mut D,
) -> AttackResolution {
    let defenses = defender.selected_defenses().as_slice();
    let mut resolution = AttackResolution::default();

    for attack in attacker.selected_attacks().iter() {
        let base = base_damage(attack, &attacker.stats);
        let dodged = roll_dodge(defender.stats.agility, dice);
        let reduction = defense_reduction(attack, &defender.stats, defenses, dodged);
        let damage = mitigated_damage(base, reduction);

        tracing::debug!(
            attacker = %attacker.name,
            defender = %defender.name,
            ?attack,
            base,
            reduction,
            dodged,
            damage,
            "attack resolved"
        );

        resolution.total_damage += damage;
        resolution.hits.push(AttackHit {
            attack,
            base_damage: base,
            reduction,
            dodged,
            damage,
        });
    }

    resolution
}
