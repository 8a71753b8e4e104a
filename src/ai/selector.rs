//! Opponent strategy selector
//!
//! Scores every attack and defense kind for the AI side, jitters the
//! scores and keeps the top two of each. Ties fall back to declaration
//! order (Fire, Lightning, Weapon, Acid, Psycho).

use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::ai::strategy::Strategy;
use crate::ai::{AbilityPicks, OpponentAi};
use crate::combat::{pick_distinct, AttackKind, Combatant, DefenseKind, Dice};
use crate::core::config::AiConfig;

pub const JITTER_MIN: f64 = 0.8;
pub const JITTER_MAX: f64 = 1.2;
pub const RANDOM_WEIGHT_MIN: f64 = 0.5;
pub const RANDOM_WEIGHT_MAX: f64 = 2.0;

const DIRECT_COUNTER_BONUS: f64 = 2.0;
const PARTIAL_COUNTER_BONUS: f64 = 0.5;

/// Attack score before strategy and jitter
pub fn attack_affinity(attack: AttackKind, own: &Combatant, opponent: &Combatant) -> f64 {
    let mine = &own.stats;
    let theirs = &opponent.stats;

    let mut weight = 1.0;

    // Opponent profile
    weight += match attack {
        AttackKind::Fire | AttackKind::Acid | AttackKind::Psycho => {
            theirs.wisdom as f64 * 0.1 + theirs.intellect as f64 * 0.1
        }
        AttackKind::Weapon => theirs.strength as f64 * 0.1,
        AttackKind::Lightning => theirs.agility as f64 * 0.1,
    };

    // Own profile
    weight += match attack {
        AttackKind::Fire | AttackKind::Acid | AttackKind::Psycho => {
            mine.wisdom as f64 * 0.2 + mine.intellect as f64 * 0.2
        }
        AttackKind::Weapon => mine.strength as f64 * 0.3,
        AttackKind::Lightning => mine.agility as f64 * 0.3,
    };

    weight
}

pub fn attack_weight<D: Dice + ?Sized>(
    attack: AttackKind,
    own: &Combatant,
    opponent: &Combatant,
    strategy: Strategy,
    dice: &mut D,
) -> f64 {
    let weight = if strategy.is_random() {
        dice.roll_range(RANDOM_WEIGHT_MIN, RANDOM_WEIGHT_MAX)
    } else {
        attack_affinity(attack, own, opponent) * strategy.attack_multiplier()
    };

    weight * dice.roll_range(JITTER_MIN, JITTER_MAX)
}

/// Guess which attacks the opponent leans on, from stats alone
pub fn predict_opponent_attacks<D: Dice + ?Sized>(
    opponent: &Combatant,
    config: &AiConfig,
    dice: &mut D,
) -> Vec<AttackKind> {
    let threshold = config.prediction_stat_threshold;
    let stats = &opponent.stats;
    let mut predicted = Vec::new();

    if stats.strength > threshold {
        predicted.push(AttackKind::Weapon);
    }
    if stats.wisdom > threshold || stats.intellect > threshold {
        predicted.push(AttackKind::Fire);
        predicted.push(AttackKind::Psycho);
    }
    if stats.agility > threshold {
        predicted.push(AttackKind::Lightning);
    }

    if predicted.is_empty() {
        predicted = pick_distinct(&AttackKind::ALL, 2, dice);
    }

    predicted
}

/// How well a defense covers one predicted attack
pub fn counter_bonus(defense: DefenseKind, attack: AttackKind) -> f64 {
    if defense.counters() == attack {
        return DIRECT_COUNTER_BONUS;
    }
    match (defense, attack) {
        (DefenseKind::Fire, AttackKind::Acid) | (DefenseKind::Acid, AttackKind::Fire) => {
            PARTIAL_COUNTER_BONUS
        }
        _ => 0.0,
    }
}

/// Defense score before strategy and jitter
pub fn defense_affinity(defense: DefenseKind, predicted: &[AttackKind], own: &Combatant) -> f64 {
    let counters: f64 = predicted
        .iter()
        .map(|&attack| counter_bonus(defense, attack))
        .sum();

    1.0 + counters + own.stats.endurance as f64 * 0.1
}

pub fn defense_weight<D: Dice + ?Sized>(
    defense: DefenseKind,
    predicted: &[AttackKind],
    own: &Combatant,
    strategy: Strategy,
    dice: &mut D,
) -> f64 {
    let weight = if strategy.is_random() {
        dice.roll_range(RANDOM_WEIGHT_MIN, RANDOM_WEIGHT_MAX)
    } else {
        defense_affinity(defense, predicted, own) * strategy.defense_multiplier()
    };

    weight * dice.roll_range(JITTER_MIN, JITTER_MAX)
}

/// Two highest-weighted kinds; stable sort keeps input order on ties
pub fn top_two<K: Copy>(weighted: [(K, f64); 5]) -> [K; 2] {
    let mut ranked = weighted;
    ranked.sort_by_key(|&(_, weight)| Reverse(OrderedFloat(weight)));
    [ranked[0].0, ranked[1].0]
}

/// Weighted-scoring opponent AI
pub struct StrategySelector<D: Dice = ChaCha8Rng> {
    config: AiConfig,
    dice: D,
    forced: Option<Strategy>,
    last_strategy: Option<Strategy>,
}

impl StrategySelector<ChaCha8Rng> {
    /// Create a selector with default seed
    pub fn new(config: AiConfig) -> Self {
        Self::with_seed(config, 42)
    }

    /// Create with specific RNG seed for deterministic behavior
    pub fn with_seed(config: AiConfig, seed: u64) -> Self {
        Self::with_dice(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<D: Dice> StrategySelector<D> {
    pub fn with_dice(config: AiConfig, dice: D) -> Self {
        Self {
            config,
            dice,
            forced: None,
            last_strategy: None,
        }
    }

    /// Pin an archetype instead of classifying every round
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.forced = Some(strategy);
        self
    }

    pub fn last_strategy(&self) -> Option<Strategy> {
        self.last_strategy
    }

    fn choose_strategy(&mut self, own: &Combatant, opponent: &Combatant) -> Strategy {
        match self.forced {
            Some(strategy) => strategy,
            None => Strategy::classify(own, opponent, &self.config, &mut self.dice),
        }
    }

    fn select_attacks(
        &mut self,
        own: &Combatant,
        opponent: &Combatant,
        strategy: Strategy,
    ) -> [AttackKind; 2] {
        let weighted = AttackKind::ALL
            .map(|attack| (attack, attack_weight(attack, own, opponent, strategy, &mut self.dice)));
        top_two(weighted)
    }

    fn select_defenses(
        &mut self,
        own: &Combatant,
        opponent: &Combatant,
        strategy: Strategy,
    ) -> [DefenseKind; 2] {
        let predicted = predict_opponent_attacks(opponent, &self.config, &mut self.dice);
        let weighted = DefenseKind::ALL.map(|defense| {
            (
                defense,
                defense_weight(defense, &predicted, own, strategy, &mut self.dice),
            )
        });
        top_two(weighted)
    }
}

impl<D: Dice> OpponentAi for StrategySelector<D> {
    fn select_abilities(&mut self, own: &Combatant, opponent: &Combatant) -> AbilityPicks {
        let strategy = self.choose_strategy(own, opponent);
        let attacks = self.select_attacks(own, opponent, strategy);
        let defenses = self.select_defenses(own, opponent, strategy);
        self.last_strategy = Some(strategy);

        tracing::debug!(
            ai = %own.name,
            %strategy,
            ?attacks,
            ?defenses,
            "AI selection"
        );

        AbilityPicks {
            strategy,
            attacks,
            defenses,
        }
    }

    fn name(&self) -> &str {
        "strategy-selector"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{CharacterPreset, CoreStats, FixedDice};

    fn fixed_selector() -> StrategySelector<FixedDice> {
        StrategySelector::with_dice(AiConfig::default(), FixedDice::never_dodge())
    }

    #[test]
    fn test_attack_affinity_values() {
        let own = Combatant::new("AI", CoreStats::uniform(5));
        let opponent = Combatant::new("Hero", CoreStats::uniform(5));
        // 1 + 0.5 + 0.5 + 1.0 + 1.0
        assert!((attack_affinity(AttackKind::Fire, &own, &opponent) - 4.0).abs() < 1e-9);
        // 1 + 0.5 + 1.5
        assert!((attack_affinity(AttackKind::Weapon, &own, &opponent) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_top_two_tie_break_uses_declaration_order() {
        let weighted = AttackKind::ALL.map(|a| (a, 1.0));
        assert_eq!(top_two(weighted), [AttackKind::Fire, AttackKind::Lightning]);

        let weighted = [
            (AttackKind::Fire, 1.0),
            (AttackKind::Lightning, 3.0),
            (AttackKind::Weapon, 2.0),
            (AttackKind::Acid, 3.0),
            (AttackKind::Psycho, 0.5),
        ];
        assert_eq!(top_two(weighted), [AttackKind::Lightning, AttackKind::Acid]);
    }

    #[test]
    fn test_fixed_dice_mage_prefers_fire_and_acid() {
        // Fire/Acid/Psycho tie on affinity; declaration order picks Fire then Acid
        let own = Combatant::from_preset("AI", CharacterPreset::Mage);
        let opponent = Combatant::from_preset("Hero", CharacterPreset::Balanced);
        let picks = fixed_selector().select_abilities(&own, &opponent);
        assert_eq!(picks.attacks, [AttackKind::Fire, AttackKind::Acid]);
    }

    #[test]
    fn test_warrior_prefers_weapon() {
        let own = Combatant::new("AI", CoreStats::new(10, 1, 5, 1, 1));
        let opponent = Combatant::from_preset("Hero", CharacterPreset::Balanced);
        let picks = fixed_selector().select_abilities(&own, &opponent);
        assert_eq!(picks.attacks[0], AttackKind::Weapon);
    }

    #[test]
    fn test_prediction_from_specialised_opponent() {
        let mut dice = FixedDice::default();
        let config = AiConfig::default();

        let warrior = Combatant::new("W", CoreStats::new(8, 8, 5, 8, 5));
        assert_eq!(
            predict_opponent_attacks(&warrior, &config, &mut dice),
            vec![
                AttackKind::Weapon,
                AttackKind::Fire,
                AttackKind::Psycho,
                AttackKind::Lightning
            ]
        );

        // 7 is not above the threshold
        let plain = Combatant::new("P", CoreStats::uniform(7));
        let guessed = predict_opponent_attacks(&plain, &config, &mut dice);
        assert_eq!(guessed.len(), 2);
        assert_ne!(guessed[0], guessed[1]);
    }

    #[test]
    fn test_defenses_counter_predicted_weapon() {
        let own = Combatant::from_preset("AI", CharacterPreset::Mage);
        let opponent = Combatant::new("Brute", CoreStats::new(10, 5, 5, 1, 1));
        let picks = fixed_selector().select_abilities(&own, &opponent);
        assert_eq!(picks.defenses[0], DefenseKind::Weapon);
    }

    #[test]
    fn test_counter_bonus_pairs() {
        assert_eq!(counter_bonus(DefenseKind::Fire, AttackKind::Fire), 2.0);
        assert_eq!(counter_bonus(DefenseKind::Fire, AttackKind::Acid), 0.5);
        assert_eq!(counter_bonus(DefenseKind::Acid, AttackKind::Fire), 0.5);
        assert_eq!(counter_bonus(DefenseKind::Psycho, AttackKind::Fire), 0.0);
    }

    #[test]
    fn test_random_strategy_override() {
        let own = Combatant::from_preset("AI", CharacterPreset::Mage);
        let opponent = Combatant::from_preset("Hero", CharacterPreset::Warrior);
        let mut selector = StrategySelector::with_seed(AiConfig::default(), 9)
            .with_strategy(Strategy::Random);

        for _ in 0..50 {
            let picks = selector.select_abilities(&own, &opponent);
            assert_eq!(picks.strategy, Strategy::Random);
            assert_ne!(picks.attacks[0], picks.attacks[1]);
            assert_ne!(picks.defenses[0], picks.defenses[1]);
        }
        assert_eq!(selector.last_strategy(), Some(Strategy::Random));
    }

    #[test]
    fn test_same_seed_same_picks() {
        let own = Combatant::from_preset("AI", CharacterPreset::Rogue);
        let opponent = Combatant::from_preset("Hero", CharacterPreset::Warrior);
        let mut a = StrategySelector::with_seed(AiConfig::default(), 5);
        let mut b = StrategySelector::with_seed(AiConfig::default(), 5);
        for _ in 0..20 {
            assert_eq!(
                a.select_abilities(&own, &opponent),
                b.select_abilities(&own, &opponent)
            );
        }
    }
}
