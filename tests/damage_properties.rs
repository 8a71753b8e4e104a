//! Property tests for the combat clamps, AI selection and the level-up loop

use proptest::prelude::*;
use proptest::sample::subsequence;

use soul_duel::ai::{OpponentAi, StrategySelector};
use soul_duel::combat::{
    base_damage, defense_reduction, mitigated_damage, resolve_attack_damage, AttackKind,
    Combatant, CoreStats, DefenseKind,
};
use soul_duel::core::config::AiConfig;
use soul_duel::progression::{grant_experience, Character, MAX_LEVEL};

fn stats_strategy() -> impl Strategy<Value = CoreStats> {
    (1u32..=10, 1u32..=10, 1u32..=10, 1u32..=10, 1u32..=10)
        .prop_map(|(s, a, e, w, i)| CoreStats::new(s, a, e, w, i))
}

fn attack_strategy() -> impl Strategy<Value = AttackKind> {
    prop::sample::select(AttackKind::ALL.to_vec())
}

fn defenses_strategy() -> impl Strategy<Value = Vec<DefenseKind>> {
    subsequence(DefenseKind::ALL.to_vec(), 0..=2)
}

fn attacks_strategy() -> impl Strategy<Value = Vec<AttackKind>> {
    subsequence(AttackKind::ALL.to_vec(), 0..=2)
}

proptest! {
    /// Health stays within bounds and liveness always matches it
    #[test]
    fn prop_health_clamped_after_every_hit(
        stats in stats_strategy(),
        hits in prop::collection::vec(-50.0f64..200.0, 0..20)
    ) {
        let mut c = Combatant::new("Target", stats);
        for damage in hits {
            c.take_damage(damage);
            prop_assert!(c.health() >= 0.0);
            prop_assert!(c.health() <= c.max_health());
            prop_assert_eq!(c.is_alive(), c.health() > 0.0);
        }
    }

    /// Mitigation never exceeds 80%, with or without a dodge
    #[test]
    fn prop_reduction_capped(
        attack in attack_strategy(),
        stats in stats_strategy(),
        defenses in defenses_strategy(),
        dodged in any::<bool>()
    ) {
        let reduction = defense_reduction(attack, &stats, &defenses, dodged);
        prop_assert!((0.0..=0.8).contains(&reduction));
    }

    /// Final damage is never negative and never below 20% of base
    #[test]
    fn prop_final_damage_floor(
        attack in attack_strategy(),
        attacker in stats_strategy(),
        defender in stats_strategy(),
        defenses in defenses_strategy(),
        dodged in any::<bool>()
    ) {
        let base = base_damage(attack, &attacker);
        let damage = mitigated_damage(base, defense_reduction(attack, &defender, &defenses, dodged));
        prop_assert!(damage >= 0.0);
        prop_assert!(damage >= base * 0.2 - 1e-9);
        prop_assert!(damage <= base);
    }

    /// One breakdown entry per selected attack, summing to the total
    #[test]
    fn prop_resolution_sums_hits(
        seed in any::<u64>(),
        attacker_stats in stats_strategy(),
        defender_stats in stats_strategy(),
        attacks in attacks_strategy(),
        defenses in defenses_strategy()
    ) {
        use rand::SeedableRng;
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);

        let mut attacker = Combatant::new("A", attacker_stats);
        attacker.set_selections(&attacks, &[]);
        let mut defender = Combatant::new("D", defender_stats);
        defender.set_selections(&[], &defenses);

        let resolution = resolve_attack_damage(&attacker, &defender, &mut rng);
        prop_assert_eq!(resolution.hits.len(), attacks.len());
        let sum: f64 = resolution.hits.iter().map(|h| h.damage).sum();
        prop_assert!((sum - resolution.total_damage).abs() < 1e-9);
    }

    /// AI always returns two distinct attacks and two distinct defenses
    #[test]
    fn prop_selector_cardinality(
        seed in any::<u64>(),
        own_stats in stats_strategy(),
        opponent_stats in stats_strategy(),
        own_health in 0.0f64..100.0,
        opponent_health in 0.0f64..100.0
    ) {
        let mut own = Combatant::new("AI", own_stats);
        own.set_health(own_health);
        let mut opponent = Combatant::new("Hero", opponent_stats);
        opponent.set_health(opponent_health);

        let mut selector = StrategySelector::with_seed(AiConfig::default(), seed);
        let picks = selector.select_abilities(&own, &opponent);

        prop_assert_ne!(picks.attacks[0], picks.attacks[1]);
        prop_assert_ne!(picks.defenses[0], picks.defenses[1]);
    }

    /// Bonus points track levels gained exactly and the level never passes the cap
    #[test]
    fn prop_level_up_grants_two_points_per_level(
        start_level in 1u32..=MAX_LEVEL,
        gain in 0u32..200_000
    ) {
        let mut c = Character::new("P", CoreStats::uniform(5)).unwrap();
        c.level = start_level;

        let report = grant_experience(&mut c, gain);

        prop_assert!(c.level <= MAX_LEVEL);
        prop_assert_eq!(c.level, start_level + report.levels_gained);
        prop_assert_eq!(c.total_bonus_points, report.levels_gained * 2);
        prop_assert!(c.level == MAX_LEVEL || c.experience < c.experience_to_next_level());
    }

    /// Every record the character rules accept is also a valid live combatant
    #[test]
    fn prop_accepted_character_has_valid_combatant_stats(
        (s, a, e, w, i) in (5u32..=10, 5u32..=10, 5u32..=10, 5u32..=10, 5u32..=10),
        bonus in 0u32..=100
    ) {
        let stats = CoreStats::new(s, a, e, w, i);
        if let Ok(mut hero) = Character::new("Hero", stats) {
            prop_assert!(Combatant::from_character(&hero).has_valid_stats());
            hero.total_bonus_points = bonus;
            prop_assert!(Combatant::from_character(&hero).has_valid_stats());
        }
    }

    /// Splitting a gain gives the same result as one lump sum below the cap
    #[test]
    fn prop_split_gain_equals_lump_sum(
        start_level in 1u32..=20,
        first in 0u32..5_000,
        second in 0u32..5_000
    ) {
        let mut lump = Character::new("P", CoreStats::uniform(5)).unwrap();
        lump.level = start_level;
        let mut split = lump.clone();

        grant_experience(&mut lump, first + second);
        grant_experience(&mut split, first);
        grant_experience(&mut split, second);

        prop_assume!(lump.level < MAX_LEVEL);
        prop_assert_eq!(lump.level, split.level);
        prop_assert_eq!(lump.experience, split.experience);
        prop_assert_eq!(lump.total_bonus_points, split.total_bonus_points);
    }
}
