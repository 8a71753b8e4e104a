//! Duel integration tests
//!
//! Full matches through the public API: the mirror-match scenario, match
//! termination, per-seed replay and isolation between matches.

use soul_duel::ai::{OpponentAi, StrategySelector};
use soul_duel::combat::{AttackKind, CharacterPreset, Combatant, CoreStats, DefenseKind, FixedDice};
use soul_duel::core::config::{DuelConfig, RulesConfig};
use soul_duel::duel::{Duel, DuelEventKind, DuelOutcome, DuelPhase, RoundReport, Side};

fn approx_eq(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "expected {b}, got {a}");
}

/// Play a PvE match to the end with side one driven by its own selector
fn play_out(seed: u64, preset: CharacterPreset) -> Duel {
    let config = DuelConfig::headless(seed);
    let mut pilot = StrategySelector::with_seed(config.ai.clone(), seed ^ 0xA5A5);
    let mut duel = Duel::vs_computer(config, Combatant::from_preset("Pilot", preset)).unwrap();
    duel.start();

    while !duel.is_finished() {
        assert!(duel.round() < 200, "match did not terminate");
        let picks = pilot.select_abilities(duel.combatant(Side::One), duel.combatant(Side::Two));
        duel.set_selections(Side::One, &picks.attacks, &picks.defenses);
        assert!(duel.execute_round().is_some());
    }
    duel
}

#[test]
fn test_mirror_match_first_round() {
    let config = DuelConfig {
        rules: RulesConfig {
            attacks_per_round: 1,
            defenses_per_round: 1,
        },
        ..DuelConfig::headless(1)
    };
    let one = Combatant::new("Alice", CoreStats::uniform(5));
    let two = Combatant::new("Bob", CoreStats::uniform(5));
    assert_eq!(one.max_health(), 90.0);

    let mut duel = Duel::with_dice(config, one, two, FixedDice::never_dodge()).unwrap();
    duel.start();
    for side in Side::BOTH {
        assert!(duel.set_selections(side, &[AttackKind::Weapon], &[DefenseKind::Weapon]));
    }

    let report = duel.execute_round().cloned().unwrap();

    approx_eq(report.side_one.damage_dealt, 7.425);
    approx_eq(report.side_two.damage_dealt, 7.425);
    approx_eq(report.side_one.health_after, 82.575);
    approx_eq(report.side_two.health_after, 82.575);
    assert_eq!(duel.phase(), DuelPhase::Selection);
    assert_eq!(duel.round(), 2);
    assert!(!duel.is_finished());
}

#[test]
fn test_matches_terminate_only_on_knockout() {
    for seed in 0..25 {
        let duel = play_out(seed, CharacterPreset::Warrior);

        let reports = duel.reports();
        let (last, earlier) = reports.split_last().unwrap();
        for report in earlier {
            assert!(report.side_one.health_after > 0.0);
            assert!(report.side_two.health_after > 0.0);
        }
        assert!(last.side_one.health_after <= 0.0 || last.side_two.health_after <= 0.0);

        let one_alive = duel.combatant(Side::One).is_alive();
        let two_alive = duel.combatant(Side::Two).is_alive();
        assert_eq!(duel.outcome(), DuelOutcome::from_liveness(one_alive, two_alive));
        assert!(matches!(
            duel.events().last().map(|e| &e.kind),
            Some(DuelEventKind::MatchEnded { .. })
        ));
    }
}

#[test]
fn test_same_seed_replays_identically() {
    let a = play_out(99, CharacterPreset::Rogue);
    let b = play_out(99, CharacterPreset::Rogue);

    let strip = |reports: &[RoundReport]| -> Vec<(f64, f64)> {
        reports
            .iter()
            .map(|r| (r.side_one.damage_dealt, r.side_two.damage_dealt))
            .collect()
    };
    assert_eq!(strip(a.reports()), strip(b.reports()));
    assert_eq!(a.outcome(), b.outcome());
    assert_eq!(
        a.events().descriptions().collect::<Vec<_>>(),
        b.events().descriptions().collect::<Vec<_>>()
    );
}

#[test]
fn test_matches_are_isolated() {
    // Running another match in between must not disturb a seeded replay
    let first = play_out(5, CharacterPreset::Balanced);
    let _noise = play_out(6, CharacterPreset::Mage);
    let second = play_out(5, CharacterPreset::Balanced);

    assert_eq!(first.reports(), second.reports());
}

#[test]
fn test_rematch_after_result() {
    let mut duel = play_out(3, CharacterPreset::Warrior);
    assert!(duel.is_finished());

    duel.start();
    assert_eq!(duel.phase(), DuelPhase::Selection);
    assert_eq!(duel.round(), 1);
    assert!(duel.reports().is_empty());
    assert_eq!(duel.outcome(), DuelOutcome::Undecided);
    assert_eq!(
        duel.combatant(Side::One).health(),
        duel.combatant(Side::One).max_health()
    );
    assert!(duel.combatant(Side::Two).is_ready(2, 2));
}

#[test]
fn test_summary_matches_counters() {
    let duel = play_out(11, CharacterPreset::Warrior);
    let summary = duel.summary();

    assert_eq!(summary.rounds_played, duel.reports().len());
    approx_eq(summary.side_one_damage, duel.combatant(Side::One).damage_dealt());
    approx_eq(summary.side_two_damage, duel.combatant(Side::Two).damage_dealt());
    assert_eq!(
        summary.side_one_rounds_won as u32,
        duel.combatant(Side::One).rounds_won()
    );
    assert_eq!(summary.outcome, duel.outcome());
}
