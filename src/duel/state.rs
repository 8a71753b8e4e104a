//! Round orchestrator
//!
//! Owns both combatants, the match RNG, the event log and the round
//! reports. Invalid transitions never error: they are no-ops that leave an
//! explanatory event in the log.

use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::ai::{OpponentAi, StrategySelector};
use crate::combat::{AttackKind, CharacterPreset, Combatant, DefenseKind, Dice};
use crate::core::config::DuelConfig;
use crate::core::error::{DuelError, Result};
use crate::core::types::Round;
use crate::duel::events::{DuelEventKind, DuelLog};
use crate::duel::phase::{DuelMode, DuelOutcome, DuelPhase, Side};
use crate::duel::round::{resolve_round, MatchSummary, RoundReport};
use crate::progression::{BattleResult, CharacterStore, LevelUpReport, BONUS_POINTS_PER_LEVEL};

/// Name given to the default AI opponent
pub const COMPUTER_NAME: &str = "Computer";

/// Read the stored character, fold the result in, save, then read back
fn update_ledger(
    store: &mut dyn CharacterStore,
    player: &mut Combatant,
    result: BattleResult,
) -> Result<Option<LevelUpReport>> {
    let Some(mut character) = store.load()? else {
        return Ok(None);
    };

    let report =
        character.record_battle_result(result, player.damage_dealt(), player.damage_taken());
    store.save(&character)?;

    if let Some(saved) = store.load()? {
        player.refresh_progression(&saved);
    }

    Ok(Some(report))
}

/// A single match between two combatants
pub struct Duel<D: Dice = ChaCha8Rng> {
    config: DuelConfig,
    mode: DuelMode,
    phase: DuelPhase,
    round: Round,
    outcome: DuelOutcome,

    one: Combatant,
    two: Combatant,

    dice: D,
    ai: Option<Box<dyn OpponentAi>>,
    store: Option<Box<dyn CharacterStore>>,

    /// Remaining delay before the AI picks for the current round
    pending_ai: Option<Duration>,
    progression_recorded: bool,
    last_level_up: Option<LevelUpReport>,

    log: DuelLog,
    reports: Vec<RoundReport>,
}

impl Duel<ChaCha8Rng> {
    /// Player-vs-player match seeded from `config.seed` (or the OS)
    pub fn new(config: DuelConfig, one: Combatant, two: Combatant) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self::with_dice(config, one, two, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Match against the default mage opponent driven by `StrategySelector`
    pub fn vs_computer(config: DuelConfig, player: Combatant) -> Result<Self> {
        let ai_seed = config
            .seed
            .map(|seed| seed.wrapping_add(1))
            .unwrap_or_else(rand::random);
        let selector = StrategySelector::with_seed(config.ai.clone(), ai_seed);
        let computer = Combatant::from_preset(COMPUTER_NAME, CharacterPreset::Mage);

        Ok(Self::new(config, player, computer)?.with_ai(Box::new(selector)))
    }
}

impl<D: Dice> Duel<D> {
    pub fn with_dice(config: DuelConfig, one: Combatant, two: Combatant, dice: D) -> Result<Self> {
        config.validate().map_err(DuelError::InvalidConfig)?;

        Ok(Self {
            config,
            mode: DuelMode::PlayerVsPlayer,
            phase: DuelPhase::Setup,
            round: 0,
            outcome: DuelOutcome::Undecided,
            one,
            two,
            dice,
            ai: None,
            store: None,
            pending_ai: None,
            progression_recorded: false,
            last_level_up: None,
            log: DuelLog::new(),
            reports: Vec::new(),
        })
    }

    /// Hand side two to an AI; switches the match to player-vs-AI
    pub fn with_ai(mut self, ai: Box<dyn OpponentAi>) -> Self {
        self.ai = Some(ai);
        self.mode = DuelMode::PlayerVsAi;
        self
    }

    /// Attach the store holding side one's persisted character
    pub fn with_store(mut self, store: Box<dyn CharacterStore>) -> Self {
        self.store = Some(store);
        self
    }

    // === ACCESSORS ===

    pub fn config(&self) -> &DuelConfig {
        &self.config
    }

    pub fn mode(&self) -> DuelMode {
        self.mode
    }

    pub fn phase(&self) -> DuelPhase {
        self.phase
    }

    pub fn round(&self) -> Round {
        self.round
    }

    pub fn outcome(&self) -> DuelOutcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.phase == DuelPhase::Result
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::One => &self.one,
            Side::Two => &self.two,
        }
    }

    pub fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::One => &mut self.one,
            Side::Two => &mut self.two,
        }
    }

    pub fn events(&self) -> &DuelLog {
        &self.log
    }

    pub fn reports(&self) -> &[RoundReport] {
        &self.reports
    }

    pub fn last_report(&self) -> Option<&RoundReport> {
        self.reports.last()
    }

    /// Progression applied at the end of the last match, if any
    pub fn last_level_up(&self) -> Option<&LevelUpReport> {
        self.last_level_up.as_ref()
    }

    pub fn store(&self) -> Option<&dyn CharacterStore> {
        self.store.as_deref()
    }

    pub fn ai_name(&self) -> Option<&str> {
        self.ai.as_ref().map(|ai| ai.name())
    }

    /// AI selection is queued behind the pacing delay
    pub fn ai_pending(&self) -> bool {
        self.pending_ai.is_some()
    }

    pub fn is_ai_side(&self, side: Side) -> bool {
        self.mode == DuelMode::PlayerVsAi && side == Side::Two
    }

    pub fn summary(&self) -> MatchSummary {
        MatchSummary::from_reports(&self.reports, self.outcome)
    }

    fn emit(&mut self, kind: DuelEventKind, description: String) {
        self.log.push(kind, description, self.round);
    }

    // === LIFECYCLE ===

    /// Start a new match: full health, round 1, empty log and selections
    pub fn start(&mut self) {
        self.clear_match_state();
        self.round = 1;
        self.phase = DuelPhase::Selection;

        tracing::info!(
            one = %self.one.name,
            two = %self.two.name,
            mode = ?self.mode,
            "match started"
        );

        let description = format!("{} vs {}", self.one.name, self.two.name);
        self.emit(DuelEventKind::MatchStarted, description);
        self.announce_round();
        self.run_ai();
    }

    /// Back to `Setup` without starting
    pub fn reset(&mut self) {
        self.clear_match_state();
        self.round = 0;
        self.phase = DuelPhase::Setup;
        tracing::debug!("match reset");
    }

    fn clear_match_state(&mut self) {
        self.one.reset_for_new_match();
        self.two.reset_for_new_match();
        self.outcome = DuelOutcome::Undecided;
        self.pending_ai = None;
        self.progression_recorded = false;
        self.last_level_up = None;
        self.log.clear();
        self.reports.clear();
    }

    /// Change a display name; blank names are ignored
    pub fn rename(&mut self, side: Side, name: impl Into<String>) -> bool {
        let name = name.into();
        if name.trim().is_empty() {
            return false;
        }
        self.combatant_mut(side).name = name;
        true
    }

    fn announce_round(&mut self) {
        let description = format!("Round {} begins", self.round);
        self.emit(DuelEventKind::RoundStarted, description);
    }

    // === SELECTION ===

    fn can_select(&mut self, side: Side) -> bool {
        if self.phase != DuelPhase::Selection {
            tracing::warn!(phase = ?self.phase, %side, "selection outside selection phase");
            let phase = self.phase;
            self.emit(
                DuelEventKind::PhaseRefused { phase },
                "Abilities can only be chosen between rounds".to_string(),
            );
            return false;
        }

        if self.is_ai_side(side) {
            let description = format!("{} is controlled by the AI", self.combatant(side).name);
            self.emit(DuelEventKind::SelectionRefused { side }, description);
            return false;
        }

        true
    }

    /// Add or remove an attack; refused when it would exceed the round's quota
    pub fn toggle_attack(&mut self, side: Side, attack: AttackKind) -> bool {
        if !self.can_select(side) {
            return false;
        }

        let limit = self.config.rules.attacks_per_round;
        let selected = self.combatant(side).selected_attacks();
        if !selected.contains(attack) && selected.len() >= limit {
            let description = format!(
                "{} already has {} attack(s) selected",
                self.combatant(side).name,
                limit
            );
            self.emit(DuelEventKind::SelectionRefused { side }, description);
            return false;
        }

        self.combatant_mut(side).toggle_attack(attack)
    }

    /// Add or remove a defense; refused when it would exceed the round's quota
    pub fn toggle_defense(&mut self, side: Side, defense: DefenseKind) -> bool {
        if !self.can_select(side) {
            return false;
        }

        let limit = self.config.rules.defenses_per_round;
        let selected = self.combatant(side).selected_defenses();
        if !selected.contains(defense) && selected.len() >= limit {
            let description = format!(
                "{} already has {} defense(s) selected",
                self.combatant(side).name,
                limit
            );
            self.emit(DuelEventKind::SelectionRefused { side }, description);
            return false;
        }

        self.combatant_mut(side).toggle_defense(defense)
    }

    /// Replace a human side's selections in one call; refused when either
    /// slice is longer than the round's quota
    pub fn set_selections(
        &mut self,
        side: Side,
        attacks: &[AttackKind],
        defenses: &[DefenseKind],
    ) -> bool {
        if !self.can_select(side) {
            return false;
        }

        let rules = &self.config.rules;
        let (attack_limit, defense_limit) = (rules.attacks_per_round, rules.defenses_per_round);
        if attacks.len() > attack_limit || defenses.len() > defense_limit {
            let description = format!(
                "{} may select at most {} attack(s) and {} defense(s)",
                self.combatant(side).name,
                attack_limit,
                defense_limit
            );
            self.emit(DuelEventKind::SelectionRefused { side }, description);
            return false;
        }

        self.combatant_mut(side).set_selections(attacks, defenses);
        true
    }

    pub fn is_side_ready(&self, side: Side) -> bool {
        let rules = &self.config.rules;
        self.combatant(side)
            .is_ready(rules.attacks_per_round, rules.defenses_per_round)
    }

    /// Every human side has committed its quota
    pub fn is_ready(&self) -> bool {
        self.first_unready_side().is_none()
    }

    fn first_unready_side(&self) -> Option<Side> {
        Side::BOTH
            .into_iter()
            .filter(|&side| !self.is_ai_side(side))
            .find(|&side| !self.is_side_ready(side))
    }

    // === AI PACING ===

    fn schedule_ai(&mut self) {
        if self.ai.is_none() {
            return;
        }

        let delay = self.config.pacing.ai_turn_delay();
        if delay.is_zero() {
            self.run_ai();
        } else {
            tracing::debug!(?delay, "AI selection queued");
            self.pending_ai = Some(delay);
        }
    }

    /// Let host time pass; fires a queued AI selection once due
    pub fn advance_clock(&mut self, elapsed: Duration) -> bool {
        let Some(remaining) = self.pending_ai else {
            return false;
        };

        let remaining = remaining.saturating_sub(elapsed);
        if remaining.is_zero() {
            self.run_ai();
            true
        } else {
            self.pending_ai = Some(remaining);
            false
        }
    }

    fn run_ai(&mut self) {
        self.pending_ai = None;

        let Some(ai) = self.ai.as_mut() else {
            return;
        };
        let picks = ai.select_abilities(&self.two, &self.one);
        self.two.set_selections(&picks.attacks, &picks.defenses);

        let description = format!("{} is ready ({} strategy)", self.two.name, picks.strategy);
        self.emit(
            DuelEventKind::AiSelected {
                strategy: picks.strategy,
            },
            description,
        );
    }

    // === ROUNDS ===

    /// `Selection -> Battle -> (Selection | Result)`
    ///
    /// Returns the new round report, or `None` when the transition was
    /// refused (wrong phase or a human side not ready).
    pub fn execute_round(&mut self) -> Option<&RoundReport> {
        if self.phase != DuelPhase::Selection {
            tracing::warn!(phase = ?self.phase, "round refused");
            let phase = self.phase;
            let description = format!("A round cannot start during {:?}", phase);
            self.emit(DuelEventKind::PhaseRefused { phase }, description);
            return None;
        }

        if self.pending_ai.is_some() {
            self.run_ai();
        }

        if let Some(side) = self.first_unready_side() {
            let rules = &self.config.rules;
            let description = format!(
                "{} must select {} attack(s) and {} defense(s)",
                self.combatant(side).name,
                rules.attacks_per_round,
                rules.defenses_per_round
            );
            tracing::warn!(%side, round = self.round, "round refused: not ready");
            self.emit(DuelEventKind::NotReady { side }, description);
            return None;
        }

        self.phase = DuelPhase::Battle;
        let report = resolve_round(self.round, &mut self.one, &mut self.two, &mut self.dice);
        self.log_round(&report);
        self.reports.push(report);

        self.outcome = DuelOutcome::from_liveness(self.one.is_alive(), self.two.is_alive());
        if self.outcome.is_decided() {
            self.finish_match();
        } else {
            self.next_round();
        }

        self.reports.last()
    }

    fn log_round(&mut self, report: &RoundReport) {
        for side in Side::BOTH {
            let attacker = report.side(side);
            let defender = report.side(side.opponent());

            for hit in &attacker.hits {
                if hit.dodged {
                    let description = format!(
                        "{} partially dodged {}'s {}!",
                        defender.name, attacker.name, hit.attack
                    );
                    self.emit(
                        DuelEventKind::AttackDodged {
                            side,
                            attack: hit.attack,
                        },
                        description,
                    );
                }

                let description = format!(
                    "{}'s {} deals {:.1} damage",
                    attacker.name, hit.attack, hit.damage
                );
                self.emit(
                    DuelEventKind::AttackLanded {
                        side,
                        attack: hit.attack,
                        damage: hit.damage,
                    },
                    description,
                );
            }
        }

        for side in Side::BOTH {
            let view = report.side(side);
            let description = format!("{}: {:.1} HP", view.name, view.health_after);
            self.emit(
                DuelEventKind::HealthReport {
                    side,
                    health: view.health_after,
                },
                description,
            );
        }

        let description = match report.winner {
            Some(side) => format!("{} wins round {}", report.side(side).name, report.round),
            None => format!("Round {} is even", report.round),
        };
        self.emit(
            DuelEventKind::RoundWon {
                side: report.winner,
            },
            description,
        );
    }

    fn next_round(&mut self) {
        self.round += 1;
        self.one.reset_selections();
        self.two.reset_selections();
        self.phase = DuelPhase::Selection;
        self.announce_round();
        self.schedule_ai();
    }

    fn finish_match(&mut self) {
        self.phase = DuelPhase::Result;

        let description = match self.outcome {
            DuelOutcome::Victory(side) => format!("{} wins the match!", self.combatant(side).name),
            DuelOutcome::Draw => "The match ends in a draw".to_string(),
            DuelOutcome::Undecided => "The match is undecided".to_string(),
        };

        tracing::info!(
            outcome = ?self.outcome,
            rounds = self.round,
            "match ended"
        );

        let outcome = self.outcome;
        self.emit(DuelEventKind::MatchEnded { outcome }, description);
        self.record_progression();
    }

    // === PROGRESSION ===

    fn record_progression(&mut self) {
        if self.progression_recorded {
            return;
        }
        self.progression_recorded = true;

        let Some(result) = self.outcome.result_for(Side::One) else {
            return;
        };
        let Some(store) = self.store.as_deref_mut() else {
            return;
        };

        match update_ledger(store, &mut self.one, result) {
            Ok(Some(report)) => self.announce_progression(report),
            Ok(None) => {
                tracing::warn!("no stored character, progression skipped");
            }
            Err(err) => {
                tracing::warn!(%err, "failed to record progression");
                self.emit(
                    DuelEventKind::ProgressionFailed,
                    format!("Could not save progress: {}", err),
                );
            }
        }
    }

    fn announce_progression(&mut self, report: LevelUpReport) {
        tracing::info!(
            experience = report.experience_gained,
            levels = report.levels_gained,
            level = report.new_level,
            "progression recorded"
        );

        let description = format!(
            "{} gains {} experience",
            self.one.name, report.experience_gained
        );
        self.emit(
            DuelEventKind::ExperienceGained {
                amount: report.experience_gained,
            },
            description,
        );

        let first = report.new_level + 1 - report.levels_gained;
        for level in first..=report.new_level {
            let description = format!(
                "{} reached level {} (+{} stat points)",
                self.one.name, level, BONUS_POINTS_PER_LEVEL
            );
            self.emit(DuelEventKind::LevelUp { level }, description);
        }

        self.last_level_up = Some(report);
    }
}
