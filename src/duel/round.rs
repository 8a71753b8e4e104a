//! Simultaneous round resolution and structured round records
//!
//! Mutation order per round: read both combatants, compute both damage
//! values, apply both, then the caller checks termination.

use serde::{Deserialize, Serialize};

use crate::combat::{resolve_attack_damage, AttackHit, AttackKind, Combatant, DefenseKind, Dice};
use crate::core::types::Round;
use crate::duel::phase::{DuelOutcome, Side};

/// One side's view of a resolved round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideReport {
    pub name: String,
    pub attacks: Vec<AttackKind>,
    pub defenses: Vec<DefenseKind>,
    /// This side's outbound attacks
    pub hits: Vec<AttackHit>,
    pub damage_dealt: f64,
    pub health_after: f64,
}

impl SideReport {
    pub fn dodged_attacks(&self) -> usize {
        self.hits.iter().filter(|h| h.dodged).count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: Round,
    pub side_one: SideReport,
    pub side_two: SideReport,
    /// Side that dealt strictly more damage; `None` on equal damage
    pub winner: Option<Side>,
}

impl RoundReport {
    pub fn side(&self, side: Side) -> &SideReport {
        match side {
            Side::One => &self.side_one,
            Side::Two => &self.side_two,
        }
    }
}

fn round_winner(one_damage: f64, two_damage: f64) -> Option<Side> {
    if one_damage > two_damage {
        Some(Side::One)
    } else if two_damage > one_damage {
        Some(Side::Two)
    } else {
        None
    }
}

/// Resolve both directions from the same pre-round snapshot, then apply
///
/// Side one's dodge rolls are drawn first.
pub fn resolve_round<D: Dice + ?Sized>(
    round: Round,
    one: &mut Combatant,
    two: &mut Combatant,
    dice: &mut D,
) -> RoundReport {
    // Compute
    let one_out = resolve_attack_damage(one, two, dice);
    let two_out = resolve_attack_damage(two, one, dice);

    // Apply
    two.take_damage(one_out.total_damage);
    one.deal_damage(one_out.total_damage);
    one.take_damage(two_out.total_damage);
    two.deal_damage(two_out.total_damage);

    let winner = round_winner(one_out.total_damage, two_out.total_damage);
    match winner {
        Some(Side::One) => one.win_round(),
        Some(Side::Two) => two.win_round(),
        None => {}
    }

    tracing::info!(
        round,
        one_damage = one_out.total_damage,
        two_damage = two_out.total_damage,
        one_health = one.health(),
        two_health = two.health(),
        "round resolved"
    );

    RoundReport {
        round,
        side_one: SideReport {
            name: one.name.clone(),
            attacks: one.selected_attacks().to_vec(),
            defenses: one.selected_defenses().to_vec(),
            hits: one_out.hits,
            damage_dealt: one_out.total_damage,
            health_after: one.health(),
        },
        side_two: SideReport {
            name: two.name.clone(),
            attacks: two.selected_attacks().to_vec(),
            defenses: two.selected_defenses().to_vec(),
            hits: two_out.hits,
            damage_dealt: two_out.total_damage,
            health_after: two.health(),
        },
        winner,
    }
}

/// Match statistics derived from round reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub rounds_played: usize,
    pub side_one_damage: f64,
    pub side_two_damage: f64,
    pub side_one_rounds_won: usize,
    pub side_two_rounds_won: usize,
    pub side_one_dodges: usize,
    pub side_two_dodges: usize,
    pub outcome: DuelOutcome,
}

impl MatchSummary {
    pub fn from_reports(reports: &[RoundReport], outcome: DuelOutcome) -> Self {
        let rounds_won = |side| reports.iter().filter(|r| r.winner == Some(side)).count();

        Self {
            rounds_played: reports.len(),
            side_one_damage: reports.iter().map(|r| r.side_one.damage_dealt).sum(),
            side_two_damage: reports.iter().map(|r| r.side_two.damage_dealt).sum(),
            side_one_rounds_won: rounds_won(Side::One),
            side_two_rounds_won: rounds_won(Side::Two),
            // Dodges made by a side are the opponent's dodged attacks
            side_one_dodges: reports.iter().map(|r| r.side_two.dodged_attacks()).sum(),
            side_two_dodges: reports.iter().map(|r| r.side_one.dodged_attacks()).sum(),
            outcome,
        }
    }
}
