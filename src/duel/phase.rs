//! Match phases, modes, sides and outcomes

use serde::{Deserialize, Serialize};

use crate::progression::BattleResult;

/// Round orchestrator state
///
/// `Setup -> Selection -> Battle -> (Selection | Result)`. `Battle` only
/// exists while a round is being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DuelPhase {
    Setup,
    Selection,
    Battle,
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DuelMode {
    /// Both sides are human and both must commit before a round
    PlayerVsPlayer,
    /// Side two is driven by an `OpponentAi`
    PlayerVsAi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::One, Side::Two];

    pub fn opponent(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::One => f.write_str("side one"),
            Side::Two => f.write_str("side two"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DuelOutcome {
    Undecided,
    Victory(Side),
    Draw,
}

impl Default for DuelOutcome {
    fn default() -> Self {
        Self::Undecided
    }
}

impl DuelOutcome {
    /// Classify from liveness after a round
    pub fn from_liveness(one_alive: bool, two_alive: bool) -> Self {
        match (one_alive, two_alive) {
            (true, true) => Self::Undecided,
            (true, false) => Self::Victory(Side::One),
            (false, true) => Self::Victory(Side::Two),
            (false, false) => Self::Draw,
        }
    }

    pub fn is_decided(self) -> bool {
        !matches!(self, Self::Undecided)
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            Self::Victory(side) => Some(side),
            _ => None,
        }
    }

    /// Ledger result for one side; `None` while undecided
    pub fn result_for(self, side: Side) -> Option<BattleResult> {
        match self {
            Self::Undecided => None,
            Self::Draw => Some(BattleResult::Draw),
            Self::Victory(winner) if winner == side => Some(BattleResult::Win),
            Self::Victory(_) => Some(BattleResult::Loss),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_liveness() {
        assert_eq!(DuelOutcome::from_liveness(true, true), DuelOutcome::Undecided);
        assert_eq!(DuelOutcome::from_liveness(true, false), DuelOutcome::Victory(Side::One));
        assert_eq!(DuelOutcome::from_liveness(false, true), DuelOutcome::Victory(Side::Two));
        assert_eq!(DuelOutcome::from_liveness(false, false), DuelOutcome::Draw);
    }

    #[test]
    fn test_result_for_each_side() {
        let outcome = DuelOutcome::Victory(Side::Two);
        assert_eq!(outcome.result_for(Side::Two), Some(BattleResult::Win));
        assert_eq!(outcome.result_for(Side::One), Some(BattleResult::Loss));
        assert_eq!(DuelOutcome::Draw.result_for(Side::One), Some(BattleResult::Draw));
        assert_eq!(DuelOutcome::Undecided.result_for(Side::One), None);
    }

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::One.opponent(), Side::Two);
        assert_eq!(Side::Two.opponent(), Side::One);
    }
}
