//! Display event stream
//!
//! Append-only. Nothing reads these back for data; structured results
//! live in `RoundReport`.

use serde::{Deserialize, Serialize};

use crate::ai::Strategy;
use crate::combat::AttackKind;
use crate::core::types::Round;
use crate::duel::phase::{DuelOutcome, DuelPhase, Side};

/// Log entry for duel events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuelEvent {
    pub round: Round,
    pub kind: DuelEventKind,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DuelEventKind {
    MatchStarted,
    RoundStarted,
    AttackLanded { side: Side, attack: AttackKind, damage: f64 },
    AttackDodged { side: Side, attack: AttackKind },
    HealthReport { side: Side, health: f64 },
    RoundWon { side: Option<Side> },
    MatchEnded { outcome: DuelOutcome },
    AiSelected { strategy: Strategy },
    SelectionRefused { side: Side },
    NotReady { side: Side },
    PhaseRefused { phase: DuelPhase },
    ExperienceGained { amount: u32 },
    LevelUp { level: u32 },
    ProgressionFailed,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DuelLog {
    events: Vec<DuelEvent>,
}

impl DuelLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: DuelEventKind, description: String, round: Round) {
        self.events.push(DuelEvent {
            round,
            kind,
            description,
        });
    }

    pub fn events(&self) -> &[DuelEvent] {
        &self.events
    }

    pub fn iter(&self) -> impl Iterator<Item = &DuelEvent> {
        self.events.iter()
    }

    pub fn last(&self) -> Option<&DuelEvent> {
        self.events.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Events of one round in emission order
    pub fn for_round(&self, round: Round) -> impl Iterator<Item = &DuelEvent> {
        self.events.iter().filter(move |e| e.round == round)
    }

    /// Human-readable lines, oldest first
    pub fn descriptions(&self) -> impl Iterator<Item = &str> {
        self.events.iter().map(|e| e.description.as_str())
    }
}
