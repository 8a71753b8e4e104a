//! Match orchestration
//!
//! - `Duel` drives the round state machine
//! - `RoundReport` / `MatchSummary` are the structured results
//! - `DuelLog` is the human-readable event stream

pub mod events;
pub mod phase;
pub mod round;
pub mod state;

pub use events::{DuelEvent, DuelEventKind, DuelLog};
pub use phase::{DuelMode, DuelOutcome, DuelPhase, Side};
pub use round::{resolve_round, MatchSummary, RoundReport, SideReport};
pub use state::{Duel, COMPUTER_NAME};
