pub mod config;
pub mod error;
pub mod types;

pub use config::{AiConfig, DuelConfig, PacingConfig, RulesConfig};
pub use error::{DuelError, Result};
pub use types::{CombatantId, Round};
