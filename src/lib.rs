//! Soul Duel - turn-based duel engine with an opponent AI and character progression

pub mod ai;
pub mod combat;
pub mod core;
pub mod duel;
pub mod progression;
