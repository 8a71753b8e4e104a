//! Attack and defense kinds
//!
//! Both enums are closed and share the same five elements. Declaration
//! order is significant: it is the tie-break order for AI selection and
//! the row/column order of the formula tables.

use serde::{Deserialize, Serialize};

/// Offensive ability kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttackKind {
    Fire,
    Lightning,
    Weapon,
    Acid,
    Psycho,
}

/// Defensive ability kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DefenseKind {
    Fire,
    Lightning,
    Weapon,
    Acid,
    Psycho,
}

impl AttackKind {
    pub const ALL: [AttackKind; 5] = [
        AttackKind::Fire,
        AttackKind::Lightning,
        AttackKind::Weapon,
        AttackKind::Acid,
        AttackKind::Psycho,
    ];

    /// Position in declaration order, used to index formula tables
    pub const fn index(self) -> usize {
        match self {
            Self::Fire => 0,
            Self::Lightning => 1,
            Self::Weapon => 2,
            Self::Acid => 3,
            Self::Psycho => 4,
        }
    }

    /// Display icon identifier
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Fire => "flame",
            Self::Lightning => "bolt",
            Self::Weapon => "hammer",
            Self::Acid => "drop",
            Self::Psycho => "brain.head.profile",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Fire => "Fire attack",
            Self::Lightning => "Lightning attack",
            Self::Weapon => "Weapon attack",
            Self::Acid => "Acid attack",
            Self::Psycho => "Psycho attack",
        }
    }

    /// The defense of the same element
    pub const fn counter(self) -> DefenseKind {
        match self {
            Self::Fire => DefenseKind::Fire,
            Self::Lightning => DefenseKind::Lightning,
            Self::Weapon => DefenseKind::Weapon,
            Self::Acid => DefenseKind::Acid,
            Self::Psycho => DefenseKind::Psycho,
        }
    }

    /// Parse a short name such as `fire` or `psycho` (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| format!("{:?}", kind).eq_ignore_ascii_case(name.trim()))
    }
}

impl DefenseKind {
    pub const ALL: [DefenseKind; 5] = [
        DefenseKind::Fire,
        DefenseKind::Lightning,
        DefenseKind::Weapon,
        DefenseKind::Acid,
        DefenseKind::Psycho,
    ];

    pub const fn index(self) -> usize {
        match self {
            Self::Fire => 0,
            Self::Lightning => 1,
            Self::Weapon => 2,
            Self::Acid => 3,
            Self::Psycho => 4,
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Fire => "flame",
            Self::Lightning => "bolt",
            Self::Weapon => "shield",
            Self::Acid => "drop",
            Self::Psycho => "brain.head.profile",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Fire => "Fire ward",
            Self::Lightning => "Lightning ward",
            Self::Weapon => "Weapon guard",
            Self::Acid => "Acid ward",
            Self::Psycho => "Psycho shield",
        }
    }

    /// The attack this defense directly counters
    pub const fn counters(self) -> AttackKind {
        match self {
            Self::Fire => AttackKind::Fire,
            Self::Lightning => AttackKind::Lightning,
            Self::Weapon => AttackKind::Weapon,
            Self::Acid => AttackKind::Acid,
            Self::Psycho => AttackKind::Psycho,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| format!("{:?}", kind).eq_ignore_ascii_case(name.trim()))
    }
}

impl std::fmt::Display for AttackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::fmt::Display for DefenseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
