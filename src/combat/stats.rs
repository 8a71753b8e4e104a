//! Core character stats and presets

use serde::{Deserialize, Serialize};

/// One of the five core stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Strength,
    Agility,
    Endurance,
    Wisdom,
    Intellect,
}

impl Stat {
    pub const ALL: [Stat; 5] = [
        Stat::Strength,
        Stat::Agility,
        Stat::Endurance,
        Stat::Wisdom,
        Stat::Intellect,
    ];
}

/// The five core stats of a combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreStats {
    pub strength: u32,
    pub agility: u32,
    pub endurance: u32,
    pub wisdom: u32,
    pub intellect: u32,
}

impl CoreStats {
    pub const fn new(strength: u32, agility: u32, endurance: u32, wisdom: u32, intellect: u32) -> Self {
        Self {
            strength,
            agility,
            endurance,
            wisdom,
            intellect,
        }
    }

    /// Every stat set to the same value
    pub const fn uniform(value: u32) -> Self {
        Self::new(value, value, value, value, value)
    }

    pub fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Strength => self.strength,
            Stat::Agility => self.agility,
            Stat::Endurance => self.endurance,
            Stat::Wisdom => self.wisdom,
            Stat::Intellect => self.intellect,
        }
    }

    pub fn total(&self) -> u32 {
        Stat::ALL.iter().map(|&stat| self.get(stat)).sum()
    }

    /// Stats in table column order
    pub fn as_array(&self) -> [u32; 5] {
        [
            self.strength,
            self.agility,
            self.endurance,
            self.wisdom,
            self.intellect,
        ]
    }

    /// Every stat lies within `[min, max]`
    pub fn within(&self, min: u32, max: u32) -> bool {
        self.as_array().iter().all(|v| (min..=max).contains(v))
    }
}

impl Default for CoreStats {
    fn default() -> Self {
        CharacterPreset::Balanced.stats()
    }
}

/// Ready-made stat spreads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterPreset {
    Warrior,
    Mage,
    Rogue,
    Balanced,
}

impl CharacterPreset {
    pub const fn stats(self) -> CoreStats {
        match self {
            Self::Warrior => CoreStats::new(8, 5, 7, 3, 2),
            Self::Mage => CoreStats::new(2, 4, 5, 8, 6),
            Self::Rogue => CoreStats::new(5, 8, 4, 3, 5),
            Self::Balanced => CoreStats::uniform(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_fit_starting_allowance() {
        for preset in [
            CharacterPreset::Warrior,
            CharacterPreset::Mage,
            CharacterPreset::Rogue,
            CharacterPreset::Balanced,
        ] {
            assert_eq!(preset.stats().total(), 25, "{:?}", preset);
        }
    }

    #[test]
    fn test_get_matches_fields() {
        let stats = CoreStats::new(1, 2, 3, 4, 5);
        assert_eq!(stats.get(Stat::Strength), 1);
        assert_eq!(stats.get(Stat::Intellect), 5);
        assert_eq!(stats.as_array(), [1, 2, 3, 4, 5]);
        assert_eq!(stats.total(), 15);
    }

    #[test]
    fn test_within_bounds() {
        assert!(CoreStats::uniform(5).within(5, 10));
        assert!(!CoreStats::new(4, 5, 5, 5, 5).within(5, 10));
        assert!(!CoreStats::new(11, 5, 5, 5, 5).within(5, 10));
    }
}
