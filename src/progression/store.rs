//! Character persistence boundary
//!
//! The engine only needs "the current character record". Storage
//! technology is the implementor's concern.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::Result;
use crate::progression::Character;

pub trait CharacterStore {
    fn load(&self) -> Result<Option<Character>>;

    fn save(&mut self, character: &Character) -> Result<()>;

    fn delete(&mut self) -> Result<()>;

    fn has_character(&self) -> bool {
        matches!(self.load(), Ok(Some(_)))
    }
}

/// In-memory store for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryCharacterStore {
    character: Option<Character>,
    saves: usize,
}

impl MemoryCharacterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_character(character: Character) -> Self {
        Self {
            character: Some(character),
            saves: 0,
        }
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl CharacterStore for MemoryCharacterStore {
    fn load(&self) -> Result<Option<Character>> {
        Ok(self.character.clone())
    }

    fn save(&mut self, character: &Character) -> Result<()> {
        self.character = Some(character.clone());
        self.saves += 1;
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        self.character = None;
        Ok(())
    }
}

/// Single-character JSON file
#[derive(Debug, Clone)]
pub struct JsonCharacterStore {
    path: PathBuf,
}

pub const DEFAULT_CHARACTER_PATH: &str = "data/character.json";

impl JsonCharacterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonCharacterStore {
    fn default() -> Self {
        Self::new(DEFAULT_CHARACTER_PATH)
    }
}

impl CharacterStore for JsonCharacterStore {
    /// A missing file is an empty store, not an error
    fn load(&self) -> Result<Option<Character>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        let character = serde_json::from_str(&raw)?;
        Ok(Some(character))
    }

    fn save(&mut self, character: &Character) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(character)?;
        fs::write(&self.path, raw)?;
        tracing::debug!(path = %self.path.display(), "character saved");
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
