//! Save/Load for a pet and its ledger.
//!
//! A save is a flat, versioned record: the pet's name, species name, five
//! stats, age and sad streak, plus the ledger's balance and per-category
//! totals. Species caps are not stored; the profile is resolved again by
//! name through a [`SpeciesRegistry`] on load. Mood and loss state are
//! derived from the stats, so they come back for free.
//!
//! Two encodings share the same [`SaveData`]: bincode for compact binary
//! saves and JSON for human-readable ones. Market state is not saved.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use petsim_logic::economy::{Economy, ExpenseCategory};
use petsim_logic::pet::PetState;
use petsim_logic::species::{SpeciesRegistry, StatBlock};
use serde::{Deserialize, Serialize};

/// Version number for save file format (increment when format changes)
const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    pub pet: PetRecord,
    pub economy: EconomyRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetRecord {
    pub name: String,
    pub species: String,
    pub stats: StatBlock,
    pub age_days: u32,
    #[serde(default)]
    pub sad_streak: u32,
}

impl From<&PetState> for PetRecord {
    fn from(pet: &PetState) -> Self {
        Self {
            name: pet.name().to_string(),
            species: pet.species().to_string(),
            stats: *pet.stats(),
            age_days: pet.age_days(),
            sad_streak: pet.sad_streak(),
        }
    }
}

impl PetRecord {
    pub fn into_pet(self, registry: &SpeciesRegistry) -> PetState {
        let profile = registry.resolve(&self.species);
        PetState::restore(&self.name, profile, self.stats, self.age_days, self.sad_streak)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomyRecord {
    pub balance: i64,
    pub starting_balance: i64,
    pub total_earned: i64,
    pub expenses: BTreeMap<ExpenseCategory, i64>,
}

impl From<&Economy> for EconomyRecord {
    fn from(economy: &Economy) -> Self {
        Self {
            balance: economy.balance(),
            starting_balance: economy.starting_balance(),
            total_earned: economy.total_earned(),
            expenses: economy.expenses().clone(),
        }
    }
}

impl EconomyRecord {
    pub fn into_economy(self) -> Economy {
        Economy::restore(
            self.balance,
            self.starting_balance,
            self.total_earned,
            self.expenses,
        )
    }
}

impl SaveData {
    pub fn capture(pet: &PetState, economy: &Economy) -> Self {
        Self {
            version: SAVE_VERSION,
            pet: PetRecord::from(pet),
            economy: EconomyRecord::from(economy),
        }
    }

    fn check_version(self) -> Result<Self, SaveError> {
        if self.version != SAVE_VERSION {
            return Err(SaveError::VersionMismatch {
                expected: SAVE_VERSION,
                found: self.version,
            });
        }
        Ok(self)
    }

    pub fn restore(self, registry: &SpeciesRegistry) -> LoadedGame {
        LoadedGame {
            pet: self.pet.into_pet(registry),
            economy: self.economy.into_economy(),
        }
    }
}

/// Result of loading a game
#[derive(Debug, Clone)]
pub struct LoadedGame {
    pub pet: PetState,
    pub economy: Economy,
}

/// Save a pet and its ledger to a writer (bincode).
pub fn save_game<W: Write>(writer: W, pet: &PetState, economy: &Economy) -> Result<(), SaveError> {
    bincode::serialize_into(writer, &SaveData::capture(pet, economy))?;
    log::info!("saved {} (day {})", pet.name(), pet.age_days());
    Ok(())
}

/// Load a game written by [`save_game`].
pub fn load_game<R: Read>(reader: R, registry: &SpeciesRegistry) -> Result<LoadedGame, SaveError> {
    let data: SaveData = bincode::deserialize_from(reader)?;
    let loaded = data.check_version()?.restore(registry);
    log::info!("loaded {} (day {})", loaded.pet.name(), loaded.pet.age_days());
    Ok(loaded)
}

/// Save as pretty-printed JSON.
pub fn save_game_json<W: Write>(
    writer: W,
    pet: &PetState,
    economy: &Economy,
) -> Result<(), SaveError> {
    serde_json::to_writer_pretty(writer, &SaveData::capture(pet, economy))?;
    log::info!("saved {} as json (day {})", pet.name(), pet.age_days());
    Ok(())
}

/// Load a game written by [`save_game_json`].
pub fn load_game_json<R: Read>(
    reader: R,
    registry: &SpeciesRegistry,
) -> Result<LoadedGame, SaveError> {
    let data: SaveData = serde_json::from_reader(reader)?;
    let loaded = data.check_version()?.restore(registry);
    log::info!(
        "loaded {} from json (day {})",
        loaded.pet.name(),
        loaded.pet.age_days()
    );
    Ok(loaded)
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    Json(serde_json::Error),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(e)
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        SaveError::Json(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SaveError::Json(e) => write!(f, "JSON error: {}", e),
            SaveError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Save version mismatch: expected {}, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for SaveError {}
