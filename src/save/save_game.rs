//! Game save/load system
//!
//! Handles saving and loading game state to/from disk.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::entities::PlayerData;
use crate::game::GamePhase;
use crate::world::LevelResult;

/// Save file version for compatibility checking
pub const SAVE_VERSION: u32 = 1;

/// Number of save slots offered
pub const SAVE_SLOTS: u8 = 3;

/// Complete save data structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub player: PlayerData,
    /// The floor as it stands, with visited rooms and cleared encounters
    pub level: LevelResult,
    pub phase: GamePhase,
    pub floor: u32,
}

impl SaveData {
    pub fn new(player: PlayerData, level: LevelResult, phase: GamePhase) -> Self {
        Self {
            version: SAVE_VERSION,
            floor: level.floor_number,
            player,
            level,
            phase,
        }
    }
}

/// Brief summary of a save for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSummary {
    pub floor: u32,
    pub health: u32,
    pub gold: u32,
    pub kill_count: u32,
}

impl From<&SaveData> for SaveSummary {
    fn from(save: &SaveData) -> Self {
        Self {
            floor: save.floor,
            health: save.player.health,
            gold: save.player.gold,
            kill_count: save.player.kill_count,
        }
    }
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed save: {0}")]
    Json(#[from] serde_json::Error),
    #[error("save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
    #[error("invalid save data: {0}")]
    InvalidData(String),
}

/// Get the save directory path
pub fn save_directory() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "cardboard-warrior", "CardboardWarrior") {
        let mut path = proj_dirs.data_local_dir().to_path_buf();
        path.push("saves");
        path
    } else {
        // Fallback to current directory
        PathBuf::from("./saves")
    }
}

/// Get the path for a specific save slot
pub fn save_path(slot: u8) -> PathBuf {
    save_path_in(&save_directory(), slot)
}

/// Path of a save slot inside `dir`
pub fn save_path_in(dir: &Path, slot: u8) -> PathBuf {
    dir.join(format!("save_{}.json", slot))
}

/// Check if a save exists in the given slot
pub fn save_exists(slot: u8) -> bool {
    save_exists_in(&save_directory(), slot)
}

pub fn save_exists_in(dir: &Path, slot: u8) -> bool {
    save_path_in(dir, slot).exists()
}

/// List every save slot with a summary of what it holds
pub fn list_saves() -> Vec<(u8, Option<SaveSummary>)> {
    list_saves_in(&save_directory())
}

/// Slots in `dir`; missing and unreadable slots have no summary
pub fn list_saves_in(dir: &Path) -> Vec<(u8, Option<SaveSummary>)> {
    (0..SAVE_SLOTS)
        .map(|slot| {
            let summary = if save_exists_in(dir, slot) {
                match load_from_path(&save_path_in(dir, slot)) {
                    Ok(save) => Some(SaveSummary::from(&save)),
                    Err(e) => {
                        log::warn!("Skipping save slot {}: {}", slot, e);
                        None
                    }
                }
            } else {
                None
            };
            (slot, summary)
        })
        .collect()
}

/// Write a save file, creating its directory if needed
pub fn save_to_path(save: &SaveData, path: &Path) -> Result<(), SaveError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|source| SaveError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(save)?;
    fs::write(path, json).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and version-check a save file
pub fn load_from_path(path: &Path) -> Result<SaveData, SaveError> {
    let data = fs::read_to_string(path).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let save: SaveData = serde_json::from_str(&data)?;

    // Version check
    if save.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save.version,
        });
    }
    Ok(save)
}

/// Save the game to a slot
pub fn save_game(game: &crate::game::Game, slot: u8) -> Result<(), SaveError> {
    save_game_in(game, &save_directory(), slot)
}

pub fn save_game_in(game: &crate::game::Game, dir: &Path, slot: u8) -> Result<(), SaveError> {
    let save = game
        .to_save()
        .ok_or_else(|| SaveError::InvalidData("the run has not started".to_string()))?;
    save_to_path(&save, &save_path_in(dir, slot))?;

    log::info!("Game saved to slot {}", slot);
    Ok(())
}

/// Load a game from a slot
pub fn load_game(slot: u8) -> Result<SaveData, SaveError> {
    load_game_in(&save_directory(), slot)
}

pub fn load_game_in(dir: &Path, slot: u8) -> Result<SaveData, SaveError> {
    let save = load_from_path(&save_path_in(dir, slot))?;
    log::info!("Game loaded from slot {}", slot);
    Ok(save)
}

/// Delete a save slot
pub fn delete_save(slot: u8) -> Result<(), SaveError> {
    delete_save_in(&save_directory(), slot)
}

/// Delete a slot in `dir`; a slot that is already empty is fine
pub fn delete_save_in(dir: &Path, slot: u8) -> Result<(), SaveError> {
    let path = save_path_in(dir, slot);
    if path.exists() {
        fs::remove_file(&path).map_err(|source| SaveError::Io {
            path: path.clone(),
            source,
        })?;
        log::info!("Deleted save slot {}", slot);
    }
    Ok(())
}
