//! RON data loader
//!
//! Loads the floor table and game settings from external RON files, with
//! fallback to the built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use super::config::GameConfig;
use super::floors::{default_floor_catalog, FloorCatalog, FloorData};

/// Default location of the data files
pub const DEFAULT_DATA_DIR: &str = "assets/data";

const FLOORS_FILE: &str = "floors.ron";
const CONFIG_FILE: &str = "config.ron";

/// Errors from loading or validating game data
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("failed to serialize data: {0}")]
    Serialize(#[from] ron::Error),
    #[error("floor table has {found} floors, expected {expected}")]
    FloorCount { expected: usize, found: usize },
    #[error("floor entry numbered {found} where {expected} was expected")]
    FloorIndex { expected: u32, found: u32 },
    #[error("floor {floor}: {source}")]
    InvalidEntry {
        floor: u32,
        #[source]
        source: Box<DataError>,
    },
    #[error("{name}: {stat} is {value}, allowed range is 1 to {max}")]
    StatOutOfRange {
        name: String,
        stat: &'static str,
        value: u32,
        max: u32,
    },
    #[error("{name} must have a value between 1 and {max}")]
    ItemValue { name: String, max: u32 },
    #[error("max_attempts must be at least 1")]
    NoAttempts,
    #[error("min_encounters ({min}) is above max_encounters ({max})")]
    EncounterRange { min: usize, max: usize },
    #[error("floor table is empty")]
    EmptyCatalog,
}

/// All external game data
#[derive(Debug, Clone)]
pub struct DataManager {
    pub floors: FloorCatalog,
    pub config: GameConfig,
}

impl DataManager {
    /// Load from the default data directory, falling back to defaults
    pub fn new() -> Self {
        Self::load_or_default(Path::new(DEFAULT_DATA_DIR))
    }

    /// Load each file that exists and parses; anything else uses the built-in value
    pub fn load_or_default(base_path: &Path) -> Self {
        // A catalog is checked while it deserializes
        let floors = match load_file::<FloorCatalog>(&base_path.join(FLOORS_FILE)) {
            Ok(Some(floors)) => floors,
            Ok(None) => default_floor_catalog(),
            Err(e) => {
                log::warn!("{}. Using built-in floors.", e);
                default_floor_catalog()
            }
        };

        let config = match load_file::<GameConfig>(&base_path.join(CONFIG_FILE)) {
            Ok(Some(config)) => match config.validate() {
                Ok(()) => config,
                Err(e) => {
                    log::warn!("Rejected {}: {}. Using default config.", CONFIG_FILE, e);
                    GameConfig::default()
                }
            },
            Ok(None) => GameConfig::default(),
            Err(e) => {
                log::warn!("{}. Using default config.", e);
                GameConfig::default()
            }
        };

        Self { floors, config }
    }

    /// Strict load: a file may be missing, but a present file must parse and validate
    pub fn load_from_dir(base_path: &Path) -> Result<Self, DataError> {
        let floors = load_file::<FloorCatalog>(&base_path.join(FLOORS_FILE))?
            .unwrap_or_else(default_floor_catalog);

        let config = load_file::<GameConfig>(&base_path.join(CONFIG_FILE))?
            .unwrap_or_default();
        config.validate()?;

        Ok(Self { floors, config })
    }

    /// Floor entry, clamped to the table range
    pub fn floor_data(&self, floor_number: u32) -> &FloorData {
        self.floors.get_floor_data(floor_number)
    }
}

impl Default for DataManager {
    fn default() -> Self {
        Self {
            floors: default_floor_catalog(),
            config: GameConfig::default(),
        }
    }
}

fn load_file<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, DataError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value = ron::from_str(&content).map_err(|source| DataError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Loaded {}", path.display());
    Ok(Some(value))
}

fn write_file<T: Serialize>(path: &Path, value: &T) -> Result<(), DataError> {
    let text = ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())?;
    fs::write(path, text).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Export all default data to RON files for easy editing
pub fn export_default_data(base_path: &Path) -> Result<(), DataError> {
    fs::create_dir_all(base_path).map_err(|source| DataError::Io {
        path: base_path.to_path_buf(),
        source,
    })?;

    write_file(&base_path.join(FLOORS_FILE), &default_floor_catalog())?;
    write_file(&base_path.join(CONFIG_FILE), &GameConfig::default())?;
    Ok(())
}
