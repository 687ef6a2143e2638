//! Game data and external content
//!
//! Monster species, items and the per-floor catalog, plus loading of the
//! RON data files that override the built-in tables.

pub mod config;
pub mod floors;
pub mod items;
pub mod loader;
pub mod monsters;

pub use config::{GameConfig, GenerationConfig, PlayerConfig};
pub use floors::{get_floor_data, FloorCatalog, FloorData, MAX_FLOOR};
pub use items::{Item, ItemKind, HEALTH_POTION_HEAL};
pub use loader::{export_default_data, DataError, DataManager, DEFAULT_DATA_DIR};
pub use monsters::MonsterSpecies;
