//! Cardboard Warrior - floor-by-floor dungeon crawler engine
//!
//! Generates 4x4 room floors joined by doors, places monsters, items and a
//! boss on each, and settles fights with opposed d20 rolls.

pub mod combat;
pub mod data;
pub mod entities;
pub mod game;
pub mod save;
pub mod world;

// Re-export commonly used types
pub use combat::{resolve_round, RoundResult, D20};
pub use data::{get_floor_data, DataManager};
pub use game::{Game, GamePhase};
pub use world::{generate_level, Direction, LevelResult};
