//! World module
//!
//! The 4x4 floor grid, rooms and doors, and procedural floor generation.

pub mod generation;
pub mod grid;
pub mod level;
pub mod room;

pub use generation::{generate_level, LevelGenerator};
pub use grid::{Direction, BLOCKS, BLOCK_COUNT, PERIMETER_ROOMS};
pub use level::{ExitDoor, GenerationWarning, LevelResult, RoomMarker};
pub use room::{Doors, Room};
