//! Game module - Core game logic and state management

pub mod autopilot;
mod state;

pub use autopilot::{Action, FloorReport, RunReport};
pub use state::{
    Game, GameMessage, GamePhase, MessageCategory, MoveOutcome, PotionOutcome, RoundReport,
};
