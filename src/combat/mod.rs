//! Combat system

pub mod damage;
pub mod dice;

pub use damage::{apply_round, resolve_pair, resolve_round, round_damage, RoundEffects, RoundOutcome, RoundResult};
pub use dice::{CombatError, DiceOwner, RollBuffer, RollPair, D20, D20_MAX};
