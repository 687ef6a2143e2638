//! Twenty-sided dice
//!
//! Each combat round needs one player roll and one monster roll. The rolls
//! may settle in either order, so the first one waits in a [`RollBuffer`].

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest face of the die; rolling it is a critical hit
pub const D20_MAX: u8 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombatError {
    #[error("a d20 has no face {0}")]
    InvalidRoll(u8),
    #[error("{0:?} already rolled this round")]
    RollAlreadySubmitted(DiceOwner),
    #[error("there is no fight in progress")]
    NotInCombat,
}

/// A face of a d20, always 1 to 20
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct D20(u8);

impl D20 {
    pub fn new(face: u8) -> Result<Self, CombatError> {
        if (1..=D20_MAX).contains(&face) {
            Ok(Self(face))
        } else {
            Err(CombatError::InvalidRoll(face))
        }
    }

    pub fn roll(rng: &mut impl Rng) -> Self {
        Self(rng.gen_range(1..=D20_MAX))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn is_critical(&self) -> bool {
        self.0 == D20_MAX
    }
}

impl TryFrom<u8> for D20 {
    type Error = CombatError;

    fn try_from(face: u8) -> Result<Self, Self::Error> {
        D20::new(face)
    }
}

impl From<D20> for u8 {
    fn from(roll: D20) -> u8 {
        roll.0
    }
}

/// Who threw a die
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiceOwner {
    Player,
    Enemy,
}

/// Both rolls of one round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollPair {
    pub player: D20,
    pub monster: D20,
}

/// Holds the first roll of a round until the second one arrives
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RollBuffer {
    player: Option<D20>,
    monster: Option<D20>,
}

impl RollBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a roll. Returns both rolls, emptying the buffer, once the pair is complete.
    pub fn submit(&mut self, owner: DiceOwner, roll: D20) -> Result<Option<RollPair>, CombatError> {
        let slot = match owner {
            DiceOwner::Player => &mut self.player,
            DiceOwner::Enemy => &mut self.monster,
        };
        if slot.is_some() {
            return Err(CombatError::RollAlreadySubmitted(owner));
        }
        *slot = Some(roll);

        match (self.player, self.monster) {
            (Some(player), Some(monster)) => {
                self.clear();
                Ok(Some(RollPair { player, monster }))
            }
            _ => Ok(None),
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.player.is_some() || self.monster.is_some()
    }

    pub fn clear(&mut self) {
        self.player = None;
        self.monster = None;
    }
}
