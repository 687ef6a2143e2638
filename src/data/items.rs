//! Items found in dungeon rooms

use serde::{Deserialize, Serialize};

use super::config::MAX_STAT;
use super::loader::DataError;

/// Hit points restored by one health potion
pub const HEALTH_POTION_HEAL: u32 = 25;

/// What an item does when the player picks it up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    HealthPotion,
    TreasureChest,
    Key,
}

impl ItemKind {
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::HealthPotion => "Health Potion",
            ItemKind::TreasureChest => "Treasure Chest",
            ItemKind::Key => "Key",
        }
    }
}

/// An item placed in a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    pub name: String,
    pub description: String,
    /// Heal amount for potions, gold for chests, unused for keys
    pub value: u32,
}

impl Item {
    pub fn health_potion() -> Self {
        Self {
            kind: ItemKind::HealthPotion,
            name: ItemKind::HealthPotion.name().to_string(),
            description: format!("Restores {} health.", HEALTH_POTION_HEAL),
            value: HEALTH_POTION_HEAL,
        }
    }

    pub fn treasure_chest(gold: u32) -> Self {
        Self {
            kind: ItemKind::TreasureChest,
            name: ItemKind::TreasureChest.name().to_string(),
            description: format!("Contains {} gold.", gold),
            value: gold,
        }
    }

    pub fn key() -> Self {
        Self {
            kind: ItemKind::Key,
            name: ItemKind::Key.name().to_string(),
            description: "Unlocks the way to the floor boss.".to_string(),
            value: 0,
        }
    }

    /// Check the value makes sense for the item kind
    pub fn validate(&self) -> Result<(), DataError> {
        match self.kind {
            ItemKind::HealthPotion | ItemKind::TreasureChest
                if self.value == 0 || self.value > MAX_STAT =>
            {
                Err(DataError::ItemValue {
                    name: self.name.clone(),
                    max: MAX_STAT,
                })
            }
            _ => Ok(()),
        }
    }
}
