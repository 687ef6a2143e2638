//! Player state

use serde::{Deserialize, Serialize};

use crate::data::{Item, ItemKind, PlayerConfig};

/// Everything the HUD and combat need to know about the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerData {
    pub health: u32,
    pub max_health: u32,
    pub attack: u32,
    /// Current floor number, 1-based
    pub floor_index: u32,
    /// Block index of the room the player stands in
    pub room_index: usize,
    pub gold: u32,
    pub potions: u32,
    pub key: bool,
    pub kill_count: u32,
}

impl PlayerData {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            health: config.health,
            max_health: config.health,
            attack: config.attack,
            floor_index: 1,
            room_index: 0,
            gold: 0,
            potions: config.potions,
            key: false,
            kill_count: 0,
        }
    }

    /// Apply damage, clamping at zero. Returns the damage actually taken.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.health);
        self.health -= actual;
        actual
    }

    /// Heal up to max health. Returns the amount actually healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.max_health.saturating_sub(self.health));
        self.health += actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    pub fn percentage(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32
    }

    /// Take an item out of a room
    pub fn collect(&mut self, item: &Item) {
        match item.kind {
            ItemKind::HealthPotion => self.potions += 1,
            ItemKind::TreasureChest => self.gold = self.gold.saturating_add(item.value),
            ItemKind::Key => self.key = true,
        }
    }
}

impl Default for PlayerData {
    fn default() -> Self {
        Self::new(&PlayerConfig::default())
    }
}
