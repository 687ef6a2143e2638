//! Tunable game settings
//!
//! Loaded from `config.ron` by the [`DataManager`](super::DataManager);
//! any field left out of the file keeps its default.

use serde::{Deserialize, Serialize};

use super::items::HEALTH_POTION_HEAL;
use super::loader::DataError;

/// Ceiling for health, attack and item values read from data files
pub const MAX_STAT: u32 = 1_000_000;

/// Reject a stat of 0 or above [`MAX_STAT`]
pub(crate) fn check_stat(name: &str, stat: &'static str, value: u32) -> Result<(), DataError> {
    if value == 0 || value > MAX_STAT {
        return Err(DataError::StatOutOfRange {
            name: name.to_string(),
            stat,
            value,
            max: MAX_STAT,
        });
    }
    Ok(())
}

/// Floor generation knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// A floor needs strictly more rooms than this
    pub min_rooms: usize,
    /// Attempts before settling for the best floor seen
    pub max_attempts: u32,
    /// Fewest rooms that get an encounter
    pub min_encounters: usize,
    /// Most rooms that get an encounter
    pub max_encounters: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            min_rooms: 10,
            max_attempts: 20,
            min_encounters: 3,
            max_encounters: 5,
        }
    }
}

/// Starting stats of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub health: u32,
    pub attack: u32,
    pub potions: u32,
    /// Health restored per potion
    pub potion_heal: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            health: 100,
            attack: 10,
            potions: 1,
            potion_heal: HEALTH_POTION_HEAL,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub generation: GenerationConfig,
    pub player: PlayerConfig,
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), DataError> {
        let generation = &self.generation;
        if generation.max_attempts == 0 {
            return Err(DataError::NoAttempts);
        }
        if generation.min_encounters > generation.max_encounters {
            return Err(DataError::EncounterRange {
                min: generation.min_encounters,
                max: generation.max_encounters,
            });
        }
        check_stat("player", "health", self.player.health)?;
        check_stat("player", "attack", self.player.attack)?;
        check_stat("player", "potion_heal", self.player.potion_heal)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.generation.min_rooms, 10);
        assert_eq!(config.generation.max_attempts, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let config: GameConfig = ron::from_str("(player: (attack: 14))").unwrap();
        assert_eq!(config.player.attack, 14);
        assert_eq!(config.player.health, 100);
        assert_eq!(config.generation, GenerationConfig::default());
    }

    #[test]
    fn test_validate_rejects_inverted_encounter_range() {
        let mut config = GameConfig::default();
        config.generation.min_encounters = 6;
        assert!(matches!(
            config.validate(),
            Err(DataError::EncounterRange { min: 6, max: 5 })
        ));
    }

    #[test]
    fn test_validate_bounds_player_stats() {
        let mut config = GameConfig::default();
        config.player.attack = u32::MAX;
        assert!(matches!(
            config.validate(),
            Err(DataError::StatOutOfRange { stat: "attack", .. })
        ));

        config.player.attack = MAX_STAT;
        assert!(config.validate().is_ok());

        config.player.health = 0;
        assert!(matches!(
            config.validate(),
            Err(DataError::StatOutOfRange { stat: "health", value: 0, .. })
        ));
    }

    #[test]
    fn test_huge_stats_in_ron_are_rejected() {
        let config: GameConfig = ron::from_str("(player: (health: 4294967295))").unwrap();
        assert!(config.validate().is_err());
    }
}
