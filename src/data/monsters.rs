//! Monster species
//!
//! Base definitions shared by every floor. A room never holds a species
//! directly; placement copies it into a [`MonsterInstance`](crate::entities::MonsterInstance).

use serde::{Deserialize, Serialize};

use super::config::check_stat;
use super::loader::DataError;

const PORTRAIT_PATH: &str = "images/monsters/";

/// A kind of monster as listed in the floor catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterSpecies {
    /// Stable identifier, e.g. `GIANT_RAT`
    pub key: String,
    /// Display name
    pub label: String,
    /// Base (and maximum) health
    pub health: u32,
    pub attack: u32,
    /// Portrait image used by the HUD
    pub portrait: String,
}

impl MonsterSpecies {
    pub fn new(key: &str, label: &str, health: u32, attack: u32, image: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            health,
            attack,
            portrait: format!("{}{}", PORTRAIT_PATH, image),
        }
    }

    /// Both stats must lie in `1..=MAX_STAT`
    pub fn validate(&self) -> Result<(), DataError> {
        check_stat(&self.key, "health", self.health)?;
        check_stat(&self.key, "attack", self.attack)
    }
}

pub fn blue_slime() -> MonsterSpecies {
    MonsterSpecies::new("BLUE_SLIME", "Blue Slime", 5, 2, "blue-slime.webp")
}

pub fn spider() -> MonsterSpecies {
    MonsterSpecies::new("SPIDER", "Spider", 8, 2, "spider.webp")
}

pub fn green_slime() -> MonsterSpecies {
    MonsterSpecies::new("GREEN_SLIME", "Green Slime", 10, 3, "green-slime.webp")
}

pub fn rat() -> MonsterSpecies {
    MonsterSpecies::new("RAT", "Rat", 10, 3, "rat.webp")
}

pub fn goblin() -> MonsterSpecies {
    MonsterSpecies::new("GOBLIN", "Goblin", 20, 5, "goblin.webp")
}

pub fn slime_skull() -> MonsterSpecies {
    MonsterSpecies::new("SLIME_SKULL", "Slime Skull", 20, 5, "slime-skull.webp")
}

pub fn kobold() -> MonsterSpecies {
    MonsterSpecies::new("KOBOLD", "Kobold", 25, 5, "kobold.webp")
}

pub fn skeleton() -> MonsterSpecies {
    MonsterSpecies::new("SKELETON", "Skeleton", 30, 5, "skeleton.webp")
}

pub fn python() -> MonsterSpecies {
    MonsterSpecies::new("PYTHON", "Python", 30, 8, "python.webp")
}

pub fn tiger_spider() -> MonsterSpecies {
    MonsterSpecies::new("TIGER_SPIDER", "Tiger Spider", 30, 8, "tiger-spider.webp")
}

pub fn lizardman() -> MonsterSpecies {
    MonsterSpecies::new("LIZARDMAN", "Lizardman", 40, 10, "lizard-man.webp")
}

pub fn slime_zombie() -> MonsterSpecies {
    MonsterSpecies::new("SLIME_ZOMBIE", "Slime Zombie", 40, 10, "slime-zombie.webp")
}

pub fn giant_rat() -> MonsterSpecies {
    MonsterSpecies::new("GIANT_RAT", "Giant Rat", 50, 10, "giant-rat.webp")
}

pub fn mimic() -> MonsterSpecies {
    MonsterSpecies::new("MIMIC", "Mimic", 50, 12, "mimic.webp")
}

pub fn orc() -> MonsterSpecies {
    MonsterSpecies::new("ORC", "Orc", 60, 15, "orc.webp")
}

pub fn hobgoblin() -> MonsterSpecies {
    MonsterSpecies::new("HOBGOBLIN", "Hobgoblin", 80, 15, "hobgoblin.webp")
}

pub fn wererat() -> MonsterSpecies {
    MonsterSpecies::new("WERERAT", "Wererat", 80, 15, "were-rat.webp")
}

pub fn minotaur() -> MonsterSpecies {
    MonsterSpecies::new("MINOTAUR", "Minotaur", 150, 20, "minotaur.webp")
}

pub fn grim_reaper() -> MonsterSpecies {
    MonsterSpecies::new("GRIM_REAPER", "Grim Reaper", 150, 40, "grim-reaper.webp")
}

pub fn death_knight() -> MonsterSpecies {
    MonsterSpecies::new("DEATH_KNIGHT", "Death Knight", 250, 30, "death-knight.webp")
}

/// Every built-in species, weakest first
pub fn all_species() -> Vec<MonsterSpecies> {
    vec![
        blue_slime(),
        spider(),
        green_slime(),
        rat(),
        goblin(),
        slime_skull(),
        kobold(),
        skeleton(),
        python(),
        tiger_spider(),
        lizardman(),
        slime_zombie(),
        giant_rat(),
        mimic(),
        orc(),
        hobgoblin(),
        wererat(),
        minotaur(),
        grim_reaper(),
        death_knight(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_species_keys_unique() {
        let species = all_species();
        let keys: HashSet<_> = species.iter().map(|s| s.key.clone()).collect();
        assert_eq!(keys.len(), species.len());
    }

    #[test]
    fn test_species_valid() {
        for s in all_species() {
            assert!(s.validate().is_ok(), "{} invalid", s.key);
        }
        assert_eq!(giant_rat().health, 50);
        assert_eq!(grim_reaper().attack, 40);
    }

    #[test]
    fn test_validate_rejects_out_of_range_stats() {
        let weak = MonsterSpecies::new("WEAK", "Weak", 0, 3, "weak.webp");
        assert!(matches!(
            weak.validate(),
            Err(DataError::StatOutOfRange { stat: "health", value: 0, .. })
        ));

        let huge = MonsterSpecies::new("HUGE", "Huge", 10, u32::MAX, "huge.webp");
        assert!(matches!(
            huge.validate(),
            Err(DataError::StatOutOfRange { stat: "attack", .. })
        ));
    }
}
