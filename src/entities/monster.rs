//! Monsters placed in rooms

use serde::{Deserialize, Serialize};

use crate::data::MonsterSpecies;

/// A monster living in one room.
///
/// Always a copy of its species, so damage never touches the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterInstance {
    pub key: String,
    pub label: String,
    pub health: u32,
    pub max_health: u32,
    pub attack: u32,
    pub portrait: String,
    /// Set for the floor boss in the end room
    pub boss: bool,
}

impl MonsterInstance {
    pub fn from_species(species: &MonsterSpecies) -> Self {
        Self {
            key: species.key.clone(),
            label: species.label.clone(),
            health: species.health,
            max_health: species.health,
            attack: species.attack,
            portrait: species.portrait.clone(),
            boss: false,
        }
    }

    pub fn boss(species: &MonsterSpecies) -> Self {
        Self {
            boss: true,
            ..Self::from_species(species)
        }
    }

    /// Apply damage, clamping at zero. Returns the damage actually taken.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.health);
        self.health -= actual;
        actual
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::monsters::goblin;

    #[test]
    fn test_instance_is_independent_of_species() {
        let species = goblin();
        let mut a = MonsterInstance::from_species(&species);
        let b = MonsterInstance::from_species(&species);

        a.take_damage(5);
        assert_eq!(a.health, 15);
        assert_eq!(b.health, 20);
        assert_eq!(species.health, 20);
    }

    #[test]
    fn test_health_floor_is_zero() {
        let mut monster = MonsterInstance::from_species(&goblin());
        assert_eq!(monster.take_damage(100), 20);
        assert_eq!(monster.health, 0);
        assert!(monster.is_defeated());
    }

    #[test]
    fn test_boss_flag() {
        assert!(MonsterInstance::boss(&goblin()).boss);
        assert!(!MonsterInstance::from_species(&goblin()).boss);
    }
}
