//! Per-floor content table
//!
//! Thirty hand-tuned floors: which monsters roam them, which items can be
//! found and which boss guards the way down.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::items::Item;
use super::loader::DataError;
use super::monsters::{self as m, MonsterSpecies};

/// Deepest floor of the dungeon
pub const MAX_FLOOR: u32 = 30;

/// Content of a single floor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorData {
    /// Floor number, 1-based
    pub index: u32,
    /// Item pool; placement pops from the back
    pub items: Vec<Item>,
    pub monsters: Vec<MonsterSpecies>,
    pub boss: MonsterSpecies,
}

/// The full floor table.
///
/// Only built through [`FloorCatalog::new`], deserialization, or the built-in
/// table, so it always holds a validated set of floors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CatalogFile", into = "CatalogFile")]
pub struct FloorCatalog {
    floors: Vec<FloorData>,
}

/// On-disk shape of `floors.ron`
#[derive(Serialize, Deserialize)]
struct CatalogFile {
    floors: Vec<FloorData>,
}

impl TryFrom<CatalogFile> for FloorCatalog {
    type Error = DataError;

    fn try_from(file: CatalogFile) -> Result<Self, Self::Error> {
        FloorCatalog::new(file.floors)
    }
}

impl From<FloorCatalog> for CatalogFile {
    fn from(catalog: FloorCatalog) -> Self {
        CatalogFile { floors: catalog.floors }
    }
}

impl FloorCatalog {
    /// Validated catalog from a list of floors
    pub fn new(floors: Vec<FloorData>) -> Result<Self, DataError> {
        let catalog = Self { floors };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn floors(&self) -> &[FloorData] {
        &self.floors
    }

    /// Shared copy of the built-in table
    pub fn builtin() -> &'static FloorCatalog {
        static BUILTIN: OnceLock<FloorCatalog> = OnceLock::new();
        BUILTIN.get_or_init(default_floor_catalog)
    }

    /// Floor entry for a floor number, clamped into the table's range
    pub fn get_floor_data(&self, floor_number: u32) -> &FloorData {
        let last = self.floors.len().max(1) as u32;
        let clamped = floor_number.clamp(1, last);
        &self.floors[(clamped - 1) as usize]
    }

    pub fn len(&self) -> usize {
        self.floors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    /// Check the table is complete and every entry is sane
    pub fn validate(&self) -> Result<(), DataError> {
        if self.floors.is_empty() {
            return Err(DataError::EmptyCatalog);
        }
        if self.floors.len() != MAX_FLOOR as usize {
            return Err(DataError::FloorCount {
                expected: MAX_FLOOR as usize,
                found: self.floors.len(),
            });
        }

        for (position, floor) in self.floors.iter().enumerate() {
            let expected = position as u32 + 1;
            if floor.index != expected {
                return Err(DataError::FloorIndex { expected, found: floor.index });
            }

            for species in floor.monsters.iter().chain(std::iter::once(&floor.boss)) {
                species.validate().map_err(|e| DataError::InvalidEntry {
                    floor: floor.index,
                    source: Box::new(e),
                })?;
            }

            for item in &floor.items {
                item.validate().map_err(|e| DataError::InvalidEntry {
                    floor: floor.index,
                    source: Box::new(e),
                })?;
            }
        }

        Ok(())
    }
}

/// Floor entry from the built-in table
pub fn get_floor_data(floor_number: u32) -> &'static FloorData {
    FloorCatalog::builtin().get_floor_data(floor_number)
}

fn floor(index: u32, items: Vec<Item>, monsters: Vec<MonsterSpecies>, boss: MonsterSpecies) -> FloorData {
    FloorData { index, items, monsters, boss }
}

/// Item pool for a floor. The key goes last so it is always the first item placed.
fn pool(potions: usize, chests: &[u32]) -> Vec<Item> {
    let mut items: Vec<Item> = (0..potions).map(|_| Item::health_potion()).collect();
    items.extend(chests.iter().map(|gold| Item::treasure_chest(*gold)));
    items.push(Item::key());
    items
}

/// Built-in floor table
pub fn default_floor_catalog() -> FloorCatalog {
    FloorCatalog {
        floors: vec![
            // === Floors 1-5: slimes and vermin ===
            floor(1, pool(1, &[10]), vec![m::blue_slime(), m::spider()], m::green_slime()),
            floor(2, pool(1, &[10]), vec![m::blue_slime(), m::spider(), m::rat()], m::goblin()),
            floor(3, pool(1, &[15]), vec![m::spider(), m::rat(), m::green_slime()], m::kobold()),
            floor(4, pool(1, &[15]), vec![m::rat(), m::green_slime(), m::goblin()], m::slime_skull()),
            floor(5, pool(1, &[20]), vec![m::green_slime(), m::goblin(), m::slime_skull()], m::skeleton()),

            // === Floors 6-10: goblinoids and the undead ===
            floor(6, pool(1, &[25]), vec![m::goblin(), m::kobold(), m::slime_skull()], m::python()),
            floor(7, pool(1, &[25]), vec![m::goblin(), m::kobold(), m::skeleton()], m::tiger_spider()),
            floor(8, pool(1, &[30]), vec![m::kobold(), m::skeleton(), m::python()], m::lizardman()),
            floor(9, pool(1, &[30]), vec![m::skeleton(), m::python(), m::tiger_spider()], m::slime_zombie()),
            floor(10, pool(1, &[40]), vec![m::python(), m::tiger_spider(), m::lizardman()], m::giant_rat()),

            // === Floors 11-15: swamp dwellers ===
            floor(11, pool(2, &[40]), vec![m::kobold(), m::lizardman(), m::slime_zombie()], m::mimic()),
            floor(12, pool(2, &[45]), vec![m::skeleton(), m::slime_zombie(), m::lizardman()], m::orc()),
            floor(13, pool(2, &[45]), vec![m::tiger_spider(), m::giant_rat(), m::lizardman()], m::mimic()),
            floor(14, pool(2, &[50]), vec![m::giant_rat(), m::slime_zombie(), m::mimic()], m::orc()),
            floor(15, pool(2, &[60]), vec![m::lizardman(), m::giant_rat(), m::mimic()], m::hobgoblin()),

            // === Floors 16-20: warbands ===
            floor(16, pool(2, &[60]), vec![m::giant_rat(), m::mimic(), m::orc()], m::wererat()),
            floor(17, pool(2, &[65]), vec![m::mimic(), m::orc(), m::slime_zombie()], m::hobgoblin()),
            floor(18, pool(2, &[70]), vec![m::orc(), m::mimic(), m::giant_rat()], m::wererat()),
            floor(19, pool(2, &[75]), vec![m::orc(), m::hobgoblin(), m::mimic()], m::minotaur()),
            floor(20, pool(2, &[80]), vec![m::orc(), m::hobgoblin(), m::wererat()], m::minotaur()),

            // === Floors 21-25: the labyrinth ===
            floor(21, pool(2, &[50, 50]), vec![m::hobgoblin(), m::wererat(), m::orc()], m::minotaur()),
            floor(22, pool(2, &[55, 55]), vec![m::hobgoblin(), m::wererat(), m::mimic()], m::grim_reaper()),
            floor(23, pool(2, &[60, 60]), vec![m::wererat(), m::hobgoblin(), m::orc()], m::minotaur()),
            floor(24, pool(2, &[65, 65]), vec![m::wererat(), m::hobgoblin(), m::minotaur()], m::grim_reaper()),
            floor(25, pool(2, &[70, 70]), vec![m::hobgoblin(), m::wererat(), m::minotaur()], m::death_knight()),

            // === Floors 26-30: the deep ===
            floor(26, pool(2, &[75, 75]), vec![m::minotaur(), m::wererat(), m::orc()], m::grim_reaper()),
            floor(27, pool(2, &[80, 80]), vec![m::minotaur(), m::hobgoblin(), m::wererat()], m::death_knight()),
            floor(28, pool(2, &[90, 90]), vec![m::minotaur(), m::grim_reaper(), m::wererat()], m::death_knight()),
            floor(29, pool(2, &[100, 100]), vec![m::minotaur(), m::grim_reaper(), m::hobgoblin()], m::death_knight()),
            floor(30, pool(2, &[150, 150]), vec![m::grim_reaper(), m::minotaur(), m::death_knight()], m::death_knight()),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ItemKind;

    #[test]
    fn test_builtin_catalog_is_valid() {
        assert!(default_floor_catalog().validate().is_ok());
        assert_eq!(FloorCatalog::builtin().len(), MAX_FLOOR as usize);
    }

    #[test]
    fn test_floor_clamp() {
        assert_eq!(get_floor_data(45), get_floor_data(30));
        assert_eq!(get_floor_data(0), get_floor_data(1));
        assert_eq!(get_floor_data(7).index, 7);
    }

    #[test]
    fn test_key_is_last_in_every_pool() {
        for floor in FloorCatalog::builtin().floors() {
            assert_eq!(floor.items.last().map(|i| i.kind), Some(ItemKind::Key), "floor {}", floor.index);
            let keys = floor.items.iter().filter(|i| i.kind == ItemKind::Key).count();
            assert_eq!(keys, 1);
        }
    }

    #[test]
    fn test_validate_rejects_short_table() {
        let mut catalog = default_floor_catalog();
        catalog.floors.pop();
        assert!(matches!(catalog.validate(), Err(DataError::FloorCount { expected: 30, found: 29 })));
    }

    #[test]
    fn test_validate_rejects_misnumbered_floor() {
        let mut catalog = default_floor_catalog();
        catalog.floors[4].index = 9;
        assert!(matches!(catalog.validate(), Err(DataError::FloorIndex { expected: 5, found: 9 })));
    }

    #[test]
    fn test_empty_catalog_cannot_be_built() {
        assert!(matches!(FloorCatalog::new(Vec::new()), Err(DataError::EmptyCatalog)));
        assert!(ron::from_str::<FloorCatalog>("(floors: [])").is_err());
    }

    #[test]
    fn test_new_accepts_builtin_floors() {
        let catalog = FloorCatalog::new(default_floor_catalog().floors().to_vec()).unwrap();
        assert_eq!(catalog.get_floor_data(30).index, 30);
    }

    #[test]
    fn test_bad_species_names_its_floor() {
        let mut catalog = default_floor_catalog();
        catalog.floors[2].boss.attack = 0;
        match catalog.validate() {
            Err(DataError::InvalidEntry { floor, source }) => {
                assert_eq!(floor, 3);
                assert!(matches!(*source, DataError::StatOutOfRange { stat: "attack", .. }));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_validate_allows_empty_pools() {
        let mut catalog = default_floor_catalog();
        catalog.floors[0].items.clear();
        catalog.floors[0].monsters.clear();
        assert!(catalog.validate().is_ok());
    }
}
