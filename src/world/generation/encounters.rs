//! Monster, item and boss placement

use rand::seq::SliceRandom;
use rand::Rng;

use crate::data::{FloorData, GenerationConfig};
use crate::entities::MonsterInstance;
use crate::world::room::Room;

/// What placement put on a floor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncounterSummary {
    /// Rooms picked for an encounter
    pub rooms: usize,
    pub monsters: usize,
    pub items: usize,
}

/// Populate a finished room layout.
///
/// A random handful of ordinary rooms each get a copy of a random floor
/// monster and the next item off the floor's pool; the end room gets the boss.
pub fn place_encounters(
    rooms: &mut [Room],
    floor: &FloorData,
    config: &GenerationConfig,
    rng: &mut impl Rng,
) -> EncounterSummary {
    let mut candidates: Vec<usize> = rooms
        .iter()
        .filter(|r| r.is_room && !r.start_room && !r.end_room)
        .map(|r| r.index)
        .collect();
    candidates.shuffle(rng);

    let wanted = rng.gen_range(config.min_encounters..=config.max_encounters.max(config.min_encounters));
    let selected = wanted.min(candidates.len());

    let mut item_pool = floor.items.clone();
    let mut summary = EncounterSummary {
        rooms: selected,
        ..Default::default()
    };

    for &index in candidates.iter().take(selected) {
        let room = &mut rooms[index];

        if let Some(species) = floor.monsters.choose(rng) {
            room.monster = Some(MonsterInstance::from_species(species));
            summary.monsters += 1;
        }

        if let Some(item) = item_pool.pop() {
            room.item = Some(item);
            summary.items += 1;
        }
    }

    if let Some(end) = rooms.iter_mut().find(|r| r.end_room) {
        end.monster = Some(MonsterInstance::boss(&floor.boss));
    }

    if !item_pool.is_empty() {
        log::debug!("floor {}: {} items left unplaced", floor.index, item_pool.len());
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{get_floor_data, Item, ItemKind};
    use crate::data::monsters::{goblin, rat};
    use crate::world::grid::BLOCK_COUNT;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Blocks 0..12 are rooms; 0 is the start and 3 the end
    fn layout() -> Vec<Room> {
        let mut rooms: Vec<Room> = (0..BLOCK_COUNT).map(Room::new).collect();
        for room in rooms.iter_mut().take(12) {
            room.promote();
        }
        rooms[0].start_room = true;
        rooms[3].end_room = true;
        rooms
    }

    fn floor_with(items: Vec<Item>, monsters: Vec<crate::data::MonsterSpecies>) -> FloorData {
        FloorData { index: 1, items, monsters, boss: goblin() }
    }

    #[test]
    fn test_single_item_is_placed_once() {
        let config = GenerationConfig { min_encounters: 5, max_encounters: 5, ..Default::default() };
        let floor = floor_with(vec![Item::key()], vec![rat()]);

        let mut rooms = layout();
        let mut rng = StdRng::seed_from_u64(1);
        let summary = place_encounters(&mut rooms, &floor, &config, &mut rng);

        assert_eq!(summary.rooms, 5);
        assert_eq!(rooms.iter().filter(|r| r.item.is_some()).count(), 1);
        assert_eq!(rooms.iter().filter(|r| !r.end_room && r.monster.is_some()).count(), 5);
        assert_eq!(floor.items.len(), 1, "catalog pool must not be consumed");
    }

    #[test]
    fn test_items_never_exceed_pool() {
        let floor = get_floor_data(12);
        for seed in 0..100 {
            let mut rooms = layout();
            let mut rng = StdRng::seed_from_u64(seed);
            let summary = place_encounters(&mut rooms, floor, &GenerationConfig::default(), &mut rng);

            assert!((3..=5).contains(&summary.rooms));
            assert!(summary.items <= floor.items.len());
            assert_eq!(summary.items, summary.rooms.min(floor.items.len()));
            // Key sits at the back of the pool, so it is always placed
            assert_eq!(rooms.iter().filter(|r| r.item.as_ref().is_some_and(|i| i.kind == ItemKind::Key)).count(), 1);
        }
    }

    #[test]
    fn test_start_and_end_never_selected() {
        for seed in 0..100 {
            let mut rooms = layout();
            let mut rng = StdRng::seed_from_u64(seed);
            place_encounters(&mut rooms, get_floor_data(3), &GenerationConfig::default(), &mut rng);

            assert!(rooms[0].monster.is_none() && rooms[0].item.is_none());
            assert!(rooms[3].item.is_none());
            assert!(rooms.iter().skip(12).all(|r| !r.has_encounter()));
        }
    }

    #[test]
    fn test_boss_in_end_room() {
        let mut rooms = layout();
        let mut rng = StdRng::seed_from_u64(4);
        let floor = get_floor_data(30);
        place_encounters(&mut rooms, floor, &GenerationConfig::default(), &mut rng);

        let boss = rooms[3].monster.as_ref().unwrap();
        assert!(boss.boss);
        assert_eq!(boss.key, floor.boss.key);
        assert_eq!(boss.health, floor.boss.health);
    }

    #[test]
    fn test_empty_pools_are_skipped() {
        let floor = floor_with(Vec::new(), Vec::new());
        let mut rooms = layout();
        let mut rng = StdRng::seed_from_u64(8);
        let summary = place_encounters(&mut rooms, &floor, &GenerationConfig::default(), &mut rng);

        assert_eq!(summary.monsters, 0);
        assert_eq!(summary.items, 0);
        assert!(rooms[3].monster.is_some());
    }

    #[test]
    fn test_small_floors_take_what_exists() {
        let mut rooms: Vec<Room> = (0..BLOCK_COUNT).map(Room::new).collect();
        for i in [0, 1, 2] {
            rooms[i].promote();
        }
        rooms[0].start_room = true;
        rooms[2].end_room = true;

        let mut rng = StdRng::seed_from_u64(0);
        let summary = place_encounters(&mut rooms, get_floor_data(1), &GenerationConfig::default(), &mut rng);
        assert_eq!(summary.rooms, 1);
        assert!(rooms[1].monster.is_some());
    }
}
