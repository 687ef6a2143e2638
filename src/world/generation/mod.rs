//! Procedural floor generation
//!
//! Lays out rooms, retries until the floor is big enough, then populates it.

pub mod doors;
pub mod encounters;
pub mod rooms;

pub use doors::{generate_door, GenerationContext};
pub use encounters::{place_encounters, EncounterSummary};
pub use rooms::{build_room_graph, RoomGraph};

use rand::Rng;

use super::level::{ExitDoor, GenerationWarning, LevelResult};
use crate::data::{FloorCatalog, GenerationConfig, MAX_FLOOR};

/// Generates complete floors from a floor catalog
#[derive(Debug, Clone, Copy)]
pub struct LevelGenerator<'a> {
    catalog: &'a FloorCatalog,
    config: GenerationConfig,
}

impl<'a> LevelGenerator<'a> {
    pub fn new(catalog: &'a FloorCatalog, config: GenerationConfig) -> Self {
        Self { catalog, config }
    }

    /// Generate one floor, continuing from `prior_exit` when given
    pub fn generate(
        &self,
        floor_number: u32,
        prior_exit: Option<ExitDoor>,
        rng: &mut impl Rng,
    ) -> LevelResult {
        let floor_number = floor_number.clamp(1, MAX_FLOOR);
        let min_rooms = self.config.min_rooms;
        let max_attempts = self.config.max_attempts.max(1);

        let mut best = build_room_graph(floor_number, prior_exit, rng);
        let mut attempts = 1;

        while attempts < max_attempts && !best.is_acceptable(min_rooms) {
            log::debug!(
                "floor {} attempt {}: {} rooms, end connected: {}",
                floor_number,
                attempts,
                best.room_count(),
                best.end_connected()
            );
            let candidate = build_room_graph(floor_number, prior_exit, rng);
            attempts += 1;
            if candidate.score() > best.score() {
                best = candidate;
            }
        }

        let mut warnings = Vec::new();
        if best.room_count() <= min_rooms {
            warnings.push(GenerationWarning::TooFewRooms {
                rooms: best.room_count(),
                minimum: min_rooms,
            });
        }
        if !best.end_connected() {
            warnings.push(GenerationWarning::EndRoomDisconnected);
        }
        for warning in &warnings {
            log::warn!("Floor {} after {} attempts: {}", floor_number, attempts, warning);
        }

        let floor = self.catalog.get_floor_data(floor_number);
        let mut rooms = best.rooms;
        let summary = place_encounters(&mut rooms, floor, &self.config, rng);

        log::info!(
            "Generated floor {} with {} rooms ({} encounters, {} items) in {} attempt(s)",
            floor_number,
            rooms.iter().filter(|r| r.is_room).count(),
            summary.monsters,
            summary.items,
            attempts
        );

        LevelResult {
            room_start: best.start,
            room_end: best.end,
            floor_number,
            rooms,
            warnings,
            attempts,
        }
    }
}

/// Generate a floor from the built-in catalog and default settings
pub fn generate_level(
    floor_number: u32,
    prior_exit: Option<ExitDoor>,
    rng: &mut impl Rng,
) -> LevelResult {
    LevelGenerator::new(FloorCatalog::builtin(), GenerationConfig::default())
        .generate(floor_number, prior_exit, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::grid::{self, Direction};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_floors_are_connected_and_reciprocal() {
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let level = generate_level(1 + (seed % 30) as u32, None, &mut rng);

            assert_eq!(level.rooms.len(), grid::BLOCK_COUNT);
            assert!(level.one_way_doors().is_empty(), "seed {}", seed);
            if !level.warnings.contains(&GenerationWarning::EndRoomDisconnected) {
                assert!(level.is_fully_connected(), "seed {}", seed);
            }
        }
    }

    #[test]
    fn test_room_count_floor_holds_or_is_flagged() {
        let mut below = 0;
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let level = generate_level(3, None, &mut rng);
            if level.room_count() <= 10 {
                below += 1;
                assert!(
                    level.warnings.iter().any(|w| matches!(w, GenerationWarning::TooFewRooms { .. })),
                    "seed {} returned a small floor without a warning",
                    seed
                );
                assert_eq!(level.attempts, 20);
            }
        }
        assert!(below < 20, "{} of 200 floors were undersized", below);
    }

    #[test]
    fn test_start_end_disjoint() {
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let level = generate_level(8, None, &mut rng);
            assert_ne!(level.room_start.index, level.room_end.index);
            assert!(!grid::is_adjacent(level.room_start.index, level.room_end.index));
        }
    }

    #[test]
    fn test_same_seed_same_floor() {
        let a = generate_level(6, None, &mut StdRng::seed_from_u64(77));
        let b = generate_level(6, None, &mut StdRng::seed_from_u64(77));
        assert_eq!(a, b);
    }

    #[test]
    fn test_floors_chain_through_exit() {
        let mut rng = StdRng::seed_from_u64(21);
        let first = generate_level(1, None, &mut rng);
        let exit = first.exit().unwrap();

        let second = generate_level(2, Some(exit), &mut rng);
        assert_eq!(second.room_start.index, exit.index());
        assert_eq!(second.room_start.level_door, Some(exit.direction()));
        assert!(second.start_room().doors.is_open(exit.direction()));
    }

    #[test]
    fn test_floor_number_is_clamped() {
        let mut rng = StdRng::seed_from_u64(1);
        let level = generate_level(45, None, &mut rng);
        assert_eq!(level.floor_number, MAX_FLOOR);
        assert_eq!(level.room_end.level_door, None);

        let level = generate_level(0, None, &mut rng);
        assert_eq!(level.floor_number, 1);
        assert!(level.room_end.level_door.is_some());
    }

    #[test]
    fn test_encounters_follow_the_catalog() {
        let catalog = FloorCatalog::builtin();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let level = generate_level(10, None, &mut rng);
            let floor = catalog.get_floor_data(10);

            let boss = level.end_room().monster.as_ref().unwrap();
            assert_eq!(boss.key, floor.boss.key);

            let items = level.rooms.iter().filter(|r| r.item.is_some()).count();
            assert!(items <= floor.items.len());

            for room in level.rooms.iter().filter(|r| r.monster.is_some() && !r.end_room) {
                let key = &room.monster.as_ref().unwrap().key;
                assert!(floor.monsters.iter().any(|s| &s.key == key));
                assert!(!room.start_room);
            }
        }
    }

    #[test]
    fn test_tiny_threshold_accepts_first_attempt() {
        let config = GenerationConfig { min_rooms: 0, ..Default::default() };
        let generator = LevelGenerator::new(FloorCatalog::builtin(), config);
        for seed in 0..30 {
            let level = generator.generate(2, None, &mut StdRng::seed_from_u64(seed));
            if level.warnings.is_empty() {
                assert!(level.attempts >= 1);
            }
            if level.attempts == 1 {
                assert!(level.warnings.is_empty());
            }
        }
    }

    #[test]
    fn test_impossible_threshold_degrades_with_warning() {
        let config = GenerationConfig { min_rooms: 16, max_attempts: 3, ..Default::default() };
        let generator = LevelGenerator::new(FloorCatalog::builtin(), config);
        let level = generator.generate(2, ExitDoor::new(0, Direction::N), &mut StdRng::seed_from_u64(5));

        assert_eq!(level.attempts, 3);
        assert!(level.warnings.contains(&GenerationWarning::TooFewRooms {
            rooms: level.room_count(),
            minimum: 16
        }));
        assert!(level.room_count() >= 2);
    }
}
