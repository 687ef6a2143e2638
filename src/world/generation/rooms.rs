//! Room graph construction
//!
//! One attempt at laying out a floor: pick the start and end rooms on the
//! border, then grow rooms breadth-first from the doors they open. A block
//! only becomes a room when an existing room already has a door into it,
//! so everything built this way is reachable from where it grew.

use rand::seq::SliceRandom;
use rand::Rng;

use super::doors::{generate_door, GenerationContext};
use crate::data::MAX_FLOOR;
use crate::world::grid::{self, PERIMETER_ROOMS};
use crate::world::level::{ExitDoor, RoomMarker};
use crate::world::room::Room;

/// Result of one layout attempt
#[derive(Debug, Clone)]
pub struct RoomGraph {
    pub rooms: Vec<Room>,
    pub start: RoomMarker,
    pub end: RoomMarker,
}

impl RoomGraph {
    pub fn room_count(&self) -> usize {
        self.rooms.iter().filter(|r| r.is_room).count()
    }

    /// True when the end room's internal door leads into a room that opens back
    pub fn end_connected(&self) -> bool {
        let end = &self.rooms[self.end.index];
        grid::adjacent_blocks(self.end.index).iter().any(|adj| {
            let other = &self.rooms[adj.index];
            end.doors.is_open(adj.direction)
                && other.is_room
                && grid::direction_between(adj.index, self.end.index)
                    .is_some_and(|back| other.doors.is_open(back))
        })
    }

    /// Ranking between attempts: connected floors first, then bigger ones
    pub fn score(&self) -> (bool, usize) {
        (self.end_connected(), self.room_count())
    }

    pub fn is_acceptable(&self, min_rooms: usize) -> bool {
        self.room_count() > min_rooms && self.end_connected()
    }
}

/// Build one floor layout
pub fn build_room_graph(
    floor_number: u32,
    prior_exit: Option<ExitDoor>,
    rng: &mut impl Rng,
) -> RoomGraph {
    let mut ctx = GenerationContext::new();

    let start_index = select_start(prior_exit, rng);
    let end_index = select_end(start_index, rng);
    log::debug!("start room {}, end room {}", start_index, end_index);

    let entry_door = create_start_room(&mut ctx, start_index, prior_exit, rng);
    let exit_door = create_end_room(&mut ctx, end_index, floor_number, rng);

    while let Some(index) = ctx.queue.pop_front() {
        if ctx.visited[index] {
            continue;
        }
        ctx.visited[index] = true;
        create_room(&mut ctx, index, rng);
    }

    seal_dangling_doors(&mut ctx.rooms);

    RoomGraph {
        rooms: ctx.rooms,
        start: RoomMarker { index: start_index, level_door: entry_door },
        end: RoomMarker { index: end_index, level_door: exit_door },
    }
}

fn random_perimeter_index(rng: &mut impl Rng) -> usize {
    PERIMETER_ROOMS[rng.gen_range(0..PERIMETER_ROOMS.len())].index
}

/// Continue from the previous floor's exit, or start anywhere on the border
fn select_start(prior_exit: Option<ExitDoor>, rng: &mut impl Rng) -> usize {
    match prior_exit {
        Some(exit) => exit.index(),
        None => random_perimeter_index(rng),
    }
}

/// Any border block that is neither the start nor one of its neighbors
fn select_end(start_index: usize, rng: &mut impl Rng) -> usize {
    loop {
        let candidate = random_perimeter_index(rng);
        if candidate != start_index && !grid::is_adjacent(start_index, candidate) {
            return candidate;
        }
    }
}

fn create_start_room(
    ctx: &mut GenerationContext,
    index: usize,
    prior_exit: Option<ExitDoor>,
    rng: &mut impl Rng,
) -> Option<grid::Direction> {
    ctx.visited[index] = true;

    let room = &mut ctx.rooms[index];
    room.promote();
    room.start_room = true;

    if let Some(exit) = prior_exit {
        room.doors.open(exit.direction());
        room.entry_door = Some(exit.direction());
    }
    let entry_door = room.entry_door;

    generate_door(ctx, index, true, rng);
    entry_door
}

fn create_end_room(
    ctx: &mut GenerationContext,
    index: usize,
    floor_number: u32,
    rng: &mut impl Rng,
) -> Option<grid::Direction> {
    ctx.visited[index] = true;

    let room = &mut ctx.rooms[index];
    room.promote();
    room.end_room = true;
    room.locked = true;

    // The last floor has nowhere further down to go
    if floor_number < MAX_FLOOR {
        if let Some(wall) = grid::perimeter_walls(index).and_then(|walls| walls.choose(rng)) {
            room.doors.open(*wall);
            room.exit_door = Some(*wall);
        }
    }
    let exit_door = room.exit_door;

    // The neighbor is found by the walk, never pulled in from here
    generate_door(ctx, index, false, rng);
    exit_door
}

/// Promote a block if any neighboring room has a door into it, then branch out
fn create_room(ctx: &mut GenerationContext, index: usize, rng: &mut impl Rng) {
    for adj in grid::adjacent_blocks(index) {
        let neighbor = &ctx.rooms[adj.index];
        if !neighbor.is_room {
            continue;
        }
        let door_back = grid::direction_between(adj.index, index)
            .is_some_and(|back| neighbor.doors.is_open(back));

        if door_back {
            let room = &mut ctx.rooms[index];
            room.promote();
            room.doors.open(adj.direction);
        }
    }

    if !ctx.rooms[index].is_room {
        return;
    }

    let available = ctx.door_candidates(index).len();
    if available == 0 {
        return;
    }
    let door_count = rng.gen_range(1..=available);
    for _ in 0..door_count {
        generate_door(ctx, index, true, rng);
    }
}

/// Close internal doors that lead to a block that never became a room
fn seal_dangling_doors(rooms: &mut [Room]) {
    for index in 0..rooms.len() {
        if !rooms[index].is_room {
            continue;
        }
        for adj in grid::adjacent_blocks(index) {
            if rooms[index].doors.is_open(adj.direction) && !rooms[adj.index].is_room {
                log::debug!("sealing door {:?} of room {}", adj.direction, index);
                rooms[index].doors.close(adj.direction);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::grid::Direction;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn as_level(graph: &RoomGraph) -> crate::world::LevelResult {
        crate::world::LevelResult {
            room_start: graph.start,
            room_end: graph.end,
            floor_number: 1,
            rooms: graph.rooms.clone(),
            warnings: Vec::new(),
            attempts: 1,
        }
    }

    #[test]
    fn test_start_and_end_are_apart() {
        for seed in 0..300 {
            let mut rng = StdRng::seed_from_u64(seed);
            let graph = build_room_graph(1, None, &mut rng);
            assert_ne!(graph.start.index, graph.end.index);
            assert!(!grid::is_adjacent(graph.start.index, graph.end.index), "seed {}", seed);
            assert!(grid::perimeter_walls(graph.start.index).is_some());
            assert!(grid::perimeter_walls(graph.end.index).is_some());
        }
    }

    #[test]
    fn test_every_attempt_is_reachable_and_reciprocal() {
        for seed in 0..300 {
            let mut rng = StdRng::seed_from_u64(seed);
            let graph = build_room_graph(4, None, &mut rng);
            let level = as_level(&graph);

            assert!(level.one_way_doors().is_empty(), "seed {}", seed);

            let reachable = level.reachable_from(graph.start.index);
            for room in graph.rooms.iter().filter(|r| r.is_room && !r.end_room) {
                assert!(reachable[room.index], "seed {} room {} unreachable", seed, room.index);
            }
            assert_eq!(reachable[graph.end.index], graph.end_connected(), "seed {}", seed);
        }
    }

    #[test]
    fn test_prior_exit_becomes_entry() {
        let exit = ExitDoor::new(12, Direction::S).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let graph = build_room_graph(2, Some(exit), &mut rng);

        assert_eq!(graph.start.index, 12);
        assert_eq!(graph.start.level_door, Some(Direction::S));

        let start = &graph.rooms[12];
        assert!(start.start_room);
        assert!(start.doors.is_open(Direction::S));
        assert_eq!(start.entry_door, Some(Direction::S));
        assert_eq!(start.exit_door, None);
    }

    #[test]
    fn test_end_room_exit_on_outer_wall() {
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let graph = build_room_graph(5, None, &mut rng);
            let end = &graph.rooms[graph.end.index];

            assert!(end.end_room && end.locked);
            let exit = end.exit_door.unwrap();
            assert!(grid::perimeter_walls(end.index).unwrap().contains(&exit));
            assert!(end.doors.is_open(exit));
            assert_eq!(graph.end.level_door, Some(exit));
        }
    }

    #[test]
    fn test_last_floor_has_no_exit() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let graph = build_room_graph(MAX_FLOOR, None, &mut rng);
            assert_eq!(graph.end.level_door, None);
            assert_eq!(graph.rooms[graph.end.index].exit_door, None);
        }
    }

    #[test]
    fn test_first_floor_has_no_entry() {
        let mut rng = StdRng::seed_from_u64(2);
        let graph = build_room_graph(1, None, &mut rng);
        assert_eq!(graph.start.level_door, None);
        assert_eq!(graph.rooms[graph.start.index].entry_door, None);
    }

    #[test]
    fn test_no_door_into_the_start_room_from_outside_its_own() {
        // The start room opens exactly one internal door; no other room may add one
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let graph = build_room_graph(3, None, &mut rng);
            let start = &graph.rooms[graph.start.index];
            let internal = grid::adjacent_blocks(start.index)
                .iter()
                .filter(|a| start.doors.is_open(a.direction))
                .count();
            assert_eq!(internal, 1, "seed {}", seed);
        }
    }
}
