//! Generated floor layout
//!
//! The output of level generation, consumed by the game session and the
//! presentation layer.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::grid::{self, Direction, BLOCK_COUNT};
use super::room::Room;

/// Start or end room of a floor and its door to another floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomMarker {
    pub index: usize,
    pub level_door: Option<Direction>,
}

/// Where the player left the previous floor.
///
/// Only a perimeter block with one of its outer walls is a valid exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitDoor {
    index: usize,
    direction: Direction,
}

impl ExitDoor {
    pub fn new(index: usize, direction: Direction) -> Option<Self> {
        let walls = grid::perimeter_walls(index)?;
        walls
            .contains(&direction)
            .then_some(Self { index, direction })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// Non-fatal problems found while generating a floor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationWarning {
    /// Attempts ran out before the floor reached the minimum room count
    TooFewRooms { rooms: usize, minimum: usize },
    /// The end room's only internal door does not lead to a room
    EndRoomDisconnected,
}

impl std::fmt::Display for GenerationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationWarning::TooFewRooms { rooms, minimum } => {
                write!(f, "floor has {} rooms, wanted more than {}", rooms, minimum)
            }
            GenerationWarning::EndRoomDisconnected => write!(f, "end room is not connected"),
        }
    }
}

/// A fully generated floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelResult {
    pub room_start: RoomMarker,
    pub room_end: RoomMarker,
    pub floor_number: u32,
    /// All 16 blocks, indexed by block index
    pub rooms: Vec<Room>,
    pub warnings: Vec<GenerationWarning>,
    /// Number of generation attempts it took
    pub attempts: u32,
}

impl LevelResult {
    pub fn room(&self, index: usize) -> Option<&Room> {
        self.rooms.get(index)
    }

    pub fn room_mut(&mut self, index: usize) -> Option<&mut Room> {
        self.rooms.get_mut(index)
    }

    pub fn start_room(&self) -> &Room {
        &self.rooms[self.room_start.index]
    }

    pub fn end_room(&self) -> &Room {
        &self.rooms[self.room_end.index]
    }

    pub fn room_count(&self) -> usize {
        self.rooms.iter().filter(|r| r.is_room).count()
    }

    /// The door the player takes to reach the next floor, if there is one
    pub fn exit(&self) -> Option<ExitDoor> {
        self.room_end
            .level_door
            .and_then(|d| ExitDoor::new(self.room_end.index, d))
    }

    /// Index of the room behind an open internal door
    pub fn room_through(&self, index: usize, direction: Direction) -> Option<usize> {
        let room = self.room(index)?;
        if !room.is_room || !room.doors.is_open(direction) {
            return None;
        }
        let next = grid::neighbor(index, direction)?;
        self.room(next).filter(|r| r.is_room).map(|r| r.index)
    }

    /// Rooms reachable from `from` through mutually open doors
    pub fn reachable_from(&self, from: usize) -> Vec<bool> {
        let mut seen = vec![false; BLOCK_COUNT];
        if self.room(from).map_or(true, |r| !r.is_room) {
            return seen;
        }

        let mut queue = VecDeque::from([from]);
        seen[from] = true;

        while let Some(current) = queue.pop_front() {
            for adj in grid::adjacent_blocks(current) {
                if seen[adj.index] || !self.rooms[current].doors.is_open(adj.direction) {
                    continue;
                }
                let other = &self.rooms[adj.index];
                let back = grid::direction_between(adj.index, current);
                if other.is_room && back.is_some_and(|d| other.doors.is_open(d)) {
                    seen[adj.index] = true;
                    queue.push_back(adj.index);
                }
            }
        }

        seen
    }

    /// True when every room can be reached from the start room
    pub fn is_fully_connected(&self) -> bool {
        let reachable = self.reachable_from(self.room_start.index);
        self.rooms
            .iter()
            .all(|r| !r.is_room || reachable[r.index])
    }

    /// Internal doors whose neighbor does not open back, as (room, direction)
    pub fn one_way_doors(&self) -> Vec<(usize, Direction)> {
        let mut found = Vec::new();
        for room in self.rooms.iter().filter(|r| r.is_room) {
            for adj in grid::adjacent_blocks(room.index) {
                if !room.doors.is_open(adj.direction) {
                    continue;
                }
                let other = &self.rooms[adj.index];
                let back = grid::direction_between(adj.index, room.index);
                if !other.is_room || !back.is_some_and(|d| other.doors.is_open(d)) {
                    found.push((room.index, adj.direction));
                }
            }
        }
        found
    }
}
