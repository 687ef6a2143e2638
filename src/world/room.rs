//! Rooms and doors
//!
//! A room is a grid block that generation promoted into a traversable space.

use serde::{Deserialize, Serialize};

use super::grid::Direction;
use crate::data::Item;
use crate::entities::MonsterInstance;

/// Open/closed state of the four doors of a room
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doors {
    pub n: bool,
    pub e: bool,
    pub s: bool,
    pub w: bool,
}

impl Doors {
    pub fn is_open(&self, direction: Direction) -> bool {
        match direction {
            Direction::N => self.n,
            Direction::E => self.e,
            Direction::S => self.s,
            Direction::W => self.w,
        }
    }

    pub fn set(&mut self, direction: Direction, open: bool) {
        match direction {
            Direction::N => self.n = open,
            Direction::E => self.e = open,
            Direction::S => self.s = open,
            Direction::W => self.w = open,
        }
    }

    pub fn open(&mut self, direction: Direction) {
        self.set(direction, true);
    }

    pub fn close(&mut self, direction: Direction) {
        self.set(direction, false);
    }

    /// Directions with an open door, in N, E, S, W order
    pub fn open_directions(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| self.is_open(*d))
            .collect()
    }

    pub fn count(&self) -> usize {
        Direction::ALL.iter().filter(|d| self.is_open(**d)).count()
    }
}

/// One grid block of a floor, possibly promoted to a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub index: usize,
    pub is_room: bool,
    pub doors: Doors,
    /// Set once the player has entered this room
    pub visited: bool,
    pub start_room: bool,
    pub end_room: bool,
    pub locked: bool,
    /// Start room only: the door the player came through from the previous floor
    pub entry_door: Option<Direction>,
    /// End room only: the door leading down to the next floor
    pub exit_door: Option<Direction>,
    pub monster: Option<MonsterInstance>,
    pub item: Option<Item>,
}

impl Room {
    /// A fresh, empty block with no doors
    pub fn new(index: usize) -> Self {
        Self {
            index,
            is_room: false,
            doors: Doors::default(),
            visited: false,
            start_room: false,
            end_room: false,
            locked: false,
            entry_door: None,
            exit_door: None,
            monster: None,
            item: None,
        }
    }

    /// Turn the block into a room (doors are left as they are)
    pub fn promote(&mut self) {
        self.is_room = true;
    }

    /// True if this door leads to another floor rather than a sibling room
    pub fn is_level_door(&self, direction: Direction) -> bool {
        self.entry_door == Some(direction) || self.exit_door == Some(direction)
    }

    pub fn has_monster(&self) -> bool {
        self.monster.is_some()
    }

    /// Rooms that still hold something for the player
    pub fn has_encounter(&self) -> bool {
        self.monster.is_some() || self.item.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doors_toggle() {
        let mut doors = Doors::default();
        assert_eq!(doors.count(), 0);

        doors.open(Direction::E);
        doors.open(Direction::S);
        assert!(doors.is_open(Direction::E));
        assert!(!doors.is_open(Direction::N));
        assert_eq!(doors.open_directions(), vec![Direction::E, Direction::S]);

        doors.close(Direction::E);
        assert_eq!(doors.open_directions(), vec![Direction::S]);
    }

    #[test]
    fn test_new_rooms_do_not_share_state() {
        let mut a = Room::new(0);
        let b = Room::new(1);
        a.doors.open(Direction::N);
        a.promote();
        assert!(!b.is_room);
        assert_eq!(b.doors.count(), 0);
    }

    #[test]
    fn test_level_door_detection() {
        let mut room = Room::new(3);
        room.exit_door = Some(Direction::N);
        assert!(room.is_level_door(Direction::N));
        assert!(!room.is_level_door(Direction::W));
    }
}
