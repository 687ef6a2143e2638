//! Floor grid topology
//!
//! Every floor is a fixed 4x4 grid of blocks. Adjacency and the outer walls
//! are static lookup tables; nothing here is generated at runtime.
//!
//! ```text
//!  0  1  2  3
//!  4  5  6  7
//!  8  9 10 11
//! 12 13 14 15
//! ```

use serde::{Deserialize, Serialize};

/// Number of blocks on a floor
pub const BLOCK_COUNT: usize = 16;

/// Width (and height) of the floor grid
pub const GRID_SIZE: usize = 4;

/// Compass direction of a door
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    N,
    E,
    S,
    W,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::N, Direction::E, Direction::S, Direction::W];

    pub fn label(&self) -> &'static str {
        match self {
            Direction::N => "north",
            Direction::E => "east",
            Direction::S => "south",
            Direction::W => "west",
        }
    }
}

/// A neighboring block and the direction that leads to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjacent {
    pub index: usize,
    pub direction: Direction,
}

const fn adj(index: usize, direction: Direction) -> Adjacent {
    Adjacent { index, direction }
}

/// One cell of the floor grid
#[derive(Debug, Clone, Copy)]
pub struct Block {
    pub index: usize,
    /// Neighbors in table order; the direction points from this block toward the neighbor
    pub adjacent: &'static [Adjacent],
}

use Direction::{E, N, S, W};

pub static BLOCKS: [Block; BLOCK_COUNT] = [
    Block { index: 0, adjacent: &[adj(1, E), adj(4, S)] },
    Block { index: 1, adjacent: &[adj(0, W), adj(2, E), adj(5, S)] },
    Block { index: 2, adjacent: &[adj(1, W), adj(3, E), adj(6, S)] },
    Block { index: 3, adjacent: &[adj(2, W), adj(7, S)] },
    Block { index: 4, adjacent: &[adj(0, N), adj(5, E), adj(8, S)] },
    Block { index: 5, adjacent: &[adj(1, N), adj(4, W), adj(6, E), adj(9, S)] },
    Block { index: 6, adjacent: &[adj(2, N), adj(5, W), adj(7, E), adj(10, S)] },
    Block { index: 7, adjacent: &[adj(3, N), adj(6, W), adj(11, S)] },
    Block { index: 8, adjacent: &[adj(4, N), adj(9, E), adj(12, S)] },
    Block { index: 9, adjacent: &[adj(5, N), adj(8, W), adj(10, E), adj(13, S)] },
    Block { index: 10, adjacent: &[adj(6, N), adj(9, W), adj(11, E), adj(14, S)] },
    Block { index: 11, adjacent: &[adj(7, N), adj(10, W), adj(15, S)] },
    Block { index: 12, adjacent: &[adj(8, N), adj(13, E)] },
    Block { index: 13, adjacent: &[adj(9, N), adj(12, W), adj(14, E)] },
    Block { index: 14, adjacent: &[adj(10, N), adj(13, W), adj(15, E)] },
    Block { index: 15, adjacent: &[adj(11, N), adj(14, W)] },
];

/// A block on the outer border and the walls that face outside the grid
#[derive(Debug, Clone, Copy)]
pub struct PerimeterRoom {
    pub index: usize,
    pub walls: &'static [Direction],
}

/// The only blocks allowed to host a door to another floor
pub static PERIMETER_ROOMS: [PerimeterRoom; 12] = [
    PerimeterRoom { index: 0, walls: &[N, W] },  // top left corner
    PerimeterRoom { index: 1, walls: &[N] },
    PerimeterRoom { index: 2, walls: &[N] },
    PerimeterRoom { index: 3, walls: &[N, E] },  // top right corner
    PerimeterRoom { index: 4, walls: &[W] },
    PerimeterRoom { index: 7, walls: &[E] },
    PerimeterRoom { index: 8, walls: &[W] },
    PerimeterRoom { index: 11, walls: &[E] },
    PerimeterRoom { index: 12, walls: &[S, W] }, // bottom left corner
    PerimeterRoom { index: 13, walls: &[S] },
    PerimeterRoom { index: 14, walls: &[S] },
    PerimeterRoom { index: 15, walls: &[S, E] }, // bottom right corner
];

/// Look up a block by index
pub fn block(index: usize) -> Option<&'static Block> {
    BLOCKS.get(index)
}

/// Neighbors of a block (empty for an out-of-range index)
pub fn adjacent_blocks(index: usize) -> &'static [Adjacent] {
    block(index).map(|b| b.adjacent).unwrap_or(&[])
}

/// The neighbor reached by leaving `index` through `direction`
pub fn neighbor(index: usize, direction: Direction) -> Option<usize> {
    adjacent_blocks(index)
        .iter()
        .find(|a| a.direction == direction)
        .map(|a| a.index)
}

/// Direction from `from` toward an adjacent block `to`
pub fn direction_between(from: usize, to: usize) -> Option<Direction> {
    adjacent_blocks(from)
        .iter()
        .find(|a| a.index == to)
        .map(|a| a.direction)
}

/// Outer walls of a perimeter block, `None` for interior blocks
pub fn perimeter_walls(index: usize) -> Option<&'static [Direction]> {
    PERIMETER_ROOMS
        .iter()
        .find(|p| p.index == index)
        .map(|p| p.walls)
}

pub fn is_adjacent(a: usize, b: usize) -> bool {
    direction_between(a, b).is_some()
}
