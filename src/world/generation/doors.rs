//! Door placement
//!
//! Working state for one generation attempt and the random door picker
//! that drives the breadth-first room expansion.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::world::grid::{self, Adjacent, BLOCK_COUNT};
use crate::world::room::Room;

/// Mutable state of a single attempt; never outlives it
#[derive(Debug, Clone)]
pub struct GenerationContext {
    pub rooms: Vec<Room>,
    /// Blocks the walk has already settled
    pub visited: [bool; BLOCK_COUNT],
    /// Blocks waiting to be expanded
    pub queue: VecDeque<usize>,
}

impl GenerationContext {
    pub fn new() -> Self {
        Self {
            rooms: (0..BLOCK_COUNT).map(Room::new).collect(),
            visited: [false; BLOCK_COUNT],
            queue: VecDeque::new(),
        }
    }

    /// Neighbors of `index` with no door yet that the walk has not settled
    pub fn door_candidates(&self, index: usize) -> Vec<Adjacent> {
        grid::adjacent_blocks(index)
            .iter()
            .filter(|a| !self.rooms[index].doors.is_open(a.direction) && !self.visited[a.index])
            .copied()
            .collect()
    }
}

impl Default for GenerationContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Open one door from `index` toward a random unconnected, unsettled neighbor.
///
/// With `record_for_expansion` the neighbor is queued so the walk turns it
/// into a room. Returns the neighbor, or `None` if nothing was left to connect.
pub fn generate_door(
    ctx: &mut GenerationContext,
    index: usize,
    record_for_expansion: bool,
    rng: &mut impl Rng,
) -> Option<usize> {
    let candidates = ctx.door_candidates(index);
    let target = *candidates.choose(rng)?;

    ctx.rooms[index].doors.open(target.direction);

    if record_for_expansion && !ctx.visited[target.index] {
        ctx.queue.push_back(target.index);
    }

    Some(target.index)
}
