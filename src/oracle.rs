//! Clearability rules and move enumeration.
//!
//! A block can be cleared when one of its exit rays reaches a hole or the
//! grid edge without meeting another block. A locked block additionally
//! needs every neighboring cell to be empty.

use crate::puzzle::Puzzle;
use crate::state::State;
use crate::topology::Topology;

/// Where a ray traced from a cell ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trace<C> {
    /// Left the grid.
    Exit,
    /// Fell into the hole at this cell.
    Hole(C),
    /// Stopped by the block with this arena index.
    Blocked(usize),
}

impl<C> Trace<C> {
    /// Returns `true` if the ray escaped.
    #[inline]
    pub fn is_open(&self) -> bool {
        !matches!(self, Trace::Blocked(_))
    }
}

impl<T: Topology> Puzzle<T> {
    /// Follows a ray from `from` (exclusive) in `direction`.
    pub fn trace(&self, state: &State, from: T::Coord, direction: T::Direction) -> Trace<T::Coord> {
        let mut coord = T::offset(from, direction);
        while self.topology().contains(coord) {
            if self.is_hole(coord) {
                return Trace::Hole(coord);
            }
            if let Some(blocker) = self.occupant(state, coord) {
                return Trace::Blocked(blocker);
            }
            coord = T::offset(coord, direction);
        }
        Trace::Exit
    }

    /// Returns `true` if a locked block at `coord` is frozen by a neighbor.
    fn is_frozen(&self, state: &State, coord: T::Coord) -> bool {
        self.topology()
            .neighbors(coord)
            .any(|neighbor| self.occupant(state, neighbor).is_some())
    }

    /// The direction block `index` would leave through, if it can be cleared.
    ///
    /// For an axis block this is the first open side in heading order.
    pub fn exit_direction(&self, state: &State, index: usize) -> Option<T::Direction> {
        debug_assert!(state.contains(index), "block {index} is not on the board");
        let block = self.block(index);
        if block.locked && self.is_frozen(state, block.coord) {
            return None;
        }
        block
            .heading
            .exits()
            .find(|&direction| self.trace(state, block.coord, direction).is_open())
    }

    /// Returns `true` if block `index` may be removed in `state`.
    #[inline]
    pub fn is_clearable(&self, state: &State, index: usize) -> bool {
        self.exit_direction(state, index).is_some()
    }

    /// Arena indices of every clearable block, ascending.
    pub fn clearable_blocks(&self, state: &State) -> Vec<usize> {
        state
            .iter()
            .filter(|&index| self.is_clearable(state, index))
            .collect()
    }

    /// The first clearable block in arena order.
    pub fn first_clearable(&self, state: &State) -> Option<usize> {
        state.iter().find(|&index| self.is_clearable(state, index))
    }
}
