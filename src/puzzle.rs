//! Puzzle definition: topology, blocks, holes.
//!
//! A [`Puzzle`] owns its blocks in an arena; search states refer to them by
//! arena index. Cell lookups go through flat tables indexed by the topology's
//! dense cell index, built once here.

use crate::state::State;
use crate::topology::{Heading, Topology};

/// Caller-assigned block identifier, reported in solution paths.
pub type BlockId = u32;

/// A block on the board. Never mutated; clearing drops it from the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block<T: Topology> {
    pub id: BlockId,
    pub coord: T::Coord,
    pub heading: Heading<T>,
    pub locked: bool,
}

impl<T: Topology> Block<T> {
    pub fn new(id: BlockId, coord: impl Into<T::Coord>, heading: Heading<T>) -> Self {
        Self {
            id,
            coord: coord.into(),
            heading,
            locked: false,
        }
    }

    /// Marks the block as locked.
    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }
}

/// What occupies a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Hole,
    Block(u32),
}

/// One puzzle instance.
#[derive(Debug, Clone)]
pub struct Puzzle<T: Topology> {
    topology: T,
    blocks: Vec<Block<T>>,
    holes: Vec<T::Coord>,
    cells: Vec<Cell>,
}

impl<T: Topology> Puzzle<T> {
    /// Builds a puzzle.
    ///
    /// Blocks must be in bounds, on distinct cells, and not on holes. These
    /// are caller contracts, checked only in debug builds.
    pub fn new(
        topology: T,
        blocks: Vec<Block<T>>,
        holes: impl IntoIterator<Item = T::Coord>,
    ) -> Self {
        let mut cells = vec![Cell::Empty; topology.cell_count()];

        let mut holes: Vec<T::Coord> = holes.into_iter().collect();
        holes.sort();
        holes.dedup();
        for &hole in &holes {
            debug_assert!(topology.contains(hole), "hole {hole:?} out of bounds");
            if let Some(cell) = topology.cell_index(hole) {
                cells[cell] = Cell::Hole;
            }
        }

        for (index, block) in blocks.iter().enumerate() {
            let cell = topology.cell_index(block.coord);
            debug_assert!(cell.is_some(), "block {} out of bounds", block.id);
            if let Some(cell) = cell {
                debug_assert_eq!(
                    cells[cell],
                    Cell::Empty,
                    "block {} shares a cell with a hole or another block",
                    block.id
                );
                cells[cell] = Cell::Block(index as u32);
            }
        }

        Self {
            topology,
            blocks,
            holes,
            cells,
        }
    }

    pub fn topology(&self) -> &T {
        &self.topology
    }

    /// All blocks, in arena order.
    pub fn blocks(&self) -> &[Block<T>] {
        &self.blocks
    }

    /// The block at arena `index`.
    pub fn block(&self, index: usize) -> &Block<T> {
        &self.blocks[index]
    }

    /// Hole coordinates, sorted.
    pub fn holes(&self) -> &[T::Coord] {
        &self.holes
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn locked_count(&self) -> usize {
        self.blocks.iter().filter(|block| block.locked).count()
    }

    /// The state with every block present.
    pub fn initial_state(&self) -> State {
        State::full(self.blocks.len())
    }

    /// Returns `true` if `coord` is a hole.
    #[inline]
    pub fn is_hole(&self, coord: T::Coord) -> bool {
        self.topology
            .cell_index(coord)
            .is_some_and(|cell| self.cells[cell] == Cell::Hole)
    }

    /// Arena index of the block at `coord`, if one is present in `state`.
    #[inline]
    pub fn occupant(&self, state: &State, coord: T::Coord) -> Option<usize> {
        match self.topology.cell_index(coord).map(|cell| self.cells[cell]) {
            Some(Cell::Block(index)) if state.contains(index as usize) => Some(index as usize),
            _ => None,
        }
    }

    /// Arena index of the block with caller id `id`.
    pub fn index_of(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|block| block.id == id)
    }

    /// Distinct single directions any block may exit through.
    pub fn distinct_directions(&self) -> usize {
        T::DIRECTIONS
            .iter()
            .filter(|&&direction| {
                self.blocks
                    .iter()
                    .any(|block| block.heading.exits().any(|exit| exit == direction))
            })
            .count()
    }

    /// Fraction of cells holding a block.
    pub fn density(&self) -> f64 {
        let cells = self.topology.cell_count();
        if cells == 0 {
            return 0.0;
        }
        self.blocks.len() as f64 / cells as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{Square, SquareAxis, SquareCoord, SquareDirection};

    fn sample() -> Puzzle<Square> {
        Puzzle::new(
            Square::new(3, 3),
            vec![
                Block::new(10, (0, 0), Heading::Toward(SquareDirection::N)),
                Block::new(11, (1, 1), Heading::Along(SquareAxis::EastWest)).locked(),
            ],
            [SquareCoord::new(2, 2)],
        )
    }

    #[test]
    fn test_occupant_respects_state() {
        let puzzle = sample();
        let state = puzzle.initial_state();
        assert_eq!(puzzle.occupant(&state, SquareCoord::new(1, 1)), Some(1));
        assert_eq!(puzzle.occupant(&state.without(1), SquareCoord::new(1, 1)), None);
        assert_eq!(puzzle.occupant(&state, SquareCoord::new(-1, 0)), None);
    }

    #[test]
    fn test_holes_are_not_occupants() {
        let puzzle = sample();
        let state = puzzle.initial_state();
        assert!(puzzle.is_hole(SquareCoord::new(2, 2)));
        assert_eq!(puzzle.occupant(&state, SquareCoord::new(2, 2)), None);
    }

    #[test]
    fn test_counts_and_lookup() {
        let puzzle = sample();
        assert_eq!(puzzle.block_count(), 2);
        assert_eq!(puzzle.locked_count(), 1);
        assert_eq!(puzzle.index_of(11), Some(1));
        assert_eq!(puzzle.index_of(99), None);
    }

    #[test]
    fn test_distinct_directions_expand_axes() {
        // N plus the E/W pair
        assert_eq!(sample().distinct_directions(), 3);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn test_overlapping_blocks_are_rejected_in_debug() {
        Puzzle::new(
            Square::new(2, 2),
            vec![
                Block::new(0, (0, 0), Heading::Toward(SquareDirection::N)),
                Block::new(1, (0, 0), Heading::Toward(SquareDirection::S)),
            ],
            [],
        );
    }
}
