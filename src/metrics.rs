//! Structural metrics that do not need a search: wave depth and blockers.

use crate::puzzle::Puzzle;
use crate::topology::Topology;

/// Outcome of clearing in parallel waves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveDepth {
    /// Waves completed.
    pub waves: usize,
    /// Every block was removed.
    pub cleared: bool,
}

/// Removes every clearable block at once, repeatedly.
///
/// Stops when the board is empty or a wave finds nothing to clear; `waves`
/// counts the waves that removed something.
pub fn solution_depth<T: Topology>(puzzle: &Puzzle<T>) -> WaveDepth {
    let mut state = puzzle.initial_state();
    let mut waves = 0;
    while !state.is_empty() {
        let wave = puzzle.clearable_blocks(&state);
        if wave.is_empty() {
            break;
        }
        for index in wave {
            state.remove(index);
        }
        waves += 1;
    }
    WaveDepth {
        waves,
        cleared: state.is_empty(),
    }
}

/// How many blocks stand between each block and its way out.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockerStats {
    /// Per block, in arena order.
    pub per_block: Vec<usize>,
    pub total: usize,
    pub average: f64,
    pub max: usize,
}

/// Counts blocks along each exit ray of the initial board.
///
/// A ray counts occupied cells until it drops into a hole or leaves the
/// grid. Axis blocks report their easier side.
pub fn blockers<T: Topology>(puzzle: &Puzzle<T>) -> BlockerStats {
    let state = puzzle.initial_state();
    let per_block: Vec<usize> = puzzle
        .blocks()
        .iter()
        .map(|block| {
            block
                .heading
                .exits()
                .map(|direction| {
                    let mut count = 0;
                    let mut coord = T::offset(block.coord, direction);
                    while puzzle.topology().contains(coord) && !puzzle.is_hole(coord) {
                        if puzzle.occupant(&state, coord).is_some() {
                            count += 1;
                        }
                        coord = T::offset(coord, direction);
                    }
                    count
                })
                .min()
                .unwrap_or(0)
        })
        .collect();

    let total = per_block.iter().sum();
    let average = if per_block.is_empty() {
        0.0
    } else {
        total as f64 / per_block.len() as f64
    };
    let max = per_block.iter().copied().max().unwrap_or(0);

    BlockerStats {
        per_block,
        total,
        average,
        max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Block;
    use crate::topology::{Heading, Hex, HexAxis, Square, SquareAxis, SquareCoord, SquareDirection};

    fn toward(id: u32, at: (i32, i32), direction: SquareDirection) -> Block<Square> {
        Block::new(id, at, Heading::Toward(direction))
    }

    fn east_row(n: i32) -> Puzzle<Square> {
        Puzzle::new(
            Square::new(1, n),
            (0..n)
                .map(|col| toward(col as u32, (0, col), SquareDirection::E))
                .collect(),
            [],
        )
    }

    #[test]
    fn test_chain_takes_one_wave_per_block() {
        assert_eq!(
            solution_depth(&east_row(4)),
            WaveDepth {
                waves: 4,
                cleared: true
            }
        );
    }

    #[test]
    fn test_free_blocks_clear_in_one_wave() {
        let puzzle = Puzzle::new(
            Square::new(3, 3),
            vec![
                toward(0, (0, 0), SquareDirection::N),
                toward(1, (2, 2), SquareDirection::S),
                toward(2, (1, 1), SquareDirection::E),
            ],
            [],
        );
        assert_eq!(solution_depth(&puzzle).waves, 1);
    }

    #[test]
    fn test_deadlock_stops_waves() {
        let puzzle = Puzzle::new(
            Square::new(3, 3),
            vec![
                toward(0, (0, 0), SquareDirection::N),
                toward(1, (1, 0), SquareDirection::E),
                toward(2, (1, 2), SquareDirection::W),
            ],
            [],
        );
        assert_eq!(
            solution_depth(&puzzle),
            WaveDepth {
                waves: 1,
                cleared: false
            }
        );
    }

    #[test]
    fn test_empty_puzzle_has_zero_depth() {
        let puzzle: Puzzle<Square> = Puzzle::new(Square::new(2, 2), vec![], []);
        assert_eq!(solution_depth(&puzzle).waves, 0);
        let stats = blockers(&puzzle);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.average, 0.0);
    }

    #[test]
    fn test_blockers_count_every_block_in_line() {
        let stats = blockers(&east_row(4));
        assert_eq!(stats.per_block, vec![3, 2, 1, 0]);
        assert_eq!(stats.total, 6);
        assert_eq!(stats.average, 1.5);
        assert_eq!(stats.max, 3);
    }

    #[test]
    fn test_blockers_stop_at_hole() {
        let puzzle = Puzzle::new(
            Square::new(1, 4),
            vec![
                toward(0, (0, 0), SquareDirection::E),
                toward(1, (0, 1), SquareDirection::N),
                toward(2, (0, 3), SquareDirection::N),
            ],
            [SquareCoord::new(0, 2)],
        );
        assert_eq!(blockers(&puzzle).per_block, vec![1, 0, 0]);
    }

    #[test]
    fn test_axis_block_takes_easier_side() {
        let puzzle = Puzzle::new(
            Square::new(1, 5),
            vec![
                toward(0, (0, 0), SquareDirection::N),
                Block::new(1, (0, 1), Heading::Along(SquareAxis::EastWest)),
                toward(2, (0, 2), SquareDirection::N),
                toward(3, (0, 3), SquareDirection::N),
            ],
            [],
        );
        assert_eq!(blockers(&puzzle).per_block[1], 1);
    }

    #[test]
    fn test_hex_axis_blockers() {
        let puzzle = Puzzle::new(
            Hex::new(2),
            vec![
                Block::new(0, (0, 0), Heading::Along(HexAxis::EW)),
                Block::new(1, (1, 0), Heading::Along(HexAxis::NeSw)),
                Block::new(2, (2, 0), Heading::Along(HexAxis::NeSw)),
                Block::new(3, (-1, 0), Heading::Along(HexAxis::NeSw)),
            ],
            [],
        );
        // east: (1,0) and (2,0); west: (-1,0)
        assert_eq!(blockers(&puzzle).per_block[0], 1);
    }
}
