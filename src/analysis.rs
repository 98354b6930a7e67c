//! One-shot analysis of a puzzle: every metric the difficulty model reads.

use crate::difficulty::{DifficultyBreakdown, DifficultyInputs, Formula};
use crate::metrics::{blockers, solution_depth, WaveDepth};
use crate::puzzle::{BlockId, Puzzle};
use crate::search::{search, SearchConfig, SearchMode};
use crate::topology::Topology;

/// All metrics computed for one puzzle. Produced once, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub topology: &'static str,
    pub cell_count: usize,
    pub block_count: usize,
    pub locked_count: usize,
    pub hole_count: usize,

    pub solvable: bool,
    /// Length of the reported solution, 0 when unsolvable.
    pub moves: usize,
    pub solution: Option<Vec<BlockId>>,
    pub solution_count: u64,
    pub search_mode: SearchMode,
    pub states_explored: usize,
    pub truncated: bool,

    pub avg_branching: f64,
    pub min_branching: usize,
    pub forced_moves: usize,
    pub forced_move_ratio: f64,
    pub bottlenecks: usize,
    pub has_critical_path: bool,

    pub initial_clearable: usize,
    /// `initial_clearable / block_count`, 0 for an empty puzzle.
    pub initial_clearability: f64,
    pub depth: WaveDepth,

    pub total_blockers: usize,
    pub avg_blockers: f64,
    pub max_blockers: usize,

    /// Single directions used by at least one block.
    pub distinct_directions: usize,
    /// Directions the topology offers.
    pub direction_count: usize,
    pub density: f64,
}

/// Runs every analysis on `puzzle`.
pub fn analyze<T: Topology>(puzzle: &Puzzle<T>, config: &SearchConfig) -> Analysis {
    let outcome = search(puzzle, config);
    let depth = solution_depth(puzzle);
    let blocker_stats = blockers(puzzle);
    let initial_clearable = puzzle.clearable_blocks(&puzzle.initial_state()).len();
    let block_count = puzzle.block_count();

    let initial_clearability = if block_count == 0 {
        0.0
    } else {
        initial_clearable as f64 / block_count as f64
    };

    Analysis {
        topology: T::NAME,
        cell_count: puzzle.topology().cell_count(),
        block_count,
        locked_count: puzzle.locked_count(),
        hole_count: puzzle.holes().len(),

        solvable: outcome.solvable,
        moves: outcome.solution.as_ref().map_or(0, Vec::len),
        solution_count: outcome.solution_count,
        search_mode: outcome.mode,
        states_explored: outcome.states_explored,
        truncated: outcome.truncated,

        avg_branching: outcome.branching.average(),
        min_branching: outcome.branching.min(),
        forced_moves: outcome.forced_moves,
        forced_move_ratio: outcome.forced_move_ratio(),
        bottlenecks: outcome.bottlenecks,
        has_critical_path: outcome.has_critical_path(),
        solution: outcome.solution,

        initial_clearable,
        initial_clearability,
        depth,

        total_blockers: blocker_stats.total,
        avg_blockers: blocker_stats.average,
        max_blockers: blocker_stats.max,

        distinct_directions: puzzle.distinct_directions(),
        direction_count: T::DIRECTIONS.len(),
        density: puzzle.density(),
    }
}

impl Analysis {
    /// Scores this analysis with `formula`.
    pub fn difficulty(&self, formula: Formula) -> DifficultyBreakdown {
        formula.score(&DifficultyInputs::from(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Tier;
    use crate::puzzle::Block;
    use crate::topology::{Heading, Hex, HexDirection, Square, SquareDirection};

    #[test]
    fn test_empty_puzzle_analysis() {
        let puzzle: Puzzle<Square> = Puzzle::new(Square::new(3, 3), vec![], []);
        let analysis = analyze(&puzzle, &SearchConfig::default());
        assert!(!analysis.solvable);
        assert_eq!(analysis.block_count, 0);
        assert_eq!(analysis.initial_clearability, 0.0);
        for formula in [Formula::Authored, Formula::Scaling] {
            let breakdown = analysis.difficulty(formula);
            assert_eq!(breakdown.score, 0);
            assert_eq!(breakdown.tier, Tier::Easy);
        }
    }

    #[test]
    fn test_single_exit_block() {
        let puzzle = Puzzle::new(
            Square::new(3, 3),
            vec![Block::new(0, (0, 0), Heading::Toward(SquareDirection::N))],
            [],
        );
        let analysis = analyze(&puzzle, &SearchConfig::default());
        assert!(analysis.solvable);
        assert_eq!(analysis.moves, 1);
        assert_eq!(analysis.initial_clearable, 1);
        assert_eq!(analysis.initial_clearability, 1.0);
        assert_eq!(analysis.difficulty(Formula::Authored).tier, Tier::Easy);
        assert_eq!(analysis.difficulty(Formula::Scaling).tier, Tier::Easy);
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let puzzle = Puzzle::new(
            Hex::new(2),
            vec![
                Block::new(0, (0, 0), Heading::Toward(HexDirection::E)),
                Block::new(1, (1, 0), Heading::Toward(HexDirection::E)),
                Block::new(2, (0, 1), Heading::Toward(HexDirection::NW)).locked(),
                Block::new(3, (-1, 0), Heading::Toward(HexDirection::SW)),
            ],
            [],
        );
        let config = SearchConfig::default();
        let first = analyze(&puzzle, &config);
        let second = analyze(&puzzle, &config);
        assert_eq!(first, second);
        assert_eq!(
            first.difficulty(Formula::Scaling),
            second.difficulty(Formula::Scaling)
        );
        assert_eq!(first.direction_count, 6);
        assert_eq!(first.distinct_directions, 3);
    }
}
