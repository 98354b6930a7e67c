//! Cheap greedy solvability check for level generators.

use crate::puzzle::Puzzle;
use crate::topology::Topology;

/// Result of [`quick_solve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickSolve {
    pub solvable: bool,
    /// Blocks removed before the board emptied or got stuck.
    pub moves: usize,
}

/// Repeatedly removes the first clearable block in arena order.
///
/// Removing a block never makes another block harder to clear, so a greedy
/// pass gets stuck exactly when no order clears the board. An empty puzzle is
/// reported as unsolvable.
pub fn quick_solve<T: Topology>(puzzle: &Puzzle<T>) -> QuickSolve {
    let mut state = puzzle.initial_state();
    if state.is_empty() {
        return QuickSolve {
            solvable: false,
            moves: 0,
        };
    }
    let mut moves = 0;
    while let Some(index) = puzzle.first_clearable(&state) {
        state.remove(index);
        moves += 1;
    }
    QuickSolve {
        solvable: state.is_empty(),
        moves,
    }
}
