//! Human-readable summaries of analyses and boards.

use std::fmt::Write as _;

use crate::analysis::Analysis;
use crate::difficulty::DifficultyBreakdown;
use crate::puzzle::Puzzle;
use crate::state::State;
use crate::topology::{Heading, Square, SquareAxis, SquareCoord, SquareDirection};

/// Formats an analysis and its difficulty breakdown, one metric per line.
pub fn format_analysis(analysis: &Analysis, breakdown: &DifficultyBreakdown) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "topology: {} ({} cells)",
        analysis.topology, analysis.cell_count
    );
    let _ = writeln!(
        out,
        "blocks: {} ({} locked), holes: {}",
        analysis.block_count, analysis.locked_count, analysis.hole_count
    );

    let truncated = if analysis.truncated { ", truncated" } else { "" };
    if analysis.solvable {
        let plural = if analysis.solution_count == 1 { "" } else { "s" };
        let _ = writeln!(
            out,
            "solvable: yes ({}, {} solution{plural}, {} states{truncated})",
            analysis.search_mode, analysis.solution_count, analysis.states_explored
        );
    } else {
        let _ = writeln!(
            out,
            "solvable: no ({}, {} states{truncated})",
            analysis.search_mode, analysis.states_explored
        );
    }
    if let Some(solution) = &analysis.solution {
        let ids: Vec<String> = solution.iter().map(ToString::to_string).collect();
        let _ = writeln!(out, "solution: {}", ids.join(" "));
    }

    let _ = writeln!(
        out,
        "waves: {} ({})",
        analysis.depth.waves,
        if analysis.depth.cleared { "cleared" } else { "stuck" }
    );
    let _ = writeln!(
        out,
        "initial clearable: {} ({:.1}%)",
        analysis.initial_clearable,
        analysis.initial_clearability * 100.0
    );
    let _ = writeln!(
        out,
        "branching: avg {:.2}, min {}",
        analysis.avg_branching, analysis.min_branching
    );
    let _ = writeln!(
        out,
        "forced moves: {} ({:.1}%)",
        analysis.forced_moves,
        analysis.forced_move_ratio * 100.0
    );
    let _ = writeln!(
        out,
        "bottlenecks: {}{}",
        analysis.bottlenecks,
        if analysis.has_critical_path { " (critical path)" } else { "" }
    );
    let _ = writeln!(
        out,
        "blockers: total {}, avg {:.2}, max {}",
        analysis.total_blockers, analysis.avg_blockers, analysis.max_blockers
    );
    let _ = writeln!(
        out,
        "directions: {} of {}, density {:.2}",
        analysis.distinct_directions, analysis.direction_count, analysis.density
    );

    let _ = writeln!(
        out,
        "difficulty ({}): {} {}",
        breakdown.formula, breakdown.score, breakdown.tier
    );
    let _ = writeln!(
        out,
        "  blockers {:.2}, locked {:.2}, clearability {:.2}, variety {:.2}, density {:.2}, size {:+.2}",
        breakdown.blockers,
        breakdown.locked,
        breakdown.clearability,
        breakdown.direction_variety,
        breakdown.density,
        breakdown.size_adjustment
    );

    out
}

/// Glyph for a block heading.
fn heading_glyph(heading: Heading<Square>) -> char {
    match heading {
        Heading::Toward(SquareDirection::N) => '^',
        Heading::Toward(SquareDirection::E) => '>',
        Heading::Toward(SquareDirection::S) => 'v',
        Heading::Toward(SquareDirection::W) => '<',
        Heading::Along(SquareAxis::NorthSouth) => '|',
        Heading::Along(SquareAxis::EastWest) => '-',
    }
}

/// Draws the blocks of `state` on a square board.
///
/// Each cell is two characters: the heading glyph (`.` empty, `o` hole)
/// followed by `#` for locked blocks.
pub fn format_square_board(puzzle: &Puzzle<Square>, state: &State) -> String {
    let grid = puzzle.topology();
    let mut out = String::new();

    for row in 0..grid.rows() {
        let mut line = String::new();
        for col in 0..grid.cols() {
            let coord = SquareCoord::new(row, col);
            match puzzle.occupant(state, coord) {
                Some(index) => {
                    let block = puzzle.block(index);
                    line.push(heading_glyph(block.heading));
                    line.push(if block.locked { '#' } else { ' ' });
                }
                None if puzzle.is_hole(coord) => line.push_str("o "),
                None => line.push_str(". "),
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::difficulty::Formula;
    use crate::level::Level;
    use crate::search::SearchConfig;

    const LEVEL: &str = "\
grid square 3 3
block 1 0 E
block 1 2 N locked
block 2 1 NS
hole 0 1
";

    fn puzzle() -> Puzzle<Square> {
        match Level::parse(LEVEL).unwrap() {
            Level::Square(puzzle) => puzzle,
            Level::Hex(_) => unreachable!(),
        }
    }

    #[test]
    fn test_board_snapshot() {
        let puzzle = puzzle();
        let board = format_square_board(&puzzle, &puzzle.initial_state());
        insta::assert_snapshot!(board);
    }

    #[test]
    fn test_analysis_snapshot() {
        let analysis = analyze(&puzzle(), &SearchConfig::default());
        let report = format_analysis(&analysis, &analysis.difficulty(Formula::Authored));
        insta::assert_snapshot!(report);
    }

    #[test]
    fn test_board_hides_cleared_blocks() {
        let puzzle = puzzle();
        let board = format_square_board(&puzzle, &puzzle.initial_state().without(0));
        assert_eq!(board.lines().nth(1), Some(". . ^#"));
    }
}
