//! Random level generation with solvability rejection.
//!
//! Candidates are drawn from a seeded PCG stream and kept only if the quick
//! solver clears them, so the same seed always yields the same level.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

use crate::puzzle::{Block, Puzzle};
use crate::quick::quick_solve;
use crate::topology::{Heading, Topology};

/// Shape of generated levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    pub blocks: usize,
    pub holes: usize,
    /// Probability that a block is locked.
    pub locked_ratio: f64,
    /// Probability that a block gets a bidirectional heading.
    pub axis_ratio: f64,
    /// Candidates tried before giving up.
    pub max_attempts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            blocks: 12,
            holes: 0,
            locked_ratio: 0.1,
            axis_ratio: 0.2,
            max_attempts: 200,
        }
    }
}

/// Generates a solvable level, or `None` if it does not fit or every
/// attempt was unsolvable.
pub fn generate<T: Topology>(topology: T, config: &GeneratorConfig, seed: u64) -> Option<Puzzle<T>> {
    let cell_count = topology.cell_count();
    if config.blocks == 0 || config.blocks + config.holes > cell_count {
        log::debug!(
            "{} blocks and {} holes do not fit {} cells",
            config.blocks,
            config.holes,
            cell_count
        );
        return None;
    }

    let locked_ratio = config.locked_ratio.clamp(0.0, 1.0);
    let axis_ratio = config.axis_ratio.clamp(0.0, 1.0);
    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    let mut cells: Vec<usize> = (0..cell_count).collect();

    for attempt in 1..=config.max_attempts {
        cells.shuffle(&mut rng);
        let (hole_cells, rest) = cells.split_at(config.holes);
        let holes: Vec<T::Coord> = hole_cells
            .iter()
            .map(|&cell| topology.cell_coord(cell))
            .collect();

        let mut block_cells = rest[..config.blocks].to_vec();
        block_cells.sort_unstable();
        let blocks: Vec<Block<T>> = block_cells
            .into_iter()
            .enumerate()
            .map(|(id, cell)| {
                let heading = if rng.gen_bool(axis_ratio) {
                    Heading::Along(T::AXES[rng.gen_range(0..T::AXES.len())])
                } else {
                    Heading::Toward(T::DIRECTIONS[rng.gen_range(0..T::DIRECTIONS.len())])
                };
                Block {
                    id: id as u32,
                    coord: topology.cell_coord(cell),
                    heading,
                    locked: rng.gen_bool(locked_ratio),
                }
            })
            .collect();

        let puzzle = Puzzle::new(topology, blocks, holes);
        if quick_solve(&puzzle).solvable {
            log::debug!("generated a solvable level after {attempt} attempt(s)");
            return Some(puzzle);
        }
    }

    log::debug!("no solvable level in {} attempts", config.max_attempts);
    None
}
