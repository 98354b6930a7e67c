//! Difficulty scoring.
//!
//! Two weight sets are kept side by side rather than merged: [`Formula::Authored`]
//! was tuned against hand-made levels, [`Formula::Scaling`] against synthetic
//! boards of growing block count and adds direction-variety and density terms.
//! Their tier thresholds differ, so a score is only meaningful together with
//! the formula that produced it.

use crate::analysis::Analysis;

/// Ordered difficulty buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum Tier {
    #[display("easy")]
    Easy,
    #[display("medium")]
    Medium,
    #[display("hard")]
    Hard,
    #[display("superHard")]
    SuperHard,
}

/// Selectable scoring formula.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display, clap::ValueEnum,
)]
pub enum Formula {
    /// Weights fitted to authored levels.
    #[default]
    #[display("authored")]
    Authored,
    /// Weights fitted to synthetic size scaling, with variety and density terms.
    #[display("scaling")]
    Scaling,
}

/// Constants of one formula variant.
struct Weights {
    blockers_per_unit: f64,
    blockers_cap: f64,
    /// Locked fraction at which the locked term saturates.
    locked_threshold: f64,
    locked_cap: f64,
    clearability_weight: f64,
    /// Apply a square root to the unclearable fraction.
    soften_clearability: bool,
    variety_weight: f64,
    density_weight: f64,
    /// `(exclusive upper block count, adjustment)`, first match wins.
    small_bands: &'static [(usize, f64)],
    large_start: usize,
    large_blocks_per_point: f64,
    large_cap: f64,
    /// Lower bounds for medium, hard and superHard.
    tiers: [u8; 3],
}

const AUTHORED: Weights = Weights {
    blockers_per_unit: 10.0,
    blockers_cap: 50.0,
    locked_threshold: 0.30,
    locked_cap: 25.0,
    clearability_weight: 25.0,
    soften_clearability: false,
    variety_weight: 0.0,
    density_weight: 0.0,
    small_bands: &[(10, -15.0), (25, -10.0), (50, -5.0)],
    large_start: 400,
    large_blocks_per_point: 20.0,
    large_cap: 10.0,
    tiers: [25, 50, 75],
};

const SCALING: Weights = Weights {
    blockers_per_unit: 4.5,
    blockers_cap: 30.0,
    locked_threshold: 0.30,
    locked_cap: 20.0,
    clearability_weight: 20.0,
    soften_clearability: true,
    variety_weight: 10.0,
    density_weight: 10.0,
    small_bands: &[(10, -10.0), (25, -6.0), (50, -3.0)],
    large_start: 400,
    large_blocks_per_point: 25.0,
    large_cap: 8.0,
    tiers: [20, 40, 60],
};

/// The analysis figures a formula reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyInputs {
    pub solvable: bool,
    pub block_count: usize,
    pub locked_count: usize,
    pub initial_clearable: usize,
    pub avg_blockers: f64,
    pub distinct_directions: usize,
    pub direction_count: usize,
    pub density: f64,
}

impl From<&Analysis> for DifficultyInputs {
    fn from(analysis: &Analysis) -> Self {
        Self {
            solvable: analysis.solvable,
            block_count: analysis.block_count,
            locked_count: analysis.locked_count,
            initial_clearable: analysis.initial_clearable,
            avg_blockers: analysis.avg_blockers,
            distinct_directions: analysis.distinct_directions,
            direction_count: analysis.direction_count,
            density: analysis.density,
        }
    }
}

/// Component scores and the combined result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyBreakdown {
    pub formula: Formula,
    pub blockers: f64,
    pub locked: f64,
    pub clearability: f64,
    pub direction_variety: f64,
    pub density: f64,
    pub size_adjustment: f64,
    /// Sum of components, clamped to 0..=100 and rounded.
    pub score: u8,
    pub tier: Tier,
}

impl DifficultyBreakdown {
    fn zero(formula: Formula) -> Self {
        Self {
            formula,
            blockers: 0.0,
            locked: 0.0,
            clearability: 0.0,
            direction_variety: 0.0,
            density: 0.0,
            size_adjustment: 0.0,
            score: 0,
            tier: Tier::Easy,
        }
    }
}

impl Formula {
    fn weights(self) -> &'static Weights {
        match self {
            Formula::Authored => &AUTHORED,
            Formula::Scaling => &SCALING,
        }
    }

    /// Tier for a score under this formula's thresholds.
    pub fn tier(self, score: u8) -> Tier {
        let [medium, hard, super_hard] = self.weights().tiers;
        if score >= super_hard {
            Tier::SuperHard
        } else if score >= hard {
            Tier::Hard
        } else if score >= medium {
            Tier::Medium
        } else {
            Tier::Easy
        }
    }

    /// Scores a puzzle. Empty and unsolvable puzzles score 0, easy.
    pub fn score(self, inputs: &DifficultyInputs) -> DifficultyBreakdown {
        if inputs.block_count == 0 || !inputs.solvable {
            return DifficultyBreakdown::zero(self);
        }
        let w = self.weights();
        let blocks = inputs.block_count as f64;

        let blockers = (inputs.avg_blockers * w.blockers_per_unit).min(w.blockers_cap);

        let locked_fraction = inputs.locked_count as f64 / blocks;
        let locked = (locked_fraction / w.locked_threshold).min(1.0) * w.locked_cap;

        let unclearable = (1.0 - inputs.initial_clearable as f64 / blocks).max(0.0);
        let clearability = if w.soften_clearability {
            unclearable.sqrt()
        } else {
            unclearable
        } * w.clearability_weight;

        let direction_variety = if inputs.direction_count > 1 && inputs.distinct_directions > 0 {
            (inputs.distinct_directions - 1) as f64 / (inputs.direction_count - 1) as f64
                * w.variety_weight
        } else {
            0.0
        };

        let density = inputs.density.clamp(0.0, 1.0) * w.density_weight;

        let size_adjustment = size_adjustment(w, inputs.block_count);

        let total = blockers + locked + clearability + direction_variety + density + size_adjustment;
        let score = total.clamp(0.0, 100.0).round() as u8;

        DifficultyBreakdown {
            formula: self,
            blockers,
            locked,
            clearability,
            direction_variety,
            density,
            size_adjustment,
            score,
            tier: self.tier(score),
        }
    }
}

/// Negative for small puzzles, positive for very large ones.
fn size_adjustment(w: &Weights, block_count: usize) -> f64 {
    if let Some(&(_, adjustment)) = w.small_bands.iter().find(|(limit, _)| block_count < *limit) {
        return adjustment;
    }
    if block_count > w.large_start {
        return ((block_count - w.large_start) as f64 / w.large_blocks_per_point).min(w.large_cap);
    }
    0.0
}
