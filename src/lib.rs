//! Grid-Clearing Puzzle Library
//!
//! Decides whether a grid-clearing puzzle can be emptied and scores how hard
//! it is. A puzzle is a set of directional blocks on a square or hexagonal
//! board; a block may leave when the straight line ahead of it reaches the
//! edge or a hole. Everything is generic over [`Topology`], so the oracle,
//! search and metrics are written once for both board shapes.

pub mod analysis;
pub mod difficulty;
pub mod generator;
pub mod level;
pub mod metrics;
mod oracle;
pub mod puzzle;
pub mod quick;
pub mod report;
pub mod search;
pub mod state;
pub mod topology;

pub use analysis::{analyze, Analysis};
pub use difficulty::{DifficultyBreakdown, Formula, Tier};
pub use generator::{generate, GeneratorConfig};
pub use level::{Level, LevelError};
pub use oracle::Trace;
pub use puzzle::{Block, BlockId, Puzzle};
pub use quick::{quick_solve, QuickSolve};
pub use search::{search, SearchConfig, SearchMode, SearchOutcome};
pub use state::State;
pub use topology::{Heading, Hex, Square, Topology};
