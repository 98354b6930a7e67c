//! Solvability search over removal orders.
//!
//! Small puzzles are explored exhaustively, breadth first, with states
//! deduplicated by their presence bitset. Every move removes exactly one
//! block, so all parents of a state sit in the previous layer; each layer
//! carries how many distinct move orders reach each state, which yields the
//! number of solutions without re-expanding duplicates.
//!
//! Large puzzles skip exhaustive search: one greedy pass settles solvability
//! cheaply, and if it dead-ends a bounded number of seeded random playouts
//! try again. Both paths report the same statistics.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::puzzle::{BlockId, Puzzle};
use crate::state::State;
use crate::topology::Topology;

/// Search limits. The defaults bound worst-case running time on adversarial
/// boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Solution count at which exact search stops counting.
    pub max_solutions: u64,
    /// Total states exact search may expand.
    pub max_states: usize,
    /// Puzzles with more blocks than this are sampled instead.
    pub exact_threshold: usize,
    /// Random playouts tried after a failed greedy pass.
    pub random_playouts: usize,
    /// Seed for the playout generator.
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_solutions: 1_000,
            max_states: 50_000,
            exact_threshold: 25,
            random_playouts: 50,
            seed: 0,
        }
    }
}

/// Which strategy produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SearchMode {
    /// Exhaustive breadth-first search.
    #[display("exact")]
    Exact,
    /// A single greedy pass.
    #[display("greedy")]
    Greedy,
    /// Greedy pass followed by random playouts.
    #[display("sampled")]
    Sampled,
}

/// Running summary of how many moves were available at each expanded state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BranchingStats {
    samples: usize,
    total: usize,
    min: Option<usize>,
}

impl BranchingStats {
    fn record(&mut self, branching: usize) {
        self.samples += 1;
        self.total += branching;
        self.min = Some(self.min.map_or(branching, |min| min.min(branching)));
    }

    /// Number of recorded steps.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Mean branching factor, 0 when nothing was recorded.
    pub fn average(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.total as f64 / self.samples as f64
        }
    }

    /// Smallest branching factor, 0 when nothing was recorded.
    pub fn min(&self) -> usize {
        self.min.unwrap_or(0)
    }
}

/// Result of [`search`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub mode: SearchMode,
    pub solvable: bool,
    /// Distinct removal orders found. Exact below the size threshold (capped
    /// at `max_solutions`); 0 or 1 when sampled.
    pub solution_count: u64,
    /// One solution, as block ids in removal order.
    pub solution: Option<Vec<BlockId>>,
    pub branching: BranchingStats,
    /// Expanded states with exactly one move.
    pub forced_moves: usize,
    /// Dead-end states reached after at least one move.
    pub bottlenecks: usize,
    pub states_explored: usize,
    /// A cap cut the exact search short.
    pub truncated: bool,
}

impl SearchOutcome {
    fn empty(mode: SearchMode) -> Self {
        Self {
            mode,
            solvable: false,
            solution_count: 0,
            solution: None,
            branching: BranchingStats::default(),
            forced_moves: 0,
            bottlenecks: 0,
            states_explored: 0,
            truncated: false,
        }
    }

    /// Share of expanded states that had a single move.
    pub fn forced_move_ratio(&self) -> f64 {
        if self.branching.samples() == 0 {
            0.0
        } else {
            self.forced_moves as f64 / self.branching.samples() as f64
        }
    }

    /// Returns `true` if some move order leads into a dead end.
    pub fn has_critical_path(&self) -> bool {
        self.bottlenecks > 0
    }
}

/// Determines solvability and collects move-choice statistics.
///
/// Never fails: an unsolvable puzzle is an ordinary outcome. A puzzle with
/// no blocks is reported as unsolvable.
pub fn search<T: Topology>(puzzle: &Puzzle<T>, config: &SearchConfig) -> SearchOutcome {
    if puzzle.block_count() == 0 {
        return SearchOutcome::empty(SearchMode::Exact);
    }
    if puzzle.block_count() > config.exact_threshold {
        log::debug!(
            "{} blocks exceeds exact threshold {}, sampling",
            puzzle.block_count(),
            config.exact_threshold
        );
        sample(puzzle, config)
    } else {
        exact(puzzle, config)
    }
}

/// A state in the current breadth-first layer.
struct Node {
    state: State,
    /// Distinct move orders reaching this state.
    orders: u64,
    /// First move order that reached this state.
    path: Vec<BlockId>,
}

fn exact<T: Topology>(puzzle: &Puzzle<T>, config: &SearchConfig) -> SearchOutcome {
    let mut outcome = SearchOutcome::empty(SearchMode::Exact);
    // states ever queued, including the initial one
    let mut admitted = 1;
    let mut frontier = vec![Node {
        state: puzzle.initial_state(),
        orders: 1,
        path: Vec::new(),
    }];

    while !frontier.is_empty() {
        let mut next: Vec<Node> = Vec::new();
        let mut slots: FxHashMap<State, usize> = FxHashMap::default();

        for node in frontier {
            outcome.states_explored += 1;

            if node.state.is_empty() {
                outcome.solution_count = outcome
                    .solution_count
                    .saturating_add(node.orders)
                    .min(config.max_solutions);
                if outcome.solution.is_none() {
                    outcome.solution = Some(node.path);
                }
                continue;
            }

            let moves = puzzle.clearable_blocks(&node.state);
            if moves.is_empty() {
                if !node.path.is_empty() {
                    outcome.bottlenecks += 1;
                }
                continue;
            }

            outcome.branching.record(moves.len());
            if moves.len() == 1 {
                outcome.forced_moves += 1;
            }

            for index in moves {
                let child = node.state.without(index);
                if let Some(&slot) = slots.get(&child) {
                    next[slot].orders = next[slot].orders.saturating_add(node.orders);
                    continue;
                }
                if admitted >= config.max_states {
                    outcome.truncated = true;
                    continue;
                }
                let mut path = node.path.clone();
                path.push(puzzle.block(index).id);
                admitted += 1;
                slots.insert(child.clone(), next.len());
                next.push(Node {
                    state: child,
                    orders: node.orders,
                    path,
                });
            }
        }

        frontier = next;
    }

    if outcome.solution_count >= config.max_solutions {
        outcome.truncated = true;
    }
    outcome.solvable = outcome.solution.is_some();

    if outcome.truncated {
        log::debug!(
            "exact search truncated after {} states ({} solutions)",
            outcome.states_explored,
            outcome.solution_count
        );
        if !outcome.solvable {
            // the frontier was cut before any solution; settle solvability greedily
            let greedy = playout(puzzle, |_| 0);
            if greedy.cleared() {
                outcome.solvable = true;
                outcome.solution_count = 1;
                outcome.solution = Some(greedy.path);
            }
        }
    }

    outcome
}

/// One run of repeated single removals.
struct Playout {
    path: Vec<BlockId>,
    branching: BranchingStats,
    forced_moves: usize,
    end: State,
}

impl Playout {
    fn cleared(&self) -> bool {
        self.end.is_empty()
    }
}

/// Removes one clearable block at a time until the board is empty or stuck.
///
/// `choose` picks a position in the list of clearable blocks.
fn playout<T: Topology>(puzzle: &Puzzle<T>, mut choose: impl FnMut(usize) -> usize) -> Playout {
    let mut state = puzzle.initial_state();
    let mut path = Vec::with_capacity(puzzle.block_count());
    let mut branching = BranchingStats::default();
    let mut forced_moves = 0;

    loop {
        let moves = puzzle.clearable_blocks(&state);
        if moves.is_empty() {
            break;
        }
        branching.record(moves.len());
        if moves.len() == 1 {
            forced_moves += 1;
        }
        let index = moves[choose(moves.len())];
        path.push(puzzle.block(index).id);
        state.remove(index);
    }

    Playout {
        path,
        branching,
        forced_moves,
        end: state,
    }
}

fn sample<T: Topology>(puzzle: &Puzzle<T>, config: &SearchConfig) -> SearchOutcome {
    let mut dead_ends: FxHashSet<State> = FxHashSet::default();
    let mut states_explored = 0;

    let greedy = playout(puzzle, |_| 0);
    states_explored += greedy.path.len() + 1;
    if greedy.cleared() {
        return finish(SearchMode::Greedy, greedy, 0, states_explored);
    }
    if !greedy.path.is_empty() {
        dead_ends.insert(greedy.end.clone());
    }

    let mut rng = Pcg64Mcg::seed_from_u64(config.seed);
    for attempt in 0..config.random_playouts {
        let run = playout(puzzle, |len| rng.gen_range(0..len));
        states_explored += run.path.len() + 1;
        log::trace!(
            "playout {attempt}: removed {} of {} blocks",
            run.path.len(),
            puzzle.block_count()
        );
        if run.cleared() {
            return finish(SearchMode::Sampled, run, dead_ends.len(), states_explored);
        }
        if !run.path.is_empty() {
            dead_ends.insert(run.end);
        }
    }

    log::debug!(
        "no clearing order found in greedy pass and {} playouts",
        config.random_playouts
    );
    let mut outcome = finish(SearchMode::Sampled, greedy, dead_ends.len(), states_explored);
    outcome.solvable = false;
    outcome.solution_count = 0;
    outcome.solution = None;
    outcome
}

/// Builds an outcome from the playout whose statistics are reported.
fn finish(mode: SearchMode, run: Playout, bottlenecks: usize, states_explored: usize) -> SearchOutcome {
    let cleared = run.cleared();
    SearchOutcome {
        mode,
        solvable: cleared,
        solution_count: u64::from(cleared),
        solution: cleared.then_some(run.path),
        branching: run.branching,
        forced_moves: run.forced_moves,
        bottlenecks,
        states_explored,
        truncated: false,
    }
}
