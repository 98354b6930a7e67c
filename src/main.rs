//! Grid-Clearing Puzzle Analyzer
//!
//! Reads level files, decides whether each board can be cleared and prints
//! its metrics and difficulty. Can also generate solvable random levels.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;

use gridclear::level::MAX_CELLS;
use gridclear::report::{format_analysis, format_square_board};
use gridclear::{
    generate, Formula, GeneratorConfig, Hex, Level, LevelError, SearchConfig, Square, Topology,
};

/// Analyzes grid-clearing puzzles and scores their difficulty.
#[derive(Parser)]
#[command(name = "gridclear")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full analysis on one or more level files.
    Analyze {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Difficulty formula to score with.
        #[arg(long, value_enum, default_value_t = Formula::default())]
        formula: Formula,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Run only the greedy solvability check.
    Quick { file: PathBuf },
    /// Print a level's board.
    Show { file: PathBuf },
    /// Generate a random solvable level and print it in file form.
    Generate {
        #[command(subcommand)]
        grid: GridArgs,
        #[command(flatten)]
        generator: GeneratorArgs,
    },
}

/// Search limits; every default matches [`SearchConfig::default`].
#[derive(Args)]
struct SearchArgs {
    /// Stop counting solutions at this many.
    #[arg(long, default_value_t = 1_000)]
    max_solutions: u64,
    /// States the exact search may expand.
    #[arg(long, default_value_t = 50_000)]
    max_states: usize,
    /// Sample instead of searching exhaustively above this many blocks.
    #[arg(long, default_value_t = 25)]
    exact_threshold: usize,
    /// Random playouts after a failed greedy pass.
    #[arg(long, default_value_t = 50)]
    playouts: usize,
    /// Seed for random playouts.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

impl From<&SearchArgs> for SearchConfig {
    fn from(args: &SearchArgs) -> Self {
        SearchConfig {
            max_solutions: args.max_solutions,
            max_states: args.max_states,
            exact_threshold: args.exact_threshold,
            random_playouts: args.playouts,
            seed: args.seed,
        }
    }
}

#[derive(Subcommand)]
enum GridArgs {
    /// A rectangular grid.
    Square {
        #[arg(long, default_value_t = 6)]
        rows: i32,
        #[arg(long, default_value_t = 6)]
        cols: i32,
    },
    /// A hexagonal grid.
    Hex {
        #[arg(long, default_value_t = 3)]
        radius: i32,
    },
}

#[derive(Args)]
struct GeneratorArgs {
    #[arg(long, default_value_t = 12)]
    blocks: usize,
    #[arg(long, default_value_t = 0)]
    holes: usize,
    /// Probability that a block is locked.
    #[arg(long, default_value_t = 0.1)]
    locked_ratio: f64,
    /// Probability that a block is bidirectional.
    #[arg(long, default_value_t = 0.2)]
    axis_ratio: f64,
    #[arg(long, default_value_t = 200)]
    attempts: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze {
            files,
            formula,
            search,
        } => run_analyze(&files, formula, &SearchConfig::from(&search)),
        Command::Quick { file } => run_quick(&file),
        Command::Show { file } => run_show(&file),
        Command::Generate { grid, generator } => run_generate(grid, &generator),
    }
}

/// Analyzes every file in parallel and prints the reports in argument order.
fn run_analyze(files: &[PathBuf], formula: Formula, config: &SearchConfig) -> ExitCode {
    let reports: Vec<Result<String, LevelError>> = files
        .par_iter()
        .map(|path| {
            let level = Level::load(path)?;
            let analysis = level.analyze(config);
            log::info!(
                "{}: {} states explored ({})",
                path.display(),
                analysis.states_explored,
                analysis.search_mode
            );
            Ok(format_analysis(&analysis, &analysis.difficulty(formula)))
        })
        .collect();

    let mut status = ExitCode::SUCCESS;
    for (path, report) in files.iter().zip(reports) {
        match report {
            Ok(report) => {
                if files.len() > 1 {
                    println!("== {}", path.display());
                }
                print!("{report}");
            }
            Err(e) => {
                eprintln!("{}: {e}", path.display());
                status = ExitCode::FAILURE;
            }
        }
    }
    status
}

/// Prints the greedy verdict for one file.
fn run_quick(file: &Path) -> ExitCode {
    match Level::load(file) {
        Ok(level) => {
            let quick = level.quick_solve();
            let verdict = if quick.solvable { "solvable" } else { "stuck" };
            println!("{verdict} after {} moves", quick.moves);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {e}", file.display());
            ExitCode::FAILURE
        }
    }
}

/// Draws square boards; hex levels are echoed in file form.
fn run_show(file: &Path) -> ExitCode {
    match Level::load(file) {
        Ok(Level::Square(puzzle)) => {
            print!("{}", format_square_board(&puzzle, &puzzle.initial_state()));
            ExitCode::SUCCESS
        }
        Ok(level @ Level::Hex(_)) => {
            print!("{}", level.to_text());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {e}", file.display());
            ExitCode::FAILURE
        }
    }
}

/// Generates a level and prints it, or fails if no attempt was solvable.
fn run_generate(grid: GridArgs, args: &GeneratorArgs) -> ExitCode {
    let config = GeneratorConfig {
        blocks: args.blocks,
        holes: args.holes,
        locked_ratio: args.locked_ratio,
        axis_ratio: args.axis_ratio,
        max_attempts: args.attempts,
    };

    let level: Option<Level> = match grid {
        GridArgs::Square { rows, cols } if rows > 0 && cols > 0 => {
            let grid = Square::new(rows, cols);
            if grid.cell_count() > MAX_CELLS {
                eprintln!("grid must have at most {MAX_CELLS} cells");
                return ExitCode::FAILURE;
            }
            generate(grid, &config, args.seed).map(Level::from)
        }
        GridArgs::Hex { radius } if radius >= 0 => {
            let grid = Hex::new(radius);
            if grid.cell_count() > MAX_CELLS {
                eprintln!("grid must have at most {MAX_CELLS} cells");
                return ExitCode::FAILURE;
            }
            generate(grid, &config, args.seed).map(Level::from)
        }
        _ => {
            eprintln!("grid dimensions must be positive");
            return ExitCode::FAILURE;
        }
    };

    match level {
        Some(level) => {
            print!("{}", level.to_text());
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("No solvable level found in {} attempts", args.attempts);
            ExitCode::FAILURE
        }
    }
}
