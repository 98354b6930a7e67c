//! Plain-text level files.
//!
//! ```text
//! # comment
//! grid square <rows> <cols>       (or: grid hex <radius>)
//! block <a> <b> <heading> [locked]
//! hole <a> <b>
//! ```
//!
//! `<a> <b>` is `row col` on square grids and axial `q r` on hex grids.
//! Block ids follow file order.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use rustc_hash::FxHashSet;

use crate::analysis::{analyze, Analysis};
use crate::puzzle::{Block, Puzzle};
use crate::quick::{quick_solve, QuickSolve};
use crate::search::SearchConfig;
use crate::topology::{Heading, Hex, Square, Topology};

/// Errors raised while reading a level file.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum LevelError {
    #[display("failed to read level: {_0}")]
    #[from]
    Io(std::io::Error),
    #[display("level has no grid line")]
    NoGrid,
    #[display("line {line}: grid already declared")]
    DuplicateGrid { line: usize },
    #[display("line {line}: unknown directive {directive:?}")]
    UnknownDirective { line: usize, directive: String },
    #[display("line {line}: expected {expected}")]
    Malformed { line: usize, expected: &'static str },
    #[display("line {line}: unknown {topology} heading {heading:?}")]
    UnknownHeading {
        line: usize,
        heading: String,
        topology: &'static str,
    },
    #[display("line {line}: ({a}, {b}) is outside the grid")]
    OutOfBounds { line: usize, a: i32, b: i32 },
    #[display("line {line}: cell ({a}, {b}) is already used")]
    CellTaken { line: usize, a: i32, b: i32 },
}

/// Largest board a level file may declare.
pub const MAX_CELLS: usize = 1 << 20;

/// A level on either topology.
#[derive(Debug, Clone)]
pub enum Level {
    Square(Puzzle<Square>),
    Hex(Puzzle<Hex>),
}

impl From<Puzzle<Square>> for Level {
    fn from(puzzle: Puzzle<Square>) -> Self {
        Level::Square(puzzle)
    }
}

impl From<Puzzle<Hex>> for Level {
    fn from(puzzle: Puzzle<Hex>) -> Self {
        Level::Hex(puzzle)
    }
}

impl Level {
    /// Reads and parses a level file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parses level text.
    pub fn parse(text: &str) -> Result<Self, LevelError> {
        let lines: Vec<(usize, Vec<&str>)> = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.split('#').next().unwrap_or("")))
            .map(|(number, line)| (number, line.split_whitespace().collect::<Vec<_>>()))
            .filter(|(_, words)| !words.is_empty())
            .collect();

        let mut grid = None;
        for (number, words) in &lines {
            if words[0] != "grid" {
                continue;
            }
            if grid.is_some() {
                return Err(LevelError::DuplicateGrid { line: *number });
            }
            grid = Some((*number, words.clone()));
        }
        let (grid_line, grid) = grid.ok_or(LevelError::NoGrid)?;

        match grid.get(1..) {
            Some(["square", rows, cols]) => {
                let rows = parse_number(rows, grid_line, "positive grid rows")?;
                let cols = parse_number(cols, grid_line, "positive grid cols")?;
                if rows <= 0 || cols <= 0 {
                    return Err(LevelError::Malformed {
                        line: grid_line,
                        expected: "positive grid dimensions",
                    });
                }
                let grid = bounded(Square::new(rows, cols), grid_line)?;
                parse_items(grid, &lines).map(Level::Square)
            }
            Some(["hex", radius]) => {
                let radius = parse_number(radius, grid_line, "hex radius")?;
                if radius < 0 {
                    return Err(LevelError::Malformed {
                        line: grid_line,
                        expected: "non-negative hex radius",
                    });
                }
                let grid = bounded(Hex::new(radius), grid_line)?;
                parse_items(grid, &lines).map(Level::Hex)
            }
            _ => Err(LevelError::Malformed {
                line: grid_line,
                expected: "`grid square <rows> <cols>` or `grid hex <radius>`",
            }),
        }
    }

    /// Writes the level back in file form.
    pub fn to_text(&self) -> String {
        match self {
            Level::Square(puzzle) => {
                let grid = puzzle.topology();
                write_items(format!("grid square {} {}", grid.rows(), grid.cols()), puzzle)
            }
            Level::Hex(puzzle) => {
                write_items(format!("grid hex {}", puzzle.topology().radius()), puzzle)
            }
        }
    }

    pub fn analyze(&self, config: &SearchConfig) -> Analysis {
        match self {
            Level::Square(puzzle) => analyze(puzzle, config),
            Level::Hex(puzzle) => analyze(puzzle, config),
        }
    }

    pub fn quick_solve(&self) -> QuickSolve {
        match self {
            Level::Square(puzzle) => quick_solve(puzzle),
            Level::Hex(puzzle) => quick_solve(puzzle),
        }
    }
}

fn parse_number(word: &str, line: usize, expected: &'static str) -> Result<i32, LevelError> {
    word.parse()
        .map_err(|_| LevelError::Malformed { line, expected })
}

fn bounded<T: Topology>(topology: T, line: usize) -> Result<T, LevelError> {
    if topology.cell_count() > MAX_CELLS {
        return Err(LevelError::Malformed {
            line,
            expected: "a grid of at most 1048576 cells",
        });
    }
    Ok(topology)
}

fn parse_items<T: Topology>(
    topology: T,
    lines: &[(usize, Vec<&str>)],
) -> Result<Puzzle<T>, LevelError> {
    let mut blocks: Vec<Block<T>> = Vec::new();
    let mut holes: Vec<T::Coord> = Vec::new();
    let mut used: FxHashSet<T::Coord> = FxHashSet::default();

    let mut place = |line: usize, a: &str, b: &str| -> Result<T::Coord, LevelError> {
        let a = parse_number(a, line, "integer coordinates")?;
        let b = parse_number(b, line, "integer coordinates")?;
        let coord = <T::Coord>::from((a, b));
        if !topology.contains(coord) {
            return Err(LevelError::OutOfBounds { line, a, b });
        }
        if !used.insert(coord) {
            return Err(LevelError::CellTaken { line, a, b });
        }
        Ok(coord)
    };

    for (line, words) in lines {
        let line = *line;
        match words.as_slice() {
            ["grid", ..] => {}
            ["block", a, b, heading, rest @ ..] => {
                let locked = match rest {
                    [] => false,
                    ["locked"] => true,
                    _ => {
                        return Err(LevelError::Malformed {
                            line,
                            expected: "`block <a> <b> <heading> [locked]`",
                        })
                    }
                };
                let coord = place(line, *a, *b)?;
                let heading: Heading<T> =
                    heading.parse().map_err(|()| LevelError::UnknownHeading {
                        line,
                        heading: heading.to_string(),
                        topology: T::NAME,
                    })?;
                blocks.push(Block {
                    id: blocks.len() as u32,
                    coord,
                    heading,
                    locked,
                });
            }
            ["block", ..] => {
                return Err(LevelError::Malformed {
                    line,
                    expected: "`block <a> <b> <heading> [locked]`",
                })
            }
            ["hole", a, b] => holes.push(place(line, *a, *b)?),
            ["hole", ..] => {
                return Err(LevelError::Malformed {
                    line,
                    expected: "`hole <a> <b>`",
                })
            }
            [directive, ..] => {
                return Err(LevelError::UnknownDirective {
                    line,
                    directive: directive.to_string(),
                })
            }
            [] => {}
        }
    }

    Ok(Puzzle::new(topology, blocks, holes))
}

fn write_items<T: Topology>(header: String, puzzle: &Puzzle<T>) -> String {
    let mut out = header;
    out.push('\n');
    for block in puzzle.blocks() {
        let (a, b): (i32, i32) = block.coord.into();
        let _ = write!(out, "block {a} {b} {}", block.heading);
        if block.locked {
            out.push_str(" locked");
        }
        out.push('\n');
    }
    for &hole in puzzle.holes() {
        let (a, b): (i32, i32) = hole.into();
        let _ = writeln!(out, "hole {a} {b}");
    }
    out
}
