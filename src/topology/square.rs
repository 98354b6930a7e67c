//! Rectangular grid with four directions.
//!
//! Row 0 is the top edge, so north decreases the row.

use std::str::FromStr;

use super::Topology;

/// A cell on a rectangular grid. Ordered row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SquareCoord {
    pub row: i32,
    pub col: i32,
}

impl SquareCoord {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl From<(i32, i32)> for SquareCoord {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

impl From<SquareCoord> for (i32, i32) {
    fn from(coord: SquareCoord) -> Self {
        (coord.row, coord.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SquareDirection {
    #[display("N")]
    N,
    #[display("E")]
    E,
    #[display("S")]
    S,
    #[display("W")]
    W,
}

impl FromStr for SquareDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N" => Ok(Self::N),
            "E" => Ok(Self::E),
            "S" => Ok(Self::S),
            "W" => Ok(Self::W),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SquareAxis {
    #[display("NS")]
    NorthSouth,
    #[display("EW")]
    EastWest,
}

impl FromStr for SquareAxis {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NS" => Ok(Self::NorthSouth),
            "EW" => Ok(Self::EastWest),
            _ => Err(()),
        }
    }
}

/// A `rows` x `cols` rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    rows: i32,
    cols: i32,
}

impl Square {
    /// Creates a grid. Both dimensions must be positive.
    pub const fn new(rows: i32, cols: i32) -> Self {
        assert!(rows > 0 && cols > 0, "grid dimensions must be positive");
        Self { rows, cols }
    }

    pub const fn rows(&self) -> i32 {
        self.rows
    }

    pub const fn cols(&self) -> i32 {
        self.cols
    }
}

impl Topology for Square {
    type Coord = SquareCoord;
    type Direction = SquareDirection;
    type Axis = SquareAxis;

    const NAME: &'static str = "square";
    const DIRECTIONS: &'static [SquareDirection] = &[
        SquareDirection::N,
        SquareDirection::E,
        SquareDirection::S,
        SquareDirection::W,
    ];
    const AXES: &'static [SquareAxis] = &[SquareAxis::NorthSouth, SquareAxis::EastWest];

    #[inline]
    fn offset(coord: SquareCoord, direction: SquareDirection) -> SquareCoord {
        let (d_row, d_col) = match direction {
            SquareDirection::N => (-1, 0),
            SquareDirection::E => (0, 1),
            SquareDirection::S => (1, 0),
            SquareDirection::W => (0, -1),
        };
        SquareCoord::new(coord.row + d_row, coord.col + d_col)
    }

    fn axis_directions(axis: SquareAxis) -> [SquareDirection; 2] {
        match axis {
            SquareAxis::NorthSouth => [SquareDirection::N, SquareDirection::S],
            SquareAxis::EastWest => [SquareDirection::E, SquareDirection::W],
        }
    }

    #[inline]
    fn contains(&self, coord: SquareCoord) -> bool {
        (0..self.rows).contains(&coord.row) && (0..self.cols).contains(&coord.col)
    }

    /// Saturates instead of overflowing on absurd dimensions.
    fn cell_count(&self) -> usize {
        (self.rows as usize).saturating_mul(self.cols as usize)
    }

    #[inline]
    fn cell_index(&self, coord: SquareCoord) -> Option<usize> {
        self.contains(coord)
            .then(|| coord.row as usize * self.cols as usize + coord.col as usize)
    }

    fn cell_coord(&self, index: usize) -> SquareCoord {
        let index = index as i32;
        SquareCoord::new(index / self.cols, index % self.cols)
    }
}
