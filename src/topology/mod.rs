//! Grid topologies the engine runs over.
//!
//! A topology fixes the coordinate type, its direction set, the pairs of
//! opposite directions a bidirectional block can use, and a dense
//! coordinate-to-cell index so per-puzzle lookups can be flat arrays.

mod hex;
mod square;

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

pub use hex::{Hex, HexAxis, HexCoord, HexDirection};
pub use square::{Square, SquareAxis, SquareCoord, SquareDirection};

/// A bounded grid with a fixed set of named directions.
///
/// Everything above this trait (oracle, search, metrics) is written once and
/// instantiated for [`Square`] and [`Hex`].
pub trait Topology: Copy + fmt::Debug + Eq + Hash {
    /// Cell coordinate. `Ord` is the canonical key order.
    type Coord: Copy + Eq + Ord + Hash + fmt::Debug + From<(i32, i32)> + Into<(i32, i32)>;
    /// A single exit direction.
    type Direction: Copy + Eq + Hash + fmt::Debug + fmt::Display + FromStr + 'static;
    /// A pair of opposite directions.
    type Axis: Copy + Eq + Hash + fmt::Debug + fmt::Display + FromStr + 'static;

    /// Short name used in level files and reports.
    const NAME: &'static str;
    /// Every direction, in a fixed order.
    const DIRECTIONS: &'static [Self::Direction];
    /// Every axis, in a fixed order.
    const AXES: &'static [Self::Axis];

    /// Moves `coord` one step in `direction`. The result may be out of bounds.
    fn offset(coord: Self::Coord, direction: Self::Direction) -> Self::Coord;

    /// The two opposite directions making up `axis`, preferred one first.
    fn axis_directions(axis: Self::Axis) -> [Self::Direction; 2];

    /// Returns `true` if `coord` lies on the grid.
    fn contains(&self, coord: Self::Coord) -> bool;

    /// Number of cells on the grid.
    fn cell_count(&self) -> usize;

    /// Dense index of an in-bounds cell, in canonical key order.
    fn cell_index(&self, coord: Self::Coord) -> Option<usize>;

    /// Inverse of [`Topology::cell_index`].
    fn cell_coord(&self, index: usize) -> Self::Coord;

    /// In-bounds cells adjacent to `coord`.
    fn neighbors(&self, coord: Self::Coord) -> impl Iterator<Item = Self::Coord> + '_ {
        Self::DIRECTIONS
            .iter()
            .map(move |&direction| Self::offset(coord, direction))
            .filter(move |&neighbor| self.contains(neighbor))
    }
}

/// Where a block is allowed to exit: one direction, or either side of an axis.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading<T: Topology> {
    Toward(T::Direction),
    Along(T::Axis),
}

impl<T: Topology> Heading<T> {
    /// The directions this heading may exit through, in preference order.
    pub fn exits(self) -> impl Iterator<Item = T::Direction> {
        let (first, second) = match self {
            Heading::Toward(direction) => (direction, None),
            Heading::Along(axis) => {
                let [first, second] = T::axis_directions(axis);
                (first, Some(second))
            }
        };
        std::iter::once(first).chain(second)
    }

    /// Returns `true` for bidirectional headings.
    pub fn is_axis(self) -> bool {
        matches!(self, Heading::Along(_))
    }
}

impl<T: Topology> fmt::Debug for Heading<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Heading::Toward(direction) => write!(f, "Toward({direction:?})"),
            Heading::Along(axis) => write!(f, "Along({axis:?})"),
        }
    }
}

impl<T: Topology> fmt::Display for Heading<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Heading::Toward(direction) => direction.fmt(f),
            Heading::Along(axis) => axis.fmt(f),
        }
    }
}

impl<T: Topology> FromStr for Heading<T> {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(direction) = s.parse::<T::Direction>() {
            return Ok(Heading::Toward(direction));
        }
        s.parse::<T::Axis>().map(Heading::Along).map_err(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_heading_has_one_exit() {
        let heading: Heading<Square> = Heading::Toward(SquareDirection::E);
        assert_eq!(heading.exits().collect::<Vec<_>>(), vec![SquareDirection::E]);
        assert!(!heading.is_axis());
    }

    #[test]
    fn test_axis_heading_has_opposite_exits() {
        let heading: Heading<Hex> = Heading::Along(HexAxis::NeSw);
        assert_eq!(
            heading.exits().collect::<Vec<_>>(),
            vec![HexDirection::NE, HexDirection::SW]
        );
    }

    #[test]
    fn test_heading_parses_directions_and_axes() {
        assert_eq!("N".parse::<Heading<Square>>(), Ok(Heading::Toward(SquareDirection::N)));
        assert_eq!("EW".parse::<Heading<Square>>(), Ok(Heading::Along(SquareAxis::EastWest)));
        assert_eq!("NW-SE".parse::<Heading<Hex>>(), Ok(Heading::Along(HexAxis::NwSe)));
        assert!("NE".parse::<Heading<Square>>().is_err());
    }

    #[test]
    fn test_heading_display_matches_parse() {
        for &axis in Hex::AXES {
            let heading: Heading<Hex> = Heading::Along(axis);
            assert_eq!(heading.to_string().parse::<Heading<Hex>>(), Ok(heading));
        }
        for &direction in Square::DIRECTIONS {
            let heading: Heading<Square> = Heading::Toward(direction);
            assert_eq!(heading.to_string().parse::<Heading<Square>>(), Ok(heading));
        }
    }
}
