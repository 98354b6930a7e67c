//! Hexagonal grid in axial coordinates (pointy-top).
//!
//! The board is a hexagon of a given radius around the origin: a cell
//! `(q, r)` is on the board when `max(|q|, |r|, |q + r|) <= radius`.

use std::str::FromStr;

use super::Topology;

/// A cell in axial coordinates. Ordered q-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Distance from the origin in hex steps.
    pub const fn ring(self) -> i32 {
        let s = -self.q - self.r;
        let a = self.q.abs();
        let b = self.r.abs();
        let c = s.abs();
        if a >= b && a >= c {
            a
        } else if b >= c {
            b
        } else {
            c
        }
    }
}

impl From<(i32, i32)> for HexCoord {
    fn from((q, r): (i32, i32)) -> Self {
        Self { q, r }
    }
}

impl From<HexCoord> for (i32, i32) {
    fn from(coord: HexCoord) -> Self {
        (coord.q, coord.r)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum HexDirection {
    #[display("E")]
    E,
    #[display("NE")]
    NE,
    #[display("NW")]
    NW,
    #[display("W")]
    W,
    #[display("SW")]
    SW,
    #[display("SE")]
    SE,
}

impl FromStr for HexDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "E" => Ok(Self::E),
            "NE" => Ok(Self::NE),
            "NW" => Ok(Self::NW),
            "W" => Ok(Self::W),
            "SW" => Ok(Self::SW),
            "SE" => Ok(Self::SE),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum HexAxis {
    #[display("E-W")]
    EW,
    #[display("NE-SW")]
    NeSw,
    #[display("NW-SE")]
    NwSe,
}

impl FromStr for HexAxis {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "E-W" => Ok(Self::EW),
            "NE-SW" => Ok(Self::NeSw),
            "NW-SE" => Ok(Self::NwSe),
            _ => Err(()),
        }
    }
}

/// A hexagon-shaped board of the given radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hex {
    radius: i32,
}

impl Hex {
    /// Creates a board. A radius of 0 is a single cell.
    pub const fn new(radius: i32) -> Self {
        assert!(radius >= 0, "hex radius must not be negative");
        Self { radius }
    }

    pub const fn radius(&self) -> i32 {
        self.radius
    }

    /// Valid `r` range for column `q`.
    #[inline]
    fn column_bounds(&self, q: i32) -> (i32, i32) {
        let r_min = (-self.radius).max(-q - self.radius);
        let r_max = self.radius.min(-q + self.radius);
        (r_min, r_max)
    }

    #[inline]
    fn column_len(&self, q: i32) -> i32 {
        2 * self.radius + 1 - q.abs()
    }

    /// Index of the first cell in column `q`, in closed form.
    ///
    /// Columns left of `q` each hold `2R + 1 - |c|` cells; the `|c|` terms
    /// are summed as triangular numbers on either side of column 0.
    #[inline]
    fn column_start(&self, q: i32) -> usize {
        let radius = self.radius as usize;
        let width = 2 * radius + 1;
        let triangle = |n: usize| n * (n + 1) / 2;
        // columns -R..min(q, 0)
        let left = (q.min(0) + self.radius) as usize;
        let left_cells = left * width - (triangle(radius) - triangle(radius - left));
        // columns 0..q
        let right = q.max(0) as usize;
        let right_cells = right * width - triangle(right) + right;
        left_cells + right_cells
    }
}

impl Topology for Hex {
    type Coord = HexCoord;
    type Direction = HexDirection;
    type Axis = HexAxis;

    const NAME: &'static str = "hex";
    const DIRECTIONS: &'static [HexDirection] = &[
        HexDirection::E,
        HexDirection::NE,
        HexDirection::NW,
        HexDirection::W,
        HexDirection::SW,
        HexDirection::SE,
    ];
    const AXES: &'static [HexAxis] = &[HexAxis::EW, HexAxis::NeSw, HexAxis::NwSe];

    #[inline]
    fn offset(coord: HexCoord, direction: HexDirection) -> HexCoord {
        let (dq, dr) = match direction {
            HexDirection::E => (1, 0),
            HexDirection::NE => (1, -1),
            HexDirection::NW => (0, -1),
            HexDirection::W => (-1, 0),
            HexDirection::SW => (-1, 1),
            HexDirection::SE => (0, 1),
        };
        HexCoord::new(coord.q + dq, coord.r + dr)
    }

    fn axis_directions(axis: HexAxis) -> [HexDirection; 2] {
        match axis {
            HexAxis::EW => [HexDirection::E, HexDirection::W],
            HexAxis::NeSw => [HexDirection::NE, HexDirection::SW],
            HexAxis::NwSe => [HexDirection::NW, HexDirection::SE],
        }
    }

    #[inline]
    fn contains(&self, coord: HexCoord) -> bool {
        coord.ring() <= self.radius
    }

    /// Saturates instead of overflowing on absurd radii.
    fn cell_count(&self) -> usize {
        let radius = self.radius as usize;
        3usize
            .saturating_mul(radius)
            .saturating_mul(radius + 1)
            .saturating_add(1)
    }

    fn cell_index(&self, coord: HexCoord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        let (r_min, _) = self.column_bounds(coord.q);
        Some(self.column_start(coord.q) + (coord.r - r_min) as usize)
    }

    fn cell_coord(&self, index: usize) -> HexCoord {
        let mut remaining = index as i32;
        for q in -self.radius..=self.radius {
            let len = self.column_len(q);
            if remaining < len {
                let (r_min, _) = self.column_bounds(q);
                return HexCoord::new(q, r_min + remaining);
            }
            remaining -= len;
        }
        panic!("cell index {index} out of range for radius {}", self.radius);
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_cell_count_matches_hexagonal_numbers() {
        assert_eq!(Hex::new(0).cell_count(), 1);
        assert_eq!(Hex::new(1).cell_count(), 7);
        assert_eq!(Hex::new(2).cell_count(), 19);
        assert_eq!(Hex::new(3).cell_count(), 37);
    }

    #[test]
    fn test_cell_index_roundtrip() {
        let grid = Hex::new(3);
        for idx in 0..grid.cell_count() {
            let coord = grid.cell_coord(idx);
            assert!(grid.contains(coord), "cell {idx} mapped out of bounds: {coord:?}");
            assert_eq!(grid.cell_index(coord), Some(idx), "roundtrip failed for {idx}");
        }
    }

    #[test]
    fn test_column_start_matches_running_sum() {
        for radius in 0..8 {
            let grid = Hex::new(radius);
            let mut start = 0;
            for q in -radius..=radius {
                assert_eq!(grid.column_start(q), start, "radius {radius}, column {q}");
                start += grid.column_len(q) as usize;
            }
            assert_eq!(start, grid.cell_count());
        }
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_huge_radius_cell_count_does_not_overflow() {
        assert_eq!(Hex::new(100_000).cell_count(), 30_000_300_001);
        assert!(Hex::new(i32::MAX).cell_count() > u32::MAX as usize);
    }

    #[test]
    fn test_cell_index_follows_coord_order() {
        let grid = Hex::new(2);
        let coords: Vec<_> = (0..grid.cell_count()).map(|i| grid.cell_coord(i)).collect();
        let mut sorted = coords.clone();
        sorted.sort();
        assert_eq!(coords, sorted);
    }

    #[test]
    fn test_interior_cell_has_six_neighbors() {
        let grid = Hex::new(2);
        assert_eq!(grid.neighbors(HexCoord::new(0, 0)).count(), 6);
        // corner of the hexagon
        assert_eq!(grid.neighbors(HexCoord::new(2, 0)).count(), 3);
    }

    #[test]
    fn test_axis_directions_are_opposite() {
        for &axis in Hex::AXES {
            let [a, b] = Hex::axis_directions(axis);
            let origin = HexCoord::new(0, 0);
            assert_eq!(Hex::offset(Hex::offset(origin, a), b), origin);
        }
    }

    proptest! {
        #[test]
        fn prop_contains_agrees_with_cell_index(radius in 0i32..6, q in -8i32..8, r in -8i32..8) {
            let grid = Hex::new(radius);
            let coord = HexCoord::new(q, r);
            prop_assert_eq!(grid.contains(coord), grid.cell_index(coord).is_some());
        }

        #[test]
        fn prop_every_step_changes_ring_by_at_most_one(q in -5i32..5, r in -5i32..5) {
            let coord = HexCoord::new(q, r);
            for &direction in Hex::DIRECTIONS {
                let next = Hex::offset(coord, direction);
                prop_assert!((next.ring() - coord.ring()).abs() <= 1);
            }
        }
    }
}
