//! Hex board geometry with cube coordinates

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Cube hex coordinates. On-board coordinates always satisfy `y + p + n == 0`.
///
/// Ordering is lexicographic on `(y, p, n)`, which reads the board
/// top row first and left to right within a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub y: i32,
    pub p: i32,
    pub n: i32,
}

impl Coord {
    pub const fn new(y: i32, p: i32, n: i32) -> Self {
        Self { y, p, n }
    }

    /// The board centre
    pub const ORIGIN: Coord = Coord::new(0, 0, 0);

    /// Check the cube-sum invariant
    pub fn is_cube(&self) -> bool {
        self.y + self.p + self.n == 0
    }

    /// Check if this coordinate is on a board of the given radius
    pub fn is_in_range(&self, radius: i32) -> bool {
        is_in_range(*self, radius)
    }

    /// Largest absolute component
    pub fn max_abs(&self) -> i32 {
        self.y.abs().max(self.p.abs()).max(self.n.abs())
    }

    /// Distance from center (0,0,0)
    pub fn distance_to_center(&self) -> i32 {
        (self.y.abs() + self.p.abs() + self.n.abs()) / 2
    }

    /// Step once along a direction vector
    pub fn offset(&self, dir: Coord) -> Coord {
        Coord::new(self.y + dir.y, self.p + dir.p, self.n + dir.n)
    }

    /// Same direction scaled by `k`
    pub fn scale(&self, k: i32) -> Coord {
        Coord::new(self.y * k, self.p * k, self.n * k)
    }

    /// The six adjacent coordinates, in [`DIRECTIONS`] order
    pub fn neighbors(&self) -> impl Iterator<Item = Coord> + '_ {
        DIRECTIONS.iter().map(move |&d| self.offset(d))
    }

    /// Two of the three components sit on the rim
    pub fn is_corner(&self, radius: i32) -> bool {
        let on_rim = [self.y, self.p, self.n]
            .iter()
            .filter(|c| c.abs() == radius)
            .count();
        on_rim >= 2
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.y, self.p, self.n)
    }
}

/// Error from parsing a coordinate string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected three integers `y p n`, got {0:?}")]
pub struct ParseCoordError(pub String);

impl FromStr for Coord {
    type Err = ParseCoordError;

    /// Accepts `y p n`, `y,p,n` and `(y, p, n)`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<i32> = s
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')')
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<i32>())
            .collect::<Result<_, _>>()
            .map_err(|_| ParseCoordError(s.to_string()))?;

        match parts.as_slice() {
            &[y, p, n] => Ok(Coord::new(y, p, n)),
            _ => Err(ParseCoordError(s.to_string())),
        }
    }
}

/// Direction vectors in cube coordinates (dy, dp, dn).
/// Opposite directions are three apart.
pub const DIRECTIONS: [Coord; 6] = [
    Coord::new(-1, 0, 1),
    Coord::new(0, -1, 1),
    Coord::new(1, -1, 0),
    Coord::new(1, 0, -1),
    Coord::new(0, 1, -1),
    Coord::new(-1, 1, 0),
];

/// Check if a coordinate is on a board of the given radius
pub fn is_in_range(coord: Coord, radius: i32) -> bool {
    coord.is_cube() && coord.max_abs() <= radius
}

/// Number of cells on a board of the given radius
pub fn cell_count(radius: i32) -> usize {
    if radius < 0 {
        return 0;
    }
    let r = radius as usize;
    3 * r * (r + 1) + 1
}

/// Every on-board coordinate in ascending `(y, p, n)` order
pub fn all_in_range(radius: i32) -> Vec<Coord> {
    let mut coords = Vec::with_capacity(cell_count(radius));
    for y in -radius..=radius {
        for p in -radius..=radius {
            let c = Coord::new(y, p, -y - p);
            if c.is_in_range(radius) {
                coords.push(c);
            }
        }
    }
    coords
}
