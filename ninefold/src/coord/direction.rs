//! The nine cells of a 3×3 grid.

use std::fmt;
use std::str::FromStr;

use super::types::Vec2;

/// One cell of a 3×3 grid centered on [`Direction::Center`].
///
/// ```text
///  NW  N  NE
///    8 1 5
///  W 4 0 2 E
///    7 3 6
///  SW  S  SE
/// ```
///
/// The numeric code is stable: it names output directories and forms the
/// digits of [`DirectionAddress::path_id`](super::DirectionAddress::path_id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Direction {
    Center = 0,
    N = 1,
    E = 2,
    S = 3,
    W = 4,
    NE = 5,
    SE = 6,
    SW = 7,
    NW = 8,
}

impl Direction {
    /// All cells in code order.
    pub const ALL: [Direction; 9] = [
        Direction::Center,
        Direction::N,
        Direction::E,
        Direction::S,
        Direction::W,
        Direction::NE,
        Direction::SE,
        Direction::SW,
        Direction::NW,
    ];

    /// Numeric code in `0..=8`.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Look up a direction by its numeric code.
    pub fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Unit shift of the cell from the grid center, y up.
    pub const fn shift(self) -> (i8, i8) {
        match self {
            Direction::Center => (0, 0),
            Direction::N => (0, 1),
            Direction::E => (1, 0),
            Direction::S => (0, -1),
            Direction::W => (-1, 0),
            Direction::NE => (1, 1),
            Direction::SE => (1, -1),
            Direction::SW => (-1, -1),
            Direction::NW => (-1, 1),
        }
    }

    /// [`shift`](Self::shift) as a vector.
    pub fn shift_vector(self) -> Vec2 {
        let (x, y) = self.shift();
        Vec2::new(f64::from(x), f64::from(y))
    }

    /// Short compass name (`C` for the center).
    pub const fn name(self) -> &'static str {
        match self {
            Direction::Center => "C",
            Direction::N => "N",
            Direction::E => "E",
            Direction::S => "S",
            Direction::W => "W",
            Direction::NE => "NE",
            Direction::SE => "SE",
            Direction::SW => "SW",
            Direction::NW => "NW",
        }
    }
}

/// Shift vector for a raw direction code.
///
/// Codes outside `0..=8` resolve to [`Vec2::UNDEFINED`].
pub fn shift_of_code(code: i64) -> Vec2 {
    Direction::from_code(code)
        .map(Direction::shift_vector)
        .unwrap_or(Vec2::UNDEFINED)
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a direction name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown direction '{0}' (expected c, n, e, s, w, ne, se, sw, nw or a code 0-8)")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if let Ok(code) = lower.parse::<i64>() {
            return Direction::from_code(code).ok_or_else(|| ParseDirectionError(s.to_string()));
        }

        match lower.as_str() {
            "c" | "center" => Ok(Direction::Center),
            "n" => Ok(Direction::N),
            "e" => Ok(Direction::E),
            "s" => Ok(Direction::S),
            "w" => Ok(Direction::W),
            "ne" => Ok(Direction::NE),
            "se" => Ok(Direction::SE),
            "sw" => Ok(Direction::SW),
            "nw" => Ok(Direction::NW),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}
