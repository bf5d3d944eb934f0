//! Error types for grid construction, search setup and puzzle parsing.

use std::fmt;

use jpsp_core::{Direction, Point};

/// Errors raised while building a [`Grid`](crate::Grid).
///
/// Construction is all-or-nothing: when one of these is returned no grid
/// exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// The map has no rows, or its first row has no columns.
    #[error("map is empty")]
    Empty,

    /// A row's width differs from the first row's.
    #[error("map row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Declared dimensions disagree with the rows supplied.
    #[error("map declared as {width}x{height} but has {rows} rows")]
    RowCount {
        width: usize,
        height: usize,
        rows: usize,
    },

    /// A precomputed tile lies outside the declared grid.
    #[error("precomputed tile {0} lies outside the grid")]
    OutOfBounds(Point),

    /// The same tile was listed twice in a precomputed table.
    #[error("precomputed tile {0} listed more than once")]
    Duplicate(Point),

    /// A precomputed jump distance runs into a wall, cuts a wall corner or
    /// leaves the grid.
    #[error("precomputed tile {pos}: {dir} distance {distance} crosses a wall or the map edge")]
    BlockedJump {
        pos: Point,
        dir: Direction,
        distance: i32,
    },
}

/// Which end of a search a [`SearchError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Goal => f.write_str("goal"),
        }
    }
}

/// Invalid search requests, rejected before the frontier is seeded.
///
/// Failing to find a path is not an error; see
/// [`Outcome::NoPath`](crate::Outcome::NoPath).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("{which} {pos} lies outside the grid")]
    OutOfBounds { which: Endpoint, pos: Point },

    #[error("{which} {pos} is not a passable tile")]
    NotPassable { which: Endpoint, pos: Point },
}

/// Errors raised while reading the puzzle text formats.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("invalid {expected}: {token:?}")]
    InvalidNumber {
        expected: &'static str,
        token: String,
    },

    #[error(transparent)]
    Grid(#[from] GridError),
}
