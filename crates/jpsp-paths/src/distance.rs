//! Distance helpers and goal-targeting predicates.

use std::f64::consts::SQRT_2;

use jpsp_core::{Direction, Point};

/// Cost of one step in `dir`: 1 for cardinal moves, √2 for diagonal ones.
#[inline]
pub fn step_cost(dir: Direction) -> f64 {
    if dir.is_diagonal() { SQRT_2 } else { 1.0 }
}

/// Octile distance: the exact cost between two points on an open 8-way grid.
#[inline]
pub fn octile(a: Point, b: Point) -> f64 {
    let dx = row_dist(a, b) as f64;
    let dy = col_dist(a, b) as f64;
    (dx + dy) + (SQRT_2 - 2.0) * dx.min(dy)
}

/// Absolute difference of rows.
#[inline]
pub fn row_dist(a: Point, b: Point) -> i32 {
    (a.y - b.y).abs()
}

/// Absolute difference of columns.
#[inline]
pub fn col_dist(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs()
}

/// Distance between two points on the same row or column.
#[inline]
pub fn axial_dist(a: Point, b: Point) -> i32 {
    debug_assert!(a.x == b.x || a.y == b.y, "{a} and {b} are not coaxial");
    row_dist(a, b) + col_dist(a, b)
}

/// Whether `target` lies strictly ahead of `from` on the line through `from`
/// in the cardinal direction `dir`.
///
/// # Panics
///
/// If `dir` is diagonal.
pub fn targets_exactly(from: Point, target: Point, dir: Direction) -> bool {
    match dir {
        Direction::N => from.x == target.x && target.y < from.y,
        Direction::S => from.x == target.x && target.y > from.y,
        Direction::W => from.y == target.y && target.x < from.x,
        Direction::E => from.y == target.y && target.x > from.x,
        _ => panic!("targets_exactly: {dir} is not a cardinal direction"),
    }
}

/// Whether `target` lies in the closed quadrant opened by the diagonal
/// direction `dir` at `from`.
///
/// # Panics
///
/// If `dir` is cardinal.
pub fn targets_generally(from: Point, target: Point, dir: Direction) -> bool {
    match dir {
        Direction::NE => target.x >= from.x && target.y <= from.y,
        Direction::SE => target.x >= from.x && target.y >= from.y,
        Direction::SW => target.x <= from.x && target.y >= from.y,
        Direction::NW => target.x <= from.x && target.y <= from.y,
        _ => panic!("targets_generally: {dir} is not a diagonal direction"),
    }
}
