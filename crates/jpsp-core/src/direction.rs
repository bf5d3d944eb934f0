//! The eight compass directions and sets of them.
//!
//! Directions live on a ring in rose order (N, NE, E, SE, S, SW, W, NW).
//! Relative directions such as "left back" are ring rotations: negative
//! offsets turn counter-clockwise, positive ones clockwise.

use std::fmt;

use crate::geom::Point;

/// A compass direction. North points towards row 0.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

use Direction::*;

impl Direction {
    /// The ring, clockwise from north. A direction's ring position is its
    /// index in this table.
    pub const ROSE: [Direction; 8] = [N, NE, E, SE, S, SW, W, NW];

    /// N, E, S, W.
    pub const CARDINALS: [Direction; 4] = [N, E, S, W];

    /// NE, SE, SW, NW.
    pub const DIAGONALS: [Direction; 4] = [NE, SE, SW, NW];

    /// Position of the direction on the ring (`N` = 0, `NE` = 1, ...).
    #[inline]
    pub const fn rose_index(self) -> usize {
        match self {
            N => 0,
            NE => 1,
            E => 2,
            SE => 3,
            S => 4,
            SW => 5,
            W => 6,
            NW => 7,
        }
    }

    /// Direction at ring position `index`, taken modulo 8.
    #[inline]
    pub fn from_rose(index: i32) -> Self {
        Self::ROSE[index.rem_euclid(8) as usize]
    }

    /// Rotate by `offset` eighth-turns, clockwise for positive offsets.
    #[inline]
    pub fn rotated(self, offset: i32) -> Self {
        Self::from_rose(self.rose_index() as i32 + offset)
    }

    #[inline]
    pub const fn is_cardinal(self) -> bool {
        matches!(self, N | E | S | W)
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        !self.is_cardinal()
    }

    #[inline]
    pub fn left_front(self) -> Self {
        self.rotated(-1)
    }

    #[inline]
    pub fn right_front(self) -> Self {
        self.rotated(1)
    }

    #[inline]
    pub fn left(self) -> Self {
        self.rotated(-2)
    }

    #[inline]
    pub fn right(self) -> Self {
        self.rotated(2)
    }

    #[inline]
    pub fn left_back(self) -> Self {
        self.rotated(-3)
    }

    #[inline]
    pub fn right_back(self) -> Self {
        self.rotated(3)
    }

    #[inline]
    pub fn back(self) -> Self {
        self.rotated(4)
    }

    /// Whether the two directions are a quarter turn apart.
    pub fn orthogonal_to(self, other: Direction) -> bool {
        let d = (self.rose_index() as i32 - other.rose_index() as i32).rem_euclid(8);
        d == 2 || d == 6
    }

    /// Unit step for this direction.
    #[inline]
    pub const fn delta(self) -> Point {
        match self {
            N => Point::new(0, -1),
            NE => Point::new(1, -1),
            E => Point::new(1, 0),
            SE => Point::new(1, 1),
            S => Point::new(0, 1),
            SW => Point::new(-1, 1),
            W => Point::new(-1, 0),
            NW => Point::new(-1, -1),
        }
    }

    /// Directions worth continuing in after arriving while travelling in
    /// `self`: everything except the backward half of the rose.
    pub fn next_directions(self) -> DirectionSet {
        if self.is_diagonal() {
            DirectionSet::from_iter([self.left_front(), self, self.right_front()])
        } else {
            DirectionSet::from_iter([
                self.left(),
                self.left_front(),
                self,
                self.right_front(),
                self.right(),
            ])
        }
    }

    /// Upper-case compass name.
    pub const fn name(self) -> &'static str {
        match self {
            N => "N",
            NE => "NE",
            E => "E",
            SE => "SE",
            S => "S",
            SW => "SW",
            W => "W",
            NW => "NW",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// DirectionSet
// ---------------------------------------------------------------------------

/// A set of directions stored as one bit per ring position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectionSet(u8);

impl DirectionSet {
    pub const EMPTY: Self = Self(0);
    pub const ALL: Self = Self(0xff);

    #[inline]
    const fn bit(d: Direction) -> u8 {
        1 << d.rose_index()
    }

    #[inline]
    pub fn insert(&mut self, d: Direction) {
        self.0 |= Self::bit(d);
    }

    #[inline]
    pub const fn contains(self, d: Direction) -> bool {
        self.0 & Self::bit(d) != 0
    }

    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in rose order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ROSE.into_iter().filter(move |&d| self.contains(d))
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for d in iter {
            set.insert(d);
        }
        set
    }
}

impl fmt::Display for DirectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, d) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(d.name())?;
        }
        f.write_str("}")
    }
}
