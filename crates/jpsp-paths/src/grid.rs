//! The preprocessed JPS+ grid.
//!
//! A [`Grid`] is built once from a character map. Construction finds the
//! primary jump points of every passable tile, then runs the cardinal and
//! diagonal sweeps (see `sweep.rs`) that fill in each tile's
//! [`DistanceMap`]. The grid is immutable afterwards.

use std::ops::{Index, IndexMut};

use jpsp_core::{Direction, DirectionSet, Point, Range};

use crate::error::GridError;

/// Character marking a passable tile. Anything else is a wall.
pub const EMPTY_CHAR: char = '.';

// ---------------------------------------------------------------------------
// DistanceMap
// ---------------------------------------------------------------------------

/// Signed jump distance per direction, indexed by [`Direction`].
///
/// A positive value `n` means a jump point lies `n` steps away in that
/// direction. Zero or a negative value `-n` means the run ends at a wall or
/// the map edge after `n` steps with no jump point on the way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceMap([i32; 8]);

impl DistanceMap {
    /// Build a map from values listed in rose order (N, NE, E, ...).
    pub const fn from_rose(values: [i32; 8]) -> Self {
        Self(values)
    }

    /// Values in rose order.
    pub const fn to_rose(self) -> [i32; 8] {
        self.0
    }
}

impl Index<Direction> for DistanceMap {
    type Output = i32;
    #[inline]
    fn index(&self, d: Direction) -> &i32 {
        &self.0[d.rose_index()]
    }
}

impl IndexMut<Direction> for DistanceMap {
    #[inline]
    fn index_mut(&mut self, d: Direction) -> &mut i32 {
        &mut self.0[d.rose_index()]
    }
}

// ---------------------------------------------------------------------------
// Tile
// ---------------------------------------------------------------------------

/// One cell of the grid, or the sentinel beyond its edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tile {
    /// Outside the map. Only ever handed out by [`Grid::tile`].
    Border,
    /// Impassable. Its distances are scratch values of the sweeps.
    Wall { distances: DistanceMap },
    /// Passable.
    Empty {
        /// Directions of travel in which this tile is a primary jump point.
        jump_points: DirectionSet,
        distances: DistanceMap,
    },
}

static BORDER: Tile = Tile::Border;

impl Tile {
    #[inline]
    pub fn is_passable(&self) -> bool {
        matches!(self, Tile::Empty { .. })
    }

    #[inline]
    pub fn is_wall(&self) -> bool {
        matches!(self, Tile::Wall { .. })
    }

    #[inline]
    pub fn is_border(&self) -> bool {
        matches!(self, Tile::Border)
    }

    /// Distance data, present for walls and empty tiles.
    pub fn distances(&self) -> Option<&DistanceMap> {
        match self {
            Tile::Border => None,
            Tile::Wall { distances } | Tile::Empty { distances, .. } => Some(distances),
        }
    }

    /// Primary jump point directions, present for empty tiles.
    pub fn jump_points(&self) -> Option<DirectionSet> {
        match self {
            Tile::Empty { jump_points, .. } => Some(*jump_points),
            _ => None,
        }
    }
}

/// A row of a precomputed distance table: a passable tile and its distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrecomputedTile {
    pub pos: Point,
    pub distances: DistanceMap,
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// Immutable map with JPS+ distances for every tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub(crate) rng: Range,
    /// Row-major; never holds [`Tile::Border`].
    pub(crate) tiles: Vec<Tile>,
}

impl Grid {
    /// Build a grid from a newline-separated character map.
    ///
    /// `'.'` is passable, every other character is a wall. `\r\n` endings
    /// and a trailing newline are accepted.
    pub fn parse(map: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = map.lines().collect();
        Self::from_rows(&rows)
    }

    /// Build a grid from map rows of equal width.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, |r| r.as_ref().chars().count());
        if width == 0 {
            return Err(GridError::Empty);
        }
        let mut tiles = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            tiles.extend(line.chars().map(|ch| {
                if ch == EMPTY_CHAR {
                    Tile::Empty {
                        jump_points: DirectionSet::EMPTY,
                        distances: DistanceMap::default(),
                    }
                } else {
                    Tile::Wall {
                        distances: DistanceMap::default(),
                    }
                }
            }));
        }

        let mut grid = Self {
            rng: Range::new(0, 0, width as i32, rows.len() as i32),
            tiles,
        };
        grid.find_primary_jump_points();
        for main in [Direction::E, Direction::W, Direction::S, Direction::N] {
            grid.cardinal_sweep(main);
        }
        for main in [Direction::S, Direction::N] {
            grid.diagonal_sweep(main);
        }
        log::debug!(
            "built {}x{} grid: {} passable tiles, {} with primary jump points",
            width,
            rows.len(),
            grid.passable_count(),
            grid.tiles
                .iter()
                .filter(|t| t.jump_points().is_some_and(|j| !j.is_empty()))
                .count()
        );
        Ok(grid)
    }

    /// Rebuild a grid from an already computed distance table.
    ///
    /// Listed tiles are passable, all others are walls. Jump point sets are
    /// not part of the table and stay empty; the search only needs
    /// distances.
    ///
    /// Every distance must describe an open run: its first `|distance|`
    /// steps stay on listed tiles without cutting a wall corner.
    pub fn from_precomputed(
        width: usize,
        height: usize,
        rows: &[PrecomputedTile],
    ) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::Empty);
        }
        let rng = Range::new(0, 0, width as i32, height as i32);
        let mut tiles = vec![
            Tile::Wall {
                distances: DistanceMap::default(),
            };
            rng.len()
        ];
        for row in rows {
            let i = rng.index(row.pos).ok_or(GridError::OutOfBounds(row.pos))?;
            if tiles[i].is_passable() {
                return Err(GridError::Duplicate(row.pos));
            }
            tiles[i] = Tile::Empty {
                jump_points: DirectionSet::EMPTY,
                distances: row.distances,
            };
        }
        let grid = Self { rng, tiles };
        for row in rows {
            for dir in Direction::ROSE {
                let distance = row.distances[dir];
                if !grid.is_open_run(row.pos, dir, distance.unsigned_abs()) {
                    return Err(GridError::BlockedJump {
                        pos: row.pos,
                        dir,
                        distance,
                    });
                }
            }
        }
        log::debug!(
            "loaded {}x{} grid from {} precomputed tiles",
            width,
            height,
            rows.len()
        );
        Ok(grid)
    }

    /// Whether `steps` consecutive legal steps lead from `p` in `dir`.
    fn is_open_run(&self, p: Point, dir: Direction, steps: u32) -> bool {
        let mut cur = p;
        for _ in 0..steps {
            if !self.can_step(cur, dir) {
                return false;
            }
            cur = cur + dir.delta();
        }
        true
    }

    /// The rectangle covered by the grid, anchored at (0, 0).
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.rng.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.rng.height()
    }

    /// The tile at `p`; [`Tile::Border`] for any point outside the grid.
    #[inline]
    pub fn tile(&self, p: Point) -> &Tile {
        match self.rng.index(p) {
            Some(i) => &self.tiles[i],
            None => &BORDER,
        }
    }

    /// The tile one step from `p` in direction `dir`.
    #[inline]
    pub fn neighbor(&self, p: Point, dir: Direction) -> &Tile {
        self.tile(p + dir.delta())
    }

    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.tile(p).is_passable()
    }

    /// Jump distance of an empty tile in direction `dir`.
    ///
    /// `None` for walls and the border, which are never expanded.
    #[inline]
    pub fn jump_distance(&self, p: Point, dir: Direction) -> Option<i32> {
        match self.tile(p) {
            Tile::Empty { distances, .. } => Some(distances[dir]),
            _ => None,
        }
    }

    /// Whether a single step from `p` towards `dir` is legal.
    ///
    /// Diagonal steps may not cut the corner of a wall: both cardinal tiles
    /// flanking the step must be passable too.
    pub fn can_step(&self, p: Point, dir: Direction) -> bool {
        if !self.is_passable(p) || !self.neighbor(p, dir).is_passable() {
            return false;
        }
        dir.is_cardinal()
            || (self.neighbor(p, dir.left_front()).is_passable()
                && self.neighbor(p, dir.right_front()).is_passable())
    }

    /// Passable tiles and their distances in row-major order.
    pub fn passable_tiles(&self) -> impl Iterator<Item = (Point, &DistanceMap)> + '_ {
        self.tiles.iter().enumerate().filter_map(|(i, t)| match t {
            Tile::Empty { distances, .. } => Some((self.rng.point(i), distances)),
            _ => None,
        })
    }

    pub fn passable_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_passable()).count()
    }

    /// Mark every empty tile's forced-neighbour directions.
    ///
    /// Travelling in `d`, a tile is a primary jump point when a wall sits
    /// diagonally behind it on one side while the tile beside it on that
    /// side is open.
    fn find_primary_jump_points(&mut self) {
        for i in 0..self.tiles.len() {
            if !self.tiles[i].is_passable() {
                continue;
            }
            let p = self.rng.point(i);
            let found: DirectionSet = Direction::ROSE
                .into_iter()
                .filter(|&d| {
                    (self.neighbor(p, d.left_back()).is_wall()
                        && self.neighbor(p, d.left()).is_passable())
                        || (self.neighbor(p, d.right_back()).is_wall()
                            && self.neighbor(p, d.right()).is_passable())
                })
                .collect();
            if let Tile::Empty { jump_points, .. } = &mut self.tiles[i] {
                *jump_points = found;
            }
        }
    }
}
