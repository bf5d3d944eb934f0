//! Online JPS+ search.
//!
//! A best-first search over jump points. Successors come straight from the
//! grid's precomputed distances: each candidate direction yields at most one
//! successor, either the goal (or the tile lined up with it) or the next jump
//! point in that direction.

use std::f64::consts::SQRT_2;
use std::fmt;
use std::time::Instant;

use jpsp_core::{Direction, DirectionSet, Point};

use crate::Grid;
use crate::config::SearchConfig;
use crate::distance::{self, col_dist, octile, row_dist};
use crate::error::{Endpoint, SearchError};
use crate::frontier::{Frontier, SearchNode};

/// One closed node, in the order the search closed them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Visit {
    pub tile: Point,
    pub parent: Option<Point>,
    pub g: f64,
}

/// `col row parent_col parent_row cost`, with `-1 -1` for a missing parent.
impl fmt::Display for Visit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (pc, pr) = self.parent.map_or((-1, -1), |p| (p.col(), p.row()));
        write!(
            f,
            "{} {} {} {} {:.2}",
            self.tile.col(),
            self.tile.row(),
            pc,
            pr,
            self.g
        )
    }
}

/// A found path, stored as its jump points.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    waypoints: Vec<Point>,
    cost: f64,
}

impl Path {
    /// Source, every intermediate jump point, and goal.
    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    /// Total cost, the sum of the jump costs.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Each consecutive waypoint pair. Every jump is a straight cardinal or
    /// diagonal line.
    pub fn jumps(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.waypoints.windows(2).map(|w| (w[0], w[1]))
    }

    /// Every tile along the path, one step at a time.
    pub fn steps(&self) -> Vec<Point> {
        let Some(&first) = self.waypoints.first() else {
            return Vec::new();
        };
        let mut result = vec![first];
        for (a, b) in self.jumps() {
            let step = (b - a).signum();
            let mut c = a;
            while c != b {
                c = c + step;
                result.push(c);
            }
        }
        result
    }
}

/// How a search ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Found(Path),
    /// The frontier ran dry before the goal was reached.
    NoPath,
    /// The expansion or time budget ran out first.
    Interrupted,
}

/// Trace and outcome of one search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    pub visits: Vec<Visit>,
    pub outcome: Outcome,
}

impl SearchReport {
    pub fn path(&self) -> Option<&Path> {
        match &self.outcome {
            Outcome::Found(path) => Some(path),
            _ => None,
        }
    }

    /// Tiles closed during the search.
    pub fn closed_tiles(&self) -> impl Iterator<Item = Point> + '_ {
        self.visits.iter().map(|v| v.tile)
    }
}

/// One visit per line, then `NO PATH` if the frontier ran dry.
impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in &self.visits {
            writeln!(f, "{v}")?;
        }
        if self.outcome == Outcome::NoPath {
            writeln!(f, "NO PATH")?;
        }
        Ok(())
    }
}

/// Runs JPS+ searches over a borrowed [`Grid`].
///
/// Holds no per-search state, so one pathfinder can serve any number of
/// searches.
#[derive(Debug, Clone, Copy)]
pub struct Pathfinder<'g> {
    grid: &'g Grid,
    config: SearchConfig,
}

impl<'g> Pathfinder<'g> {
    pub fn new(grid: &'g Grid) -> Self {
        Self::with_config(grid, SearchConfig::default())
    }

    pub fn with_config(grid: &'g Grid, config: SearchConfig) -> Self {
        Self { grid, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search from `source` to `goal`.
    ///
    /// Both must be passable tiles of the grid. Not finding a path is a
    /// regular [`Outcome`], not an error.
    pub fn search(&self, source: Point, goal: Point) -> Result<SearchReport, SearchError> {
        self.check_endpoint(source, Endpoint::Source)?;
        self.check_endpoint(goal, Endpoint::Goal)?;
        log::debug!("searching {source} -> {goal}");

        let started = Instant::now();
        let mut frontier = Frontier::new(self.grid.range(), goal, self.config.goal_priority);
        frontier.push_root(source);
        let mut visits = Vec::new();

        let outcome = loop {
            if self.out_of_budget(visits.len(), started) {
                break Outcome::Interrupted;
            }
            let Some(id) = frontier.pop() else {
                break Outcome::NoPath;
            };
            let node = *frontier.node(id);
            visits.push(Visit {
                tile: node.tile,
                parent: node.parent.map(|p| frontier.node(p).tile),
                g: node.g,
            });
            log::trace!("closed {} at g={:.3} f={:.3}", node.tile, node.g, node.f);

            if node.tile == goal {
                break Outcome::Found(Path {
                    waypoints: frontier.path_to(id),
                    cost: node.g,
                });
            }

            let candidates = match node.from {
                None => DirectionSet::ALL,
                Some(from) => from.next_directions(),
            };
            for dir in candidates.iter() {
                let Some((next, cost)) = self.successor(node.tile, dir, goal) else {
                    continue;
                };
                let g = node.g + cost;
                frontier.offer(SearchNode {
                    tile: next,
                    parent: Some(id),
                    from: Some(dir),
                    g,
                    f: g + octile(next, goal),
                });
            }
        };

        match &outcome {
            Outcome::Found(path) => log::debug!(
                "found path of cost {:.3} through {} jump points after {} expansions",
                path.cost,
                path.waypoints.len(),
                visits.len()
            ),
            Outcome::NoPath => log::debug!("no path after {} expansions", visits.len()),
            Outcome::Interrupted => log::debug!(
                "search interrupted after {} expansions, {} tiles still open",
                visits.len(),
                frontier.open_len()
            ),
        }
        Ok(SearchReport { visits, outcome })
    }

    fn check_endpoint(&self, pos: Point, which: Endpoint) -> Result<(), SearchError> {
        if !self.grid.range().contains(pos) {
            return Err(SearchError::OutOfBounds { which, pos });
        }
        if !self.grid.is_passable(pos) {
            return Err(SearchError::NotPassable { which, pos });
        }
        Ok(())
    }

    fn out_of_budget(&self, expansions: usize, started: Instant) -> bool {
        self.config.max_expansions.is_some_and(|max| expansions >= max)
            || self
                .config
                .time_limit
                .is_some_and(|limit| started.elapsed() >= limit)
    }

    /// The successor of `at` in direction `dir` and the cost to reach it.
    fn successor(&self, at: Point, dir: Direction, goal: Point) -> Option<(Point, f64)> {
        let dist = self.grid.jump_distance(at, dir)?;

        if dir.is_cardinal() {
            // Goal straight ahead, before any wall or jump point.
            if distance::targets_exactly(at, goal, dir) {
                let axial = distance::axial_dist(at, goal);
                if axial <= dist.abs() {
                    return Some((goal, f64::from(axial)));
                }
            }
        } else {
            // Goal in this quadrant: stop where it lines up on one axis.
            let steps = row_dist(at, goal).min(col_dist(at, goal));
            if steps > 0 && distance::targets_generally(at, goal, dir) && steps <= dist.abs() {
                return Some((at + dir.delta() * steps, SQRT_2 * f64::from(steps)));
            }
        }

        if dist > 0 {
            Some((at + dir.delta() * dist, f64::from(dist) * distance::step_cost(dir)))
        } else {
            None
        }
    }
}
