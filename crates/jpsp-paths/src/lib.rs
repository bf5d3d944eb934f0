//! JPS+ pathfinding on 8-connected grids.
//!
//! A [`Grid`] is preprocessed once: every tile records, for each of the
//! eight directions, how far the next jump point or wall lies. Searches
//! then run A\* over jump points only, using those distances to skip
//! straight runs of open tiles.
//!
//! - **Preprocessing** ([`Grid::parse`], [`Grid::from_rows`], [`Grid::from_precomputed`])
//! - **Search** ([`Pathfinder::search`]) producing a [`SearchReport`]
//! - **Reference** single-step Dijkstra ([`reference::dijkstra_map`]) for checking results
//! - **Text formats** read and written by the `jpsp` binary ([`puzzle`])
//!
//! Moving diagonally is only allowed when both orthogonal neighbours are
//! passable; a cardinal step costs 1 and a diagonal step √2.

mod config;
pub mod distance;
mod error;
mod frontier;
mod grid;
mod pathfinder;
pub mod puzzle;
pub mod reference;
mod sweep;

pub use config::{GoalPriority, SearchConfig};
pub use distance::octile;
pub use error::{Endpoint, GridError, ParseError, SearchError};
pub use frontier::{Frontier, Offer, SearchNode};
pub use grid::{DistanceMap, EMPTY_CHAR, Grid, PrecomputedTile, Tile};
pub use pathfinder::{Outcome, Path, Pathfinder, SearchReport, Visit};
