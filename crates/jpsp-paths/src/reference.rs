//! Plain Dijkstra over single steps, used to check JPS+ results.
//!
//! It applies the same movement rules as the jump distances (eight
//! directions, no cutting wall corners) but expands every tile, so it is
//! slow and simple.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use jpsp_core::{Direction, Point, Range};

use crate::Grid;
use crate::distance::step_cost;

#[derive(Clone, Copy, PartialEq)]
struct NodeRef {
    idx: usize,
    cost: f64,
}

impl Eq for NodeRef {}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the cheapest first.
        other.cost.total_cmp(&self.cost)
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest single-step cost from the nearest source to every tile.
#[derive(Debug, Clone)]
pub struct CostMap {
    rng: Range,
    costs: Vec<Option<f64>>,
}

impl CostMap {
    /// Cost at `p`; `None` if unreachable or off the grid.
    pub fn at(&self, p: Point) -> Option<f64> {
        self.rng.index(p).and_then(|i| self.costs[i])
    }

    /// Every reached tile, in row-major order.
    pub fn reached(&self) -> impl Iterator<Item = Point> + '_ {
        self.costs
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_some())
            .map(|(i, _)| self.rng.point(i))
    }
}

/// Multi-source Dijkstra. Sources that are not passable are ignored.
pub fn dijkstra_map(grid: &Grid, sources: &[Point]) -> CostMap {
    let rng = grid.range();
    let mut costs: Vec<Option<f64>> = vec![None; rng.len()];
    let mut open = BinaryHeap::new();

    for &src in sources {
        if !grid.is_passable(src) {
            continue;
        }
        if let Some(i) = rng.index(src) {
            costs[i] = Some(0.0);
            open.push(NodeRef { idx: i, cost: 0.0 });
        }
    }

    while let Some(current) = open.pop() {
        if costs[current.idx].is_some_and(|c| c < current.cost) {
            continue;
        }
        let cp = rng.point(current.idx);
        for dir in Direction::ROSE {
            if !grid.can_step(cp, dir) {
                continue;
            }
            let np = cp + dir.delta();
            let Some(ni) = rng.index(np) else {
                continue;
            };
            let tentative = current.cost + step_cost(dir);
            if costs[ni].is_some_and(|c| c <= tentative) {
                continue;
            }
            costs[ni] = Some(tentative);
            open.push(NodeRef {
                idx: ni,
                cost: tentative,
            });
        }
    }

    CostMap { rng, costs }
}

/// Shortest cost from `source` to `goal`, or `None` if unreachable.
pub fn shortest_cost(grid: &Grid, source: Point, goal: Point) -> Option<f64> {
    dijkstra_map(grid, &[source]).at(goal)
}
