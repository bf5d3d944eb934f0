//! Open and closed sets of a single search.
//!
//! Nodes live in an arena and are never freed during a search, so parent
//! links stay valid. The heap may hold entries for nodes that were since
//! superseded by a cheaper one for the same tile; those are skipped when
//! popped. Replacing an entry is therefore a push, O(log n).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use jpsp_core::{Direction, Point, Range};

use crate::config::GoalPriority;

/// A discovered tile and how it was reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchNode {
    pub tile: Point,
    /// Arena id of the node this one was expanded from.
    pub parent: Option<usize>,
    /// Direction travelled from the parent.
    pub from: Option<Direction>,
    pub g: f64,
    pub f: f64,
}

/// Heap entry, ordered so that `BinaryHeap` (a max-heap) pops the best node.
#[derive(Clone, Copy)]
struct NodeRef {
    id: usize,
    f: f64,
    /// Goal node that jumps the queue outright.
    eager: bool,
    /// Goal node; wins ties on `f`.
    goal: bool,
    seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.eager
            .cmp(&other.eager)
            .then_with(|| other.f.total_cmp(&self.f))
            .then_with(|| self.goal.cmp(&other.goal))
            // earlier insertion first
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeRef {}

/// What [`Frontier::offer`] did with a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    Inserted,
    /// Replaced a dearer open entry for the same tile.
    Improved,
    /// Tile closed, or already open at an equal or lower cost.
    Rejected,
}

/// Priority frontier plus closed set over one grid rectangle.
pub struct Frontier {
    rng: Range,
    goal: Point,
    priority: GoalPriority,
    nodes: Vec<SearchNode>,
    heap: BinaryHeap<NodeRef>,
    /// Live open node per tile.
    open: Vec<Option<usize>>,
    closed: Vec<bool>,
    seq: u64,
}

impl Frontier {
    pub fn new(rng: Range, goal: Point, priority: GoalPriority) -> Self {
        let len = rng.len();
        Self {
            rng,
            goal,
            priority,
            nodes: Vec::new(),
            heap: BinaryHeap::new(),
            open: vec![None; len],
            closed: vec![false; len],
            seq: 0,
        }
    }

    /// Seed the frontier with a parentless node at zero cost.
    pub fn push_root(&mut self, tile: Point) -> Offer {
        self.offer(SearchNode {
            tile,
            parent: None,
            from: None,
            g: 0.0,
            f: 0.0,
        })
    }

    /// Insert `node` unless its tile is closed or already open at a cost of
    /// at most `node.g`.
    pub fn offer(&mut self, node: SearchNode) -> Offer {
        let Some(i) = self.rng.index(node.tile) else {
            return Offer::Rejected;
        };
        if self.closed[i] {
            return Offer::Rejected;
        }
        let result = match self.open[i] {
            Some(old) if self.nodes[old].g <= node.g => return Offer::Rejected,
            Some(_) => Offer::Improved,
            None => Offer::Inserted,
        };
        let id = self.nodes.len();
        self.nodes.push(node);
        self.open[i] = Some(id);
        let goal = node.tile == self.goal;
        self.heap.push(NodeRef {
            id,
            f: node.f,
            eager: goal && self.priority == GoalPriority::Always,
            goal,
            seq: self.seq,
        });
        self.seq += 1;
        result
    }

    /// Pop the best open node, close its tile and return its id.
    ///
    /// Superseded entries and entries whose tile is already closed are
    /// discarded on the way.
    pub fn pop(&mut self) -> Option<usize> {
        while let Some(entry) = self.heap.pop() {
            let tile = self.nodes[entry.id].tile;
            let Some(i) = self.rng.index(tile) else {
                continue;
            };
            if self.closed[i] || self.open[i] != Some(entry.id) {
                continue;
            }
            self.open[i] = None;
            self.closed[i] = true;
            return Some(entry.id);
        }
        None
    }

    #[inline]
    pub fn node(&self, id: usize) -> &SearchNode {
        &self.nodes[id]
    }

    pub fn is_closed(&self, p: Point) -> bool {
        self.rng.index(p).is_some_and(|i| self.closed[i])
    }

    /// Cost of the live open entry for `p`, if any.
    pub fn open_cost(&self, p: Point) -> Option<f64> {
        let i = self.rng.index(p)?;
        self.open[i].map(|id| self.nodes[id].g)
    }

    /// Number of tiles still open.
    pub fn open_len(&self) -> usize {
        self.open.iter().filter(|o| o.is_some()).count()
    }

    /// Tiles from the root to `id`, following parent links.
    pub fn path_to(&self, id: usize) -> Vec<Point> {
        let mut path = Vec::new();
        let mut cur = Some(id);
        while let Some(c) = cur {
            let node = &self.nodes[c];
            path.push(node.tile);
            cur = node.parent;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(x: i32, y: i32, g: f64, f: f64) -> SearchNode {
        SearchNode {
            tile: Point::new(x, y),
            parent: None,
            from: None,
            g,
            f,
        }
    }

    fn frontier(priority: GoalPriority) -> Frontier {
        Frontier::new(Range::new(0, 0, 10, 10), Point::new(9, 9), priority)
    }

    #[test]
    fn pops_lowest_f_first() {
        let mut fr = frontier(GoalPriority::OnTie);
        fr.offer(node(1, 1, 1.0, 5.0));
        fr.offer(node(2, 2, 1.0, 3.0));
        fr.offer(node(3, 3, 1.0, 4.0));
        let ids: Vec<_> = std::iter::from_fn(|| fr.pop()).collect();
        let order: Vec<_> = ids.iter().map(|&id| fr.node(id).tile).collect();
        assert_eq!(
            order,
            vec![Point::new(2, 2), Point::new(3, 3), Point::new(1, 1)]
        );
    }

    #[test]
    fn goal_wins_ties_only_by_default() {
        let mut fr = frontier(GoalPriority::OnTie);
        fr.offer(node(1, 1, 2.0, 4.0));
        fr.offer(node(9, 9, 4.0, 4.0));
        fr.offer(node(2, 2, 1.0, 3.0));
        let first = fr.pop().unwrap();
        assert_eq!(fr.node(first).tile, Point::new(2, 2));
        let second = fr.pop().unwrap();
        assert_eq!(fr.node(second).tile, Point::new(9, 9));
    }

    #[test]
    fn eager_goal_jumps_the_queue() {
        let mut fr = frontier(GoalPriority::Always);
        fr.offer(node(2, 2, 1.0, 3.0));
        fr.offer(node(9, 9, 8.0, 8.0));
        let first = fr.pop().unwrap();
        assert_eq!(fr.node(first).tile, Point::new(9, 9));
    }

    #[test]
    fn equal_f_is_first_in_first_out() {
        let mut fr = frontier(GoalPriority::OnTie);
        fr.offer(node(4, 0, 1.0, 2.0));
        fr.offer(node(0, 4, 1.0, 2.0));
        let first = fr.pop().unwrap();
        assert_eq!(fr.node(first).tile, Point::new(4, 0));
    }

    #[test]
    fn cheaper_offer_replaces_open_entry() {
        let mut fr = frontier(GoalPriority::OnTie);
        assert_eq!(fr.offer(node(5, 5, 6.0, 9.0)), Offer::Inserted);
        assert_eq!(fr.offer(node(5, 5, 7.0, 10.0)), Offer::Rejected);
        assert_eq!(fr.offer(node(5, 5, 6.0, 9.0)), Offer::Rejected);
        assert_eq!(fr.offer(node(5, 5, 2.0, 5.0)), Offer::Improved);
        assert_eq!(fr.open_cost(Point::new(5, 5)), Some(2.0));
        assert_eq!(fr.open_len(), 1);

        let id = fr.pop().unwrap();
        assert_eq!(fr.node(id).g, 2.0);
        // The superseded entry is still in the heap but never surfaces.
        assert_eq!(fr.pop(), None);
    }

    #[test]
    fn closed_tiles_reject_offers() {
        let mut fr = frontier(GoalPriority::OnTie);
        fr.push_root(Point::new(0, 0));
        let id = fr.pop().unwrap();
        assert!(fr.is_closed(Point::new(0, 0)));
        assert_eq!(fr.open_cost(Point::new(0, 0)), None);
        let mut again = node(0, 0, 0.0, 0.0);
        again.parent = Some(id);
        assert_eq!(fr.offer(again), Offer::Rejected);
        assert_eq!(fr.offer(node(20, 0, 0.0, 0.0)), Offer::Rejected);
    }

    #[test]
    fn path_unwinds_parents() {
        let mut fr = frontier(GoalPriority::OnTie);
        fr.push_root(Point::new(0, 0));
        let root = fr.pop().unwrap();
        fr.offer(SearchNode {
            tile: Point::new(3, 0),
            parent: Some(root),
            from: Some(Direction::E),
            g: 3.0,
            f: 12.0,
        });
        let mid = fr.pop().unwrap();
        fr.offer(SearchNode {
            tile: Point::new(3, 4),
            parent: Some(mid),
            from: Some(Direction::S),
            g: 7.0,
            f: 13.0,
        });
        let end = fr.pop().unwrap();
        assert_eq!(
            fr.path_to(end),
            vec![Point::new(0, 0), Point::new(3, 0), Point::new(3, 4)]
        );
    }
}
