//! Search configuration.

use std::time::Duration;

/// How strongly the frontier favours nodes sitting on the goal tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GoalPriority {
    /// A goal node wins ties on `f` cost. Keeps the search optimal.
    #[default]
    OnTie,
    /// A goal node is popped as soon as one is queued, whatever its cost.
    /// Finishes sooner but may return a longer path.
    Always,
}

/// Knobs for [`Pathfinder`](crate::Pathfinder).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    pub goal_priority: GoalPriority,
    /// Stop after closing this many nodes.
    pub max_expansions: Option<usize>,
    /// Stop once this much wall-clock time has passed.
    pub time_limit: Option<Duration>,
}

impl SearchConfig {
    pub fn with_goal_priority(mut self, goal_priority: GoalPriority) -> Self {
        self.goal_priority = goal_priority;
        self
    }

    pub fn with_max_expansions(mut self, n: usize) -> Self {
        self.max_expansions = Some(n);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}
