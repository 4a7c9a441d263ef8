use super::frontier::{FifoFrontier, LifoFrontier};
use super::{graph_search, NodeRef, OrderMode, VisitedPolicy};
use crate::problem::SearchProblem;
use crate::stat::Stats;

use tracing::{debug, instrument};

#[instrument(skip_all, name = "breadth_first", level = "debug")]
pub fn breadth_first_search<P: SearchProblem>(
    problem: &P,
    policy: VisitedPolicy,
    stats: &mut Stats,
) -> Option<NodeRef<P>> {
    graph_search(
        problem,
        FifoFrontier::new(),
        OrderMode::Cost,
        |_| 0.0,
        None,
        policy,
        stats,
    )
}

#[instrument(skip_all, name = "depth_first", level = "debug")]
pub fn depth_first_search<P: SearchProblem>(
    problem: &P,
    policy: VisitedPolicy,
    stats: &mut Stats,
) -> Option<NodeRef<P>> {
    graph_search(
        problem,
        LifoFrontier::new(),
        OrderMode::Cost,
        |_| 0.0,
        None,
        policy,
        stats,
    )
}

/// Depth-first search that treats nodes at `limit` as leaves.
#[instrument(skip_all, name = "depth_limited", fields(limit), level = "debug")]
pub fn depth_limited_search<P: SearchProblem>(
    problem: &P,
    limit: usize,
    policy: VisitedPolicy,
    stats: &mut Stats,
) -> Option<NodeRef<P>> {
    graph_search(
        problem,
        LifoFrontier::new(),
        OrderMode::Cost,
        |_| 0.0,
        Some(limit),
        policy,
        stats,
    )
}

/// Depth-limited search with limits `0..=max_depth`, each run from scratch.
/// Expansions accumulate in `stats` across all runs.
#[instrument(skip_all, name = "iterative_deepening", fields(max_depth), level = "debug")]
pub fn iterative_deepening_search<P: SearchProblem>(
    problem: &P,
    max_depth: usize,
    policy: VisitedPolicy,
    stats: &mut Stats,
) -> Option<NodeRef<P>> {
    for limit in 0..=max_depth {
        stats.iterations += 1;
        if let Some(goal) = depth_limited_search(problem, limit, policy, stats) {
            debug!("goal found with depth limit {limit}");
            return Some(goal);
        }
    }
    debug!("no goal within depth {max_depth}");
    None
}
