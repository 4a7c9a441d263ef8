use super::frontier::PriorityFrontier;
use super::{graph_search, NodeRef, OrderMode, VisitedPolicy};
use crate::problem::SearchProblem;
use crate::stat::Stats;

use tracing::instrument;

/// Cheapest `(deaths, kills)` first.
#[instrument(skip_all, name = "uniform_cost", level = "debug")]
pub fn uniform_cost_search<P: SearchProblem>(
    problem: &P,
    policy: VisitedPolicy,
    stats: &mut Stats,
) -> Option<NodeRef<P>> {
    graph_search(
        problem,
        PriorityFrontier::new(),
        OrderMode::Cost,
        |_| 0.0,
        None,
        policy,
        stats,
    )
}

/// Best-first on the estimate alone; path cost is ignored when ordering.
#[instrument(skip_all, name = "greedy", level = "debug")]
pub fn greedy_search<P, H>(
    problem: &P,
    heuristic: H,
    policy: VisitedPolicy,
    stats: &mut Stats,
) -> Option<NodeRef<P>>
where
    P: SearchProblem,
    H: Fn(&P::State) -> f64,
{
    graph_search(
        problem,
        PriorityFrontier::new(),
        OrderMode::Greedy,
        heuristic,
        None,
        policy,
        stats,
    )
}

#[instrument(skip_all, name = "a_star", level = "debug")]
pub fn a_star_search<P, H>(
    problem: &P,
    heuristic: H,
    policy: VisitedPolicy,
    stats: &mut Stats,
) -> Option<NodeRef<P>>
where
    P: SearchProblem,
    H: Fn(&P::State) -> f64,
{
    graph_search(
        problem,
        PriorityFrontier::new(),
        OrderMode::Cost,
        heuristic,
        None,
        policy,
        stats,
    )
}
