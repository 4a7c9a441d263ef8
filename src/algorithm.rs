mod frontier;
mod informed;
mod node;
mod uninformed;

pub use informed::{a_star_search, greedy_search, uniform_cost_search};
pub use node::{OrderMode, SearchNode};
pub use uninformed::{
    breadth_first_search, depth_first_search, depth_limited_search, iterative_deepening_search,
};

use crate::problem::SearchProblem;
use crate::stat::Stats;
use frontier::Frontier;

use serde::Deserialize;
use std::collections::HashSet;
use std::rc::Rc;
use tracing::{debug, trace};

pub type NodeRef<P> =
    Rc<SearchNode<<P as SearchProblem>::State, <P as SearchProblem>::Action>>;

/// When a state enters the visited set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum VisitedPolicy {
    /// Mark a state the first time it is generated. A cheaper path found
    /// later is never substituted in.
    #[default]
    Generation,
    /// Mark a state when it is expanded. Duplicates may sit in the frontier
    /// and the first one popped wins.
    Expansion,
}

/// Generic graph search over `frontier`; every strategy is an instance.
///
/// `depth_limit` turns nodes at that depth into leaves. The expanded-node
/// counter in `stats` is bumped once per node taken off the frontier.
pub(crate) fn graph_search<P, F, H>(
    problem: &P,
    mut frontier: F,
    order: OrderMode,
    heuristic: H,
    depth_limit: Option<usize>,
    policy: VisitedPolicy,
    stats: &mut Stats,
) -> Option<NodeRef<P>>
where
    P: SearchProblem,
    F: Frontier<P::State, P::Action>,
    H: Fn(&P::State) -> f64,
{
    let initial = problem.initial_state();
    let root = Rc::new(SearchNode::root(initial.clone(), heuristic(initial), order));

    let mut visited: HashSet<Rc<P::State>> = HashSet::new();
    if policy == VisitedPolicy::Generation {
        visited.insert(Rc::clone(&root.state));
    }
    frontier.push(root);
    stats.frontier_high_water = stats.frontier_high_water.max(frontier.len());

    while let Some(current) = frontier.pop() {
        if policy == VisitedPolicy::Expansion && !visited.insert(Rc::clone(&current.state)) {
            continue;
        }

        stats.expanded_nodes += 1;
        trace!(
            "expand node: depth {} action {:?} cost {:?} h {}",
            current.depth,
            current.action,
            current.path_cost,
            current.heuristic
        );

        if problem.is_goal(&current.state) {
            debug!(
                "goal at depth {} with cost {:?} after {} expansions",
                current.depth, current.path_cost, stats.expanded_nodes
            );
            return Some(current);
        }

        if depth_limit.is_some_and(|limit| current.depth >= limit) {
            continue;
        }

        for action in problem.actions(&current.state, current.action) {
            let next = problem.result(&current.state, action);
            if visited.contains(&next) {
                continue;
            }

            let step_cost = problem.step_cost(&current.state, action, &next);
            let h = heuristic(&next);
            let child = Rc::new(SearchNode::child(&current, next, action, step_cost, h));
            if policy == VisitedPolicy::Generation {
                visited.insert(Rc::clone(&child.state));
            }
            frontier.push(child);
            stats.generated_nodes += 1;
        }
        stats.frontier_high_water = stats.frontier_high_water.max(frontier.len());
    }

    debug!("frontier exhausted after {} expansions", stats.expanded_nodes);
    None
}
