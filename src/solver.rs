use crate::algorithm::{
    a_star_search, breadth_first_search, depth_first_search, greedy_search,
    iterative_deepening_search, uniform_cost_search, SearchNode,
};
use crate::config::Config;
use crate::grid;
use crate::problem::{Action, HeuristicKind, PathCost, RescueProblem};
use crate::stat::Stats;
use crate::world::WorldState;

use serde::Serialize;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::time::Instant;

/// Search strategy, named by its short code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    BreadthFirst,
    DepthFirst,
    IterativeDeepening,
    UniformCost,
    Greedy(HeuristicKind),
    AStar(HeuristicKind),
}

#[derive(Debug, thiserror::Error)]
#[error("unknown strategy `{0}`, expected one of BF, DF, ID, UC, GR1, GR2, AS1, AS2")]
pub struct UnknownStrategy(String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let strategy = match s.trim().to_ascii_uppercase().as_str() {
            "BF" => Strategy::BreadthFirst,
            "DF" => Strategy::DepthFirst,
            "ID" => Strategy::IterativeDeepening,
            "UC" => Strategy::UniformCost,
            "GR1" => Strategy::Greedy(HeuristicKind::Greedy1),
            "GR2" => Strategy::Greedy(HeuristicKind::Greedy2),
            "AS1" => Strategy::AStar(HeuristicKind::AStar1),
            "AS2" => Strategy::AStar(HeuristicKind::AStar2),
            _ => return Err(UnknownStrategy(s.to_string())),
        };
        Ok(strategy)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Strategy::BreadthFirst => "BF",
            Strategy::DepthFirst => "DF",
            Strategy::IterativeDeepening => "ID",
            Strategy::UniformCost => "UC",
            Strategy::Greedy(HeuristicKind::Greedy2) => "GR2",
            Strategy::Greedy(_) => "GR1",
            Strategy::AStar(HeuristicKind::AStar2) => "AS2",
            Strategy::AStar(_) => "AS1",
        };
        f.write_str(code)
    }
}

pub type GoalNode = Rc<SearchNode<WorldState, Action>>;

/// Outcome of one run: the goal node, if any, and the run's statistics.
#[derive(Debug)]
pub struct Solution {
    pub strategy: Strategy,
    pub goal: Option<GoalNode>,
    pub stats: Stats,
}

impl Solution {
    pub fn is_solved(&self) -> bool {
        self.goal.is_some()
    }

    pub fn plan(&self) -> Option<Vec<Action>> {
        self.goal.as_ref().map(|goal| goal.actions())
    }

    pub fn cost(&self) -> Option<PathCost> {
        self.goal.as_ref().map(|goal| goal.path_cost)
    }

    pub fn expanded_nodes(&self) -> usize {
        self.stats.expanded_nodes
    }

    pub fn report(&self) -> SolutionReport {
        SolutionReport {
            strategy: self.strategy.to_string(),
            solved: self.is_solved(),
            plan: self.plan().unwrap_or_default(),
            stats: self.stats.clone(),
        }
    }
}

/// JSON shape of a [`Solution`].
#[derive(Debug, Serialize)]
pub struct SolutionReport {
    pub strategy: String,
    pub solved: bool,
    pub plan: Vec<Action>,
    pub stats: Stats,
}

pub struct RescueSolver {
    problem: RescueProblem,
}

impl RescueSolver {
    pub fn new(initial: WorldState) -> Self {
        RescueSolver {
            problem: RescueProblem::new(initial),
        }
    }

    pub fn problem(&self) -> &RescueProblem {
        &self.problem
    }

    pub fn solve(&self, strategy: Strategy, config: &Config) -> Solution {
        let solve_start_time = Instant::now();
        let mut stats = Stats::default();
        let problem = &self.problem;
        let policy = config.visited_policy;

        let goal = match strategy {
            Strategy::BreadthFirst => breadth_first_search(problem, policy, &mut stats),
            Strategy::DepthFirst => depth_first_search(problem, policy, &mut stats),
            Strategy::IterativeDeepening => {
                iterative_deepening_search(problem, config.max_depth, policy, &mut stats)
            }
            Strategy::UniformCost => uniform_cost_search(problem, policy, &mut stats),
            Strategy::Greedy(kind) => greedy_search(
                problem,
                |state: &WorldState| problem.heuristic(kind, state),
                policy,
                &mut stats,
            ),
            Strategy::AStar(kind) => a_star_search(
                problem,
                |state: &WorldState| problem.heuristic(kind, state),
                policy,
                &mut stats,
            ),
        };

        stats.time_us = solve_start_time.elapsed().as_micros() as usize;
        if let Some(goal) = &goal {
            stats.cost = goal.path_cost;
        }
        stats.print(&strategy.to_string());

        Solution {
            strategy,
            goal,
            stats,
        }
    }
}

/// Parses `grid`, solves it with `strategy` and returns the plan string.
/// With `visualize` set, the grid is printed after every step of the plan.
pub fn solve(grid: &str, strategy: &str, visualize: bool) -> anyhow::Result<String> {
    let initial = grid::parse_grid(grid)?;
    let strategy: Strategy = strategy.parse()?;
    let solver = RescueSolver::new(initial);
    let solution = solver.solve(strategy, &Config::default());

    if visualize {
        print!("{}", grid::visualize(&solution));
    }
    Ok(grid::solution_string(&solution))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::SearchProblem;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    }

    const CORRIDOR: &str = "1,3;1;0,0;0,2;;;;0,1,0";

    // Hostage two cells right, booth at the far corner.
    const SMALL: &str = "3,3;2;0,0;2,2;;;;0,2,30";

    // An agent blocks the direct row, a pill and a pad pair are on the board.
    const BUSY: &str = "4,4;1;0,0;3,3;1,1;0,3;2,0,0,2;0,2,96,3,0,10";

    const ALL: [&str; 8] = ["BF", "DF", "ID", "UC", "GR1", "GR2", "AS1", "AS2"];

    #[test]
    fn test_strategy_codes() {
        for code in ALL {
            let strategy: Strategy = code.parse().unwrap();
            assert_eq!(strategy.to_string(), code);
        }
        assert_eq!("as1".parse::<Strategy>().unwrap(), Strategy::AStar(HeuristicKind::AStar1));
        assert!("BFS".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_corridor_plan_for_every_strategy() {
        init_tracing();
        for code in ALL {
            let plan = solve(CORRIDOR, code, false).unwrap();
            let fields: Vec<&str> = plan.split(';').collect();
            assert_eq!(fields.len(), 4, "{code}: {plan}");
            assert_eq!(fields[0], "right,carry,right,drop", "{code}");
            assert_eq!(fields[1], "0");
            assert_eq!(fields[2], "0");
        }
    }

    #[test]
    fn test_every_strategy_reaches_a_goal() {
        init_tracing();
        for grid_str in [SMALL, BUSY] {
            let initial = grid::parse_grid(grid_str).unwrap();
            let solver = RescueSolver::new(initial);
            for code in ALL {
                let solution = solver.solve(code.parse().unwrap(), &Config::default());
                let goal = solution.goal.as_ref().unwrap_or_else(|| panic!("{code} failed"));
                assert!(solver.problem().is_goal(&goal.state), "{code}");
                assert_eq!(solution.stats.cost, goal.path_cost);
                assert!(solution.expanded_nodes() > 0);
            }
        }
    }

    #[test]
    fn test_optimal_strategies_agree() {
        init_tracing();
        let initial = grid::parse_grid(BUSY).unwrap();
        let solver = RescueSolver::new(initial);
        let config = Config::default();

        let bf = solver.solve(Strategy::BreadthFirst, &config);
        let id = solver.solve(Strategy::IterativeDeepening, &config);
        let uc = solver.solve(Strategy::UniformCost, &config);
        let a_star_1 = solver.solve(Strategy::AStar(HeuristicKind::AStar1), &config);
        let a_star_2 = solver.solve(Strategy::AStar(HeuristicKind::AStar2), &config);

        // The hostage at 96 turns before anyone can reach it: one death is
        // unavoidable.
        let uc_cost = uc.cost().unwrap();
        assert_eq!(uc_cost.deaths, 1);
        assert!(a_star_1.cost().unwrap().deaths <= uc_cost.deaths);
        assert!(a_star_2.cost().unwrap().deaths <= uc_cost.deaths);
        assert!(bf.is_solved());

        // The goal turns up within the last depth limit tried.
        let id_depth = id.plan().unwrap().len();
        assert!(id_depth < id.stats.iterations);
    }

    #[test]
    fn test_corridor_expansions() {
        let expansions = |code: &str| {
            let initial = grid::parse_grid(CORRIDOR).unwrap();
            let solution = RescueSolver::new(initial).solve(code.parse().unwrap(), &Config::default());
            solution.expanded_nodes()
        };

        // Every step is free, so uniform cost pops in breadth-first order.
        assert_eq!(expansions("BF"), 7);
        assert_eq!(expansions("UC"), expansions("BF"));
        // The goal child scores f = 0 and jumps the queue.
        assert_eq!(expansions("AS1"), 6);
        assert_eq!(expansions("AS2"), 6);
    }

    #[test]
    fn test_report_serializes() {
        let initial = grid::parse_grid(CORRIDOR).unwrap();
        let solution = RescueSolver::new(initial).solve(Strategy::UniformCost, &Config::default());
        let json = serde_json::to_value(solution.report()).unwrap();
        assert_eq!(json["strategy"], "UC");
        assert_eq!(json["solved"], true);
        assert_eq!(json["plan"][1], "carry");
        assert_eq!(json["stats"]["cost"]["deaths"], 0);
    }

    #[test]
    fn test_bad_inputs_are_errors() {
        assert!(solve("1,3;1;0,0", "BF", false).is_err());
        assert!(solve(CORRIDOR, "XX", false).is_err());
    }
}
