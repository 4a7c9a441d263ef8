mod heuristic;
mod rescue;

pub use heuristic::HeuristicKind;
pub use rescue::{Action, RescueProblem};

use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::{Add, AddAssign};

/// Cumulative `(deaths, kills)` along a path. Deaths order first, kills
/// break ties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct PathCost {
    pub deaths: usize,
    pub kills: usize,
}

impl PathCost {
    pub fn new(deaths: usize, kills: usize) -> Self {
        PathCost { deaths, kills }
    }
}

impl Add for PathCost {
    type Output = PathCost;

    fn add(self, other: PathCost) -> PathCost {
        PathCost {
            deaths: self.deaths + other.deaths,
            kills: self.kills + other.kills,
        }
    }
}

impl AddAssign for PathCost {
    fn add_assign(&mut self, other: PathCost) {
        self.deaths += other.deaths;
        self.kills += other.kills;
    }
}

/// Everything a search strategy needs to know about a domain.
pub trait SearchProblem {
    type State: Clone + Eq + Hash + Debug;
    type Action: Copy + Eq + Debug;

    fn initial_state(&self) -> &Self::State;

    /// Legal actions in `state`. `last_action` is the action that produced
    /// `state`, `None` at the root.
    fn actions(&self, state: &Self::State, last_action: Option<Self::Action>) -> Vec<Self::Action>;

    /// Apply a legal action, returning a fresh state.
    fn result(&self, state: &Self::State, action: Self::Action) -> Self::State;

    fn is_goal(&self, state: &Self::State) -> bool;

    fn step_cost(&self, from: &Self::State, action: Self::Action, to: &Self::State) -> PathCost;
}
