use crate::problem::PathCost;

use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Stats {
    pub cost: PathCost,
    pub time_us: usize,
    pub expanded_nodes: usize,
    pub generated_nodes: usize,
    pub frontier_high_water: usize,
    /// Depth-limited runs performed by iterative deepening.
    pub iterations: usize,
}

impl Stats {
    pub(crate) fn print(&self, strategy: &str) {
        info!(
            "Strategy {strategy} Deaths {:?} Kills {:?} Time(microseconds) {:?} Expanded nodes {:?} Generated nodes {:?} Frontier peak {:?}",
            self.cost.deaths,
            self.cost.kills,
            self.time_us,
            self.expanded_nodes,
            self.generated_nodes,
            self.frontier_high_water
        );
    }
}
