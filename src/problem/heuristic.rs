use super::rescue::{RescueProblem, KILL_DAMAGE, PILL_HEAL};
use super::SearchProblem;
use crate::world::{WorldState, LETHAL_DAMAGE};

use serde::{Deserialize, Serialize};

/// Which estimate drives an informed strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeuristicKind {
    /// Turned hostages over four kills per action, fractional.
    Greedy1,
    /// Pills needed to survive the kills implied by four kills per action.
    Greedy2,
    /// Drops + kills (three per action) + pills to survive those kills.
    AStar1,
    /// Kills alone, three per action.
    AStar2,
}

impl RescueProblem {
    /// Zero exactly at a goal. Any non-goal state estimates at least 1 so
    /// informed strategies keep preferring real progress.
    pub fn heuristic(&self, kind: HeuristicKind, state: &WorldState) -> f64 {
        if self.is_goal(state) {
            return 0.0;
        }
        let estimate = match kind {
            HeuristicKind::Greedy1 => turned_count(state) as f64 / 4.0,
            HeuristicKind::Greedy2 => {
                let kill_ops = turned_count(state) / 4;
                pills_to_survive(state, kill_ops) as f64
            }
            HeuristicKind::AStar1 => {
                let kill_ops = turned_count(state).div_ceil(3);
                let drop_ops = drops_needed(state);
                (drop_ops + kill_ops + pills_to_survive(state, kill_ops)) as f64
            }
            HeuristicKind::AStar2 => turned_count(state).div_ceil(3) as f64,
        };

        if estimate == 0.0 {
            1.0
        } else {
            estimate
        }
    }
}

fn turned_count(state: &WorldState) -> usize {
    state.turned_hostages().count()
}

/// Pills the protagonist must swallow to outlive `kill_ops` kill actions.
fn pills_to_survive(state: &WorldState, kill_ops: usize) -> usize {
    let damage = state.protagonist.damage() + kill_ops as i32 * KILL_DAMAGE;
    if damage >= LETHAL_DAMAGE {
        ((damage - LETHAL_DAMAGE) / PILL_HEAL + 1) as usize
    } else {
        0
    }
}

/// Trips to the booth needed for the alive hostages still outside it.
fn drops_needed(state: &WorldState) -> usize {
    let outstanding = state.unrescued_alive_hostages().count();
    match state.protagonist.original_capacity() {
        0 => 0,
        capacity => outstanding.div_ceil(capacity),
    }
}
