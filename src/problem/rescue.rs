use super::{PathCost, SearchProblem};
use crate::world::{Location, WorldState};

use serde::Serialize;
use std::fmt;
use tracing::trace;

pub(super) const KILL_DAMAGE: i32 = 20;
pub(super) const PILL_HEAL: i32 = 20;
const PILL_HOSTAGE_BONUS: i32 = 2;
const PASSIVE_DAMAGE: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Carry,
    Drop,
    TakePill,
    Kill,
    Fly,
}

impl Action {
    /// Enumeration order of the four moves.
    pub const MOVES: [Action; 4] = [Action::Right, Action::Left, Action::Down, Action::Up];

    /// Row/column delta of a move.
    pub fn delta(self) -> Option<(isize, isize)> {
        match self {
            Action::Up => Some((-1, 0)),
            Action::Down => Some((1, 0)),
            Action::Left => Some((0, -1)),
            Action::Right => Some((0, 1)),
            _ => None,
        }
    }

    pub fn opposite(self) -> Option<Action> {
        match self {
            Action::Up => Some(Action::Down),
            Action::Down => Some(Action::Up),
            Action::Left => Some(Action::Right),
            Action::Right => Some(Action::Left),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
            Action::Carry => "carry",
            Action::Drop => "drop",
            Action::TakePill => "takePill",
            Action::Kill => "kill",
            Action::Fly => "fly",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The rescue puzzle as a search problem.
#[derive(Debug, Clone)]
pub struct RescueProblem {
    initial: WorldState,
}

impl RescueProblem {
    pub fn new(initial: WorldState) -> Self {
        RescueProblem { initial }
    }

    /// Target cell of a move, if it stays on the grid.
    fn move_target(state: &WorldState, action: Action) -> Option<Location> {
        let (dx, dy) = action.delta()?;
        let target = state.protagonist.location.offset(dx, dy)?;
        state.in_bounds(&target).then_some(target)
    }

    fn can_move(state: &WorldState, action: Action, last_action: Option<Action>) -> bool {
        if last_action.is_some() && last_action == action.opposite() {
            return false;
        }
        let Some(target) = Self::move_target(state, action) else {
            return false;
        };
        if state.has_agent_at(&target) {
            return false;
        }
        // Never step onto a loose hostage about to turn, booth included.
        !state
            .hostages
            .iter()
            .any(|h| !h.carried && h.location == target && h.is_critical())
    }

    fn can_carry(state: &WorldState) -> bool {
        let here = state.protagonist.location;
        state.protagonist.can_carry()
            && !state.is_at_booth(&here)
            && state
                .hostages
                .iter()
                .any(|h| h.location == here && h.is_alive() && !h.carried)
    }

    fn can_drop(state: &WorldState) -> bool {
        state.is_at_booth(&state.protagonist.location) && state.hostages.iter().any(|h| h.carried)
    }

    fn can_kill(state: &WorldState) -> bool {
        let here = state.protagonist.location;
        state.agents.iter().any(|a| a.adjacent(&here))
            || state.turned_hostages().any(|h| h.location.adjacent(&here))
    }

    /// Number of turned hostages a kill from `state` would eliminate.
    fn turned_in_reach(state: &WorldState) -> usize {
        let here = state.protagonist.location;
        state
            .turned_hostages()
            .filter(|h| h.location.adjacent(&here))
            .count()
    }
}

impl SearchProblem for RescueProblem {
    type State = WorldState;
    type Action = Action;

    fn initial_state(&self) -> &WorldState {
        &self.initial
    }

    fn actions(&self, state: &WorldState, last_action: Option<Action>) -> Vec<Action> {
        let mut actions = Vec::new();
        if state.protagonist.is_dead() {
            return actions;
        }
        let here = state.protagonist.location;

        for action in Action::MOVES {
            if Self::can_move(state, action, last_action) {
                actions.push(action);
            }
        }
        if Self::can_carry(state) {
            actions.push(Action::Carry);
        }
        if Self::can_drop(state) {
            actions.push(Action::Drop);
        }
        if Self::can_kill(state) {
            actions.push(Action::Kill);
        }
        if state.has_pill_at(&here) {
            actions.push(Action::TakePill);
        }
        if state.pads.contains_key(&here) && last_action != Some(Action::Fly) {
            actions.push(Action::Fly);
        }

        trace!("actions at {here}: {actions:?}");
        actions
    }

    fn result(&self, state: &WorldState, action: Action) -> WorldState {
        let mut next = state.clone();
        let here = next.protagonist.location;

        match action {
            Action::Up | Action::Down | Action::Left | Action::Right => {
                if let Some(target) = Self::move_target(&next, action) {
                    next.relocate_protagonist(target);
                }
            }
            Action::Carry => {
                let booth = next.booth;
                if let Some(hostage) = next.hostages.iter_mut().find(|h| {
                    h.location == here && h.location != booth && !h.carried && h.is_alive()
                }) {
                    hostage.carried = true;
                    next.protagonist.take_one();
                }
            }
            Action::Drop => {
                if next.is_at_booth(&here) {
                    for hostage in next.hostages.iter_mut().filter(|h| h.carried) {
                        hostage.carried = false;
                        next.protagonist.release_one();
                    }
                }
            }
            Action::TakePill => {
                if let Some(index) = next.pills.iter().position(|p| *p == here) {
                    next.protagonist.adjust_damage(-PILL_HEAL);
                    let booth = next.booth;
                    for hostage in next
                        .hostages
                        .iter_mut()
                        .filter(|h| h.location != booth && h.is_alive())
                    {
                        hostage.damage = (hostage.damage - PILL_HEAL).max(0) - PILL_HOSTAGE_BONUS;
                    }
                    next.pills.remove(index);
                }
            }
            Action::Kill => {
                next.protagonist.adjust_damage(KILL_DAMAGE);
                next.agents.retain(|a| !a.adjacent(&here));
                let booth = next.booth;
                next.hostages.retain(|h| {
                    h.is_alive() || h.carried || h.location == booth || !h.location.adjacent(&here)
                });
            }
            Action::Fly => {
                if let Some(&target) = next.pads.get(&here) {
                    next.relocate_protagonist(target);
                }
            }
        }

        // Every hostage not yet rescued keeps bleeding.
        let booth = next.booth;
        for hostage in next
            .hostages
            .iter_mut()
            .filter(|h| h.is_alive() && (h.location != booth || h.carried))
        {
            hostage.damage += PASSIVE_DAMAGE;
        }

        next
    }

    fn is_goal(&self, state: &WorldState) -> bool {
        !state.protagonist.is_dead()
            && state.is_at_booth(&state.protagonist.location)
            && state.hostages.iter().all(|h| state.is_rescued(h))
    }

    fn step_cost(&self, from: &WorldState, action: Action, to: &WorldState) -> PathCost {
        let deaths = if action == Action::TakePill {
            0
        } else {
            from.hostages
                .iter()
                .filter(|h| h.is_alive() && h.damage >= 100 - PASSIVE_DAMAGE)
                // Released at the booth this step: no passive damage.
                .filter(|h| !(action == Action::Drop && h.carried))
                .count()
        };

        let mut kills = from.agents.len().saturating_sub(to.agents.len());
        if action == Action::Kill {
            kills += Self::turned_in_reach(from);
        }

        PathCost::new(deaths, kills)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Hostage, Protagonist};
    use std::collections::BTreeMap;

    fn corridor() -> WorldState {
        WorldState::new(
            Location::new(1, 3),
            Protagonist::new(Location::new(0, 0), 1),
            vec![Hostage::new(0, Location::new(0, 1), 0)],
            vec![],
            BTreeMap::new(),
            vec![],
            Location::new(0, 2),
        )
    }

    fn open_field() -> WorldState {
        WorldState::new(
            Location::new(4, 4),
            Protagonist::new(Location::new(1, 1), 2),
            vec![],
            vec![],
            BTreeMap::new(),
            vec![],
            Location::new(3, 3),
        )
    }

    fn check_invariants(state: &WorldState) {
        assert!(state.protagonist.damage() >= 0);
        assert!(state.protagonist.capacity() <= state.protagonist.original_capacity());
        assert_eq!(
            state.carried_count() + state.protagonist.capacity(),
            state.protagonist.original_capacity()
        );
    }

    #[test]
    fn test_reversal_is_forbidden() {
        let problem = RescueProblem::new(open_field());
        let state = problem.result(problem.initial_state(), Action::Right);

        let actions = problem.actions(&state, Some(Action::Right));
        assert!(!actions.contains(&Action::Left));
        assert!(actions.contains(&Action::Right));
        assert!(actions.contains(&Action::Up));
        assert!(actions.contains(&Action::Down));

        let actions = problem.actions(&state, Some(Action::Down));
        assert!(!actions.contains(&Action::Up));
        assert!(actions.contains(&Action::Left));
    }

    #[test]
    fn test_moves_respect_bounds_agents_and_critical_hostages() {
        let mut state = open_field();
        state.protagonist.location = Location::new(0, 0);
        state.agents.push(Location::new(1, 0));
        let problem = RescueProblem::new(state.clone());
        assert_eq!(problem.actions(&state, None), vec![Action::Right, Action::Kill]);

        state.agents.clear();
        state.hostages.push(Hostage::new(0, Location::new(0, 1), 98));
        assert_eq!(problem.actions(&state, None), vec![Action::Down]);
    }

    #[test]
    fn test_dead_protagonist_has_no_actions() {
        let mut state = open_field();
        state.protagonist.adjust_damage(100);
        let problem = RescueProblem::new(state.clone());
        assert!(problem.actions(&state, None).is_empty());
        assert!(!problem.is_goal(&state));
    }

    #[test]
    fn test_carry_then_drop_away_from_booth_is_illegal() {
        let problem = RescueProblem::new(corridor());
        let state = problem.result(problem.initial_state(), Action::Right);
        let actions = problem.actions(&state, Some(Action::Right));
        assert!(actions.contains(&Action::Carry));

        let carried = problem.result(&state, Action::Carry);
        check_invariants(&carried);
        assert_eq!(carried.protagonist.capacity(), 0);
        let actions = problem.actions(&carried, Some(Action::Carry));
        assert!(!actions.contains(&Action::Drop));
        assert!(!actions.contains(&Action::Carry));
    }

    #[test]
    fn test_corridor_plan_reaches_goal() {
        let problem = RescueProblem::new(corridor());
        let mut state = problem.initial_state().clone();
        let mut cost = PathCost::default();
        for action in [Action::Right, Action::Carry, Action::Right, Action::Drop] {
            let next = problem.result(&state, action);
            cost += problem.step_cost(&state, action, &next);
            check_invariants(&next);
            state = next;
        }
        assert!(problem.is_goal(&state));
        assert_eq!(cost, PathCost::new(0, 0));
        // Three bleeding steps before the drop, none after.
        assert_eq!(state.hostages[0].damage, 6);
        assert_eq!(state.protagonist.capacity(), 1);
    }

    #[test]
    fn test_carried_hostage_at_booth_still_bleeds() {
        let mut state = corridor();
        state.protagonist.location = state.booth;
        state.hostages[0].location = state.booth;
        state.hostages[0].carried = true;
        state.protagonist.take_one();
        let problem = RescueProblem::new(state.clone());

        let next = problem.result(&state, Action::Left);
        assert_eq!(next.hostages[0].damage, 2);
        assert_eq!(next.hostages[0].location, Location::new(0, 1));
    }

    #[test]
    fn test_hostage_at_99_dies_on_next_step() {
        let mut state = open_field();
        state.hostages.push(Hostage::new(0, Location::new(3, 0), 99));
        let problem = RescueProblem::new(state.clone());

        let next = problem.result(&state, Action::Right);
        assert_eq!(problem.step_cost(&state, Action::Right, &next), PathCost::new(1, 0));
        assert!(!next.hostages[0].is_alive());
        assert_eq!(next.turned_hostages().count(), 1);
    }

    #[test]
    fn test_pill_heals_and_prevents_death() {
        let mut state = open_field();
        state.protagonist.adjust_damage(30);
        state.pills.push(Location::new(1, 1));
        state.hostages.push(Hostage::new(0, Location::new(3, 0), 99));
        state.hostages.push(Hostage::new(1, Location::new(3, 1), 10));
        let problem = RescueProblem::new(state.clone());

        let actions = problem.actions(&state, None);
        assert!(actions.contains(&Action::TakePill));

        let next = problem.result(&state, Action::TakePill);
        assert_eq!(problem.step_cost(&state, Action::TakePill, &next), PathCost::default());
        assert_eq!(next.protagonist.damage(), 10);
        assert_eq!(next.hostages[0].damage, 79);
        assert_eq!(next.hostages[1].damage, 0);
        assert!(next.pills.is_empty());
    }

    #[test]
    fn test_kill_removes_adjacent_agents_and_turned_hostages() {
        let mut state = open_field();
        state.agents = vec![Location::new(0, 1), Location::new(1, 2), Location::new(3, 3)];
        state.hostages.push(Hostage::new(0, Location::new(2, 1), 100));
        state.hostages.push(Hostage::new(1, Location::new(1, 0), 40));
        let problem = RescueProblem::new(state.clone());
        assert!(problem.actions(&state, None).contains(&Action::Kill));

        let next = problem.result(&state, Action::Kill);
        assert_eq!(next.agents, vec![Location::new(3, 3)]);
        assert_eq!(next.hostages.len(), 1);
        assert_eq!(next.hostages[0].id(), 1);
        assert_eq!(next.protagonist.damage(), 20);
        assert_eq!(problem.step_cost(&state, Action::Kill, &next), PathCost::new(0, 3));
    }

    #[test]
    fn test_fly_teleports_with_carried_hostages() {
        let mut state = open_field();
        state.pads = std::rc::Rc::new(BTreeMap::from([(Location::new(1, 1), Location::new(3, 0))]));
        state.hostages.push(Hostage::new(0, Location::new(1, 1), 10));
        let problem = RescueProblem::new(state.clone());

        let carried = problem.result(&state, Action::Carry);
        let flown = problem.result(&carried, Action::Fly);
        assert_eq!(flown.protagonist.location, Location::new(3, 0));
        assert_eq!(flown.hostages[0].location, Location::new(3, 0));

        // No pad at the destination, and never two flights in a row.
        assert!(!problem.actions(&flown, Some(Action::Fly)).contains(&Action::Fly));
        assert!(!problem.actions(&carried, Some(Action::Fly)).contains(&Action::Fly));
        assert!(problem.actions(&carried, Some(Action::Carry)).contains(&Action::Fly));
    }

    #[test]
    fn test_drop_releases_everyone_carried() {
        let mut state = open_field();
        state.protagonist.location = state.booth;
        for id in 0..2 {
            let mut hostage = Hostage::new(id, state.booth, 98);
            hostage.carried = true;
            state.hostages.push(hostage);
            state.protagonist.take_one();
        }
        let problem = RescueProblem::new(state.clone());

        let next = problem.result(&state, Action::Drop);
        check_invariants(&next);
        assert_eq!(next.protagonist.capacity(), 2);
        assert!(next.hostages.iter().all(|h| !h.carried && h.damage == 98));
        assert_eq!(problem.step_cost(&state, Action::Drop, &next), PathCost::default());
        assert!(problem.is_goal(&next));

        // Critical hostages still count against every later step.
        let after = problem.result(&next, Action::Left);
        assert_eq!(problem.step_cost(&next, Action::Left, &after), PathCost::new(2, 0));
    }

    #[test]
    fn test_critical_hostage_blocks_the_booth() {
        let mut state = corridor();
        state.protagonist.location = Location::new(0, 1);
        state.hostages[0].location = state.booth;
        state.hostages[0].damage = 98;
        let problem = RescueProblem::new(state.clone());
        assert_eq!(problem.actions(&state, None), vec![Action::Left]);

        state.hostages[0].damage = 97;
        assert_eq!(problem.actions(&state, None), vec![Action::Right, Action::Left]);
    }

    #[test]
    fn test_every_reachable_state_keeps_invariants() {
        use std::collections::HashSet;

        let grids = [
            "3,3;2;0,0;2,2;;;;0,2,30",
            "4,4;1;0,0;3,3;1,1;0,3;2,0,0,2;0,2,96,3,0,10",
        ];
        for grid in grids {
            let problem = RescueProblem::new(crate::grid::parse_grid(grid).unwrap());
            let root = (problem.initial_state().clone(), None);
            let mut seen: HashSet<(WorldState, Option<Action>)> = HashSet::from([root.clone()]);
            let mut pending = vec![root];

            while let Some((state, last_action)) = pending.pop() {
                check_invariants(&state);
                for action in problem.actions(&state, last_action) {
                    let next = (problem.result(&state, action), Some(action));
                    if seen.insert(next.clone()) {
                        pending.push(next);
                    }
                }
            }
            assert!(seen.len() > 1, "{grid}");
        }
    }

    #[test]
    fn test_goal_requires_every_hostage_rescued() {
        let problem = RescueProblem::new(corridor());
        let mut state = corridor();
        state.protagonist.location = state.booth;
        assert!(!problem.is_goal(&state));

        state.hostages[0].location = state.booth;
        assert!(problem.is_goal(&state));

        state.hostages[0].carried = true;
        assert!(!problem.is_goal(&state));
    }
}
