use crate::problem::PathCost;

use std::cmp::Ordering;
use std::rc::Rc;

/// How a priority frontier ranks nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderMode {
    /// `deaths + h`, ties broken by `deaths + h + kills`.
    Cost,
    /// `h` alone.
    Greedy,
}

/// A node of the search tree.
///
/// Children hold their parent through an `Rc`; a parent never knows its
/// children, so the tree is acyclic and a goal node keeps its whole path
/// alive.
#[derive(Debug)]
pub struct SearchNode<S, A> {
    pub state: Rc<S>,
    pub parent: Option<Rc<SearchNode<S, A>>>,
    pub action: Option<A>,
    pub path_cost: PathCost,
    pub heuristic: f64,
    pub depth: usize,
    pub order: OrderMode,
}

impl<S, A: Copy> SearchNode<S, A> {
    pub fn root(state: S, heuristic: f64, order: OrderMode) -> Self {
        SearchNode {
            state: Rc::new(state),
            parent: None,
            action: None,
            path_cost: PathCost::default(),
            heuristic,
            depth: 0,
            order,
        }
    }

    pub fn child(
        parent: &Rc<SearchNode<S, A>>,
        state: S,
        action: A,
        step_cost: PathCost,
        heuristic: f64,
    ) -> Self {
        SearchNode {
            state: Rc::new(state),
            parent: Some(Rc::clone(parent)),
            action: Some(action),
            path_cost: parent.path_cost + step_cost,
            heuristic,
            depth: parent.depth + 1,
            order: parent.order,
        }
    }

    /// Actions from the root down to this node.
    pub fn actions(&self) -> Vec<A> {
        let mut actions = Vec::with_capacity(self.depth);
        let mut current = Some(self);
        while let Some(node) = current {
            if let Some(action) = node.action {
                actions.push(action);
            }
            current = node.parent.as_deref();
        }
        actions.reverse();
        actions
    }

    /// Nodes from the root down to this node.
    pub fn lineage(&self) -> Vec<&SearchNode<S, A>> {
        let mut nodes = Vec::with_capacity(self.depth + 1);
        let mut current = Some(self);
        while let Some(node) = current {
            nodes.push(node);
            current = node.parent.as_deref();
        }
        nodes.reverse();
        nodes
    }
}

impl<S, A> SearchNode<S, A> {
    /// Frontier rank, lower pops first.
    pub fn priority_cmp(&self, other: &Self) -> Ordering {
        match self.order {
            OrderMode::Cost => {
                let self_f = self.path_cost.deaths as f64 + self.heuristic;
                let other_f = other.path_cost.deaths as f64 + other.heuristic;
                self_f.total_cmp(&other_f).then_with(|| {
                    (self_f + self.path_cost.kills as f64)
                        .total_cmp(&(other_f + other.path_cost.kills as f64))
                })
            }
            OrderMode::Greedy => self.heuristic.total_cmp(&other.heuristic),
        }
    }
}

// Unlink the parent chain iteratively; deep depth-first paths would
// otherwise overflow the stack through recursive `Rc` drops.
impl<S, A> Drop for SearchNode<S, A> {
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(node) = parent {
            match Rc::try_unwrap(node) {
                Ok(mut node) => parent = node.parent.take(),
                Err(_) => break,
            }
        }
    }
}
