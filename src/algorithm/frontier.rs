use super::node::SearchNode;

use std::cmp::Ordering;
use std::collections::{BTreeSet, VecDeque};
use std::rc::Rc;

/// Open list shared by every strategy; only the pop order differs.
pub(crate) trait Frontier<S, A> {
    fn push(&mut self, node: Rc<SearchNode<S, A>>);
    fn pop(&mut self) -> Option<Rc<SearchNode<S, A>>>;
    fn len(&self) -> usize;
}

/// First in, first out.
pub(crate) struct FifoFrontier<S, A>(VecDeque<Rc<SearchNode<S, A>>>);

impl<S, A> FifoFrontier<S, A> {
    pub(crate) fn new() -> Self {
        FifoFrontier(VecDeque::new())
    }
}

impl<S, A> Frontier<S, A> for FifoFrontier<S, A> {
    fn push(&mut self, node: Rc<SearchNode<S, A>>) {
        self.0.push_back(node);
    }

    fn pop(&mut self) -> Option<Rc<SearchNode<S, A>>> {
        self.0.pop_front()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// Last in, first out.
pub(crate) struct LifoFrontier<S, A>(Vec<Rc<SearchNode<S, A>>>);

impl<S, A> LifoFrontier<S, A> {
    pub(crate) fn new() -> Self {
        LifoFrontier(Vec::new())
    }
}

impl<S, A> Frontier<S, A> for LifoFrontier<S, A> {
    fn push(&mut self, node: Rc<SearchNode<S, A>>) {
        self.0.push(node);
    }

    fn pop(&mut self) -> Option<Rc<SearchNode<S, A>>> {
        self.0.pop()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

// Open List Wrapper
struct OpenEntry<S, A> {
    node: Rc<SearchNode<S, A>>,
    // Insertion order, keeps equal-priority nodes first in, first out.
    sequence: usize,
}

impl<S, A> PartialEq for OpenEntry<S, A> {
    fn eq(&self, other: &Self) -> bool {
        self.sequence == other.sequence
    }
}

impl<S, A> Eq for OpenEntry<S, A> {}

impl<S, A> PartialOrd for OpenEntry<S, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S, A> Ord for OpenEntry<S, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.node
            .priority_cmp(&other.node)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

/// Lowest rank first, as decided by each node's `OrderMode`.
pub(crate) struct PriorityFrontier<S, A> {
    open: BTreeSet<OpenEntry<S, A>>,
    sequence: usize,
}

impl<S, A> PriorityFrontier<S, A> {
    pub(crate) fn new() -> Self {
        PriorityFrontier {
            open: BTreeSet::new(),
            sequence: 0,
        }
    }
}

impl<S, A> Frontier<S, A> for PriorityFrontier<S, A> {
    fn push(&mut self, node: Rc<SearchNode<S, A>>) {
        self.open.insert(OpenEntry {
            node,
            sequence: self.sequence,
        });
        self.sequence += 1;
    }

    fn pop(&mut self) -> Option<Rc<SearchNode<S, A>>> {
        self.open.pop_first().map(|entry| entry.node)
    }

    fn len(&self) -> usize {
        self.open.len()
    }
}
