use hashbrown::HashSet;
use smallvec::SmallVec;

use super::builder::IntoSequence;
use super::minimize::minimize;
use super::symbol::Symbol;
use super::transitions::{NodeId, Transitions};

/// A minimized prefix automaton.
///
/// Answers one question: is a symbol sequence a prefix (possibly complete) of
/// some sequence the automaton was built from? Complete matches are not
/// distinguished from proper prefixes.
///
/// Lookup starts at [`root()`](Automaton::root). A missing transition is the
/// failure outcome and is reported as `None`, not as an error.
///
/// # Examples
///
/// ```
/// use seqtrie::trie::builder::build_automaton;
///
/// let automaton = build_automaton(["a", "ab", "c", "de"]).unwrap();
/// let root = automaton.root();
///
/// let a = automaton.step(root, 'a').unwrap();
/// assert!(automaton.step(a, 'b').is_some());
/// assert_eq!(automaton.step(root, 'f'), None);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Automaton<S: Symbol> {
    nodes: Vec<Transitions<S>>,
}

impl<S: Symbol> Automaton<S> {
    pub(crate) fn from_nodes(nodes: Vec<Transitions<S>>) -> Self {
        debug_assert!(!nodes.is_empty(), "automaton without a root");
        Automaton { nodes }
    }

    /// Returns the start node.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns an iterator over all node ids in table order.
    pub fn node_ids(&self) -> impl ExactSizeIterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId::new)
    }

    /// Returns the transitions of `node`.
    ///
    /// Panics if `node` does not belong to this automaton.
    #[inline]
    pub fn transitions(&self, node: NodeId) -> &Transitions<S> {
        &self.nodes[node.index()]
    }

    /// Follows the transition for `symbol` out of `node`.
    #[inline]
    pub fn step(&self, node: NodeId, symbol: S) -> Option<NodeId> {
        self.nodes.get(node.index())?.get(symbol)
    }

    /// Walks `sequence` from the root and returns the node reached, if any.
    pub fn walk(&self, sequence: impl IntoSequence<S>) -> Option<NodeId> {
        sequence
            .collect_sequence()
            .iter()
            .try_fold(self.root(), |node, &symbol| self.step(node, symbol))
    }

    /// Returns true if `sequence` is a prefix of some known sequence.
    ///
    /// The empty sequence is always accepted.
    pub fn accepts_prefix(&self, sequence: impl IntoSequence<S>) -> bool {
        self.walk(sequence).is_some()
    }

    /// Returns true if `prefix` followed by `symbol` is still a prefix of some
    /// known sequence.
    ///
    /// This is the incremental check a terminal performs when deciding
    /// whether an incoming character may join the preceding cell.
    pub fn is_prefix_extension(&self, prefix: impl IntoSequence<S>, symbol: S) -> bool {
        self.walk(prefix)
            .and_then(|node| self.step(node, symbol))
            .is_some()
    }

    /// Groups the transitions of `node` by target.
    ///
    /// Groups appear in the order their target is first seen while iterating
    /// the transitions in ascending symbol order; each group's symbols are
    /// ascending.
    pub fn dispatch_groups(&self, node: NodeId) -> Vec<(NodeId, SmallVec<[S; 4]>)> {
        let mut groups: Vec<(NodeId, SmallVec<[S; 4]>)> = Vec::new();
        for (symbol, target) in self.transitions(node).iter() {
            match groups.iter_mut().find(|(t, _)| *t == target) {
                Some((_, symbols)) => symbols.push(symbol),
                None => groups.push((target, smallvec::smallvec![symbol])),
            }
        }
        groups
    }

    /// True if no two nodes have identical transitions.
    pub fn is_minimal(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        self.nodes.iter().all(|transitions| seen.insert(transitions))
    }

    /// Runs minimization again and returns whether anything changed.
    ///
    /// A freshly built automaton is already minimal, so this returns `false`
    /// for it.
    pub fn minimize(&mut self) -> bool {
        let before = self.nodes.len();
        minimize(&mut self.nodes);
        self.nodes.len() != before
    }

    /// Counts the nodes reachable from the root.
    pub fn reachable_count(&self) -> usize {
        let mut visited = vec![false; self.nodes.len()];
        let mut stack = vec![self.root()];
        let mut count = 0;
        while let Some(node) = stack.pop() {
            if std::mem::replace(&mut visited[node.index()], true) {
                continue;
            }
            count += 1;
            stack.extend(self.transitions(node).iter().map(|(_, target)| target));
        }
        count
    }

    /// Enumerates every maximal sequence, that is every path from the root
    /// to a node without transitions.
    pub fn maximal_sequences(&self) -> Vec<Vec<S>> {
        let mut sequences = Vec::new();
        let mut path = Vec::new();
        self.collect_sequences(self.root(), &mut path, &mut sequences);
        sequences
    }

    fn collect_sequences(&self, node: NodeId, path: &mut Vec<S>, out: &mut Vec<Vec<S>>) {
        let transitions = self.transitions(node);
        if transitions.is_empty() {
            if !path.is_empty() {
                out.push(path.clone());
            }
            return;
        }
        for (symbol, target) in transitions.iter() {
            path.push(symbol);
            self.collect_sequences(target, path, out);
            path.pop();
        }
    }
}

impl<S: Symbol> std::fmt::Debug for Automaton<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Automaton")
            .field("node_count", &self.node_count())
            .finish()
    }
}
