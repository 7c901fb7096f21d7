use std::fmt;

use smallvec::SmallVec;

use super::symbol::Symbol;

/// Index of a node in an automaton's node table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The root node, where every lookup starts.
    pub const ROOT: NodeId = NodeId(0);

    /// Creates a node id from a table index.
    ///
    /// Callers guarantee that `index` fits in a `u32`; the builder checks this
    /// when allocating nodes.
    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        debug_assert!(u32::try_from(index).is_ok(), "node index {index} overflows u32");
        NodeId(index as u32)
    }

    /// Returns the position of this node in the node table.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The outgoing transitions of a single node, sorted by symbol.
///
/// Most nodes of a sequence trie have one or two transitions, so they are
/// stored inline and only spill to the heap for wide nodes such as the root.
///
/// Equality and hashing are structural: two `Transitions` are equal iff they
/// map the same symbols to the same target ids. This is what minimization
/// relies on, since targets are already canonical when compared.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Transitions<S: Symbol> {
    edges: SmallVec<[(S, NodeId); 2]>,
}

impl<S: Symbol> Transitions<S> {
    /// Creates an empty transition set.
    pub fn new() -> Self {
        Transitions {
            edges: SmallVec::new(),
        }
    }

    /// Returns the node that `symbol` leads to, or `None` if there is no such transition.
    #[inline]
    pub fn get(&self, symbol: S) -> Option<NodeId> {
        match self.edges.as_slice() {
            [] => None,
            [(s, target)] => (*s == symbol).then_some(*target),
            edges => edges
                .binary_search_by(|(s, _)| s.cmp(&symbol))
                .ok()
                .map(|i| edges[i].1),
        }
    }

    /// Inserts a transition in sorted position.
    ///
    /// Panics in debug builds if `symbol` already has a transition.
    pub(crate) fn insert(&mut self, symbol: S, target: NodeId) {
        let pos = self.edges.partition_point(|&(s, _)| s < symbol);
        debug_assert!(
            self.edges.get(pos).is_none_or(|&(s, _)| s != symbol),
            "insert: symbol already exists"
        );
        self.edges.insert(pos, (symbol, target));
    }

    /// Rewrites every target through `map`. Symbols, and thus order, are unchanged.
    pub(crate) fn retarget(&mut self, mut map: impl FnMut(NodeId) -> NodeId) {
        for (_, target) in self.edges.iter_mut() {
            *target = map(*target);
        }
    }

    /// Returns an iterator over `(symbol, target)` pairs in ascending symbol order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (S, NodeId)> + '_ {
        self.edges.iter().copied()
    }

    /// Returns the number of transitions.
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// True if this node has no outgoing transitions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ids(n: usize) -> Vec<NodeId> {
        (0..n).map(NodeId::new).collect()
    }

    #[test]
    fn no_transitions() {
        let t = Transitions::<char>::new();
        assert_eq!(t.iter().next(), None);
        assert_eq!(t.len(), 0);
        assert!(t.is_empty());
        assert_eq!(t.get('a'), None);
    }

    #[test]
    fn one_transition() {
        let mut t = Transitions::new();
        t.insert('a', NodeId::new(1));
        let mut iter = t.iter();
        assert_eq!(iter.next(), Some(('a', NodeId::new(1))));
        assert_eq!(iter.next(), None);
        assert_eq!(t.get('a'), Some(NodeId::new(1)));
        assert_eq!(t.get('b'), None);
    }

    #[test]
    fn inserts_are_kept_sorted() {
        let mut t = Transitions::new();
        let n = ids(4);
        t.insert('c', n[3]);
        t.insert('a', n[1]);
        t.insert('b', n[2]);
        assert_eq!(
            t.iter().collect::<Vec<_>>(),
            vec![('a', n[1]), ('b', n[2]), ('c', n[3])]
        );
        assert_eq!(t.get('b'), Some(n[2]));
        assert_eq!(t.get('d'), None);
    }

    #[test]
    fn a_thousand_transitions() {
        let mut t = Transitions::new();
        let symbols: Vec<char> = (0..).filter_map(std::char::from_u32).take(1000).collect();
        for (i, ch) in symbols.iter().copied().rev().enumerate() {
            t.insert(ch, NodeId::new(i + 1));
        }
        assert_eq!(t.len(), 1000);
        assert!(t.iter().map(|(s, _)| s).is_sorted());
        for ch in symbols {
            assert!(t.get(ch).is_some());
        }
    }

    #[test]
    fn equality_compares_targets() {
        let mut a = Transitions::new();
        let mut b = Transitions::new();
        a.insert(1u32, NodeId::new(5));
        b.insert(1u32, NodeId::new(6));
        assert_ne!(a, b);

        b.retarget(|_| NodeId::new(5));
        assert_eq!(a, b);
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let mut a = Transitions::new();
        let mut b = Transitions::new();
        a.insert(1u32, NodeId::new(5));
        a.insert(2u32, NodeId::new(6));
        b.insert(2u32, NodeId::new(6));
        b.insert(1u32, NodeId::new(5));
        assert_eq!(a, b);
    }
}
