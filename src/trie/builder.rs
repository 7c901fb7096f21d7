use std::error::Error;

use smallvec::SmallVec;
use tracing::debug;

use super::automaton::Automaton;
use super::minimize::minimize;
use super::symbol::Symbol;
use super::transitions::{NodeId, Transitions};

/// Longest sequence accepted by default.
///
/// Consumers of the generated tables keep the sequence seen so far in a
/// fixed buffer of this many symbols.
pub const DEFAULT_MAX_LEN: usize = 10;

/// Trait for types that can be used as a symbol sequence when building a trie.
///
/// Implemented for common string and sequence types so that
/// [`TrieBuilder::add_sequence`] and [`build_automaton`] accept them directly.
pub trait IntoSequence<S: Symbol> {
    /// Collects this sequence into a symbol buffer.
    fn collect_sequence(self) -> SmallVec<[S; 16]>;
}

impl IntoSequence<char> for &str {
    fn collect_sequence(self) -> SmallVec<[char; 16]> {
        self.chars().collect()
    }
}

impl IntoSequence<char> for &&str {
    fn collect_sequence(self) -> SmallVec<[char; 16]> {
        self.chars().collect()
    }
}

impl IntoSequence<char> for &String {
    fn collect_sequence(self) -> SmallVec<[char; 16]> {
        self.chars().collect()
    }
}

impl<S: Symbol> IntoSequence<S> for &[S] {
    fn collect_sequence(self) -> SmallVec<[S; 16]> {
        self.iter().copied().collect()
    }
}

impl<S: Symbol> IntoSequence<S> for Vec<S> {
    fn collect_sequence(self) -> SmallVec<[S; 16]> {
        self.into_iter().collect()
    }
}

impl<S: Symbol> IntoSequence<S> for &Vec<S> {
    fn collect_sequence(self) -> SmallVec<[S; 16]> {
        self.iter().copied().collect()
    }
}

impl<S: Symbol, const N: usize> IntoSequence<S> for [S; N] {
    fn collect_sequence(self) -> SmallVec<[S; 16]> {
        self.into_iter().collect()
    }
}

impl<S: Symbol, const N: usize> IntoSequence<S> for &[S; N] {
    fn collect_sequence(self) -> SmallVec<[S; 16]> {
        self.iter().copied().collect()
    }
}

/// Builds a prefix trie from symbol sequences and minimizes it into an [`Automaton`].
///
/// Sequences may be added in any order and any number of times; common
/// prefixes share nodes. Node 0 is the root.
#[derive(Clone, Debug)]
pub struct TrieBuilder<S: Symbol> {
    nodes: Vec<Transitions<S>>,
    max_len: usize,
}

impl<S: Symbol> TrieBuilder<S> {
    /// Creates a builder holding only the root, accepting sequences up to
    /// [`DEFAULT_MAX_LEN`] symbols.
    pub fn new() -> Self {
        Self::with_max_len(DEFAULT_MAX_LEN)
    }

    /// Creates a builder accepting sequences of at most `max_len` symbols.
    pub fn with_max_len(max_len: usize) -> Self {
        TrieBuilder {
            nodes: vec![Transitions::new()],
            max_len,
        }
    }

    /// Longest sequence this builder accepts.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Number of trie nodes allocated so far, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Adds a sequence to the trie.
    ///
    /// Adding a sequence that is already present, or a prefix of one, changes
    /// nothing. The empty sequence is the root and is always present.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::SequenceTooLong`] if the sequence exceeds
    /// [`max_len`](TrieBuilder::max_len), and [`BuildError::TooManyNodes`] if
    /// the node table would outgrow [`NodeId`].
    pub fn add_sequence(&mut self, sequence: impl IntoSequence<S>) -> Result<(), BuildError<S>> {
        let sequence = sequence.collect_sequence();
        self.add_sequence_slice(&sequence)
    }

    fn add_sequence_slice(&mut self, sequence: &[S]) -> Result<(), BuildError<S>> {
        if sequence.len() > self.max_len {
            return Err(BuildError::SequenceTooLong {
                sequence: sequence.to_vec(),
                max: self.max_len,
            });
        }
        let mut current = NodeId::ROOT;
        for &symbol in sequence {
            current = match self.nodes[current.index()].get(symbol) {
                Some(next) => next,
                None => {
                    let next = self.alloc_node()?;
                    self.nodes[current.index()].insert(symbol, next);
                    next
                }
            };
        }
        Ok(())
    }

    /// Adds every ordered pair `(a, b)` with `a` and `b` drawn from `symbols`
    /// as a two-symbol sequence.
    ///
    /// Used to make a combinatorial subspace complete even where the literal
    /// corpus only lists some of its members.
    pub fn add_pairs<I>(&mut self, symbols: I) -> Result<(), BuildError<S>>
    where
        I: IntoIterator<Item = S>,
        I::IntoIter: Clone,
    {
        let symbols = symbols.into_iter();
        for first in symbols.clone() {
            for second in symbols.clone() {
                self.add_sequence_slice(&[first, second])?;
            }
        }
        Ok(())
    }

    fn alloc_node(&mut self) -> Result<NodeId, BuildError<S>> {
        let index = self.nodes.len();
        if u32::try_from(index).is_err() {
            return Err(BuildError::TooManyNodes { limit: index });
        }
        self.nodes.push(Transitions::new());
        Ok(NodeId::new(index))
    }

    /// Minimizes the trie and returns the finished automaton.
    pub fn build(self) -> Automaton<S> {
        let mut nodes = self.nodes;
        let trie_nodes = nodes.len();
        let rounds = minimize(&mut nodes);
        debug!(trie_nodes, nodes = nodes.len(), rounds, "minimized prefix trie");
        Automaton::from_nodes(nodes)
    }
}

impl<S: Symbol> Default for TrieBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur while building a prefix automaton.
#[derive(Debug, PartialEq)]
pub enum BuildError<S: Symbol> {
    /// A sequence was longer than the builder's limit.
    SequenceTooLong {
        /// The offending sequence.
        sequence: Vec<S>,
        /// The configured maximum length.
        max: usize,
    },
    /// The node table outgrew the index type.
    TooManyNodes {
        /// Number of nodes at the point of failure.
        limit: usize,
    },
}

impl<S: Symbol> std::fmt::Display for BuildError<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::SequenceTooLong { sequence, max } => write!(
                f,
                "sequence of {} symbols exceeds the limit of {max}: {sequence:?}",
                sequence.len()
            ),
            BuildError::TooManyNodes { limit } => {
                write!(f, "node table overflow after {limit} nodes")
            }
        }
    }
}

impl<S: Symbol> Error for BuildError<S> {}

/// Builds a minimized automaton from an iterator of sequences.
///
/// # Examples
///
/// ```
/// use seqtrie::trie::builder::build_automaton;
///
/// let automaton = build_automaton(["a", "ab", "c", "de"]).unwrap();
/// assert!(automaton.accepts_prefix("ab"));
/// assert!(automaton.accepts_prefix("d"));
/// assert!(!automaton.accepts_prefix("f"));
/// ```
pub fn build_automaton<S, Q>(
    sequences: impl IntoIterator<Item = Q>,
) -> Result<Automaton<S>, BuildError<S>>
where
    S: Symbol,
    Q: IntoSequence<S>,
{
    let mut builder = TrieBuilder::new();
    for sequence in sequences {
        builder.add_sequence(sequence)?;
    }
    Ok(builder.build())
}
