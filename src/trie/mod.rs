/// Minimized, read-only prefix automaton.
pub mod automaton;
/// Trie builder and sequence conversion.
pub mod builder;
/// Fixed-point deduplication and compaction of the node table.
pub(crate) mod minimize;
/// Trait for types that can serve as transition labels.
pub mod symbol;
/// Node ids and per-node transition sets.
pub mod transitions;

pub use automaton::Automaton;
pub use builder::{BuildError, IntoSequence, TrieBuilder};
pub use symbol::Symbol;
pub use transitions::{NodeId, Transitions};
