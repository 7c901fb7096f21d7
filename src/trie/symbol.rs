use std::fmt::Debug;
use std::hash::Hash;

/// Trait for types that can label the transitions of a prefix automaton.
///
/// This trait is automatically implemented for any type satisfying all the
/// required bounds (`char`, `u8`, `u16`, `u32`, etc.).
///
/// - `Copy`: transitions store labels by value
/// - `Eq + Ord`: transitions are kept sorted by label
/// - `Hash`: node deduplication during minimization
/// - `Debug`: debug printing of nodes and errors
pub trait Symbol: Copy + Eq + Ord + Hash + Debug {}

impl<T: Copy + Eq + Ord + Hash + Debug> Symbol for T {}
