//! # seqtrie
//!
//! Minimal prefix automata over symbol sequences, and a generator that turns
//! the Unicode emoji sequence list into C switch-dispatch tables.
//!
//! A prefix automaton answers "is what I have seen so far still the start of
//! some known sequence?". It is built as a trie and then minimized by
//! repeatedly merging nodes with identical transitions, so shared suffixes
//! collapse as in a DAWG. It does not record which nodes end a complete
//! sequence: a complete match and a proper prefix look the same.
//!
//! ## Quick Start
//!
//! ```
//! use seqtrie::trie::builder::build_automaton;
//!
//! let automaton = build_automaton(["a", "ab", "c", "de"]).unwrap();
//!
//! assert!(automaton.accepts_prefix("a"));
//! assert!(automaton.accepts_prefix("ab"));
//! assert!(automaton.accepts_prefix("d"));
//! assert!(!automaton.accepts_prefix("f"));
//! assert!(automaton.is_minimal());
//! ```
//!
//! ## Generic Usage
//!
//! The automaton is generic over the transition label type:
//!
//! ```
//! use seqtrie::trie::TrieBuilder;
//!
//! let mut builder = TrieBuilder::<u32>::new();
//! builder.add_sequence([0x1F469, 0x200D, 0x1F4BB]).unwrap();
//! builder.add_pairs(0x1F1E6..0x1F200).unwrap();
//! let automaton = builder.build();
//!
//! assert!(automaton.is_prefix_extension([0x1F469], 0x200D));
//! assert!(automaton.accepts_prefix([0x1F1E9, 0x1F1EA]));
//! assert!(!automaton.accepts_prefix([0x1F469, 0x1F4BB]));
//! ```
//!
//! ## Emoji Tables
//!
//! ```
//! use seqtrie::corpus::Corpus;
//! use seqtrie::emit::{render, EmitOptions};
//!
//! let corpus = Corpus::parse_str("1F469 200D 1F4BB ; fully-qualified # woman technologist\n");
//! let automaton = corpus.build_automaton(10).unwrap();
//! let header = render(&EmitOptions::default(), &automaton, &corpus);
//! assert!(header.contains("static void *emoji_lookup_node_0 (gunichar c)"));
//! ```

#![warn(missing_docs)]

/// Reading emoji sequences and their combining characters.
pub mod corpus;
/// C source generation for automata and character classes.
pub mod emit;
/// Folding sorted code points into contiguous ranges.
pub mod intervals;
/// Write-if-changed output files.
pub mod output;
/// Prefix automaton: builder, minimization and lookup.
pub mod trie;

pub use corpus::{Corpus, CorpusError};
pub use trie::{Automaton, BuildError, IntoSequence, NodeId, Symbol, TrieBuilder};
