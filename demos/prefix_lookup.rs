//! Example: incremental prefix checking on top of the raw automaton.
//!
//! This shows how a terminal might decide, one character at a time, whether
//! an incoming code point still continues an emoji sequence. The `Cursor`
//! struct keeps the current node and advances it with each character.
//!
//! Run with: cargo run --example prefix_lookup

use seqtrie::trie::TrieBuilder;
use seqtrie::{Automaton, NodeId};

/// Tracks the automaton state for the sequence typed so far.
struct Cursor<'a> {
    automaton: &'a Automaton<char>,
    node: Option<NodeId>,
}

impl<'a> Cursor<'a> {
    fn new(automaton: &'a Automaton<char>) -> Self {
        Cursor {
            automaton,
            node: Some(automaton.root()),
        }
    }

    /// Feeds one character; returns true while the input is still a valid prefix.
    fn push(&mut self, ch: char) -> bool {
        self.node = self.node.and_then(|node| self.automaton.step(node, ch));
        self.node.is_some()
    }

    fn reset(&mut self) {
        self.node = Some(self.automaton.root());
    }
}

fn main() {
    let mut builder = TrieBuilder::new();
    for sequence in ["👩\u{200D}💻", "👩\u{200D}🔬", "👨\u{200D}💻", "🏃\u{200D}♀\u{FE0F}", "☺\u{FE0F}"] {
        builder.add_sequence(sequence).unwrap();
    }
    let automaton = builder.build();
    println!("{automaton:?}, minimal: {}", automaton.is_minimal());

    let mut cursor = Cursor::new(&automaton);
    for input in ["👩\u{200D}💻", "👨\u{200D}🔬", "🏃\u{200D}♀\u{FE0F}", "☺x"] {
        cursor.reset();
        print!("{input:?}:");
        for ch in input.chars() {
            print!(" U+{:04X}={}", u32::from(ch), if cursor.push(ch) { "ok" } else { "no" });
        }
        println!();
    }

    println!("\nMaximal sequences:");
    for sequence in automaton.maximal_sequences() {
        let text: String = sequence.into_iter().collect();
        println!("  {text}");
    }
}
