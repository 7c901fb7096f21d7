//! Rendering an automaton as C switch-dispatch functions.
//!
//! Every node becomes a function taking the next character and returning the
//! function for the following node, or `NULL` when the sequence stops being a
//! valid prefix. C cannot spell a function type returning itself, so the
//! functions return `void *` and callers cast.

use std::collections::BTreeSet;
use std::fmt::{self, Write};

use crate::corpus::Corpus;
use crate::intervals::{fold_intervals, Interval};
use crate::trie::{Automaton, NodeId, Symbol};

/// Settings for the generated source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmitOptions {
    /// Name of the generator, shown in the banner.
    pub generator: String,
    /// Prefix of the per-node function names, `<prefix>_node_<n>`.
    pub prefix: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions {
            generator: String::from("emoji-generate"),
            prefix: String::from("emoji_lookup"),
        }
    }
}

impl EmitOptions {
    fn node_fn(&self, node: NodeId) -> String {
        format!("{}_node_{}", self.prefix, node)
    }
}

const PREAMBLE: &str = "\
/*
 * The code here cannot tell if a certain string is a complete valid emoji sequence, we're not interested in that.
 * It tells whether a certain string is a (possibly complete) prefix of a valid emoji sequence.
 *
 * Starting at node 0 for the first character of a string, each node tells which next node to jump to based on the next character.
 * If during lookup a NULL is encountered then it's not an emoji prefix.
 *
 * The functions' return type is the same as the function's type (recursion, yay!), hence the necessary (void *) castings.
 */
";

/// Renders the full generated header for `automaton` and the classes of `corpus`.
pub fn render<S>(options: &EmitOptions, automaton: &Automaton<S>, corpus: &Corpus) -> String
where
    S: Symbol + Into<u32>,
{
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_header(&mut out, options, automaton, corpus);
    out
}

/// Writes the full generated header: banner, jump tables and both
/// combining-character predicates.
pub fn write_header<W, S>(
    out: &mut W,
    options: &EmitOptions,
    automaton: &Automaton<S>,
    corpus: &Corpus,
) -> fmt::Result
where
    W: Write,
    S: Symbol + Into<u32>,
{
    writeln!(out, "/* Auto-generated by {}, do not edit! */", options.generator)?;
    writeln!(out)?;
    writeln!(
        out,
        "/* Source file version: {} */",
        corpus.version().unwrap_or("unknown")
    )?;
    writeln!(out)?;
    writeln!(out, "{PREAMBLE}")?;

    write_jump_tables(out, options, automaton)?;

    write_predicate(
        out,
        "Whether the character is potentially the second or later character of an emoji sequence",
        "is_emoji_combining",
        corpus.combining(),
    )?;
    write_predicate(
        out,
        "A hopefully slightly faster variant for when we already know that the character is narrow",
        "is_single_width_emoji_combining",
        corpus.single_width_combining(),
    )
}

/// Writes forward declarations and one dispatch function per node.
pub fn write_jump_tables<W, S>(
    out: &mut W,
    options: &EmitOptions,
    automaton: &Automaton<S>,
) -> fmt::Result
where
    W: Write,
    S: Symbol + Into<u32>,
{
    writeln!(out, "/* Forward declarations */")?;
    for node in automaton.node_ids() {
        writeln!(out, "static void *{} (gunichar c);", options.node_fn(node))?;
    }
    writeln!(out)?;

    writeln!(out, "/* Jump tables")?;
    writeln!(out, " *")?;
    writeln!(out, " * Note that gcc/clang-optimized switch() seems to be significantly faster")?;
    writeln!(out, " * than binary searching in predefined arrays. */")?;
    writeln!(out)?;

    for node in automaton.node_ids() {
        writeln!(out, "static void *{} (gunichar c)", options.node_fn(node))?;
        writeln!(out, "{{")?;
        writeln!(out, "  switch (c) {{")?;
        for (target, symbols) in automaton.dispatch_groups(node) {
            for interval in fold_intervals(symbols.into_iter().map(Into::into)) {
                writeln!(out, "  case {}:", counted(interval))?;
            }
            writeln!(out, "    return (void *) {};", options.node_fn(target))?;
        }
        writeln!(out, "  default:")?;
        writeln!(out, "    return NULL;")?;
        writeln!(out, "  }}")?;
        writeln!(out, "}}")?;
        writeln!(out)?;
    }
    Ok(())
}

/// Writes a `bool name (gunichar c)` membership test over `members`.
pub fn write_predicate<W: Write>(
    out: &mut W,
    comment: &str,
    name: &str,
    members: &BTreeSet<u32>,
) -> fmt::Result {
    writeln!(out, "/* {comment} */")?;
    writeln!(out, "bool {name} (gunichar c)")?;
    writeln!(out, "{{")?;
    writeln!(out, "  switch (c) {{")?;
    let intervals = fold_intervals(members.iter().copied());
    if !intervals.is_empty() {
        for interval in intervals {
            writeln!(out, "  case {interval}:")?;
        }
        writeln!(out, "    return true;")?;
    }
    writeln!(out, "  default:")?;
    writeln!(out, "    return false;")?;
    writeln!(out, "  }}")?;
    writeln!(out, "}}")?;
    writeln!(out)
}

/// A case label operand with the run length appended for ranges.
fn counted(interval: Interval) -> String {
    if interval.is_single() {
        interval.to_string()
    } else {
        format!("{interval} /* {} */", interval.len())
    }
}
