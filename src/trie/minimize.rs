//! Fixed-point minimization of a node table.
//!
//! Each round runs two passes. Deduplication maps every node to the first
//! node (in index order) with an identical transition set. Compaction then
//! drops the duplicates, renumbers the survivors contiguously in their
//! original relative order and rewrites every target. Rounds repeat until the
//! node count stops shrinking: merging two leaves can make their parents
//! identical, which only the next round can see.

use hashbrown::HashMap;
use tracing::trace;

use super::symbol::Symbol;
use super::transitions::{NodeId, Transitions};

/// Minimizes `nodes` in place and returns the number of rounds run,
/// including the final round that found nothing to merge.
///
/// Node 0 stays node 0.
pub(crate) fn minimize<S: Symbol>(nodes: &mut Vec<Transitions<S>>) -> usize {
    let mut rounds = 0;
    loop {
        rounds += 1;
        let before = nodes.len();
        let representative = dedup_pass(nodes);
        compact_pass(nodes, &representative);
        trace!(round = rounds, before, after = nodes.len(), "minimization round");
        if nodes.len() == before {
            return rounds;
        }
    }
}

/// Returns, for each node, the first node with the same transitions.
///
/// Targets are compared as they are, before any rewriting in this round.
fn dedup_pass<S: Symbol>(nodes: &[Transitions<S>]) -> Vec<NodeId> {
    let mut classes: HashMap<&Transitions<S>, NodeId> = HashMap::with_capacity(nodes.len());
    nodes
        .iter()
        .enumerate()
        .map(|(i, transitions)| *classes.entry(transitions).or_insert(NodeId::new(i)))
        .collect()
}

/// Removes every node that is not its own representative and points all
/// transitions at the compacted index of their target's representative.
fn compact_pass<S: Symbol>(nodes: &mut Vec<Transitions<S>>, representative: &[NodeId]) {
    debug_assert_eq!(nodes.len(), representative.len());

    // Representatives always precede their duplicates, so remap[rep] is
    // already filled in when a duplicate looks it up.
    let mut remap: Vec<NodeId> = Vec::with_capacity(nodes.len());
    let mut kept = 0;
    for (i, rep) in representative.iter().enumerate() {
        if rep.index() == i {
            remap.push(NodeId::new(kept));
            kept += 1;
        } else {
            remap.push(remap[rep.index()]);
        }
    }

    let old = std::mem::take(nodes);
    nodes.extend(
        old.into_iter()
            .zip(representative)
            .enumerate()
            .filter(|(i, (_, rep))| rep.index() == *i)
            .map(|(_, (transitions, _))| transitions),
    );
    for transitions in nodes.iter_mut() {
        transitions.retarget(|target| remap[target.index()]);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn table(edges: &[&[(u32, usize)]]) -> Vec<Transitions<u32>> {
        edges
            .iter()
            .map(|node| {
                let mut t = Transitions::new();
                for &(symbol, target) in node.iter() {
                    t.insert(symbol, NodeId::new(target));
                }
                t
            })
            .collect()
    }

    #[test]
    fn leaves_collapse_into_one() {
        // "a", "b", "c" as a raw trie: three distinct empty leaves.
        let mut nodes = table(&[&[(1, 1), (2, 2), (3, 3)], &[], &[], &[]]);
        minimize(&mut nodes);
        assert_eq!(nodes, table(&[&[(1, 1), (2, 1), (3, 1)], &[]]));
    }

    #[test]
    fn merges_propagate_over_rounds() {
        // "ax", "bx": the two x-leaves merge in round one, which makes the
        // a- and b-nodes equal in round two.
        let mut nodes = table(&[&[(1, 1), (2, 3)], &[(9, 2)], &[], &[(9, 4)], &[]]);
        let rounds = minimize(&mut nodes);
        assert_eq!(nodes, table(&[&[(1, 1), (2, 1)], &[(9, 2)], &[]]));
        assert_eq!(rounds, 3);
    }

    #[test]
    fn compaction_preserves_relative_order() {
        let mut nodes = table(&[&[(1, 1), (2, 2), (3, 3)], &[], &[(7, 1)], &[]]);
        minimize(&mut nodes);
        // node 3 merges into node 1; node 2 keeps its place after node 1.
        assert_eq!(nodes, table(&[&[(1, 1), (2, 2), (3, 1)], &[], &[(7, 1)]]));
    }

    #[test]
    fn already_minimal_table_is_untouched() {
        let original = table(&[&[(1, 1), (2, 2)], &[(5, 2)], &[]]);
        let mut nodes = original.clone();
        assert_eq!(minimize(&mut nodes), 1);
        assert_eq!(nodes, original);
    }

    #[test]
    fn single_root_is_stable() {
        let mut nodes = table(&[&[]]);
        assert_eq!(minimize(&mut nodes), 1);
        assert_eq!(nodes.len(), 1);
    }
}
