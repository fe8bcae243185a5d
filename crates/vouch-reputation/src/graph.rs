// crates/vouch-reputation/src/graph.rs
//
// Attestation graph: incoming and outgoing adjacency derived from a flat
// attestation list.
//
// The graph is rebuilt from scratch for every computation. Identities are
// indexed in sorted order and every incoming list is sorted, so the stored
// layout is the same for any ordering of the input.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use vouch_core::{Attestation, Identity};

/// One incoming edge `from -> (owner)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncomingEdge {
    /// Index of the attester.
    pub from: usize,
    /// Signed attestation value.
    pub value: f64,
    /// Attestation weight.
    pub weight: f64,
}

/// Directed multigraph over the identities named by an attestation list.
///
/// Duplicate `(from, to)` pairs are kept as separate edges and self-edges
/// are ordinary edges. Both count toward the attester's out-degree.
#[derive(Debug, Clone, Default)]
pub struct AttestationGraph {
    identities: Vec<Identity>,
    index: HashMap<Identity, usize>,
    incoming: Vec<Vec<IncomingEdge>>,
    outgoing: Vec<Vec<usize>>,
}

impl AttestationGraph {
    /// Build the graph from an attestation list.
    pub fn build(attestations: &[Attestation]) -> Self {
        let universe: BTreeSet<&Identity> = attestations
            .iter()
            .flat_map(|a| [&a.from, &a.to])
            .collect();
        let identities: Vec<Identity> = universe.into_iter().cloned().collect();
        let index: HashMap<Identity, usize> = identities
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();

        let n = identities.len();
        let mut incoming = vec![Vec::new(); n];
        let mut outgoing = vec![Vec::new(); n];

        for a in attestations {
            let from = index[&a.from];
            let to = index[&a.to];
            incoming[to].push(IncomingEdge {
                from,
                value: a.value,
                weight: a.weight,
            });
            outgoing[from].push(to);
        }

        for edges in &mut incoming {
            edges.sort_by(compare_edges);
        }
        for targets in &mut outgoing {
            targets.sort_unstable();
        }

        Self {
            identities,
            index,
            incoming,
            outgoing,
        }
    }

    /// Number of identities.
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    /// Identities in index order (sorted).
    pub fn identities(&self) -> &[Identity] {
        &self.identities
    }

    /// Index of an identity, if it appears in the graph.
    pub fn index_of(&self, identity: &str) -> Option<usize> {
        self.index.get(identity).copied()
    }

    /// Incoming edges of node `idx`.
    pub fn incoming(&self, idx: usize) -> &[IncomingEdge] {
        &self.incoming[idx]
    }

    /// Outgoing targets of node `idx`, one entry per edge.
    pub fn outgoing(&self, idx: usize) -> &[usize] {
        &self.outgoing[idx]
    }

    /// Number of attestations issued by node `idx`.
    pub fn out_degree(&self, idx: usize) -> usize {
        self.outgoing[idx].len()
    }

    /// Distinct identities node `idx` has attested to.
    pub fn neighbors(&self, idx: usize) -> BTreeSet<usize> {
        self.outgoing[idx].iter().copied().collect()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.outgoing.iter().map(Vec::len).sum()
    }
}

fn compare_edges(a: &IncomingEdge, b: &IncomingEdge) -> Ordering {
    a.from
        .cmp(&b.from)
        .then_with(|| a.value.total_cmp(&b.value))
        .then_with(|| a.weight.total_cmp(&b.weight))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn att(from: &str, to: &str, value: f64) -> Attestation {
        Attestation::new(from, to, value, 1.0)
    }

    #[test]
    fn empty_input_builds_empty_graph() {
        let g = AttestationGraph::build(&[]);
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn universe_is_union_of_endpoints() {
        let g = AttestationGraph::build(&[att("carol", "alice", 1.0), att("bob", "alice", 1.0)]);
        assert_eq!(g.identities(), &["alice", "bob", "carol"]);
        assert_eq!(g.index_of("dave"), None);
    }

    #[test]
    fn duplicate_edges_are_not_merged() {
        let g = AttestationGraph::build(&[att("alice", "bob", 1.0), att("alice", "bob", 1.0)]);
        let alice = g.index_of("alice").unwrap();
        let bob = g.index_of("bob").unwrap();
        assert_eq!(g.out_degree(alice), 2);
        assert_eq!(g.incoming(bob).len(), 2);
        assert_eq!(g.neighbors(alice).len(), 1);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn self_edge_is_an_ordinary_edge() {
        let g = AttestationGraph::build(&[att("alice", "alice", 3.0)]);
        assert_eq!(g.len(), 1);
        assert_eq!(g.out_degree(0), 1);
        assert_eq!(g.incoming(0)[0].from, 0);
        assert!(g.neighbors(0).contains(&0));
    }

    #[test]
    fn sink_has_zero_out_degree() {
        let g = AttestationGraph::build(&[att("alice", "bob", 1.0)]);
        let bob = g.index_of("bob").unwrap();
        assert_eq!(g.out_degree(bob), 0);
        assert!(g.incoming(g.index_of("alice").unwrap()).is_empty());
    }

    #[test]
    fn layout_is_independent_of_input_order() {
        let forward = vec![
            att("alice", "bob", 5.0),
            att("charlie", "bob", 3.0),
            att("alice", "bob", -1.0),
            att("bob", "charlie", 2.0),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let g1 = AttestationGraph::build(&forward);
        let g2 = AttestationGraph::build(&reversed);
        assert_eq!(g1.identities(), g2.identities());
        for i in 0..g1.len() {
            assert_eq!(g1.incoming(i), g2.incoming(i));
            assert_eq!(g1.outgoing(i), g2.outgoing(i));
        }
    }
}
