//! Compacted, bidirectional adjacency representation of the input graph.
//!
//! Node identifiers are mapped to dense ids `0..n` in a seeded shuffle order. Parallel edges are
//! merged by summing their weights, and every edge is recorded in both the outgoing table of its
//! source and the incoming table of its target.

mod build;

pub use build::{Compacted, build};

use crate::buckets::BucketKey;
use crate::weight::{Delta, Weight};
use indexmap::IndexSet;
use rustc_hash::{FxBuildHasher, FxHashMap};
use std::hash::Hash;

pub type Adjacency<W> = FxHashMap<usize, W>;

/// Maps caller-supplied identifiers to compacted ids and back.
#[derive(Debug, Clone)]
pub struct NodeTable<N> {
    universe: IndexSet<N, FxBuildHasher>,
    to_compact: Vec<usize>,
    from_compact: Vec<usize>,
}

impl<N: Eq + Hash> NodeTable<N> {
    /// `shuffled[c]` is the universe position of the node that receives compacted id `c`.
    pub(crate) fn new(universe: IndexSet<N, FxBuildHasher>, shuffled: Vec<usize>) -> Self {
        let mut to_compact = vec![0; shuffled.len()];
        for (compact, &u) in shuffled.iter().enumerate() {
            to_compact[u] = compact;
        }
        Self {
            universe,
            to_compact,
            from_compact: shuffled,
        }
    }

    pub fn len(&self) -> usize {
        self.from_compact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.from_compact.is_empty()
    }

    pub fn compact_id(&self, node: &N) -> Option<usize> {
        self.universe.get_index_of(node).map(|u| self.to_compact[u])
    }

    pub fn id(&self, compact: usize) -> Option<&N> {
        self.from_compact
            .get(compact)
            .and_then(|&u| self.universe.get_index(u))
    }

    /// Identifiers in compacted-id order.
    pub fn ids(&self) -> impl Iterator<Item = &N> + '_ {
        self.from_compact
            .iter()
            .filter_map(|&u| self.universe.get_index(u))
    }
}

/// An edge whose endpoints are compacted ids. Kept per input edge (not merged) for the final
/// backward-weight recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactEdge<W> {
    pub source: usize,
    pub target: usize,
    pub weight: W,
}

/// Live graph state. Owned by exactly one stage at a time and mutated in place as nodes are
/// placed.
///
/// Per-node weight totals are maintained alongside the tables so that reclassifying a node costs
/// O(1) instead of a pass over its remaining edges.
#[derive(Debug, Clone)]
pub struct CompactGraph<W> {
    outgoing: Vec<Adjacency<W>>,
    incoming: Vec<Adjacency<W>>,
    out_sum: Vec<W>,
    in_sum: Vec<W>,
    removed: Vec<bool>,
    live: usize,
}

impl<W: Weight> CompactGraph<W> {
    pub fn with_nodes(n: usize) -> Self {
        Self {
            outgoing: vec![Adjacency::default(); n],
            incoming: vec![Adjacency::default(); n],
            out_sum: vec![W::ZERO; n],
            in_sum: vec![W::ZERO; n],
            removed: vec![false; n],
            live: n,
        }
    }

    pub fn node_count(&self) -> usize {
        self.outgoing.len()
    }

    pub fn live_count(&self) -> usize {
        self.live
    }

    pub fn is_live(&self, n: usize) -> bool {
        n < self.removed.len() && !self.removed[n]
    }

    pub fn edge_count(&self) -> usize {
        self.outgoing.iter().map(|m| m.len()).sum()
    }

    pub fn outgoing(&self, n: usize) -> &Adjacency<W> {
        &self.outgoing[n]
    }

    pub fn incoming(&self, n: usize) -> &Adjacency<W> {
        &self.incoming[n]
    }

    pub fn weight(&self, source: usize, target: usize) -> Option<W> {
        self.outgoing.get(source)?.get(&target).copied()
    }

    /// Total weight of the remaining outgoing edges of `n`.
    pub fn out_weight(&self, n: usize) -> W {
        self.out_sum[n]
    }

    /// Total weight of the remaining incoming edges of `n`.
    pub fn in_weight(&self, n: usize) -> W {
        self.in_sum[n]
    }

    /// Adds `w` to the edge `source -> target`, creating it if needed.
    pub(crate) fn merge_edge(&mut self, source: usize, target: usize, w: W) {
        let out = self.outgoing[source].entry(target).or_insert(W::ZERO);
        *out = *out + w;
        let inc = self.incoming[target].entry(source).or_insert(W::ZERO);
        *inc = *inc + w;
        self.out_sum[source] = self.out_sum[source] + w;
        self.in_sum[target] = self.in_sum[target] + w;
    }

    pub(crate) fn set_weight(&mut self, source: usize, target: usize, w: W) {
        let old = self.outgoing[source].insert(target, w).unwrap_or(W::ZERO);
        self.incoming[target].insert(source, w);
        self.out_sum[source] = self.out_sum[source] - old + w;
        self.in_sum[target] = self.in_sum[target] - old + w;
    }

    pub(crate) fn remove_edge(&mut self, source: usize, target: usize) -> Option<W> {
        let w = self.outgoing[source].remove(&target)?;
        self.incoming[target].remove(&source);
        self.out_sum[source] = self.out_sum[source] - w;
        self.in_sum[target] = self.in_sum[target] - w;
        Some(w)
    }

    /// Classification of a live node for the bucket index.
    pub fn bucket_key(&self, n: usize) -> BucketKey<W> {
        if self.outgoing[n].is_empty() {
            BucketKey::Sink
        } else if self.incoming[n].is_empty() {
            BucketKey::Source
        } else {
            BucketKey::Delta(Delta::between(self.out_sum[n], self.in_sum[n]))
        }
    }

    /// Detaches `n` and all incident edges. Returns the other endpoints of those edges, each
    /// once; a self-loop does not make `n` its own neighbor.
    pub(crate) fn remove_node(&mut self, n: usize) -> Vec<usize> {
        let incoming = std::mem::take(&mut self.incoming[n]);
        let outgoing = std::mem::take(&mut self.outgoing[n]);
        self.out_sum[n] = W::ZERO;
        self.in_sum[n] = W::ZERO;

        let mut neighbors = Vec::with_capacity(incoming.len() + outgoing.len());
        for (&u, &w) in &incoming {
            if u == n {
                continue;
            }
            self.outgoing[u].remove(&n);
            self.out_sum[u] = self.out_sum[u] - w;
            neighbors.push(u);
        }
        for (&v, &w) in &outgoing {
            if v == n {
                continue;
            }
            self.incoming[v].remove(&n);
            self.in_sum[v] = self.in_sum[v] - w;
            if !incoming.contains_key(&v) {
                neighbors.push(v);
            }
        }

        if !self.removed[n] {
            self.removed[n] = true;
            self.live -= 1;
        }
        neighbors
    }
}
