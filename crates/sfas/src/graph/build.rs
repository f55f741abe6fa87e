use super::{CompactEdge, CompactGraph, NodeTable};
use crate::edge::Edge;
use crate::error::InvalidInput;
use crate::weight::Weight;
use indexmap::IndexSet;
use rand::Rng;
use rand::seq::SliceRandom;
use rustc_hash::FxBuildHasher;
use std::hash::Hash;

/// Output of [`build`]: the id mapping, the merged live graph and the per-edge compacted input.
#[derive(Debug, Clone)]
pub struct Compacted<N, W> {
    pub nodes: NodeTable<N>,
    pub graph: CompactGraph<W>,
    pub edges: Vec<CompactEdge<W>>,
    pub total_weight: W,
}

pub fn build<N, W, R>(edges: Vec<Edge<N, W>>, rng: &mut R) -> Result<Compacted<N, W>, InvalidInput>
where
    N: Eq + Hash,
    W: Weight,
    R: Rng + ?Sized,
{
    let mut universe: IndexSet<N, FxBuildHasher> = IndexSet::default();
    let mut endpoints: Vec<(usize, usize, W)> = Vec::with_capacity(edges.len());
    let mut total_weight = W::ZERO;

    for (index, e) in edges.into_iter().enumerate() {
        if e.weight.is_negative() {
            return Err(InvalidInput::NegativeWeight {
                index,
                weight: e.weight.to_string(),
            });
        }
        total_weight = total_weight
            .checked_add(e.weight)
            .ok_or(InvalidInput::WeightOverflow { index })?;

        let (s, _) = universe.insert_full(e.source);
        let (t, _) = universe.insert_full(e.target);
        endpoints.push((s, t, e.weight));
    }

    let mut shuffled: Vec<usize> = (0..universe.len()).collect();
    shuffled.shuffle(rng);
    let nodes = NodeTable::new(universe, shuffled);

    let mut graph = CompactGraph::with_nodes(nodes.len());
    let mut compact_edges = Vec::with_capacity(endpoints.len());
    for (s, t, w) in endpoints {
        let source = nodes.to_compact[s];
        let target = nodes.to_compact[t];
        graph.merge_edge(source, target, w);
        compact_edges.push(CompactEdge {
            source,
            target,
            weight: w,
        });
    }

    Ok(Compacted {
        nodes,
        graph,
        edges: compact_edges,
        total_weight,
    })
}
