use crate::error::InvariantViolation;
use crate::graph::{CompactEdge, NodeTable};
use crate::invariants;
use crate::sequencer::Placement;
use crate::weight::Weight;
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finalized<N, W> {
    pub order: Vec<N>,
    pub feedback: W,
    /// Indices of the input edges that point backward under `order`.
    pub feedback_edges: Vec<usize>,
}

/// Joins the left list with the reversed right list, maps compacted ids back to identifiers and
/// verifies the tracked feedback against a recount over the input edges.
pub fn finalize<N, W>(
    nodes: &NodeTable<N>,
    edges: &[CompactEdge<W>],
    placement: Placement<W>,
    check_permutation: bool,
) -> Result<Finalized<N, W>, InvariantViolation>
where
    N: Clone + Eq + Hash,
    W: Weight,
{
    let Placement {
        mut left,
        mut right,
        feedback,
        ..
    } = placement;
    right.reverse();
    left.append(&mut right);
    let compact_order = left;

    if check_permutation {
        invariants::check_permutation(&compact_order, nodes.len())?;
    }

    let mut position = vec![usize::MAX; nodes.len()];
    for (pos, &c) in compact_order.iter().enumerate() {
        if let Some(slot) = position.get_mut(c) {
            *slot = pos;
        }
    }

    let (actual, feedback_edges) = backward_edges(edges, &position);
    if actual != feedback {
        return Err(InvariantViolation::FeedbackMismatch {
            tracked: feedback.to_string(),
            actual: actual.to_string(),
        });
    }

    let mut order = Vec::with_capacity(compact_order.len());
    for &c in &compact_order {
        let id = nodes
            .id(c)
            .ok_or(InvariantViolation::NotAPermutation { node: c })?;
        order.push(id.clone());
    }

    Ok(Finalized {
        order,
        feedback,
        feedback_edges,
    })
}

/// Total weight and indices of edges whose target is placed at or before their source.
pub fn backward_edges<W: Weight>(edges: &[CompactEdge<W>], position: &[usize]) -> (W, Vec<usize>) {
    let mut total = W::ZERO;
    let mut indices = Vec::new();
    for (i, e) in edges.iter().enumerate() {
        if position[e.target] <= position[e.source] {
            total = total + e.weight;
            indices.push(i);
        }
    }
    (total, indices)
}
