//! Cancellation of opposing edge pairs.
//!
//! For `u -> v (w1)` and `v -> u (w2)` with `w1 <= w2`, whichever order the two nodes end up in,
//! at least `w1` of that pair points backward. The lighter edge is dropped, the heavier one keeps
//! `w2 - w1`, and `w1` is charged to the feedback total up front. Bucket deltas are only meaningful
//! once no such pairs remain.

use crate::error::InvariantViolation;
use crate::graph::CompactGraph;
use crate::weight::Weight;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<W> {
    /// Number of unordered node pairs that had edges in both directions.
    pub pairs: usize,
    /// Weight charged to feedback by the cancellation.
    pub canceled: W,
}

/// Opposing pairs `(a, b)` with `a < b`, each listed once.
pub fn anti_parallel_pairs<W: Weight>(g: &CompactGraph<W>) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for a in 0..g.node_count() {
        for &b in g.outgoing(a).keys() {
            if a < b && g.outgoing(b).contains_key(&a) {
                pairs.push((a, b));
            }
        }
    }
    pairs.sort_unstable();
    pairs
}

pub fn resolve<W: Weight>(g: &mut CompactGraph<W>) -> Result<Resolution<W>, InvariantViolation> {
    let pairs = anti_parallel_pairs(g);
    let mut canceled = W::ZERO;
    for &(a, b) in &pairs {
        canceled = canceled + cancel_pair(g, a, b)?;
    }
    Ok(Resolution {
        pairs: pairs.len(),
        canceled,
    })
}

/// Cancels the opposing edges between `a` and `b` and returns the weight charged to feedback.
fn cancel_pair<W: Weight>(
    g: &mut CompactGraph<W>,
    a: usize,
    b: usize,
) -> Result<W, InvariantViolation> {
    let ab = g
        .weight(a, b)
        .ok_or(InvariantViolation::MissingEdge { from: a, to: b })?;
    let ba = g
        .weight(b, a)
        .ok_or(InvariantViolation::MissingEdge { from: b, to: a })?;

    // Orient so that `light` is the edge being dropped.
    let ((ls, lt, light), (hs, ht, heavy)) = if ab > ba {
        ((b, a, ba), (a, b, ab))
    } else {
        ((a, b, ab), (b, a, ba))
    };

    g.remove_edge(ls, lt);
    let rest = heavy - light;
    if rest == W::ZERO {
        g.remove_edge(hs, ht);
    } else {
        g.set_weight(hs, ht, rest);
    }
    Ok(light)
}
