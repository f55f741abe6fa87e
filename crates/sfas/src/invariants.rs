//! Consistency passes run at fixed checkpoints of the pipeline.

use crate::error::{Checkpoint, InvariantViolation};
use crate::graph::CompactGraph;
use crate::weight::Weight;

/// Every outgoing entry `a -> b (w)` has the matching incoming entry on `b`, and vice versa.
pub fn check_symmetric<W: Weight>(
    g: &CompactGraph<W>,
    checkpoint: Checkpoint,
) -> Result<(), InvariantViolation> {
    for a in 0..g.node_count() {
        for (&b, &w) in g.outgoing(a) {
            if g.incoming(b).get(&a) != Some(&w) {
                return Err(InvariantViolation::AsymmetricAdjacency {
                    checkpoint,
                    from: a,
                    to: b,
                });
            }
        }
        for (&b, &w) in g.incoming(a) {
            if g.outgoing(b).get(&a) != Some(&w) {
                return Err(InvariantViolation::AsymmetricAdjacency {
                    checkpoint,
                    from: b,
                    to: a,
                });
            }
        }
    }
    Ok(())
}

/// No two distinct nodes are joined in both directions.
pub fn check_no_anti_parallel<W: Weight>(g: &CompactGraph<W>) -> Result<(), InvariantViolation> {
    for a in 0..g.node_count() {
        for &b in g.outgoing(a).keys() {
            if a != b && g.outgoing(b).contains_key(&a) {
                return Err(InvariantViolation::AntiParallelRemaining {
                    a: a.min(b),
                    b: a.max(b),
                });
            }
        }
    }
    Ok(())
}

/// `order` holds each of `0..n` exactly once.
pub fn check_permutation(order: &[usize], n: usize) -> Result<(), InvariantViolation> {
    let mut seen = vec![false; n];
    for &node in order {
        match seen.get_mut(node) {
            Some(slot) if !*slot => *slot = true,
            _ => return Err(InvariantViolation::NotAPermutation { node }),
        }
    }
    match seen.iter().position(|s| !s) {
        Some(node) => Err(InvariantViolation::NotAPermutation { node }),
        None => Ok(()),
    }
}
