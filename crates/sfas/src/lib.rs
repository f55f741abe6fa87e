#![forbid(unsafe_code)]

//! Greedy weighted feedback-arc-set ordering.
//!
//! Given a weighted directed graph, [`compute_order`] returns a linear order of its nodes that
//! greedily keeps the total weight of backward edges (target placed at or before source) small.
//! It follows Algorithm 1 of Simpson, Srinivasan and Thomo, "Efficient Computation of Feedback
//! Arc Set at Web-Scale" (PVLDB 10(3), 2016), with edge weights in place of degrees.
//!
//! The result is a heuristic: it is reproducible for a given seed, not minimal.

pub mod anti_parallel;
pub mod buckets;
pub mod diagnostics;
pub mod edge;
pub mod error;
pub mod finalize;
pub mod graph;
pub mod invariants;
pub mod options;
pub mod pipeline;
pub mod seeds;
pub mod sequencer;
pub mod weight;

pub use edge::{Edge, RawEdge};
pub use error::{Error, InvalidInput, InvariantViolation, Result};
pub use options::{InvariantChecks, OrderOptions};
pub use pipeline::{FeedbackOrder, OrderStats};
pub use seeds::best_of_seeds;
pub use weight::Weight;

use std::fmt;
use std::hash::Hash;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Orders the nodes of the graph given by `edges`.
///
/// The node universe is exactly the set of edge endpoints. Parallel edges are merged, so
/// `feedback_edges` in the result still refers to positions in `edges`.
pub fn compute_order<N, W, E>(
    edges: impl IntoIterator<Item = E>,
    options: &OrderOptions,
) -> Result<FeedbackOrder<N, W>>
where
    N: Clone + Eq + Hash + fmt::Debug,
    W: Weight,
    E: Into<Edge<N, W>>,
{
    pipeline::run(edges.into_iter().map(Into::into).collect(), options)
}

/// Same as [`compute_order`], for records that may be missing fields.
pub fn compute_order_from_records<N, W>(
    records: impl IntoIterator<Item = RawEdge<N, W>>,
    options: &OrderOptions,
) -> Result<FeedbackOrder<N, W>>
where
    N: Clone + Eq + Hash + fmt::Debug,
    W: Weight,
{
    pipeline::run_records(records, options)
}
