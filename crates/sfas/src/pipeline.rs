//! Builder -> resolver -> sequencer -> finalizer.

use crate::anti_parallel;
use crate::diagnostics::Diagnostics;
use crate::edge::{Edge, RawEdge};
use crate::error::{Checkpoint, Result};
use crate::finalize;
use crate::graph;
use crate::invariants;
use crate::options::OrderOptions;
use crate::sequencer::{Placements, Sequencer};
use crate::weight::{self, Weight};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::fmt;
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackOrder<N, W> {
    /// Every node identifier exactly once.
    pub order: Vec<N>,
    /// Total weight of input edges whose target is placed at or before their source.
    pub feedback: W,
    /// Indices into the input edge sequence of those backward edges.
    pub feedback_edges: Vec<usize>,
    pub stats: OrderStats<W>,
}

impl<N: Eq, W> FeedbackOrder<N, W> {
    pub fn position(&self, node: &N) -> Option<usize> {
        self.order.iter().position(|n| n == node)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderStats<W> {
    pub nodes: usize,
    pub input_edges: usize,
    pub merged_edges: usize,
    pub anti_parallel_pairs: usize,
    /// Feedback charged by anti-parallel cancellation before the greedy loop.
    pub canceled_weight: W,
    pub total_weight: W,
    pub placements: Placements,
}

pub fn run<N, W>(edges: Vec<Edge<N, W>>, options: &OrderOptions) -> Result<FeedbackOrder<N, W>>
where
    N: Clone + Eq + Hash + fmt::Debug,
    W: Weight,
{
    let diagnostics = Diagnostics::new(options.verbosity);
    let input_edges = edges.len();

    let mut rng = StdRng::seed_from_u64(options.random_seed);
    let graph::Compacted {
        nodes,
        graph: mut g,
        edges: compact_edges,
        total_weight,
    } = graph::build(edges, &mut rng)?;

    if diagnostics.summary() {
        tracing::info!("Connections: {input_edges}, total edge weight: {total_weight}");
        tracing::info!(
            "Nodes: {}, max out: {}, max in: {}",
            nodes.len(),
            (0..g.node_count()).map(|n| g.outgoing(n).len()).max().unwrap_or(0),
            (0..g.node_count()).map(|n| g.incoming(n).len()).max().unwrap_or(0),
        );
    }
    if diagnostics.dump() {
        for c in 0..g.node_count() {
            tracing::trace!(
                "{c} ({:?}): out {:?}, in {:?}",
                nodes.id(c),
                g.outgoing(c),
                g.incoming(c)
            );
        }
    }

    if options.checks.post_merge {
        invariants::check_symmetric(&g, Checkpoint::PostMerge)?;
    }
    let merged_edges = g.edge_count();

    let resolution = anti_parallel::resolve(&mut g)?;
    if diagnostics.summary() && resolution.pairs > 0 {
        tracing::info!("Found {} anti-parallel edges", resolution.pairs);
        tracing::info!("Starting with feedback_val {}", resolution.canceled);
    }

    if options.checks.post_resolution {
        invariants::check_symmetric(&g, Checkpoint::PostResolution)?;
        invariants::check_no_anti_parallel(&g)?;
    }

    let placement = Sequencer::new(g, resolution.canceled, total_weight, diagnostics).run()?;
    let placements = placement.placements;

    let finalized = finalize::finalize(
        &nodes,
        &compact_edges,
        placement,
        options.checks.post_finalization,
    )?;

    if diagnostics.summary() {
        tracing::info!(
            "Feedback size: {} ({})",
            finalized.feedback,
            weight::percentage(finalized.feedback, total_weight)
        );
    }
    if diagnostics.progress() {
        tracing::debug!("Result: {:?}", finalized.order);
        tracing::debug!("Feedback edges: {:?}", finalized.feedback_edges);
    }

    Ok(FeedbackOrder {
        order: finalized.order,
        feedback: finalized.feedback,
        feedback_edges: finalized.feedback_edges,
        stats: OrderStats {
            nodes: nodes.len(),
            input_edges,
            merged_edges,
            anti_parallel_pairs: resolution.pairs,
            canceled_weight: resolution.canceled,
            total_weight,
            placements,
        },
    })
}

/// Validates loosely typed records, then runs [`run`]. The first bad record aborts the call.
pub fn run_records<N, W>(
    records: impl IntoIterator<Item = RawEdge<N, W>>,
    options: &OrderOptions,
) -> Result<FeedbackOrder<N, W>>
where
    N: Clone + Eq + Hash + fmt::Debug,
    W: Weight,
{
    let edges = records
        .into_iter()
        .enumerate()
        .map(|(index, r)| r.into_edge(index))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    run(edges, options)
}
