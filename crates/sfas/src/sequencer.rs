//! Greedy placement loop.
//!
//! Sinks go to the right list and sources to the left list, both at no feedback cost. When
//! neither exists, the node with the largest `outgoing - incoming` weight goes to the left list
//! and its remaining incoming weight becomes backward.

use crate::buckets::{BucketIndex, BucketKey};
use crate::diagnostics::Diagnostics;
use crate::error::InvariantViolation;
use crate::graph::CompactGraph;
use crate::weight::{self, Weight};
use serde::Serialize;

/// How many nodes each branch of the loop placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Placements {
    pub sinks: usize,
    pub sources: usize,
    pub deltas: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement<W> {
    /// Left partial order, in final order.
    pub left: Vec<usize>,
    /// Right partial order, in removal order (the reverse of final order).
    pub right: Vec<usize>,
    pub feedback: W,
    pub placements: Placements,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

pub struct Sequencer<W: Weight> {
    graph: CompactGraph<W>,
    buckets: BucketIndex<W>,
    left: Vec<usize>,
    right: Vec<usize>,
    feedback: W,
    total_weight: W,
    placements: Placements,
    diagnostics: Diagnostics,
    next_report: usize,
}

impl<W: Weight> Sequencer<W> {
    /// Takes ownership of the resolved graph and classifies every node.
    ///
    /// `feedback` is the weight already charged by anti-parallel resolution; `total_weight` is only
    /// used for progress percentages.
    pub fn new(
        graph: CompactGraph<W>,
        feedback: W,
        total_weight: W,
        diagnostics: Diagnostics,
    ) -> Self {
        let n = graph.node_count();
        let mut buckets = BucketIndex::new(n);
        for node in 0..n {
            if graph.is_live(node) {
                buckets.insert(node, graph.bucket_key(node));
            }
        }

        if diagnostics.progress() {
            let sizes = buckets
                .sizes()
                .into_iter()
                .map(|(k, len)| format!("{k}: {len}"))
                .collect::<Vec<_>>()
                .join(", ");
            tracing::debug!("Buckets: {{{sizes}}}");
        }

        Self {
            graph,
            left: Vec::with_capacity(n),
            right: Vec::with_capacity(n),
            buckets,
            feedback,
            total_weight,
            placements: Placements::default(),
            diagnostics,
            next_report: 1,
        }
    }

    pub fn buckets(&self) -> &BucketIndex<W> {
        &self.buckets
    }

    pub fn graph(&self) -> &CompactGraph<W> {
        &self.graph
    }

    pub fn feedback(&self) -> W {
        self.feedback
    }

    pub fn placed(&self) -> usize {
        self.left.len() + self.right.len()
    }

    pub fn is_done(&self) -> bool {
        self.graph.live_count() == 0
    }

    /// Places a single node and returns it, or `None` once every node is placed.
    pub fn step(&mut self) -> Result<Option<usize>, InvariantViolation> {
        if self.is_done() {
            return Ok(None);
        }
        self.report_progress();

        let (node, side) = if self.buckets.has_sinks() {
            let n = self.buckets.pop_any(&BucketKey::Sink)?;
            self.placements.sinks += 1;
            if self.diagnostics.progress() {
                tracing::debug!("Removing {n} coz sink");
            }
            (n, Side::Right)
        } else if self.buckets.has_sources() {
            let n = self.buckets.pop_any(&BucketKey::Source)?;
            self.placements.sources += 1;
            if self.diagnostics.progress() {
                tracing::debug!("Removing {n} coz source");
            }
            (n, Side::Left)
        } else {
            let delta = self
                .buckets
                .max_delta()
                .ok_or_else(|| InvariantViolation::MissingBucket {
                    key: "delta".to_string(),
                })?;
            let n = self.buckets.pop_any(&BucketKey::Delta(delta))?;
            let increment = self.graph.in_weight(n);
            self.feedback = self.feedback + increment;
            self.placements.deltas += 1;
            if self.diagnostics.progress() {
                tracing::debug!("Removing {n} coz delta {delta} (fs inc {increment})");
            }
            (n, Side::Left)
        };

        match side {
            Side::Left => self.left.push(node),
            Side::Right => self.right.push(node),
        }

        for neighbor in self.graph.remove_node(node) {
            let key = self.graph.bucket_key(neighbor);
            self.buckets.reclassify(neighbor, key)?;
        }

        Ok(Some(node))
    }

    pub fn run(mut self) -> Result<Placement<W>, InvariantViolation> {
        while self.step()?.is_some() {}
        Ok(Placement {
            left: self.left,
            right: self.right,
            feedback: self.feedback,
            placements: self.placements,
        })
    }

    fn report_progress(&mut self) {
        if !self.diagnostics.progress() {
            return;
        }
        let placed = self.placed();
        if placed > self.next_report {
            tracing::debug!(
                "Placed {placed} nodes ({}) fs = {} ({})",
                weight::percentage(placed, self.graph.node_count()),
                self.feedback,
                weight::percentage(self.feedback, self.total_weight),
            );
            self.next_report += Diagnostics::REPORT_INTERVAL;
        }
    }
}
