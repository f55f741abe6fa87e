//! Partition of unplaced nodes by classification key.
//!
//! Members of a bucket are kept in insertion order. [`BucketIndex::pop_any`] takes the tail member
//! (the most recent insertion still present) and [`BucketIndex::remove_specific`] swap-removes, so
//! the tail moves into the vacated slot. Initial insertion happens in compacted-id order, which is
//! the seeded shuffle order; that makes the seed the only source of tie-break variation.

use crate::error::InvariantViolation;
use crate::weight::{Delta, Weight};
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use std::collections::BTreeMap;
use std::fmt;

pub type Bucket = IndexSet<usize, FxBuildHasher>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketKey<W> {
    /// No outgoing edges.
    Sink,
    /// No incoming edges (and at least one outgoing).
    Source,
    /// `sum(outgoing) - sum(incoming)` for nodes with both.
    Delta(Delta<W>),
}

impl<W: Weight> fmt::Display for BucketKey<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sink => f.write_str("sinks"),
            Self::Source => f.write_str("sources"),
            Self::Delta(d) => write!(f, "{d}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BucketIndex<W> {
    sinks: Option<Bucket>,
    sources: Option<Bucket>,
    deltas: BTreeMap<Delta<W>, Bucket>,
    key_of: Vec<Option<BucketKey<W>>>,
}

impl<W: Weight> BucketIndex<W> {
    pub fn new(node_count: usize) -> Self {
        Self {
            sinks: None,
            sources: None,
            deltas: BTreeMap::new(),
            key_of: vec![None; node_count],
        }
    }

    pub fn has_sinks(&self) -> bool {
        self.sinks.is_some()
    }

    pub fn has_sources(&self) -> bool {
        self.sources.is_some()
    }

    /// Largest numeric key with a non-empty bucket.
    pub fn max_delta(&self) -> Option<Delta<W>> {
        self.deltas.keys().next_back().copied()
    }

    pub fn key_of(&self, node: usize) -> Option<BucketKey<W>> {
        self.key_of.get(node).copied().flatten()
    }

    pub fn contains(&self, node: usize, key: &BucketKey<W>) -> bool {
        self.bucket(key).is_some_and(|b| b.contains(&node))
    }

    /// Number of non-empty buckets.
    pub fn bucket_count(&self) -> usize {
        usize::from(self.sinks.is_some()) + usize::from(self.sources.is_some()) + self.deltas.len()
    }

    /// Number of indexed nodes.
    pub fn len(&self) -> usize {
        self.sinks.as_ref().map_or(0, |b| b.len())
            + self.sources.as_ref().map_or(0, |b| b.len())
            + self.deltas.values().map(|b| b.len()).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.bucket_count() == 0
    }

    /// Bucket sizes, sinks and sources first, then numeric keys ascending.
    pub fn sizes(&self) -> Vec<(BucketKey<W>, usize)> {
        let mut out = Vec::with_capacity(self.bucket_count());
        if let Some(b) = &self.sinks {
            out.push((BucketKey::Sink, b.len()));
        }
        if let Some(b) = &self.sources {
            out.push((BucketKey::Source, b.len()));
        }
        out.extend(self.deltas.iter().map(|(d, b)| (BucketKey::Delta(*d), b.len())));
        out
    }

    pub fn insert(&mut self, node: usize, key: BucketKey<W>) {
        let bucket = match key {
            BucketKey::Sink => self.sinks.get_or_insert_with(Bucket::default),
            BucketKey::Source => self.sources.get_or_insert_with(Bucket::default),
            BucketKey::Delta(d) => self.deltas.entry(d).or_default(),
        };
        bucket.insert(node);
        if let Some(slot) = self.key_of.get_mut(node) {
            *slot = Some(key);
        }
    }

    pub fn remove_specific(
        &mut self,
        node: usize,
        key: &BucketKey<W>,
    ) -> Result<(), InvariantViolation> {
        let bucket = self
            .bucket_mut(key)
            .ok_or_else(|| InvariantViolation::MissingBucket {
                key: key.to_string(),
            })?;
        if !bucket.swap_remove(&node) {
            return Err(InvariantViolation::BucketMismatch {
                node,
                key: key.to_string(),
            });
        }
        self.drop_if_empty(key);
        if let Some(slot) = self.key_of.get_mut(node) {
            *slot = None;
        }
        Ok(())
    }

    pub fn pop_any(&mut self, key: &BucketKey<W>) -> Result<usize, InvariantViolation> {
        let node = self
            .bucket_mut(key)
            .and_then(|b| b.pop())
            .ok_or_else(|| InvariantViolation::MissingBucket {
                key: key.to_string(),
            })?;
        self.drop_if_empty(key);
        if let Some(slot) = self.key_of.get_mut(node) {
            *slot = None;
        }
        Ok(node)
    }

    /// Moves `node` from its current bucket into the one for `key`.
    pub fn reclassify(&mut self, node: usize, key: BucketKey<W>) -> Result<(), InvariantViolation> {
        let current = self
            .key_of(node)
            .ok_or_else(|| InvariantViolation::BucketMismatch {
                node,
                key: key.to_string(),
            })?;
        self.remove_specific(node, &current)?;
        self.insert(node, key);
        Ok(())
    }

    fn bucket(&self, key: &BucketKey<W>) -> Option<&Bucket> {
        match key {
            BucketKey::Sink => self.sinks.as_ref(),
            BucketKey::Source => self.sources.as_ref(),
            BucketKey::Delta(d) => self.deltas.get(d),
        }
    }

    fn bucket_mut(&mut self, key: &BucketKey<W>) -> Option<&mut Bucket> {
        match key {
            BucketKey::Sink => self.sinks.as_mut(),
            BucketKey::Source => self.sources.as_mut(),
            BucketKey::Delta(d) => self.deltas.get_mut(d),
        }
    }

    fn drop_if_empty(&mut self, key: &BucketKey<W>) {
        match key {
            BucketKey::Sink => {
                if self.sinks.as_ref().is_some_and(|b| b.is_empty()) {
                    self.sinks = None;
                }
            }
            BucketKey::Source => {
                if self.sources.as_ref().is_some_and(|b| b.is_empty()) {
                    self.sources = None;
                }
            }
            BucketKey::Delta(d) => {
                if self.deltas.get(d).is_some_and(|b| b.is_empty()) {
                    self.deltas.remove(d);
                }
            }
        }
    }
}
