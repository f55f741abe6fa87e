//! Independent orderings of one graph under several seeds.

use crate::edge::Edge;
use crate::error::Result;
use crate::options::OrderOptions;
use crate::pipeline::{self, FeedbackOrder};
use crate::weight::Weight;
use std::fmt;
use std::hash::Hash;

/// Runs one ordering per seed, each on its own thread with a private copy of the edges, and keeps
/// the one with the smallest feedback. Ties go to the seed listed first. With no seeds, the seed in
/// `options` is used.
pub fn best_of_seeds<N, W>(
    edges: &[Edge<N, W>],
    seeds: &[u64],
    options: &OrderOptions,
) -> Result<(u64, FeedbackOrder<N, W>)>
where
    N: Clone + Eq + Hash + fmt::Debug + Send + Sync,
    W: Weight,
{
    let results: Vec<Result<FeedbackOrder<N, W>>> = std::thread::scope(|scope| {
        let handles: Vec<_> = seeds
            .iter()
            .map(|&seed| {
                let opts = options.clone().with_seed(seed);
                scope.spawn(move || pipeline::run(edges.to_vec(), &opts))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| match h.join() {
                Ok(r) => r,
                Err(payload) => std::panic::resume_unwind(payload),
            })
            .collect()
    });

    let mut runs = seeds.iter().copied().zip(results);
    let Some((seed, first)) = runs.next() else {
        let order = pipeline::run(edges.to_vec(), options)?;
        return Ok((options.random_seed, order));
    };

    let mut best = (seed, first?);
    for (seed, result) in runs {
        let order = result?;
        if order.feedback < best.1.feedback {
            best = (seed, order);
        }
    }
    Ok(best)
}
