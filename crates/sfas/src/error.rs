use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    #[error(transparent)]
    InvariantViolation(#[from] InvariantViolation),
}

impl Error {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }
}

/// The caller handed over an edge sequence that breaks the `(source, target, weight)` contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    #[error("edge #{index} is missing its {endpoint} endpoint")]
    MissingEndpoint { index: usize, endpoint: Endpoint },

    #[error("edge #{index} is missing its weight")]
    MissingWeight { index: usize },

    #[error("edge #{index} has negative weight {weight}")]
    NegativeWeight { index: usize, weight: String },

    #[error("total edge weight overflows the weight type at edge #{index}")]
    WeightOverflow { index: usize },
}

/// A consistency check failed. These indicate a defect in the ordering algorithm and are never
/// recovered from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("adjacency tables disagree on edge {from} -> {to} ({checkpoint})")]
    AsymmetricAdjacency {
        checkpoint: Checkpoint,
        from: usize,
        to: usize,
    },

    #[error("edge {from} -> {to} is missing from the adjacency tables")]
    MissingEdge { from: usize, to: usize },

    #[error("anti-parallel edges remain between nodes {a} and {b}")]
    AntiParallelRemaining { a: usize, b: usize },

    #[error("no bucket exists for key {key}")]
    MissingBucket { key: String },

    #[error("node {node} is not a member of bucket {key}")]
    BucketMismatch { node: usize, key: String },

    #[error("node {node} does not appear exactly once in the final order")]
    NotAPermutation { node: usize },

    #[error("tracked feedback weight {tracked} does not match backward weight {actual}")]
    FeedbackMismatch { tracked: String, actual: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Source => "source",
            Self::Target => "target",
        })
    }
}

/// Where an invariant pass ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkpoint {
    PostMerge,
    PostResolution,
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PostMerge => "after merging parallel edges",
            Self::PostResolution => "after anti-parallel resolution",
        })
    }
}
