use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderOptions {
    /// 0 is silent; 1 logs summaries, 2 adds progress and per-node decisions, 3 dumps adjacency.
    pub verbosity: u8,
    /// Seeds the shuffle that assigns compacted ids, and with it every tie-break.
    pub random_seed: u64,
    pub checks: InvariantChecks,
}

impl Default for OrderOptions {
    fn default() -> Self {
        Self {
            verbosity: 0,
            random_seed: 0,
            checks: InvariantChecks::default(),
        }
    }
}

impl OrderOptions {
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_seed(mut self, random_seed: u64) -> Self {
        self.random_seed = random_seed;
        self
    }

    pub fn with_checks(mut self, checks: InvariantChecks) -> Self {
        self.checks = checks;
        self
    }
}

/// Toggles for the optional consistency passes.
///
/// The feedback identity at finalization always runs; `post_finalization` only adds the
/// permutation check on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvariantChecks {
    pub post_merge: bool,
    pub post_resolution: bool,
    pub post_finalization: bool,
}

impl Default for InvariantChecks {
    fn default() -> Self {
        Self::all()
    }
}

impl InvariantChecks {
    pub fn all() -> Self {
        Self {
            post_merge: true,
            post_resolution: true,
            post_finalization: true,
        }
    }

    pub fn none() -> Self {
        Self {
            post_merge: false,
            post_resolution: false,
            post_finalization: false,
        }
    }
}
