/// Verbosity gate in front of `tracing`. The subscriber's own filter still applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct Diagnostics {
    verbosity: u8,
}

impl Diagnostics {
    /// Placements between two progress reports.
    pub const REPORT_INTERVAL: usize = 1000;

    pub fn new(verbosity: u8) -> Self {
        Self { verbosity }
    }

    pub fn summary(&self) -> bool {
        self.verbosity >= 1
    }

    pub fn progress(&self) -> bool {
        self.verbosity >= 2
    }

    pub fn dump(&self) -> bool {
        self.verbosity >= 3
    }
}
