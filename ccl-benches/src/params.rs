//! Benchmark parameter types rendered into Criterion ids.

use std::fmt;

/// Parameters for a batch labeling benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct LabelingBenchParams {
    /// Side length of the square mask.
    pub side: usize,
    /// Foreground density in percent.
    pub density_percent: u32,
}

impl fmt::Display for LabelingBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}x{0},p={1}%", self.side, self.density_percent)
    }
}

/// Parameters for a streaming benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct StreamingBenchParams {
    /// Side length of the square mask.
    pub side: usize,
    /// Number of pixels inserted after seeding.
    pub arrivals: usize,
}

impl fmt::Display for StreamingBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}x{0},+{1}", self.side, self.arrivals)
    }
}
