//! Binned terminal-price distribution handed to the rendering layer.

use serde::Serialize;

/// Equal-width histogram.
///
/// `edges` has one more entry than `counts`. Bin `i` covers
/// `[edges[i], edges[i + 1])`, except the last bin which is closed on the
/// right so the maximum value is counted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerminalHistogram {
    /// Bin boundaries, ascending.
    pub edges: Vec<f64>,
    /// Number of values in each bin.
    pub counts: Vec<usize>,
}

impl TerminalHistogram {
    /// Number of bins.
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Total number of binned values.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}
