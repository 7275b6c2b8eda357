//! Equal-width binning of terminal prices.

use crate::{errors::ProjectionError, models::histogram::TerminalHistogram};

/// Bin count used for the terminal-price distribution chart.
pub const DEFAULT_HISTOGRAM_BINS: usize = 50;

/// Splits `[min, max]` of `values` into `bins` equal-width bins and counts the
/// values in each.
///
/// When every value is the same the range is widened to `[v - 0.5, v + 0.5]`.
pub fn histogram(values: &[f64], bins: usize) -> Result<TerminalHistogram, ProjectionError> {
    if bins == 0 {
        return Err(ProjectionError::invalid("histogram_bins", "must be greater than zero"));
    }
    if values.is_empty() {
        return Err(ProjectionError::invalid("values", "cannot bin an empty collection"));
    }
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(ProjectionError::invalid("values", format!("{bad} is not finite")));
    }

    let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let mut edges: Vec<f64> = (0..=bins).map(|i| lo + i as f64 * width).collect();
    edges[bins] = hi;

    let mut counts = vec![0usize; bins];
    let scale = bins as f64 / (hi - lo);
    for &v in values {
        let idx = (((v - lo) * scale) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Ok(TerminalHistogram { edges, counts })
}
