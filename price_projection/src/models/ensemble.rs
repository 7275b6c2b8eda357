//! The matrix of simulated prices produced by one simulation run.

use serde::Serialize;

/// Simulated prices laid out as `horizon_steps` rows by `path_count` columns.
///
/// Column `i` is one independent path; row `t` holds the price `t + 1` steps
/// after the last observed close. Stored path-major because every consumer
/// (charting, terminal extraction) walks whole paths.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationEnsemble {
    horizon_steps: usize,
    paths: Vec<Vec<f64>>,
}

impl SimulationEnsemble {
    pub(crate) fn from_paths(horizon_steps: usize, paths: Vec<Vec<f64>>) -> Self {
        debug_assert!(paths.iter().all(|p| p.len() == horizon_steps));
        Self {
            horizon_steps,
            paths,
        }
    }

    /// `(rows, columns)`, i.e. `(horizon_steps, path_count)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.horizon_steps, self.paths.len())
    }

    /// Number of simulated steps per path.
    pub fn horizon_steps(&self) -> usize {
        self.horizon_steps
    }

    /// Number of paths.
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Path `index`, one price per step.
    pub fn path(&self, index: usize) -> Option<&[f64]> {
        self.paths.get(index).map(Vec::as_slice)
    }

    /// Iterates over all paths in column order.
    pub fn paths(&self) -> impl ExactSizeIterator<Item = &[f64]> {
        self.paths.iter().map(Vec::as_slice)
    }

    /// Price at `step` (row) on `path` (column).
    pub fn get(&self, step: usize, path: usize) -> Option<f64> {
        self.paths.get(path)?.get(step).copied()
    }

    /// Row `step` across every path.
    pub fn row(&self, step: usize) -> Option<Vec<f64>> {
        if step >= self.horizon_steps {
            return None;
        }
        Some(self.paths.iter().map(|p| p[step]).collect())
    }

    /// Final simulated price of every path, in path order.
    pub fn terminal_prices(&self) -> Vec<f64> {
        self.horizon_steps
            .checked_sub(1)
            .and_then(|last| self.row(last))
            .unwrap_or_default()
    }
}
