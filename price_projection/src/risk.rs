//! Value-at-Risk from the terminal-price distribution.

use crate::{
    errors::ProjectionError,
    models::{ensemble::SimulationEnsemble, risk_summary::RiskSummary},
};

/// Percentile used when the caller does not pick one: the one-sided 95% tail.
pub const DEFAULT_VAR_PERCENTILE: f64 = 5.0;

/// Reads the `percentile`-th terminal price of `ensemble` and compares it with
/// `last_observed_price`.
pub fn summarize(
    ensemble: &SimulationEnsemble,
    last_observed_price: f64,
    percentile: f64,
) -> Result<RiskSummary, ProjectionError> {
    if !last_observed_price.is_finite() || last_observed_price <= 0.0 {
        return Err(ProjectionError::invalid(
            "last_observed_price",
            format!("{last_observed_price} is not a positive finite price"),
        ));
    }
    let price = percentile_of(&ensemble.terminal_prices(), percentile)?;
    Ok(RiskSummary::new(percentile, price, last_observed_price))
}

/// Empirical percentile with linear interpolation between order statistics.
///
/// With `n` values sorted ascending, the rank is `pct / 100 * (n - 1)`; the
/// result interpolates between the values at the floor and ceiling of that
/// rank. `0` yields the minimum and `100` the maximum.
pub fn percentile_of(values: &[f64], pct: f64) -> Result<f64, ProjectionError> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    percentile_of_sorted(&sorted, pct)
}

/// [`percentile_of`] for input already sorted ascending.
pub fn percentile_of_sorted(sorted: &[f64], pct: f64) -> Result<f64, ProjectionError> {
    if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
        return Err(ProjectionError::invalid(
            "percentile",
            format!("{pct} is outside [0, 100]"),
        ));
    }
    let Some(last) = sorted.len().checked_sub(1) else {
        return Err(ProjectionError::invalid("values", "cannot take a percentile of nothing"));
    };

    let rank = pct / 100.0 * last as f64;
    let lo = rank.floor() as usize;
    let hi = (rank.ceil() as usize).min(last);
    Ok(lerp(sorted[lo], sorted[hi], rank - lo as f64))
}

// Interpolates from whichever end is closer to keep the result within
// [a, b] when t is near 1.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let diff = b - a;
    if t >= 0.5 { b - diff * (1.0 - t) } else { a + diff * t }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_between_points() {
        let values = [4.0, 1.0, 3.0, 2.0];
        assert_eq!(percentile_of(&values, 25.0).unwrap(), 1.75);
        assert_eq!(percentile_of(&values, 50.0).unwrap(), 2.5);
    }

    #[test]
    fn extremes_are_min_and_max() {
        let values = [9.5, -2.0, 3.25, 7.0];
        assert_eq!(percentile_of(&values, 0.0).unwrap(), -2.0);
        assert_eq!(percentile_of(&values, 100.0).unwrap(), 9.5);
    }

    #[test]
    fn fifth_percentile_of_hundred_values() {
        let values: Vec<f64> = (1..=100).map(f64::from).collect();
        // rank = 0.05 * 99 = 4.95 -> between 5 and 6
        let p = percentile_of(&values, 5.0).unwrap();
        assert!((p - 5.95).abs() < 1e-12);
    }

    #[test]
    fn single_value_is_every_percentile() {
        for pct in [0.0, 5.0, 50.0, 100.0] {
            assert_eq!(percentile_of(&[42.0], pct).unwrap(), 42.0);
        }
    }

    #[test]
    fn rejects_out_of_range_percentile() {
        for pct in [-0.1, 100.1, f64::NAN] {
            assert!(matches!(
                percentile_of(&[1.0], pct),
                Err(ProjectionError::InvalidParameter { name: "percentile", .. })
            ));
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            percentile_of(&[], 5.0),
            Err(ProjectionError::InvalidParameter { name: "values", .. })
        ));
        assert!(matches!(
            percentile_of_sorted(&[], 5.0),
            Err(ProjectionError::InvalidParameter { name: "values", .. })
        ));
    }

    #[test]
    fn sorted_input_skips_the_sort() {
        assert_eq!(percentile_of_sorted(&[1.0, 2.0, 3.0, 4.0], 25.0).unwrap(), 1.75);
    }

    #[test]
    fn summary_value_at_risk_is_difference() {
        let ensemble =
            SimulationEnsemble::from_paths(2, vec![vec![99.0, 90.0], vec![101.0, 110.0]]);
        let s = summarize(&ensemble, 100.0, 0.0).unwrap();
        assert_eq!(s.percentile_price, 90.0);
        assert_eq!(s.value_at_risk, 10.0);

        let s = summarize(&ensemble, 100.0, 100.0).unwrap();
        assert_eq!(s.value_at_risk, -10.0);
    }

    #[test]
    fn rejects_bad_observed_price() {
        let ensemble = SimulationEnsemble::from_paths(1, vec![vec![1.0]]);
        assert!(matches!(
            summarize(&ensemble, 0.0, DEFAULT_VAR_PERCENTILE),
            Err(ProjectionError::InvalidParameter { name: "last_observed_price", .. })
        ));
    }
}
