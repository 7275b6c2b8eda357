//! Moving-average indicators for the chart view.

use serde::Serialize;

/// Window of the simple moving average overlaid on the price chart.
pub const SMA_WINDOW: usize = 50;
/// Centre of mass of the fast MACD average.
pub const MACD_FAST_COM: f64 = 12.0;
/// Centre of mass of the slow MACD average.
pub const MACD_SLOW_COM: f64 = 26.0;
/// Centre of mass of the signal line.
pub const MACD_SIGNAL_COM: f64 = 9.0;

/// Trailing mean over `window` values; `None` until the window is full.
pub fn sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }
    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (i, &v) in values.iter().enumerate() {
        sum += v;
        if i >= window {
            sum -= values[i - window];
        }
        out.push((i + 1 >= window).then(|| sum / window as f64));
    }
    out
}

/// Exponentially weighted mean with decay `1 / (1 + com)`.
///
/// Every observation since the start is weighted by `(1 - alpha)^age` and the
/// weights are renormalised at each step, so the first output equals the
/// first input instead of being biased towards zero.
pub fn ewm_mean(values: &[f64], com: f64) -> Vec<f64> {
    let decay = 1.0 - 1.0 / (1.0 + com);
    let mut num = 0.0;
    let mut den = 0.0;
    values
        .iter()
        .map(|&v| {
            num = v + decay * num;
            den = 1.0 + decay * den;
            num / den
        })
        .collect()
}

/// MACD line, its signal line and their difference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Macd {
    /// Fast average minus slow average.
    pub macd: Vec<f64>,
    /// Average of `macd`.
    pub signal: Vec<f64>,
    /// `macd - signal`.
    pub hist: Vec<f64>,
}

/// MACD of `closes` with the dashboard's default smoothing.
pub fn macd(closes: &[f64]) -> Macd {
    let fast = ewm_mean(closes, MACD_FAST_COM);
    let slow = ewm_mean(closes, MACD_SLOW_COM);
    let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal = ewm_mean(&macd, MACD_SIGNAL_COM);
    let hist = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();
    Macd { macd, signal, hist }
}
