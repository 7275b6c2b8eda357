//! Historical return and volatility estimation.

use tracing::debug;

use crate::{
    errors::{DataShortfall, ProjectionError},
    models::{
        price_series::PriceSeries,
        returns::{ReturnSeries, Volatility},
    },
};

/// Minimum number of closes needed to produce one return.
pub const MIN_PRICE_POINTS: usize = 2;

/// Computes daily returns of `prices` and their population standard deviation.
///
/// Fails with [`ProjectionError::InsufficientData`] when the series holds
/// fewer than [`MIN_PRICE_POINTS`] closes.
pub fn estimate(prices: &PriceSeries) -> Result<(ReturnSeries, Volatility), ProjectionError> {
    if prices.len() < MIN_PRICE_POINTS {
        return Err(ProjectionError::InsufficientData {
            symbol: prices.symbol().to_string(),
            cause: DataShortfall::TooFewPoints {
                found: prices.len(),
                required: MIN_PRICE_POINTS,
            },
        });
    }

    let returns = ReturnSeries::from_closes(&prices.closes());
    let volatility = Volatility::new(returns.population_std_dev())?;
    debug!(
        symbol = prices.symbol(),
        returns = returns.len(),
        volatility = volatility.value(),
        "estimated daily volatility"
    );

    Ok((returns, volatility))
}
