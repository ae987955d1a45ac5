//! Quote derivation: previous close, change and latest OHLC from a price series.

use crate::error::{KabukaError, Result};
use crate::models::{PriceChange, PriceSeries, QuoteSnapshot};

/// Minimum series length: the last point plus the one before it.
pub const MIN_POINTS: usize = 2;

fn require_points(series: &PriceSeries) -> Result<()> {
    if series.len() < MIN_POINTS {
        return Err(KabukaError::InsufficientData {
            required: MIN_POINTS,
            actual: series.len(),
        });
    }
    Ok(())
}

/// Previous close and absolute change against `current_price`.
///
/// The previous close is the close of the second-to-last point; the last
/// point may be the period still in progress.
pub fn price_change(series: &PriceSeries, current_price: f64) -> Result<PriceChange> {
    require_points(series)?;
    let prev = &series.points()[series.len() - 2];
    Ok(PriceChange {
        previous_close: prev.close,
        change: current_price - prev.close,
    })
}

/// Derive the full quote snapshot.
///
/// # Errors
///
/// * [`KabukaError::InsufficientData`] for a series shorter than two points.
/// * [`KabukaError::DivisionByZero`] when the previous close is 0.
pub fn derive_quote(series: &PriceSeries, current_price: f64) -> Result<QuoteSnapshot> {
    let change = price_change(series, current_price)?;
    let percent_change = change.percent()?;
    let latest = &series.points()[series.len() - 1];

    Ok(QuoteSnapshot {
        current_price,
        previous_close: change.previous_close,
        change: change.change,
        percent_change,
        latest_open: latest.open,
        latest_high: latest.high,
        latest_low: latest.low,
    })
}
