//! Simple moving averages over close prices.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::{KabukaError, Result};
use crate::models::{MovingAveragePoint, MovingAverageSet, PriceSeries};

/// Simple moving average of `values` over `window`.
///
/// The output has one entry per input value. Entry `i` is the mean of
/// `values[i + 1 - window..=i]` once the window has filled and `None` before.
/// Uses a running sum, so each window costs O(n) regardless of its length.
pub fn simple_moving_average(values: &[f64], window: usize) -> Result<Vec<Option<f64>>> {
    if window == 0 {
        return Err(KabukaError::InvalidArgument(
            "Moving-average window must be positive".into(),
        ));
    }

    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (i, value) in values.iter().enumerate() {
        sum += value;
        if i >= window {
            sum -= values[i - window];
        }
        if i + 1 >= window {
            out.push(Some(sum / window as f64));
        } else {
            out.push(None);
        }
    }
    Ok(out)
}

/// Moving averages of the series' closes for every window in `windows`.
///
/// Duplicate window lengths are computed once. Each line is aligned with the
/// series' timestamps.
pub fn moving_averages(series: &PriceSeries, windows: &[usize]) -> Result<MovingAverageSet> {
    let closes = series.closes();
    let unique: BTreeSet<usize> = windows.iter().copied().collect();

    let mut set = MovingAverageSet::default();
    for window in unique {
        let line = simple_moving_average(&closes, window)?
            .into_iter()
            .zip(series.iter())
            .map(|(value, point)| MovingAveragePoint {
                timestamp: point.timestamp,
                value,
            })
            .collect();
        set.insert(window, line);
    }

    debug!(
        points = series.len(),
        windows = ?set.windows(),
        "computed moving averages"
    );
    Ok(set)
}
