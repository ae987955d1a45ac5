use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// MovingAveragePoint — One aligned entry of a moving-average line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingAveragePoint {
    pub timestamp: DateTime<Utc>,
    /// `None` until the window has filled.
    pub value: Option<f64>,
}

// ---------------------------------------------------------------------------
// MovingAverageSet — Window length -> aligned moving-average line
// ---------------------------------------------------------------------------

/// Simple moving averages keyed by window length.
///
/// Every line has exactly one entry per point of the source series, so the
/// lines can be overlaid on the same time axis as the candles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovingAverageSet {
    lines: BTreeMap<usize, Vec<MovingAveragePoint>>,
}

impl MovingAverageSet {
    pub(crate) fn insert(&mut self, window: usize, line: Vec<MovingAveragePoint>) {
        self.lines.insert(window, line);
    }

    /// The line for `window`, if it was computed.
    pub fn get(&self, window: usize) -> Option<&[MovingAveragePoint]> {
        self.lines.get(&window).map(Vec::as_slice)
    }

    /// Window lengths in ascending order.
    pub fn windows(&self) -> Vec<usize> {
        self.lines.keys().copied().collect()
    }

    /// Only the defined `(timestamp, value)` pairs of a line.
    pub fn defined(&self, window: usize) -> Vec<(DateTime<Utc>, f64)> {
        self.get(window)
            .unwrap_or_default()
            .iter()
            .filter_map(|p| p.value.map(|v| (p.timestamp, v)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &[MovingAveragePoint])> {
        self.lines.iter().map(|(w, line)| (*w, line.as_slice()))
    }
}
