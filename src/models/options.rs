use serde::{Deserialize, Serialize};

use super::period::{HistoryRange, HistoryRequest, Interval};
use crate::config;
use crate::error::{KabukaError, Result};

// ---------------------------------------------------------------------------
// ChartKind — How the price history is drawn
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// OHLC candles with moving-average overlays and a volume subplot.
    #[default]
    Candlestick,
    /// Filled close-price line. `y_floor` pins the bottom of the y-axis.
    Line { y_floor: Option<f64> },
}

// ---------------------------------------------------------------------------
// DisplayOptions — Parameters of one dashboard render
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayOptions {
    pub interval: Interval,
    pub range: HistoryRange,
    pub windows: Vec<usize>,
    pub chart: ChartKind,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            interval: Interval::OneDay,
            range: HistoryRange::default(),
            windows: config::DEFAULT_WINDOWS.to_vec(),
            chart: ChartKind::Candlestick,
        }
    }
}

impl DisplayOptions {
    pub fn interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }

    pub fn range(mut self, range: HistoryRange) -> Self {
        self.range = range;
        self
    }

    pub fn windows(mut self, windows: &[usize]) -> Self {
        self.windows = windows.to_vec();
        self
    }

    pub fn chart(mut self, chart: ChartKind) -> Self {
        self.chart = chart;
        self
    }

    /// The history request for the chart.
    pub fn request(&self) -> HistoryRequest {
        HistoryRequest::new(self.range, self.interval)
    }

    pub fn validate(&self) -> Result<()> {
        self.range.validate()?;
        if self.windows.contains(&0) {
            return Err(KabukaError::InvalidArgument(
                "Moving-average window must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Parse a comma-separated window list such as `"5,25,75"`.
pub fn parse_windows(s: &str) -> Result<Vec<usize>> {
    s.split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(|w| match w.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(KabukaError::InvalidArgument(format!(
                "Invalid moving-average window '{}'",
                w
            ))),
        })
        .collect()
}
