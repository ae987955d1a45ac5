//! Render-ready views and their text form.
//!
//! The views are plain serializable values: a UI collaborator draws the chart
//! data however it likes, and `Display` gives the text report. Values that
//! could not be derived are `None` and print as `N/A`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::KabukaError;
use crate::models::{DisplayOptions, HistoryRange, MovingAverageSet};

/// Placeholder printed for a value that could not be derived.
pub const NOT_AVAILABLE: &str = "N/A";

// ---------------------------------------------------------------------------
// Chart data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeBar {
    pub timestamp: DateTime<Utc>,
    pub volume: u64,
    /// Close at or above open.
    pub rising: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Chart payload for one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartData {
    Candlestick {
        candles: Vec<Candle>,
        moving_averages: MovingAverageSet,
        volume: Vec<VolumeBar>,
    },
    Line {
        points: Vec<LinePoint>,
        /// `(bottom, top)` of the y-axis; `None` for an empty line.
        y_range: Option<(f64, f64)>,
    },
}

impl ChartData {
    /// Number of bars or line points.
    pub fn len(&self) -> usize {
        match self {
            ChartData::Candlestick { candles, .. } => candles.len(),
            ChartData::Line { points, .. } => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// QuoteFields — snapshot fields, each possibly unavailable
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteFields {
    pub previous_close: Option<f64>,
    pub change: Option<f64>,
    pub percent_change: Option<f64>,
    pub latest_open: Option<f64>,
    pub latest_high: Option<f64>,
    pub latest_low: Option<f64>,
}

// ---------------------------------------------------------------------------
// DashboardView — stock page
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub symbol: String,
    pub company_name: String,
    pub currency: Option<String>,
    pub current_price: f64,
    pub market_cap: Option<u64>,
    pub quote: QuoteFields,
    pub options: DisplayOptions,
    pub chart: ChartData,
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.company_name, self.symbol)?;
        match &self.currency {
            Some(ccy) => writeln!(f, "Current price: {:.2} {}", self.current_price, ccy)?,
            None => writeln!(f, "Current price: {:.2}", self.current_price)?,
        }
        writeln!(
            f,
            "Market cap: {}",
            self.market_cap
                .map(format_market_cap)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        )?;
        writeln!(f, "Previous close: {}", fmt_price(self.quote.previous_close))?;
        writeln!(f, "Change: {}", fmt_signed(self.quote.change))?;
        writeln!(f, "Percent change: {}", fmt_percent(self.quote.percent_change))?;
        writeln!(
            f,
            "Open / High / Low: {} / {} / {}",
            fmt_price(self.quote.latest_open),
            fmt_price(self.quote.latest_high),
            fmt_price(self.quote.latest_low)
        )?;
        write!(
            f,
            "Chart: {} bars over {}, {} points",
            self.options.interval,
            describe_range(&self.options.range),
            self.chart.len()
        )?;
        if let ChartData::Candlestick {
            moving_averages, ..
        } = &self.chart
        {
            let windows: Vec<String> = moving_averages
                .windows()
                .iter()
                .map(|w| w.to_string())
                .collect();
            if !windows.is_empty() {
                write!(f, ", MA {}", windows.join("/"))?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// IndexView — index / FX page
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexView {
    pub symbol: String,
    /// Last close in the range.
    pub current: f64,
    pub range: HistoryRange,
    pub chart: ChartData,
}

impl fmt::Display for IndexView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}  {:.2}", self.symbol, self.current)?;
        write!(
            f,
            "Chart: daily closes over {}, {} points",
            describe_range(&self.range),
            self.chart.len()
        )
    }
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Market capitalization in whole millions with thousands separators,
/// e.g. `46123456789000` -> `"46,123,456 million"`.
pub fn format_market_cap(cap: u64) -> String {
    format!("{} million", group_thousands(cap / 1_000_000))
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn fmt_price(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn fmt_signed(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:+.2}", v))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Percent with two decimals, or `N/A`.
pub fn fmt_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}%", v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn describe_range(range: &HistoryRange) -> String {
    match range {
        HistoryRange::Preset(p) => p.as_str().to_string(),
        HistoryRange::Days(d) => format!("{} days", d),
        HistoryRange::Between { start, end } => format!("{}..{}", start, end),
    }
}

/// The message shown to the user when a render pass fails.
pub fn user_message(err: &KabukaError) -> String {
    match err {
        KabukaError::EmptySymbol => "Please enter a ticker symbol.".to_string(),
        KabukaError::UnknownSymbol(symbol) => {
            format!("No company found for ticker '{}'.", symbol)
        }
        KabukaError::MissingField { symbol, field } => {
            format!("Quote data for '{}' is incomplete (no {}).", symbol, field)
        }
        KabukaError::InsufficientData { .. } => {
            "Not enough price history to compute the change.".to_string()
        }
        KabukaError::DivisionByZero => {
            format!("Percent change is {}: previous close is 0.", NOT_AVAILABLE)
        }
        KabukaError::InvalidArgument(msg) => msg.clone(),
        KabukaError::Http(_) | KabukaError::Provider(_) => {
            format!("Market data is unavailable right now: {}", err)
        }
        other => other.to_string(),
    }
}
