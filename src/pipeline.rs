//! The fetch → derive → render pipeline behind every dashboard page.
//!
//! One parameterized pipeline serves both page variants: the stock page
//! ([`Dashboard::render`]) and the index / FX page ([`Dashboard::index`]).
//! Each call is one render pass; a failure ends that pass only.

use tracing::{debug, warn};

use crate::analysis;
use crate::error::{KabukaError, Result};
use crate::models::{
    ChartKind, DisplayOptions, HistoryRange, HistoryRequest, Interval, PriceSeries,
};
use crate::render::{
    Candle, ChartData, DashboardView, IndexView, LinePoint, QuoteFields, VolumeBar,
};
use crate::session::{normalize_symbol, Session};

/// Dashboard renderer bound to a session.
pub struct Dashboard<'a> {
    session: &'a Session,
}

impl<'a> Dashboard<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Render the stock page for `symbol`.
    ///
    /// # Errors
    ///
    /// * [`KabukaError::EmptySymbol`] for blank input; nothing is fetched.
    /// * [`KabukaError::UnknownSymbol`] when the provider has no company name.
    /// * Provider and transport errors from either fetch.
    ///
    /// Missing or degenerate quote history does not fail the render: the
    /// affected [`QuoteFields`] are left unavailable instead.
    pub fn render(&self, symbol: &str, options: &DisplayOptions) -> Result<DashboardView> {
        let symbol = normalize_symbol(symbol)?;
        options.validate()?;

        let info = self.session.company_info(symbol)?;
        let recent = self
            .session
            .history(symbol, &HistoryRequest::recent_daily())?;
        let quote = quote_fields(&recent, info.current_price)?;

        let series = self.session.history(symbol, &options.request())?;
        let chart = match options.chart {
            ChartKind::Candlestick => candlestick(&series, &options.windows)?,
            ChartKind::Line { y_floor } => line(&series, y_floor),
        };

        debug!(symbol, points = chart.len(), "rendered dashboard");
        Ok(DashboardView {
            symbol: info.symbol,
            company_name: info.name,
            currency: info.currency,
            current_price: info.current_price,
            market_cap: info.market_cap,
            quote,
            options: options.clone(),
            chart,
        })
    }

    /// Render the index / FX page: latest close and a filled close-price line.
    ///
    /// `y_floor` pins the bottom of the y-axis; otherwise the lowest close is
    /// used. Fails with [`KabukaError::InsufficientData`] on an empty history.
    pub fn index(
        &self,
        symbol: &str,
        range: HistoryRange,
        y_floor: Option<f64>,
    ) -> Result<IndexView> {
        let symbol = normalize_symbol(symbol)?;
        let series = self
            .session
            .history(symbol, &HistoryRequest::new(range, Interval::OneDay))?;

        let current = series
            .last()
            .map(|p| p.close)
            .ok_or(KabukaError::InsufficientData {
                required: 1,
                actual: 0,
            })?;

        Ok(IndexView {
            symbol: symbol.to_string(),
            current,
            range,
            chart: line(&series, y_floor),
        })
    }
}

/// Quote fields with the unavailable ones left as `None`.
///
/// Too little history blanks previous close, change and percent; a zero
/// previous close blanks only the percent. Any other error is returned.
pub fn quote_fields(recent: &PriceSeries, current_price: f64) -> Result<QuoteFields> {
    let mut fields = QuoteFields::default();
    if let Some(last) = recent.last() {
        fields.latest_open = Some(last.open);
        fields.latest_high = Some(last.high);
        fields.latest_low = Some(last.low);
    }

    match analysis::price_change(recent, current_price) {
        Ok(change) => {
            fields.previous_close = Some(change.previous_close);
            fields.change = Some(change.change);
            match change.percent() {
                Ok(pct) => fields.percent_change = Some(pct),
                Err(KabukaError::DivisionByZero) => {
                    warn!("previous close is 0; percent change unavailable");
                }
                Err(e) => return Err(e),
            }
        }
        Err(KabukaError::InsufficientData { required, actual }) => {
            warn!(required, actual, "not enough history for previous close");
        }
        Err(e) => return Err(e),
    }
    Ok(fields)
}

fn candlestick(series: &PriceSeries, windows: &[usize]) -> Result<ChartData> {
    let candles = series
        .iter()
        .map(|p| Candle {
            timestamp: p.timestamp,
            open: p.open,
            high: p.high,
            low: p.low,
            close: p.close,
        })
        .collect();
    let volume = series
        .iter()
        .map(|p| VolumeBar {
            timestamp: p.timestamp,
            volume: p.volume,
            rising: p.close >= p.open,
        })
        .collect();

    Ok(ChartData::Candlestick {
        candles,
        moving_averages: analysis::moving_averages(series, windows)?,
        volume,
    })
}

fn line(series: &PriceSeries, y_floor: Option<f64>) -> ChartData {
    let points: Vec<LinePoint> = series
        .iter()
        .map(|p| LinePoint {
            timestamp: p.timestamp,
            value: p.close,
        })
        .collect();

    let max = points.iter().map(|p| p.value).reduce(f64::max);
    let min = points.iter().map(|p| p.value).reduce(f64::min);
    let y_range = match (min, max) {
        (Some(min), Some(max)) => Some((y_floor.unwrap_or(min).min(max), max)),
        _ => None,
    };

    ChartData::Line { points, y_range }
}
