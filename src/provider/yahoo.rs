//! Yahoo Finance provider over blocking HTTP.
//!
//! Responses are deserialized into typed structs and validated at this
//! boundary: a missing company name means the symbol is unknown, a missing
//! current price is a named [`KabukaError::MissingField`], and chart rows with
//! any null OHLCV value are dropped.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use super::MarketDataProvider;
use crate::config;
use crate::error::{KabukaError, Result};
use crate::models::{CompanyInfo, HistoryRequest, PricePoint, PriceSeries};

// ---------------------------------------------------------------------------
// Quote endpoint schema
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteEnvelope {
    quote_response: QuoteBody,
}

#[derive(Debug, Deserialize)]
struct QuoteBody {
    #[serde(default)]
    result: Vec<QuoteResult>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteResult {
    symbol: Option<String>,
    long_name: Option<String>,
    short_name: Option<String>,
    regular_market_price: Option<f64>,
    market_cap: Option<f64>,
    currency: Option<String>,
}

// ---------------------------------------------------------------------------
// Chart endpoint schema
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteBars>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteBars {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    description: Option<String>,
}

impl ApiError {
    fn into_error(self, symbol: &str) -> KabukaError {
        if self.code.eq_ignore_ascii_case("Not Found") {
            KabukaError::UnknownSymbol(symbol.to_string())
        } else {
            KabukaError::Provider(format!(
                "{}: {}",
                self.code,
                self.description.unwrap_or_default()
            ))
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a `/v7/finance/quote` response body for `symbol`.
pub fn parse_quote_response(symbol: &str, body: &str) -> Result<CompanyInfo> {
    let envelope: QuoteEnvelope = serde_json::from_str(body)?;
    if let Some(err) = envelope.quote_response.error {
        return Err(err.into_error(symbol));
    }

    let quote = envelope
        .quote_response
        .result
        .into_iter()
        .find(|q| {
            q.symbol
                .as_deref()
                .map_or(true, |s| s.eq_ignore_ascii_case(symbol))
        })
        .ok_or_else(|| KabukaError::UnknownSymbol(symbol.to_string()))?;

    let name = quote
        .long_name
        .or(quote.short_name)
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| KabukaError::UnknownSymbol(symbol.to_string()))?;

    let current_price = quote
        .regular_market_price
        .ok_or_else(|| KabukaError::MissingField {
            symbol: symbol.to_string(),
            field: "regularMarketPrice",
        })?;

    let market_cap = quote
        .market_cap
        .filter(|cap| cap.is_finite() && *cap >= 0.0)
        .map(|cap| cap as u64);

    Ok(CompanyInfo {
        symbol: quote.symbol.unwrap_or_else(|| symbol.to_string()),
        name,
        current_price,
        market_cap,
        currency: quote.currency,
    })
}

/// Parse a `/v8/finance/chart` response body for `symbol`.
///
/// A result with no timestamps yields an empty series.
pub fn parse_chart_response(symbol: &str, body: &str) -> Result<PriceSeries> {
    let envelope: ChartEnvelope = serde_json::from_str(body)?;
    if let Some(err) = envelope.chart.error {
        return Err(err.into_error(symbol));
    }

    let result = envelope
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| KabukaError::UnknownSymbol(symbol.to_string()))?;

    let bars = result.indicators.quote.into_iter().next().unwrap_or_default();

    let mut points = Vec::with_capacity(result.timestamp.len());
    let mut skipped = 0usize;
    for (i, ts) in result.timestamp.iter().enumerate() {
        let row = (
            DateTime::<Utc>::from_timestamp(*ts, 0),
            cell(&bars.open, i),
            cell(&bars.high, i),
            cell(&bars.low, i),
            cell(&bars.close, i),
            cell(&bars.volume, i),
        );
        match row {
            (Some(timestamp), Some(open), Some(high), Some(low), Some(close), Some(volume)) => {
                points.push(PricePoint {
                    timestamp,
                    open,
                    high,
                    low,
                    close,
                    volume: volume.max(0.0) as u64,
                })
            }
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(symbol, skipped, "dropped incomplete chart rows");
    }
    Ok(PriceSeries::new(points))
}

fn cell(column: &[Option<f64>], i: usize) -> Option<f64> {
    column.get(i).copied().flatten().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// YahooFinance
// ---------------------------------------------------------------------------

/// Blocking Yahoo Finance client.
pub struct YahooFinance {
    client: Client,
    base_url: String,
}

impl YahooFinance {
    /// Create a client against the public Yahoo Finance host.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        Self::with_base_url(config::YAHOO_BASE, timeout, user_agent)
    }

    /// Create a client against another host (a proxy or a local stub).
    pub fn with_base_url(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `url` and return the body.
    ///
    /// 404 bodies are returned too: they carry the provider's JSON error
    /// object, which the parsers turn into [`KabukaError::UnknownSymbol`].
    fn get_text(&self, url: &str, query: &[(&str, String)]) -> Result<String> {
        debug!(url, ?query, "requesting");
        let resp = self.client.get(url).query(query).send()?;
        let status = resp.status();
        if !status.is_success() && status != StatusCode::NOT_FOUND {
            warn!(url, %status, "provider request failed");
            return Err(KabukaError::Provider(format!("HTTP {} from {}", status, url)));
        }
        Ok(resp.text()?)
    }
}

impl MarketDataProvider for YahooFinance {
    fn company_info(&self, symbol: &str) -> Result<CompanyInfo> {
        let url = config::quote_url(&self.base_url);
        let body = self.get_text(&url, &[("symbols", symbol.to_string())])?;
        parse_quote_response(symbol, &body)
    }

    fn history(&self, symbol: &str, request: &HistoryRequest) -> Result<PriceSeries> {
        let url = config::chart_url(&self.base_url, symbol);
        let mut query = request.range.query_params(Utc::now())?;
        query.push(("interval", request.interval.as_str().to_string()));
        let body = self.get_text(&url, &query)?;
        let series = parse_chart_response(symbol, &body)?;
        debug!(symbol, points = series.len(), "fetched history");
        Ok(series)
    }
}
