//! Shared test fixtures for the kabuka SDK integration tests.
//!
//! Provides a scripted `FakeProvider` (no network), price-series builders and
//! a sample ticker table.

#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};
use kabuka_sdk::{
    CompanyInfo, HistoryRequest, KabukaError, KabukaSdk, MarketDataProvider, PricePoint,
    PriceSeries, Result, TickerRow, TickerTable,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Daily series starting 2024-04-01 with the given closes.
///
/// open = close - 1, high = close + 2, low = close - 2, volume = 1000 * (i + 1).
pub fn series_from_closes(closes: &[f64]) -> PriceSeries {
    let start = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
    let points = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint {
            timestamp: start + Duration::days(i as i64),
            open: close - 1.0,
            high: close + 2.0,
            low: close - 2.0,
            close,
            volume: 1000 * (i as u64 + 1),
        })
        .collect();
    PriceSeries::new(points)
}

pub fn toyota_info(price: f64) -> CompanyInfo {
    CompanyInfo {
        symbol: "7203.T".to_string(),
        name: "Toyota Motor Corporation".to_string(),
        current_price: price,
        market_cap: Some(46_123_456_789_000),
        currency: Some("JPY".to_string()),
    }
}

pub fn sample_rows() -> Vec<TickerRow> {
    vec![
        TickerRow::new("Toyota Motor", "7203"),
        TickerRow::new("Sony", "6758"),
        TickerRow::new("Toyota Industries", "6201"),
        TickerRow::new("Nintendo", "7974"),
    ]
}

/// Call counters shared between a `FakeProvider` and the test body.
#[derive(Debug, Default, Clone)]
pub struct Calls {
    pub company: Arc<AtomicUsize>,
    pub history: Arc<AtomicUsize>,
}

impl Calls {
    pub fn company(&self) -> usize {
        self.company.load(Ordering::SeqCst)
    }

    pub fn history(&self) -> usize {
        self.history.load(Ordering::SeqCst)
    }
}

/// Scripted provider: companies by symbol, histories by `(symbol, request)`
/// with a per-symbol fallback series.
#[derive(Default)]
pub struct FakeProvider {
    companies: HashMap<String, CompanyInfo>,
    histories: HashMap<(String, HistoryRequest), PriceSeries>,
    fallback: HashMap<String, PriceSeries>,
    pub calls: Calls,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_company(mut self, info: CompanyInfo) -> Self {
        self.companies.insert(info.symbol.clone(), info);
        self
    }

    pub fn with_history(mut self, symbol: &str, request: HistoryRequest, series: PriceSeries) -> Self {
        self.histories.insert((symbol.to_string(), request), series);
        self
    }

    /// Series returned for any request on `symbol` without a specific entry.
    pub fn with_default_history(mut self, symbol: &str, series: PriceSeries) -> Self {
        self.fallback.insert(symbol.to_string(), series);
        self
    }
}

impl MarketDataProvider for FakeProvider {
    fn company_info(&self, symbol: &str) -> Result<CompanyInfo> {
        self.calls.company.fetch_add(1, Ordering::SeqCst);
        self.companies
            .get(symbol)
            .cloned()
            .ok_or_else(|| KabukaError::UnknownSymbol(symbol.to_string()))
    }

    fn history(&self, symbol: &str, request: &HistoryRequest) -> Result<PriceSeries> {
        self.calls.history.fetch_add(1, Ordering::SeqCst);
        self.histories
            .get(&(symbol.to_string(), *request))
            .or_else(|| self.fallback.get(symbol))
            .cloned()
            .ok_or_else(|| KabukaError::UnknownSymbol(symbol.to_string()))
    }
}

/// Build an SDK over `provider` with the sample ticker table.
pub fn sdk_with(provider: FakeProvider) -> KabukaSdk {
    KabukaSdk::builder()
        .tickers(TickerTable::from_rows(sample_rows()))
        .provider(provider)
        .build()
        .unwrap()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
