//! Session state shared by the query interfaces.
//!
//! A [`Session`] owns the market-data provider, the per-session fetch cache and
//! the ticker lookup table. Query interfaces borrow it; nothing else holds
//! state between renders.

use crate::cache::{CacheStats, SessionCache};
use crate::error::{KabukaError, Result};
use crate::models::{CompanyInfo, HistoryRequest, PriceSeries};
use crate::provider::MarketDataProvider;
use crate::tickers::TickerTable;
use std::cell::RefCell;
use tracing::info;

/// Trim a user-entered symbol, rejecting blank input before any fetch.
pub fn normalize_symbol(symbol: &str) -> Result<&str> {
    let trimmed = symbol.trim();
    if trimmed.is_empty() {
        return Err(KabukaError::EmptySymbol);
    }
    Ok(trimmed)
}

/// Provider, cache and lookup table for one user session.
pub struct Session {
    provider: Box<dyn MarketDataProvider>,
    cache: RefCell<SessionCache>,
    tickers: TickerTable,
}

impl Session {
    pub fn new(provider: Box<dyn MarketDataProvider>, tickers: TickerTable) -> Self {
        Self {
            provider,
            cache: RefCell::new(SessionCache::new()),
            tickers,
        }
    }

    /// Company info for `symbol`, served from the cache when possible.
    pub fn company_info(&self, symbol: &str) -> Result<CompanyInfo> {
        let symbol = normalize_symbol(symbol)?;
        self.cache
            .borrow_mut()
            .company_or_fetch(symbol, || {
                info!(symbol, "fetching company info");
                self.provider.company_info(symbol)
            })
    }

    /// Price history for `symbol`, served from the cache when possible.
    pub fn history(&self, symbol: &str, request: &HistoryRequest) -> Result<PriceSeries> {
        let symbol = normalize_symbol(symbol)?;
        request.range.validate()?;
        self.cache
            .borrow_mut()
            .history_or_fetch(symbol, request, || {
                info!(
                    symbol,
                    interval = %request.interval,
                    range = ?request.range,
                    "fetching history"
                );
                self.provider.history(symbol, request)
            })
    }

    pub fn tickers(&self) -> &TickerTable {
        &self.tickers
    }

    /// Cached symbol and hit/miss counters.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.borrow().stats()
    }

    /// Drop all cached fetch results.
    pub fn reset_cache(&self) {
        self.cache.borrow_mut().clear();
    }
}
