//! Per-session cache of the most recent symbol's fetch results.
//!
//! One dashboard render fetches company info plus one or more histories for
//! the same symbol. The cache keeps those results so repeated renders of the
//! same symbol (changing only the chart interval, say) skip refetching what
//! they already have. Asking for a different symbol evicts everything.

use std::collections::HashMap;

use tracing::debug;

use crate::error::Result;
use crate::models::{CompanyInfo, HistoryRequest, PriceSeries};

/// Point-in-time view of a [`SessionCache`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub symbol: Option<String>,
    pub histories: usize,
    pub hits: u64,
    pub misses: u64,
}

/// In-memory cache scoped to a single symbol.
#[derive(Debug, Default)]
pub struct SessionCache {
    symbol: Option<String>,
    company: Option<CompanyInfo>,
    histories: HashMap<HistoryRequest, PriceSeries>,
    hits: u64,
    misses: u64,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to `symbol`, dropping cached results for any other symbol.
    fn focus(&mut self, symbol: &str) {
        if self.symbol.as_deref() != Some(symbol) {
            if self.symbol.is_some() {
                debug!(from = ?self.symbol, to = symbol, "evicting session cache");
            }
            self.company = None;
            self.histories.clear();
            self.symbol = Some(symbol.to_string());
        }
    }

    /// Cached company info for `symbol`, or the result of `fetch`.
    ///
    /// Errors from `fetch` are returned and not cached.
    pub fn company_or_fetch<F>(&mut self, symbol: &str, fetch: F) -> Result<CompanyInfo>
    where
        F: FnOnce() -> Result<CompanyInfo>,
    {
        self.focus(symbol);
        if let Some(info) = &self.company {
            self.hits += 1;
            return Ok(info.clone());
        }
        self.misses += 1;
        let info = fetch()?;
        self.company = Some(info.clone());
        Ok(info)
    }

    /// Cached history for `(symbol, request)`, or the result of `fetch`.
    pub fn history_or_fetch<F>(
        &mut self,
        symbol: &str,
        request: &HistoryRequest,
        fetch: F,
    ) -> Result<PriceSeries>
    where
        F: FnOnce() -> Result<PriceSeries>,
    {
        self.focus(symbol);
        if let Some(series) = self.histories.get(request) {
            self.hits += 1;
            return Ok(series.clone());
        }
        self.misses += 1;
        let series = fetch()?;
        self.histories.insert(*request, series.clone());
        Ok(series)
    }

    /// The symbol whose results are currently cached.
    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Number of cached histories.
    pub fn len(&self) -> usize {
        self.histories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.company.is_none() && self.histories.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            symbol: self.symbol.clone(),
            histories: self.histories.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }

    /// Drop every cached result. Counters are kept.
    pub fn clear(&mut self) {
        self.symbol = None;
        self.company = None;
        self.histories.clear();
    }
}
