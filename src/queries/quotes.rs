//! Quote, history and moving-average queries for a single symbol.

use crate::analysis;
use crate::pipeline;
use crate::error::Result;
use crate::models::{
    CompanyInfo, HistoryRange, HistoryRequest, Interval, MovingAverageSet, PriceSeries,
    QuoteSnapshot,
};
use crate::render::QuoteFields;
use crate::session::Session;

// ---------------------------------------------------------------------------
// QuoteQuery
// ---------------------------------------------------------------------------

/// Query interface for quotes and price history, backed by the session's
/// provider and cache.
pub struct QuoteQuery<'a> {
    session: &'a Session,
}

impl<'a> QuoteQuery<'a> {
    /// Create a new `QuoteQuery` bound to the given session.
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Company name, current price and market capitalization.
    pub fn company(&self, symbol: &str) -> Result<CompanyInfo> {
        self.session.company_info(symbol)
    }

    /// Price history for an explicit range and interval.
    pub fn history(&self, symbol: &str, request: &HistoryRequest) -> Result<PriceSeries> {
        self.session.history(symbol, request)
    }

    /// Current quote: the provider's current price against recent daily bars.
    ///
    /// Fails with `InsufficientData` when fewer than two daily bars come back
    /// and with `DivisionByZero` when the previous close is 0.
    pub fn snapshot(&self, symbol: &str) -> Result<QuoteSnapshot> {
        let info = self.company(symbol)?;
        let recent = self.history(symbol, &HistoryRequest::recent_daily())?;
        analysis::derive_quote(&recent, info.current_price)
    }

    /// Company info and quote fields, leaving underivable fields unavailable.
    ///
    /// Unlike [`snapshot`](Self::snapshot), too little history or a zero
    /// previous close does not fail the call.
    pub fn quote_fields(&self, symbol: &str) -> Result<(CompanyInfo, QuoteFields)> {
        let info = self.company(symbol)?;
        let recent = self.history(symbol, &HistoryRequest::recent_daily())?;
        let fields = pipeline::quote_fields(&recent, info.current_price)?;
        Ok((info, fields))
    }

    /// Moving averages of the closes for the requested history.
    pub fn moving_averages(
        &self,
        symbol: &str,
        request: &HistoryRequest,
        windows: &[usize],
    ) -> Result<MovingAverageSet> {
        let series = self.history(symbol, request)?;
        analysis::moving_averages(&series, windows)
    }

    /// The last daily close within `range`, or `None` for an empty history.
    ///
    /// Used for indices and FX pairs, which have no separate quote price.
    pub fn latest_close(&self, symbol: &str, range: HistoryRange) -> Result<Option<f64>> {
        let series = self.history(symbol, &HistoryRequest::new(range, Interval::OneDay))?;
        Ok(series.last().map(|p| p.close))
    }
}
