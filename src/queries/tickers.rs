//! Ticker lookup queries against the session's static table.

use crate::models::TickerRow;
use crate::session::Session;

// ---------------------------------------------------------------------------
// TickerQuery
// ---------------------------------------------------------------------------

/// Query interface for the company-name / ticker-code table.
pub struct TickerQuery<'a> {
    session: &'a Session,
}

impl<'a> TickerQuery<'a> {
    /// Create a new `TickerQuery` bound to the given session.
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Rows whose company name contains `text` (case-insensitive), in table order.
    pub fn search(&self, text: &str) -> Vec<TickerRow> {
        self.session
            .tickers()
            .search(text)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Look up a row by its exact ticker code.
    pub fn get_by_code(&self, code: &str) -> Option<TickerRow> {
        self.session.tickers().get_by_code(code).cloned()
    }

    /// Number of rows in the table.
    pub fn count(&self) -> usize {
        self.session.tickers().len()
    }
}
