//! Market-data providers.
//!
//! A provider is the synchronous boundary to the outside world: it turns a
//! ticker symbol into validated company metadata and a [`PriceSeries`].
//! Everything downstream works on those typed values only.

pub mod yahoo;

pub use yahoo::YahooFinance;

use crate::error::Result;
use crate::models::{CompanyInfo, HistoryRequest, PriceSeries};

/// A blocking source of quotes and price history.
pub trait MarketDataProvider: Send {
    /// Company name, current price and market capitalization for `symbol`.
    ///
    /// Implementations fail with [`UnknownSymbol`](crate::KabukaError::UnknownSymbol)
    /// when the provider has no name for the symbol, and with
    /// [`MissingField`](crate::KabukaError::MissingField) when another
    /// required field is absent.
    fn company_info(&self, symbol: &str) -> Result<CompanyInfo>;

    /// Price history for `symbol` over the requested range and interval.
    fn history(&self, symbol: &str, request: &HistoryRequest) -> Result<PriceSeries>;
}
