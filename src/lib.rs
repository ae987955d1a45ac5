//! Kabuka SDK for Rust.
//!
//! Fetches stock quotes and price history from a market-data provider (Yahoo
//! Finance by default), derives the dashboard display values (previous close,
//! change, percent change, moving averages) and builds render-ready views for
//! a stock page or an index / FX page.
//!
//! # Quick start
//!
//! ```no_run
//! use kabuka_sdk::{DisplayOptions, KabukaSdk};
//!
//! let sdk = KabukaSdk::builder().ticker_table("tickers.csv").build().unwrap();
//!
//! // Look up a ticker code by company name
//! let rows = sdk.tickers().search("toyota");
//!
//! // Render the stock page
//! let view = sdk.dashboard().render("7203.T", &DisplayOptions::default()).unwrap();
//! println!("{}", view);
//! ```
//!
//! A JSON API built on the SDK lives in `demos/dashboard-api`.

pub mod analysis;
#[cfg(feature = "async")]
pub mod async_client;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod provider;
pub mod queries;
pub mod render;
pub mod session;
pub mod tickers;

#[cfg(feature = "async")]
pub use async_client::AsyncKabukaSdk;
pub use cache::{CacheStats, SessionCache};
pub use error::{KabukaError, Result};
pub use models::{
    ChartKind, CompanyInfo, DisplayOptions, HistoryRange, HistoryRequest, Interval,
    MovingAverageSet, Period, PricePoint, PriceSeries, QuoteSnapshot, TickerRow,
};
pub use pipeline::Dashboard;
pub use provider::{MarketDataProvider, YahooFinance};
pub use render::{DashboardView, IndexView};
pub use session::Session;
pub use tickers::TickerTable;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

// ---------------------------------------------------------------------------
// KabukaSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`KabukaSdk`] instance.
///
/// Use [`KabukaSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](KabukaSdkBuilder::build) to create the SDK.
pub struct KabukaSdkBuilder {
    ticker_path: Option<PathBuf>,
    tickers: Option<TickerTable>,
    timeout: Duration,
    user_agent: String,
    base_url: String,
    provider: Option<Box<dyn MarketDataProvider>>,
}

impl Default for KabukaSdkBuilder {
    fn default() -> Self {
        Self {
            ticker_path: None,
            tickers: None,
            timeout: Duration::from_secs(config::DEFAULT_TIMEOUT_SECS),
            user_agent: config::DEFAULT_USER_AGENT.to_string(),
            base_url: config::YAHOO_BASE.to_string(),
            provider: None,
        }
    }
}

impl KabukaSdkBuilder {
    /// Load the ticker lookup table from a CSV file (`.csv` or `.csv.gz`).
    ///
    /// If neither this nor [`tickers`](Self::tickers) is set, the table at
    /// [`config::default_ticker_table()`] is loaded when present, and an
    /// empty table is used otherwise.
    pub fn ticker_table<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.ticker_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use an already-built ticker table.
    pub fn tickers(mut self, table: TickerTable) -> Self {
        self.tickers = Some(table);
        self
    }

    /// Set the HTTP request timeout for provider calls.
    ///
    /// Defaults to 30 seconds. Ignored when a custom provider is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header sent to the provider.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Point the built-in Yahoo Finance provider at another host.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replace the built-in provider.
    pub fn provider<P: MarketDataProvider + 'static>(mut self, provider: P) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Build the SDK, loading the ticker table and creating the provider.
    ///
    /// No market data is fetched here; fetches happen on first query.
    pub fn build(self) -> Result<KabukaSdk> {
        let tickers = match (self.tickers, self.ticker_path) {
            (Some(table), _) => table,
            (None, Some(path)) => TickerTable::load(path)?,
            (None, None) => {
                let default = config::default_ticker_table();
                if default.exists() {
                    TickerTable::load(default)?
                } else {
                    debug!(path = %default.display(), "no ticker table found");
                    TickerTable::default()
                }
            }
        };

        let provider: Box<dyn MarketDataProvider> = match self.provider {
            Some(p) => p,
            None => Box::new(YahooFinance::with_base_url(
                &self.base_url,
                self.timeout,
                &self.user_agent,
            )?),
        };

        Ok(KabukaSdk {
            session: Session::new(provider, tickers),
        })
    }
}

// ---------------------------------------------------------------------------
// KabukaSdk
// ---------------------------------------------------------------------------

/// The main entry point for the kabuka SDK.
///
/// Wraps a [`Session`] (which owns the provider, the fetch cache and the
/// ticker table) and exposes query interfaces as lightweight borrowing
/// wrappers.
///
/// Created via [`KabukaSdk::builder()`].
pub struct KabukaSdk {
    session: Session,
}

impl KabukaSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> KabukaSdkBuilder {
        KabukaSdkBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the quote / history query interface.
    pub fn quotes(&self) -> queries::quotes::QuoteQuery<'_> {
        queries::quotes::QuoteQuery::new(&self.session)
    }

    /// Access the ticker lookup interface.
    pub fn tickers(&self) -> queries::tickers::TickerQuery<'_> {
        queries::tickers::TickerQuery::new(&self.session)
    }

    /// Access the dashboard pipeline.
    pub fn dashboard(&self) -> pipeline::Dashboard<'_> {
        pipeline::Dashboard::new(&self.session)
    }

    // -- Utility methods ---------------------------------------------------

    /// Drop all cached fetch results so the next query refetches.
    pub fn refresh(&self) {
        self.session.reset_cache();
        debug!("session cache cleared");
    }

    /// Return a reference to the underlying [`Session`] for advanced usage.
    pub fn session(&self) -> &Session {
        &self.session
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for KabukaSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.session.cache_stats();
        write!(
            f,
            "KabukaSdk(tickers={}, cached_symbol={}, hits={}, misses={})",
            self.session.tickers().len(),
            stats.symbol.as_deref().unwrap_or("-"),
            stats.hits,
            stats.misses
        )
    }
}
