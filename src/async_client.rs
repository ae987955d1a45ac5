//! Async wrapper around [`KabukaSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! the blocking HTTP client waits on the provider.
//!
//! # Example
//!
//! ```no_run
//! use kabuka_sdk::{AsyncKabukaSdk, DisplayOptions};
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncKabukaSdk::builder().build().await.unwrap();
//!
//!     // Run any sync SDK method via closure
//!     let view = sdk.run(|s| {
//!         s.dashboard().render("7203.T", &DisplayOptions::default())
//!     }).await.unwrap();
//!
//!     // Convenience method for ticker search
//!     let rows = sdk.search_tickers("toyota").await.unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::{KabukaError, Result};
use crate::models::{DisplayOptions, TickerRow};
use crate::provider::MarketDataProvider;
use crate::render::DashboardView;
use crate::{KabukaSdk, KabukaSdkBuilder};

// ---------------------------------------------------------------------------
// AsyncKabukaSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncKabukaSdk`] instance.
pub struct AsyncKabukaSdkBuilder {
    inner: KabukaSdkBuilder,
}

impl Default for AsyncKabukaSdkBuilder {
    fn default() -> Self {
        Self {
            inner: KabukaSdk::builder(),
        }
    }
}

impl AsyncKabukaSdkBuilder {
    /// Load the ticker lookup table from a CSV file.
    pub fn ticker_table<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path: PathBuf = path.as_ref().to_path_buf();
        self.inner = self.inner.ticker_table(path);
        self
    }

    /// Set the HTTP request timeout for provider calls.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    /// Replace the built-in provider.
    pub fn provider<P: MarketDataProvider + 'static>(mut self, provider: P) -> Self {
        self.inner = self.inner.provider(provider);
        self
    }

    /// Build the async SDK.
    ///
    /// Initialization runs on the blocking thread pool so loading the ticker
    /// table and creating the blocking HTTP client won't block the event loop.
    pub async fn build(self) -> Result<AsyncKabukaSdk> {
        let builder = self.inner;
        tokio::task::spawn_blocking(move || {
            let sdk = builder.build()?;
            Ok(AsyncKabukaSdk {
                inner: Arc::new(Mutex::new(sdk)),
            })
        })
        .await
        .map_err(|e| KabukaError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncKabukaSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`KabukaSdk`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying [`KabukaSdk`] is
/// protected by a [`Mutex`] since it uses `RefCell` internally, so renders
/// are serialized one at a time.
pub struct AsyncKabukaSdk {
    inner: Arc<Mutex<KabukaSdk>>,
}

impl AsyncKabukaSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncKabukaSdkBuilder {
        AsyncKabukaSdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives an `&KabukaSdk` reference and should return
    /// a `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&KabukaSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| KabukaError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| KabukaError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Render the stock page asynchronously.
    pub async fn dashboard(&self, symbol: &str, options: DisplayOptions) -> Result<DashboardView> {
        let symbol = symbol.to_string();
        self.run(move |s| s.dashboard().render(&symbol, &options))
            .await
    }

    /// Search the ticker table asynchronously.
    pub async fn search_tickers(&self, text: &str) -> Result<Vec<TickerRow>> {
        let text = text.to_string();
        self.run(move |s| Ok(s.tickers().search(&text))).await
    }

    /// Drop cached fetch results.
    pub async fn refresh(&self) -> Result<()> {
        self.run(|s| {
            s.refresh();
            Ok(())
        })
        .await
    }
}
