//! Query modules for the kabuka SDK.
//!
//! Each module provides a query struct that borrows from a
//! [`Session`](crate::session::Session) and exposes methods returning typed
//! `Result<T>` values.

pub mod quotes;
pub mod tickers;

pub use quotes::QuoteQuery;
pub use tickers::TickerQuery;
