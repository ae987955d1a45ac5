pub mod index;
pub mod quote;
pub mod tickers;
