//! Derived display values computed from a fetched price series.

pub mod moving_average;
pub mod quote;

pub use moving_average::{moving_averages, simple_moving_average};
pub use quote::{derive_quote, price_change};
