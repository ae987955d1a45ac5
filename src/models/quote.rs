use serde::{Deserialize, Serialize};

use crate::error::{KabukaError, Result};

// ---------------------------------------------------------------------------
// CompanyInfo — Validated company metadata from the provider
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    pub market_cap: Option<u64>,
    pub currency: Option<String>,
}

// ---------------------------------------------------------------------------
// PriceChange — Previous close and absolute change
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceChange {
    pub previous_close: f64,
    pub change: f64,
}

impl PriceChange {
    /// Percent change relative to the previous close.
    ///
    /// Fails with [`KabukaError::DivisionByZero`] when the previous close is 0.
    pub fn percent(&self) -> Result<f64> {
        if self.previous_close == 0.0 {
            return Err(KabukaError::DivisionByZero);
        }
        Ok(self.change / self.previous_close * 100.0)
    }
}

// ---------------------------------------------------------------------------
// QuoteSnapshot — Derived display fields for one fetch
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSnapshot {
    pub current_price: f64,
    pub previous_close: f64,
    pub change: f64,
    pub percent_change: f64,
    pub latest_open: f64,
    pub latest_high: f64,
    pub latest_low: f64,
}
