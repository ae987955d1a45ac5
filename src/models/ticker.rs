use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TickerRow — One row of the static company/ticker lookup table
// ---------------------------------------------------------------------------

/// A `(company name, ticker code)` pair.
///
/// Accepts the English headers `company_name`/`ticker_code` (or `name`/`code`)
/// and the Japanese exchange-listing headers `銘柄名`/`コード`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerRow {
    #[serde(alias = "name", alias = "銘柄名")]
    pub company_name: String,
    #[serde(alias = "code", alias = "コード")]
    pub ticker_code: String,
}

impl TickerRow {
    pub fn new(company_name: impl Into<String>, ticker_code: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            ticker_code: ticker_code.into(),
        }
    }
}
