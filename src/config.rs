use std::path::PathBuf;

pub const YAHOO_BASE: &str = "https://query1.finance.yahoo.com";
pub const QUOTE_PATH: &str = "/v7/finance/quote";
pub const CHART_PATH: &str = "/v8/finance/chart";

/// Browser-like user agent; the quote endpoints reject the reqwest default.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) kabuka-sdk/0.1";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Moving-average windows shown on the daily chart (short, medium, long).
pub const DEFAULT_WINDOWS: [usize; 3] = [5, 25, 75];

pub const TICKER_TABLE_FILE: &str = "tickers.csv";

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("kabuka-sdk")
    } else {
        PathBuf::from(".kabuka-sdk")
    }
}

/// Default location of the ticker lookup table, if one has been placed there.
pub fn default_ticker_table() -> PathBuf {
    default_data_dir().join(TICKER_TABLE_FILE)
}

pub fn quote_url(base: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), QUOTE_PATH)
}

pub fn chart_url(base: &str, symbol: &str) -> String {
    format!("{}{}/{}", base.trim_end_matches('/'), CHART_PATH, symbol)
}
