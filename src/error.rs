#[derive(Debug, thiserror::Error)]
pub enum KabukaError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Ticker symbol is empty")]
    EmptySymbol,

    #[error("Unknown ticker symbol: {0}")]
    UnknownSymbol(String),

    #[error("Provider response for {symbol} is missing field '{field}'")]
    MissingField { symbol: String, field: &'static str },

    #[error("Insufficient data: need at least {required} price points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Division by zero: previous close is 0")]
    DivisionByZero,

    #[error("Provider error: {0}")]
    Provider(String),
}

pub type Result<T> = std::result::Result<T, KabukaError>;
