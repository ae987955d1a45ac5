/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// The async kabuka SDK instance. Each request runs one render pass on
    /// the blocking pool; the SDK's session cache is shared across requests.
    pub sdk: kabuka_sdk::AsyncKabukaSdk,
}
