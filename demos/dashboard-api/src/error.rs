use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use kabuka_sdk::render::user_message;
use kabuka_sdk::KabukaError;
use serde_json::json;

/// Unified error type that renders as a JSON `{"error": "..."}` response
/// with an appropriate HTTP status code.
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<KabukaError> for AppError {
    fn from(e: KabukaError) -> Self {
        let status = match &e {
            KabukaError::EmptySymbol | KabukaError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            KabukaError::UnknownSymbol(_) => StatusCode::NOT_FOUND,
            KabukaError::InsufficientData { .. } | KabukaError::DivisionByZero => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            KabukaError::Http(_) | KabukaError::Provider(_) | KabukaError::MissingField { .. } => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: user_message(&e),
        }
    }
}
