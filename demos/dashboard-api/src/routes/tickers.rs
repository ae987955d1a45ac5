use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// GET /api/tickers/search?q=toyota
///
/// Company-name substring search over the ticker table.
pub async fn search_tickers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, AppError> {
    let q = params
        .q
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| AppError::bad_request("Missing required query parameter: q"))?;

    let rows = state.sdk.search_tickers(&q).await?;

    let count = rows.len();
    Ok(Json(json!({ "data": rows, "count": count })))
}
