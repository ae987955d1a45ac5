use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Json;
use kabuka_sdk::HistoryRange;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct IndexParams {
    pub range: Option<String>,
    pub y_floor: Option<f64>,
}

/// GET /api/index/:symbol?range=1y&y_floor=24000
///
/// Latest close and a close-price line for an index or FX pair
/// (e.g. `^N225`, `JPY=X`).
pub async fn get_index(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(params): Query<IndexParams>,
) -> Result<Json<Value>, AppError> {
    let range = match params.range {
        Some(r) => r.parse::<HistoryRange>()?,
        None => HistoryRange::default(),
    };
    let y_floor = params.y_floor;

    let view = state
        .sdk
        .run(move |s| s.dashboard().index(&symbol, range, y_floor))
        .await?;
    let text = view.to_string();

    Ok(Json(json!({ "data": view, "text": text })))
}
