use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Json;
use kabuka_sdk::models::parse_windows;
use kabuka_sdk::render::fmt_percent;
use kabuka_sdk::{ChartKind, DisplayOptions, HistoryRange, Interval};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChartParams {
    pub interval: Option<String>,
    pub range: Option<String>,
    pub windows: Option<String>,
    /// `candlestick` (default) or `line`.
    pub chart: Option<String>,
    pub y_floor: Option<f64>,
}

impl ChartParams {
    fn into_options(self) -> Result<DisplayOptions, AppError> {
        let mut opts = DisplayOptions::default();
        if let Some(interval) = self.interval {
            opts = opts.interval(interval.parse::<Interval>()?);
        }
        if let Some(range) = self.range {
            opts = opts.range(range.parse::<HistoryRange>()?);
        }
        if let Some(windows) = self.windows {
            opts = opts.windows(&parse_windows(&windows)?);
        }
        match self.chart.as_deref() {
            None | Some("candlestick") => {}
            Some("line") => {
                opts = opts.chart(ChartKind::Line {
                    y_floor: self.y_floor,
                })
            }
            Some(other) => {
                return Err(AppError::bad_request(format!(
                    "Unknown chart kind '{other}', expected candlestick or line"
                )))
            }
        }
        Ok(opts)
    }
}

/// GET /api/quote/:symbol
///
/// Company name, current price, market cap and the derived quote fields.
/// Fields that cannot be derived are `null`.
pub async fn get_quote(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> Result<Json<Value>, AppError> {
    let (info, quote) = state
        .sdk
        .run(move |s| s.quotes().quote_fields(&symbol))
        .await?;
    let percent = fmt_percent(quote.percent_change);

    Ok(Json(json!({ "company": info, "quote": quote, "percentText": percent })))
}

/// GET /api/chart/:symbol?interval=1d&range=1y&windows=5,25,75&chart=candlestick
///
/// The full dashboard view: quote fields plus chart data for the options.
pub async fn get_chart(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(params): Query<ChartParams>,
) -> Result<Json<Value>, AppError> {
    let options = params.into_options()?;
    let view = state.sdk.dashboard(&symbol, options).await?;
    let text = view.to_string();

    Ok(Json(json!({ "data": view, "text": text })))
}
