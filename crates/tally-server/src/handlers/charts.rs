//! Chart handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};

use crate::{AppError, AppState};
use tally_core::render::{render_to_string, ChartStyle};
use tally_core::{ChartData, ChartKind};

fn parse_kind(kind: &str) -> Result<ChartKind, AppError> {
    kind.parse()
        .map_err(|_| AppError::bad_request(&format!("Unknown chart: {}", kind)))
}

fn prepare(state: &AppState, kind: &str) -> Result<ChartData, AppError> {
    let kind = parse_kind(kind)?;
    let ledger = state.store.load_ledger()?;
    Ok(ledger.prepare(kind)?)
}

/// GET /api/charts/:kind - Prepared aggregate as JSON
pub async fn get_chart_data(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> Result<Json<ChartData>, AppError> {
    Ok(Json(prepare(&state, &kind)?))
}

/// GET /api/charts/:kind/svg - Rendered chart
pub async fn get_chart_svg(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let data = prepare(&state, &kind)?;
    let svg = render_to_string(&data, &ChartStyle::from(&state.config.charts));

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}
