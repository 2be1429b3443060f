use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use dealview_core::balance_sheet::{
    BalanceSheetRange, BalanceSheetSeries, BalanceSheetServiceTrait, BalanceSheetSummary,
    ChartPoint, Snapshot,
};
use tokio::task;

use super::dto::ChartQuery;
use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

/// The series is computed on the blocking pool; ranges are capped at one
/// century of days.
pub async fn calculate_balance_sheet(
    State(state): State<Arc<AppState>>,
    Json(range): Json<BalanceSheetRange>,
) -> ApiResult<Json<BalanceSheetSeries>> {
    let service = Arc::clone(&state.balance_sheet_service);
    let series = task::spawn_blocking(move || {
        service.calculate_balance_sheet(&range.start_date, &range.end_date)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Failed to execute calculation task: {}", e)))??;
    Ok(Json(series))
}

pub async fn update_balance_sheet(
    State(state): State<Arc<AppState>>,
    Json(range): Json<BalanceSheetRange>,
) -> ApiResult<Json<BalanceSheetSeries>> {
    let series = state
        .balance_sheet_service
        .update_balance_sheet(&range.start_date, &range.end_date)
        .await?;
    Ok(Json(series))
}

pub async fn get_balance_sheet(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BalanceSheetSeries>> {
    state
        .balance_sheet_service
        .load_balance_sheet()?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn clear_balance_sheet(State(state): State<Arc<AppState>>) -> ApiResult<StatusCode> {
    state.balance_sheet_service.clear_balance_sheet().await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_snapshot(
    State(state): State<Arc<AppState>>,
    Path(date): Path<String>,
) -> ApiResult<Json<Snapshot>> {
    state
        .balance_sheet_service
        .get_snapshot(&date)?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn get_chart_points(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ChartQuery>,
) -> ApiResult<Json<Vec<ChartPoint>>> {
    let max_points = q.max_points.unwrap_or(state.chart_max_points);
    let points = state.balance_sheet_service.get_chart_points(max_points)?;
    Ok(Json(points))
}

pub async fn get_summary(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BalanceSheetSummary>> {
    state
        .balance_sheet_service
        .get_summary()?
        .map(Json)
        .ok_or(ApiError::NotFound)
}
