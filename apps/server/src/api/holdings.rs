use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use dealview_core::holdings::{Holding, HoldingServiceTrait, HoldingSide, NewHolding};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
struct HoldingsQuery {
    side: Option<String>,
}

/// A holding as returned by the API, with its latest and earliest valuation
/// facts alongside the stored record.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HoldingResponse {
    #[serde(flatten)]
    holding: Holding,
    current_value: Decimal,
    first_valuation_date: Option<NaiveDate>,
}

impl From<Holding> for HoldingResponse {
    fn from(holding: Holding) -> Self {
        Self {
            current_value: holding.current_value(),
            first_valuation_date: holding.first_valuation_date(),
            holding,
        }
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/holdings", get(list_holdings).post(create_holding))
        .route(
            "/holdings/{id}",
            get(get_holding).put(update_holding).delete(delete_holding),
        )
}

async fn list_holdings(
    State(state): State<Arc<AppState>>,
    Query(q): Query<HoldingsQuery>,
) -> ApiResult<Json<Vec<HoldingResponse>>> {
    let side = q
        .side
        .as_deref()
        .map(str::parse::<HoldingSide>)
        .transpose()?;
    let holdings = state.holding_service.get_holdings(side)?;
    Ok(Json(holdings.into_iter().map(HoldingResponse::from).collect()))
}

async fn create_holding(
    State(state): State<Arc<AppState>>,
    Json(new_holding): Json<NewHolding>,
) -> ApiResult<(StatusCode, Json<HoldingResponse>)> {
    let holding = state.holding_service.create_holding(new_holding).await?;
    Ok((StatusCode::CREATED, Json(holding.into())))
}

async fn get_holding(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<HoldingResponse>> {
    let holding = state.holding_service.get_holding(&id)?;
    Ok(Json(holding.into()))
}

/// The path names the holding; an id in the body must agree with it.
async fn update_holding(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<NewHolding>,
) -> ApiResult<Json<HoldingResponse>> {
    if let Some(body_id) = payload.id.as_deref() {
        if body_id != id {
            return Err(ApiError::BadRequest(format!(
                "Body id '{}' does not match path id '{}'",
                body_id, id
            )));
        }
    }
    let holding = state
        .holding_service
        .update_holding(payload.into_holding(id))
        .await?;
    Ok(Json(holding.into()))
}

async fn delete_holding(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<String>> {
    let deleted = state.holding_service.delete_holding(&id).await?;
    Ok(Json(deleted))
}
