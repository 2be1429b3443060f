mod dto;
mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::main_lib::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/balance-sheet",
            get(handlers::get_balance_sheet)
                .post(handlers::update_balance_sheet)
                .delete(handlers::clear_balance_sheet),
        )
        .route(
            "/balance-sheet/calculate",
            post(handlers::calculate_balance_sheet),
        )
        .route(
            "/balance-sheet/snapshot/{date}",
            get(handlers::get_snapshot),
        )
        .route("/balance-sheet/chart", get(handlers::get_chart_points))
        .route("/balance-sheet/summary", get(handlers::get_summary))
}
