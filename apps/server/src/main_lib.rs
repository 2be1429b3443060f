use std::sync::Arc;

use crate::config::Config;
use dealview_core::{
    balance_sheet::{BalanceSheetService, BalanceSheetServiceTrait},
    holdings::{HoldingRepositoryTrait, HoldingService, HoldingServiceTrait},
    store::ObjectStoreTrait,
};
use dealview_storage_sqlite::{db, HoldingRepository, ObjectStoreRepository};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub holding_service: Arc<dyn HoldingServiceTrait + Send + Sync>,
    pub balance_sheet_service: Arc<dyn BalanceSheetServiceTrait + Send + Sync>,
    pub chart_max_points: usize,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let holding_repository: Arc<dyn HoldingRepositoryTrait> =
        Arc::new(HoldingRepository::new(pool.clone(), writer.clone()));
    let object_store: Arc<dyn ObjectStoreTrait> =
        Arc::new(ObjectStoreRepository::new(pool.clone(), writer));

    let holding_service = Arc::new(HoldingService::new(holding_repository.clone()));
    let balance_sheet_service = Arc::new(BalanceSheetService::new(
        holding_repository,
        object_store,
    ));

    Ok(Arc::new(AppState {
        holding_service,
        balance_sheet_service,
        chart_max_points: config.chart_max_points,
    }))
}
