use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;
use tvh_client::DataSource;
use tvh_common::error::Result;

use crate::{builder::SnapshotBuilder, handlers};

pub struct ExporterState {
    pub builder: SnapshotBuilder,
}

impl ExporterState {
    pub fn new(source: Arc<dyn DataSource>) -> Result<Self> {
        Ok(Self {
            builder: SnapshotBuilder::new(source)?,
        })
    }
}

pub fn exporter_router(state: Arc<ExporterState>) -> Router {
    Router::new()
        .route("/", get(handlers::health::index))
        .route("/health/live", get(handlers::health::health_live))
        .route("/metrics", get(handlers::metrics::prometheus_metrics))
        .route("/catalog", get(handlers::metrics::describe_catalog))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
