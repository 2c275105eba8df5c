use std::sync::Arc;

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::{
    render::{CONTENT_TYPE, render_prometheus},
    router::ExporterState,
    types::MetricDefinition,
};

pub async fn prometheus_metrics(State(state): State<Arc<ExporterState>>) -> Response {
    match state.builder.build().await {
        Ok(snapshot) => {
            let mut response = Response::new(Body::from(render_prometheus(&snapshot)));
            *response.status_mut() = StatusCode::OK;
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE));
            response
        }
        Err(err) => {
            warn!(
                section = err.section().unwrap_or("unknown"),
                upstream = err.is_upstream(),
                error = %err,
                "scrape failed"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("scrape failed: {err}\n"),
            )
                .into_response()
        }
    }
}

pub async fn describe_catalog(State(state): State<Arc<ExporterState>>) -> impl IntoResponse {
    let catalog = state.builder.catalog();
    let definitions: Vec<MetricDefinition> = catalog.all().to_vec();
    Json(definitions)
}
