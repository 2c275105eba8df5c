mod cli;
mod logging;

use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tvh_client::{DataSource, HttpDataSource};
use tvh_metrics::{ExporterState, exporter_router};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.log_format);

    let source = Arc::new(HttpDataSource::new(cli.client_config()?)?);
    let state = Arc::new(ExporterState::new(source.clone())?);
    info!(
        metrics = state.builder.catalog().len(),
        "metric catalog ready"
    );

    // The endpoint is only bound once the upstream answers.
    let server_info = source.server_info().await.map_err(|err| {
        error!(upstream = source.base_url(), error = %err, "media server is not reachable");
        err
    })?;
    info!(
        upstream = source.base_url(),
        version = %server_info.text("sw_version").unwrap_or_default(),
        "connected to media server"
    );

    let addr = cli.listen_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("tvheadend exporter listening on {addr}");
    axum::serve(listener, exporter_router(state)).await?;

    Ok(())
}
