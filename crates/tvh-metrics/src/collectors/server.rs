use async_trait::async_trait;
use tvh_client::DataSource;
use tvh_common::error::Result;

use crate::{
    catalog::{MetricCatalog, MetricId},
    collectors::Collector,
    labels::LabelField,
    snapshot::Snapshot,
};

pub struct ServerMetrics {
    info: MetricId,
    api_version: MetricId,
}

impl ServerMetrics {
    pub fn register(catalog: &mut MetricCatalog) -> Result<Self> {
        Ok(Self {
            info: catalog.gauge(
                "server_info",
                "Media server identity, always 1",
                &["name", "version"],
            )?,
            api_version: catalog.gauge(
                "server_api_version",
                "HTTP API version reported by the media server",
                &[],
            )?,
        })
    }
}

#[async_trait]
impl Collector for ServerMetrics {
    fn section(&self) -> &'static str {
        "server"
    }

    async fn collect(&self, source: &dyn DataSource, snapshot: &mut Snapshot) -> Result<()> {
        let info = source.server_info().await?;

        snapshot.add_from_record(
            self.info,
            &info,
            &[
                LabelField::Optional("name"),
                LabelField::Optional("sw_version"),
            ],
            Some(1.0),
        )?;
        snapshot.add_from_record(self.api_version, &info, &[], info.number("api_version"))?;
        Ok(())
    }
}
