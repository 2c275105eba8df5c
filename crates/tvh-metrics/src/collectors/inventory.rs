use async_trait::async_trait;
use tvh_client::{Collection, DataSource};
use tvh_common::error::Result;

use crate::{
    catalog::{MetricCatalog, MetricId},
    collectors::{Collector, record_count},
    labels::LabelField,
    snapshot::Snapshot,
};

pub struct NetworkMetrics {
    count: MetricId,
    enabled: MetricId,
    muxes: MetricId,
    services: MetricId,
    channels: MetricId,
    scan_queue: MetricId,
}

impl NetworkMetrics {
    pub fn register(catalog: &mut MetricCatalog) -> Result<Self> {
        Ok(Self {
            count: catalog.gauge("network_count", "Number of configured networks", &[])?,
            enabled: catalog.gauge(
                "network_enabled",
                "Whether a network is enabled",
                &["network", "uuid"],
            )?,
            muxes: catalog.gauge(
                "network_mux_count",
                "Number of muxes in a network",
                &["network"],
            )?,
            services: catalog.gauge(
                "network_service_count",
                "Number of services in a network",
                &["network"],
            )?,
            channels: catalog.gauge(
                "network_channel_count",
                "Number of channels mapped from a network",
                &["network"],
            )?,
            scan_queue: catalog.gauge(
                "network_scan_queue_length",
                "Muxes waiting to be scanned in a network",
                &["network"],
            )?,
        })
    }
}

#[async_trait]
impl Collector for NetworkMetrics {
    fn section(&self) -> &'static str {
        "networks"
    }

    async fn collect(&self, source: &dyn DataSource, snapshot: &mut Snapshot) -> Result<()> {
        let networks = source.fetch(Collection::Networks).await?;
        record_count(snapshot, self.count, networks.len())?;

        let by_name = [LabelField::Optional("networkname")];
        for network in &networks {
            snapshot.add_from_record(
                self.enabled,
                network,
                &[
                    LabelField::Optional("networkname"),
                    LabelField::Optional("uuid"),
                ],
                network.number("enabled"),
            )?;
            snapshot.add_from_record(self.muxes, network, &by_name, network.number("num_mux"))?;
            snapshot.add_from_record(
                self.services,
                network,
                &by_name,
                network.number("num_svc"),
            )?;
            snapshot.add_from_record(
                self.channels,
                network,
                &by_name,
                network.number("num_chn"),
            )?;
            snapshot.add_from_record(
                self.scan_queue,
                network,
                &by_name,
                network.number("scanq_length"),
            )?;
        }
        Ok(())
    }
}

pub struct MuxMetrics {
    count: MetricId,
    enabled: MetricId,
    scan_result: MetricId,
    services: MetricId,
}

impl MuxMetrics {
    pub fn register(catalog: &mut MetricCatalog) -> Result<Self> {
        Ok(Self {
            count: catalog.gauge("mux_count", "Number of configured muxes", &[])?,
            enabled: catalog.gauge(
                "mux_enabled",
                "Whether a mux is enabled",
                &["network", "mux"],
            )?,
            scan_result: catalog.gauge(
                "mux_scan_result",
                "Result of the last scan of a mux (0 none, 1 ok, 2 fail, 3 partial, 4 ignore)",
                &["network", "mux"],
            )?,
            services: catalog.gauge(
                "mux_service_count",
                "Number of services carried by a mux",
                &["network", "mux"],
            )?,
        })
    }
}

#[async_trait]
impl Collector for MuxMetrics {
    fn section(&self) -> &'static str {
        "muxes"
    }

    async fn collect(&self, source: &dyn DataSource, snapshot: &mut Snapshot) -> Result<()> {
        let muxes = source.fetch(Collection::Muxes).await?;
        record_count(snapshot, self.count, muxes.len())?;

        let labels = [LabelField::Optional("network"), LabelField::Optional("name")];
        for mux in &muxes {
            snapshot.add_from_record(self.enabled, mux, &labels, mux.number("enabled"))?;
            snapshot.add_from_record(self.scan_result, mux, &labels, mux.number("scan_result"))?;
            snapshot.add_from_record(self.services, mux, &labels, mux.number("num_svc"))?;
        }
        Ok(())
    }
}

pub struct ServiceMetrics {
    count: MetricId,
    enabled: MetricId,
}

impl ServiceMetrics {
    pub fn register(catalog: &mut MetricCatalog) -> Result<Self> {
        Ok(Self {
            count: catalog.gauge("service_count", "Number of discovered services", &[])?,
            enabled: catalog.gauge(
                "service_enabled",
                "Whether a service is enabled",
                &["network", "mux", "service"],
            )?,
        })
    }
}

#[async_trait]
impl Collector for ServiceMetrics {
    fn section(&self) -> &'static str {
        "services"
    }

    async fn collect(&self, source: &dyn DataSource, snapshot: &mut Snapshot) -> Result<()> {
        let services = source.fetch(Collection::Services).await?;
        record_count(snapshot, self.count, services.len())?;

        let labels = [
            LabelField::Optional("network"),
            LabelField::Optional("multiplex"),
            LabelField::Optional("svcname"),
        ];
        for service in &services {
            snapshot.add_from_record(self.enabled, service, &labels, service.number("enabled"))?;
        }
        Ok(())
    }
}

pub struct ChannelMetrics {
    count: MetricId,
    enabled: MetricId,
}

impl ChannelMetrics {
    pub fn register(catalog: &mut MetricCatalog) -> Result<Self> {
        Ok(Self {
            count: catalog.gauge("channel_count", "Number of channels on the server", &[])?,
            enabled: catalog.gauge(
                "channel_enabled",
                "Whether a channel is enabled",
                &["channel_name", "channel_number"],
            )?,
        })
    }
}

#[async_trait]
impl Collector for ChannelMetrics {
    fn section(&self) -> &'static str {
        "channels"
    }

    async fn collect(&self, source: &dyn DataSource, snapshot: &mut Snapshot) -> Result<()> {
        let channels = source.fetch(Collection::Channels).await?;
        record_count(snapshot, self.count, channels.len())?;

        let labels = [LabelField::Optional("name"), LabelField::Optional("number")];
        for channel in &channels {
            snapshot.add_from_record(self.enabled, channel, &labels, channel.number("enabled"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{Value, json};
    use tvh_client::{Collection, Record, StaticDataSource};

    use super::{ChannelMetrics, MuxMetrics, NetworkMetrics};
    use crate::{catalog::MetricCatalog, collectors::Collector, snapshot::Snapshot};

    fn records(values: Vec<Value>) -> Vec<Record> {
        values
            .into_iter()
            .map(|value| Record::try_from(value).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn channel_without_name_still_counts_and_reports() {
        let mut catalog = MetricCatalog::new("tvheadend");
        let metrics = ChannelMetrics::register(&mut catalog).unwrap();
        let mut snapshot = Snapshot::new(Arc::new(catalog));
        let source = StaticDataSource::new().with_collection(
            Collection::Channels,
            records(vec![
                json!({ "name": "BBC One", "number": 1, "enabled": true }),
                json!({ "name": "", "number": 2, "enabled": true }),
                json!({ "name": "ITV", "enabled": false }),
            ]),
        );

        metrics.collect(&source, &mut snapshot).await.unwrap();

        let count = snapshot.samples("tvheadend_channel_count").unwrap();
        assert_eq!(count[0].value, 3.0);

        let enabled = snapshot.samples("tvheadend_channel_enabled").unwrap();
        assert_eq!(enabled.len(), 3);
        assert_eq!(enabled[1].label_values, ["", "2"]);
        assert_eq!(enabled[2].label_values, ["ITV", ""]);
        assert_eq!(enabled[2].value, 0.0);
    }

    #[tokio::test]
    async fn network_missing_one_number_loses_only_that_sample() {
        let mut catalog = MetricCatalog::new("tvheadend");
        let metrics = NetworkMetrics::register(&mut catalog).unwrap();
        let mut snapshot = Snapshot::new(Arc::new(catalog));
        let source = StaticDataSource::new().with_collection(
            Collection::Networks,
            records(vec![
                json!({
                    "uuid": "n1", "networkname": "DVB-T", "enabled": true,
                    "num_mux": 6, "num_svc": 80, "num_chn": 40, "scanq_length": 0,
                }),
                json!({
                    "uuid": "n2", "networkname": "IPTV", "enabled": true,
                    "num_svc": 12, "num_chn": 12, "scanq_length": 2,
                }),
            ]),
        );

        metrics.collect(&source, &mut snapshot).await.unwrap();

        assert_eq!(snapshot.samples("tvheadend_network_count").unwrap()[0].value, 2.0);
        let muxes = snapshot.samples("tvheadend_network_mux_count").unwrap();
        assert_eq!(muxes.len(), 1);
        assert_eq!(muxes[0].label_values, ["DVB-T"]);
        assert_eq!(snapshot.samples("tvheadend_network_service_count").unwrap().len(), 2);
        assert_eq!(snapshot.samples("tvheadend_network_enabled").unwrap().len(), 2);
    }

    #[tokio::test]
    async fn empty_mux_grid_reports_zero_count() {
        let mut catalog = MetricCatalog::new("tvheadend");
        let metrics = MuxMetrics::register(&mut catalog).unwrap();
        let mut snapshot = Snapshot::new(Arc::new(catalog));

        metrics
            .collect(&StaticDataSource::new(), &mut snapshot)
            .await
            .unwrap();

        assert_eq!(snapshot.samples("tvheadend_mux_count").unwrap()[0].value, 0.0);
        assert!(snapshot.samples("tvheadend_mux_enabled").unwrap().is_empty());
    }
}
