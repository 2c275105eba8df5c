use std::sync::Arc;

use tracing::{debug, error};
use tvh_client::DataSource;
use tvh_common::error::Result;

use crate::{
    catalog::{MetricCatalog, MetricId, NAMESPACE},
    collectors::{self, Collector},
    snapshot::Snapshot,
};

/// Produces one complete snapshot per scrape.
///
/// The catalog and the data source are shared read-only between scrapes;
/// everything a scrape writes lives in its own [`Snapshot`].
pub struct SnapshotBuilder {
    catalog: Arc<MetricCatalog>,
    collectors: Vec<Box<dyn Collector>>,
    scrape_duration: MetricId,
    source: Arc<dyn DataSource>,
}

impl SnapshotBuilder {
    pub fn new(source: Arc<dyn DataSource>) -> Result<Self> {
        let mut catalog = MetricCatalog::new(NAMESPACE);
        let collectors = collectors::register_all(&mut catalog)?;
        let scrape_duration = catalog.gauge(
            "scrape_duration_seconds",
            "Duration of the media server scrape",
            &[],
        )?;

        Ok(Self {
            catalog: Arc::new(catalog),
            collectors,
            scrape_duration,
            source,
        })
    }

    pub fn catalog(&self) -> Arc<MetricCatalog> {
        Arc::clone(&self.catalog)
    }

    /// Runs every section in order. The first section that fails aborts the
    /// scrape and no snapshot is returned.
    pub async fn build(&self) -> Result<Snapshot> {
        let mut snapshot = Snapshot::new(Arc::clone(&self.catalog));

        for collector in &self.collectors {
            let section = collector.section();
            if let Err(err) = collector.collect(self.source.as_ref(), &mut snapshot).await {
                error!(section, error = %err, "scrape section failed");
                return Err(err.in_section(section));
            }
        }

        let elapsed = snapshot.elapsed();
        snapshot.add(self.scrape_duration, Vec::new(), elapsed.as_secs_f64())?;
        debug!(
            started_at = %snapshot.started_at(),
            duration_ms = elapsed.as_millis() as u64,
            samples = snapshot.sample_count(),
            "scrape completed"
        );

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{Value, json};
    use tvh_client::{Collection, DvrStatus, Record, StaticDataSource};

    use super::SnapshotBuilder;

    fn records(values: Vec<Value>) -> Vec<Record> {
        values
            .into_iter()
            .map(|value| Record::try_from(value).unwrap())
            .collect()
    }

    fn source_with_channels(names: &[&str]) -> StaticDataSource {
        let channels = names
            .iter()
            .map(|name| json!({ "name": name, "enabled": true }))
            .collect();
        StaticDataSource::new()
            .with_server_info(
                Record::try_from(json!({ "name": "Tvheadend", "sw_version": "4.3", "api_version": 19 }))
                    .unwrap(),
            )
            .with_collection(Collection::Channels, records(channels))
    }

    #[tokio::test]
    async fn every_sample_matches_its_definition_arity() {
        let source = source_with_channels(&["BBC One", "", "ITV"])
            .with_collection(
                Collection::Subscriptions,
                records(vec![json!({ "id": 1, "start": 1_700_000_000, "channel": "ITV" })]),
            )
            .with_collection(
                Collection::Inputs,
                records(vec![json!({ "input": "DVB-T #0", "snr": 20, "te": 0 })]),
            );
        let builder = SnapshotBuilder::new(Arc::new(source)).unwrap();

        let snapshot = builder.build().await.unwrap();

        for (definition, samples) in snapshot.families() {
            for sample in samples {
                assert_eq!(
                    sample.label_values.len(),
                    definition.label_names.len(),
                    "{}",
                    definition.name
                );
            }
        }
    }

    #[tokio::test]
    async fn channel_with_empty_name_is_counted_and_reported() {
        let builder =
            SnapshotBuilder::new(Arc::new(source_with_channels(&["BBC One", "", "ITV"]))).unwrap();

        let snapshot = builder.build().await.unwrap();

        assert_eq!(snapshot.samples("tvheadend_channel_count").unwrap()[0].value, 3.0);
        let enabled = snapshot.samples("tvheadend_channel_enabled").unwrap();
        assert_eq!(enabled.len(), 3);
        assert_eq!(
            enabled
                .iter()
                .filter(|sample| sample.label_values[0].is_empty())
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn scrapes_do_not_share_samples() {
        let first = SnapshotBuilder::new(Arc::new(source_with_channels(&["A", "B"]))).unwrap();
        let second = SnapshotBuilder::new(Arc::new(source_with_channels(&["C"]))).unwrap();

        let one = first.build().await.unwrap();
        let two = second.build().await.unwrap();
        let again = first.build().await.unwrap();

        assert_eq!(two.samples("tvheadend_channel_enabled").unwrap().len(), 1);
        assert_eq!(
            two.samples("tvheadend_channel_enabled").unwrap()[0].label_values[0],
            "C"
        );
        assert_eq!(one.samples("tvheadend_channel_enabled").unwrap().len(), 2);
        assert_eq!(again.samples("tvheadend_channel_enabled").unwrap().len(), 2);
        assert_eq!(again.samples("tvheadend_scrape_duration_seconds").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_scrapes_each_get_their_own_snapshot() {
        let builder =
            Arc::new(SnapshotBuilder::new(Arc::new(source_with_channels(&["A", "B", "C"]))).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let builder = Arc::clone(&builder);
                tokio::spawn(async move { builder.build().await })
            })
            .collect();

        for handle in handles {
            let snapshot = handle.await.unwrap().unwrap();
            assert_eq!(snapshot.samples("tvheadend_channel_enabled").unwrap().len(), 3);
            assert_eq!(snapshot.samples("tvheadend_channel_count").unwrap().len(), 1);
            assert_eq!(
                snapshot
                    .samples("tvheadend_scrape_duration_seconds")
                    .unwrap()
                    .len(),
                1
            );
        }
    }

    #[tokio::test]
    async fn duration_is_present_and_non_negative() {
        let builder = SnapshotBuilder::new(Arc::new(StaticDataSource::new())).unwrap();

        let snapshot = builder.build().await.unwrap();

        let duration = snapshot.samples("tvheadend_scrape_duration_seconds").unwrap();
        assert_eq!(duration.len(), 1);
        assert!(duration[0].value >= 0.0);
        assert!(duration[0].value.is_finite());
    }

    #[tokio::test]
    async fn failing_section_aborts_before_later_sections() {
        let source = Arc::new(source_with_channels(&["BBC One"]).fail(Collection::Networks));
        let builder = SnapshotBuilder::new(source.clone()).unwrap();

        let err = builder.build().await.err().unwrap();

        assert_eq!(err.section(), Some("networks"));
        assert!(err.is_upstream());
        assert_eq!(source.requests(), vec![Collection::Networks]);
    }

    #[tokio::test]
    async fn failing_dvr_partition_fails_the_scrape() {
        let source = Arc::new(StaticDataSource::new().fail(Collection::Dvr(DvrStatus::Failed)));
        let builder = SnapshotBuilder::new(source.clone()).unwrap();

        let err = builder.build().await.err().unwrap();

        assert_eq!(err.section(), Some("dvr"));
        assert!(!source.requests().contains(&Collection::EpgEvents));
    }

    #[tokio::test]
    async fn server_info_failure_is_reported_as_server_section() {
        let builder =
            SnapshotBuilder::new(Arc::new(StaticDataSource::new().fail_server_info())).unwrap();

        let err = builder.build().await.err().unwrap();
        assert_eq!(err.section(), Some("server"));
    }

    #[test]
    fn catalog_names_are_unique_and_namespaced() {
        let builder = SnapshotBuilder::new(Arc::new(StaticDataSource::new())).unwrap();
        let catalog = builder.catalog();

        assert!(catalog.all().iter().all(|def| def.name.starts_with("tvheadend_")));
        assert_eq!(
            catalog.all().last().unwrap().name,
            "tvheadend_scrape_duration_seconds"
        );
        assert!(catalog.lookup("tvheadend_channel_count").is_some());
    }
}
