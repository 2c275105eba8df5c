use std::collections::BTreeMap;

use async_trait::async_trait;
use tvh_client::{Collection, DataSource};
use tvh_common::error::Result;

use crate::{
    catalog::{MetricCatalog, MetricId},
    collectors::{Collector, record_count},
    labels::{LabelField, derive_labels},
    snapshot::Snapshot,
};

pub struct EpgMetrics {
    count: MetricId,
    per_channel: MetricId,
}

impl EpgMetrics {
    pub fn register(catalog: &mut MetricCatalog) -> Result<Self> {
        Ok(Self {
            count: catalog.gauge("epg_count", "Number of events in the programme guide", &[])?,
            per_channel: catalog.gauge(
                "epg_channel_count",
                "Number of programme guide events per channel",
                &["channel"],
            )?,
        })
    }
}

#[async_trait]
impl Collector for EpgMetrics {
    fn section(&self) -> &'static str {
        "epg"
    }

    async fn collect(&self, source: &dyn DataSource, snapshot: &mut Snapshot) -> Result<()> {
        let events = source.fetch(Collection::EpgEvents).await?;
        record_count(snapshot, self.count, events.len())?;

        let mut per_channel: BTreeMap<Vec<String>, usize> = BTreeMap::new();
        for event in &events {
            if let Some(labels) = derive_labels(event, &[LabelField::Required("channelName")]) {
                *per_channel.entry(labels).or_default() += 1;
            }
        }
        for (labels, total) in per_channel {
            snapshot.add(self.per_channel, labels, total as f64)?;
        }
        Ok(())
    }
}
