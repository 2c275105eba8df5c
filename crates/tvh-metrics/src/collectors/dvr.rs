use async_trait::async_trait;
use tvh_client::{Collection, DataSource, DvrStatus, Record};
use tvh_common::error::Result;

use crate::{
    catalog::{MetricCatalog, MetricId},
    collectors::Collector,
    labels::LabelField,
    snapshot::Snapshot,
};

pub struct DvrMetrics {
    count: MetricId,
    start_time: MetricId,
    stop_time: MetricId,
    duration: MetricId,
    file_size: MetricId,
    errors: MetricId,
    data_errors: MetricId,
}

impl DvrMetrics {
    pub fn register(catalog: &mut MetricCatalog) -> Result<Self> {
        let entry = &["status", "uuid", "channel", "title"];
        Ok(Self {
            count: catalog.gauge("dvr_count", "Number of DVR entries by status", &["status"])?,
            start_time: catalog.gauge(
                "dvr_start_time",
                "Scheduled start time of a recording",
                entry,
            )?,
            stop_time: catalog.gauge(
                "dvr_stop_time",
                "Scheduled stop time of a recording",
                entry,
            )?,
            duration: catalog.gauge(
                "dvr_duration_seconds",
                "Scheduled duration of a recording",
                entry,
            )?,
            file_size: catalog.gauge(
                "dvr_file_size_bytes",
                "Size of the recorded file",
                entry,
            )?,
            errors: catalog.gauge("dvr_errors", "Errors recorded for a recording", entry)?,
            data_errors: catalog.gauge(
                "dvr_data_errors",
                "Data errors recorded for a recording",
                entry,
            )?,
        })
    }

    fn collect_entry(
        &self,
        snapshot: &mut Snapshot,
        status: DvrStatus,
        entry: &Record,
    ) -> Result<()> {
        let labels = [
            LabelField::Fixed(status.as_str()),
            LabelField::Optional("uuid"),
            LabelField::Optional("channelname"),
            LabelField::Optional("disp_title"),
        ];

        snapshot.add_from_record(self.start_time, entry, &labels, entry.number("start"))?;
        snapshot.add_from_record(self.stop_time, entry, &labels, entry.number("stop"))?;
        snapshot.add_from_record(self.duration, entry, &labels, duration_seconds(entry))?;
        snapshot.add_from_record(self.file_size, entry, &labels, entry.number("filesize"))?;
        snapshot.add_from_record(self.errors, entry, &labels, entry.number("errors"))?;
        snapshot.add_from_record(self.data_errors, entry, &labels, entry.number("data_errors"))?;
        Ok(())
    }
}

#[async_trait]
impl Collector for DvrMetrics {
    fn section(&self) -> &'static str {
        "dvr"
    }

    async fn collect(&self, source: &dyn DataSource, snapshot: &mut Snapshot) -> Result<()> {
        for status in DvrStatus::ALL {
            let entries = source.fetch(Collection::Dvr(status)).await?;
            snapshot.add(
                self.count,
                vec![status.as_str().to_string()],
                entries.len() as f64,
            )?;

            for entry in &entries {
                self.collect_entry(snapshot, status, entry)?;
            }
        }
        Ok(())
    }
}

/// Upstream duration when present, else the scheduled window.
fn duration_seconds(entry: &Record) -> Option<f64> {
    entry.number("duration").or_else(|| {
        let start = entry.number("start")?;
        let stop = entry.number("stop")?;
        (stop >= start).then_some(stop - start)
    })
}
