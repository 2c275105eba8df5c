use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::{DateTime, Utc};
use tracing::debug;
use tvh_client::Record;
use tvh_common::error::{ExporterError, Result};

use crate::{
    catalog::{MetricCatalog, MetricId},
    labels::{LabelField, derive_labels},
    types::{MetricDefinition, Sample},
};

/// Samples gathered for one definition during one scrape.
#[derive(Debug, Default)]
pub struct MetricInstance {
    samples: Vec<Sample>,
}

impl MetricInstance {
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// The metric set produced by a single scrape.
///
/// A snapshot always starts with one empty instance per catalog definition and
/// is owned by exactly one scrape.
pub struct Snapshot {
    catalog: Arc<MetricCatalog>,
    instances: Vec<MetricInstance>,
    started_at: Instant,
    started_at_utc: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(catalog: Arc<MetricCatalog>) -> Self {
        let instances = catalog.all().iter().map(|_| MetricInstance::default()).collect();
        Self {
            catalog,
            instances,
            started_at: Instant::now(),
            started_at_utc: Utc::now(),
        }
    }

    pub fn add(&mut self, id: MetricId, label_values: Vec<String>, value: f64) -> Result<()> {
        let definition = self.catalog.definition(id).ok_or_else(|| {
            ExporterError::InternalError(format!("unknown metric id {id:?}"))
        })?;
        if definition.label_names.len() != label_values.len() {
            return Err(ExporterError::LabelArity {
                name: definition.name.clone(),
                expected: definition.label_names.len(),
                actual: label_values.len(),
            });
        }

        self.instances[id.index()].samples.push(Sample {
            label_values,
            value,
        });
        Ok(())
    }

    /// Adds a sample read from `record`, unless the value or a required label
    /// is missing. Returns whether a sample was added.
    pub fn add_from_record(
        &mut self,
        id: MetricId,
        record: &Record,
        labels: &[LabelField<'_>],
        value: Option<f64>,
    ) -> Result<bool> {
        let Some(value) = value else {
            self.log_skip(id, "value missing");
            return Ok(false);
        };
        let Some(label_values) = derive_labels(record, labels) else {
            self.log_skip(id, "required label missing");
            return Ok(false);
        };

        self.add(id, label_values, value)?;
        Ok(true)
    }

    pub fn instance(&self, id: MetricId) -> Option<&MetricInstance> {
        self.instances.get(id.index())
    }

    /// Samples for a metric looked up by its definition or wire name.
    pub fn samples(&self, name: &str) -> Option<&[Sample]> {
        let id = self.catalog.lookup(name)?;
        self.instance(id).map(MetricInstance::samples)
    }

    /// Definitions paired with their samples, in catalog order.
    pub fn families(&self) -> impl Iterator<Item = (&MetricDefinition, &[Sample])> {
        self.catalog
            .all()
            .iter()
            .zip(self.instances.iter().map(MetricInstance::samples))
    }

    pub fn sample_count(&self) -> usize {
        self.instances.iter().map(MetricInstance::len).sum()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at_utc
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    fn log_skip(&self, id: MetricId, reason: &str) {
        if let Some(definition) = self.catalog.definition(id) {
            debug!(metric = %definition.name, reason, "skipping sample");
        }
    }
}
