use std::collections::HashMap;

use tvh_common::error::{ExporterError, Result};

use crate::types::{MetricDefinition, MetricKind};

pub const NAMESPACE: &str = "tvheadend";

/// Handle to a definition inside the catalog that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MetricId(usize);

impl MetricId {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// The fixed set of metric definitions the exporter can emit.
///
/// Definitions are added while the catalog is owned mutably at startup. Once
/// it is shared behind an `Arc` nothing can add to it, so every scrape sees the
/// same vocabulary in the same order.
#[derive(Debug)]
pub struct MetricCatalog {
    namespace: String,
    definitions: Vec<MetricDefinition>,
    index: HashMap<String, MetricId>,
}

impl MetricCatalog {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            definitions: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn gauge(&mut self, name: &str, help: &str, label_names: &[&str]) -> Result<MetricId> {
        self.define(name, help, label_names, MetricKind::Gauge)
    }

    pub fn counter(&mut self, name: &str, help: &str, label_names: &[&str]) -> Result<MetricId> {
        self.define(name, help, label_names, MetricKind::Counter)
    }

    pub fn define(
        &mut self,
        name: &str,
        help: &str,
        label_names: &[&str],
        kind: MetricKind,
    ) -> Result<MetricId> {
        let full_name = if self.namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}_{name}", self.namespace)
        };

        if !is_valid_metric_name(&full_name) {
            return Err(ExporterError::InvalidConfig(format!(
                "invalid metric name: {full_name}"
            )));
        }
        if let Some(label) = label_names.iter().find(|label| !is_valid_label_name(label)) {
            return Err(ExporterError::InvalidConfig(format!(
                "invalid label name {label:?} on metric {full_name}"
            )));
        }

        let definition = MetricDefinition {
            name: full_name,
            help: help.to_string(),
            label_names: label_names.iter().map(|label| (*label).to_string()).collect(),
            kind,
        };

        // Collisions are checked on the wire name too, so a counter `x` and a
        // gauge `x_total` cannot both exist.
        let exposition_name = definition.exposition_name();
        if self.index.contains_key(&definition.name) || self.index.contains_key(&exposition_name)
        {
            return Err(ExporterError::DuplicateMetric(definition.name));
        }

        let id = MetricId(self.definitions.len());
        self.index.insert(definition.name.clone(), id);
        if exposition_name != definition.name {
            self.index.insert(exposition_name, id);
        }
        self.definitions.push(definition);
        Ok(id)
    }

    pub fn all(&self) -> &[MetricDefinition] {
        &self.definitions
    }

    pub fn definition(&self, id: MetricId) -> Option<&MetricDefinition> {
        self.definitions.get(id.0)
    }

    pub fn lookup(&self, name: &str) -> Option<MetricId> {
        self.index.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

fn is_valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_' || first == ':')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == ':')
}

fn is_valid_label_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        && !name.starts_with("__")
}
