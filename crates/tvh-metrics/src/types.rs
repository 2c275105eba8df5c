use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Gauge,
    Counter,
}

impl MetricKind {
    pub fn as_prometheus_type(&self) -> &'static str {
        match self {
            Self::Gauge => "gauge",
            Self::Counter => "counter",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricDefinition {
    pub name: String,
    pub help: String,
    #[serde(rename = "labels")]
    pub label_names: Vec<String>,
    #[serde(rename = "type")]
    pub kind: MetricKind,
}

impl MetricDefinition {
    /// Name used on the wire. Counters carry the `_total` suffix.
    pub fn exposition_name(&self) -> String {
        match self.kind {
            MetricKind::Counter if !self.name.ends_with("_total") => {
                format!("{}_total", self.name)
            }
            _ => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub label_values: Vec<String>,
    pub value: f64,
}
