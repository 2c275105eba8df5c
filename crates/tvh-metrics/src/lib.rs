pub mod builder;
pub mod catalog;
pub mod collectors;
pub mod handlers;
pub mod labels;
pub mod render;
pub mod router;
pub mod snapshot;
pub mod types;

pub use builder::SnapshotBuilder;
pub use catalog::{MetricCatalog, MetricId, NAMESPACE};
pub use labels::{LabelField, derive_labels};
pub use render::render_prometheus;
pub use router::{ExporterState, exporter_router};
pub use snapshot::{MetricInstance, Snapshot};
pub use types::{MetricDefinition, MetricKind, Sample};
