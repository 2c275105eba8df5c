pub mod dvr;
pub mod epg;
pub mod inventory;
pub mod server;
pub mod status;

use async_trait::async_trait;
use tvh_client::DataSource;
use tvh_common::error::Result;

use crate::{
    catalog::{MetricCatalog, MetricId},
    snapshot::Snapshot,
};

pub use dvr::DvrMetrics;
pub use epg::EpgMetrics;
pub use inventory::{ChannelMetrics, MuxMetrics, NetworkMetrics, ServiceMetrics};
pub use server::ServerMetrics;
pub use status::{ConnectionMetrics, InputMetrics, SubscriptionMetrics};

/// One fetch section of a scrape.
///
/// An error returned from `collect` is a transport or protocol failure and
/// aborts the whole scrape. Missing fields inside fetched records are handled
/// by the collector itself.
#[async_trait]
pub trait Collector: Send + Sync {
    fn section(&self) -> &'static str;

    async fn collect(&self, source: &dyn DataSource, snapshot: &mut Snapshot) -> Result<()>;
}

/// Registers every section's definitions and returns the collectors in scrape order.
pub fn register_all(catalog: &mut MetricCatalog) -> Result<Vec<Box<dyn Collector>>> {
    Ok(vec![
        Box::new(ServerMetrics::register(catalog)?),
        Box::new(NetworkMetrics::register(catalog)?),
        Box::new(MuxMetrics::register(catalog)?),
        Box::new(ServiceMetrics::register(catalog)?),
        Box::new(ChannelMetrics::register(catalog)?),
        Box::new(SubscriptionMetrics::register(catalog)?),
        Box::new(ConnectionMetrics::register(catalog)?),
        Box::new(InputMetrics::register(catalog)?),
        Box::new(DvrMetrics::register(catalog)?),
        Box::new(EpgMetrics::register(catalog)?),
    ])
}

/// Count-style metrics follow the number of fetched records, not emitted samples.
fn record_count(snapshot: &mut Snapshot, id: MetricId, len: usize) -> Result<()> {
    snapshot.add(id, Vec::new(), len as f64)
}
