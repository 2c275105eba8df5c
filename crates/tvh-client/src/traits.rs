use async_trait::async_trait;
use tvh_common::error::Result;

use crate::{collection::Collection, record::Record};

/// Read access to the media server's state.
///
/// Every call is independent and may fail on its own. Implementations must be
/// safe to share between concurrent scrapes.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn server_info(&self) -> Result<Record>;
    async fn fetch(&self, collection: Collection) -> Result<Vec<Record>>;
}
