use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use async_trait::async_trait;
use tvh_common::error::{ExporterError, Result};

use crate::{collection::Collection, record::Record, traits::DataSource};

/// In-memory data source serving fixed records.
///
/// Collections that were never set return an empty list. Collections marked
/// with [`StaticDataSource::fail`] return a transport error, which makes this
/// useful for dry runs and for exercising scrape failure paths.
#[derive(Default)]
pub struct StaticDataSource {
    server_info: Record,
    collections: HashMap<Collection, Vec<Record>>,
    failing: HashSet<Collection>,
    fail_server_info: bool,
    requests: Mutex<Vec<Collection>>,
}

impl StaticDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_server_info(mut self, info: Record) -> Self {
        self.server_info = info;
        self
    }

    pub fn with_collection(mut self, collection: Collection, records: Vec<Record>) -> Self {
        self.collections.insert(collection, records);
        self
    }

    pub fn fail(mut self, collection: Collection) -> Self {
        self.failing.insert(collection);
        self
    }

    pub fn fail_server_info(mut self) -> Self {
        self.fail_server_info = true;
        self
    }

    /// Collections fetched so far, in call order.
    pub fn requests(&self) -> Vec<Collection> {
        match self.requests.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => Vec::new(),
        }
    }
}

#[async_trait]
impl DataSource for StaticDataSource {
    async fn server_info(&self) -> Result<Record> {
        if self.fail_server_info {
            return Err(ExporterError::Upstream {
                path: "/api/serverinfo".to_string(),
                message: "connection refused".to_string(),
            });
        }
        Ok(self.server_info.clone())
    }

    async fn fetch(&self, collection: Collection) -> Result<Vec<Record>> {
        self.requests
            .lock()
            .map_err(|_| ExporterError::InternalError("request log lock poisoned".to_string()))?
            .push(collection);

        if self.failing.contains(&collection) {
            return Err(ExporterError::Upstream {
                path: collection.path().to_string(),
                message: "connection refused".to_string(),
            });
        }

        Ok(self
            .collections
            .get(&collection)
            .cloned()
            .unwrap_or_default())
    }
}
