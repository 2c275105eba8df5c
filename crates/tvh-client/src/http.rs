use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;
use tvh_common::error::{ExporterError, Result};

use crate::{
    collection::{Collection, GRID_LIMIT},
    config::{ClientConfig, Credentials},
    record::Record,
    traits::DataSource,
};

const SERVER_INFO_PATH: &str = "/api/serverinfo";

/// JSON-over-HTTP client for the media server's web API.
pub struct HttpDataSource {
    base_url: String,
    credentials: Option<Credentials>,
    client: reqwest::Client,
}

impl HttpDataSource {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()
            .map_err(|err| {
                ExporterError::InvalidConfig(format!("failed to build HTTP client: {err}"))
            })?;

        Ok(Self {
            base_url: config.base_url(),
            credentials: config.credentials,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json(&self, path: &str, paged: bool) -> Result<Value> {
        let mut request = self.client.get(format!("{}{path}", self.base_url));
        if paged {
            request = request.query(&[("limit", GRID_LIMIT)]);
        }
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        let response = request.send().await.map_err(|err| ExporterError::Upstream {
            path: path.to_string(),
            message: err.to_string(),
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ExporterError::Unauthorized {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(ExporterError::UpstreamStatus {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        // `text` decodes using the charset named in Content-Type.
        let body = response.text().await.map_err(|err| ExporterError::Upstream {
            path: path.to_string(),
            message: err.to_string(),
        })?;
        debug!(path, bytes = body.len(), "upstream response received");

        serde_json::from_str(&body).map_err(|err| ExporterError::MalformedResponse {
            path: path.to_string(),
            message: err.to_string(),
        })
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn server_info(&self) -> Result<Record> {
        let body = self.get_json(SERVER_INFO_PATH, false).await?;
        Record::try_from(body).map_err(|_| ExporterError::MalformedResponse {
            path: SERVER_INFO_PATH.to_string(),
            message: "expected a JSON object".to_string(),
        })
    }

    async fn fetch(&self, collection: Collection) -> Result<Vec<Record>> {
        let path = collection.path();
        let body = self.get_json(path, collection.is_paged()).await?;
        parse_entries(path, body)
    }
}

pub(crate) fn parse_entries(path: &str, body: Value) -> Result<Vec<Record>> {
    let malformed = |message: &str| ExporterError::MalformedResponse {
        path: path.to_string(),
        message: message.to_string(),
    };

    let Value::Object(mut fields) = body else {
        return Err(malformed("expected a JSON object"));
    };
    let Some(Value::Array(entries)) = fields.remove("entries") else {
        return Err(malformed("missing entries array"));
    };

    entries
        .into_iter()
        .map(|entry| Record::try_from(entry).map_err(|_| malformed("entry is not an object")))
        .collect()
}
