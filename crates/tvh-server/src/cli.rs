use std::time::Duration;

use clap::{Parser, ValueEnum};
use tvh_client::{ClientConfig, Scheme};
use tvh_common::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Every flag can also be set through its environment variable; the flag wins.
#[derive(Debug, Parser)]
#[command(
    name = "tvheadend-exporter",
    about = "Prometheus exporter for the Tvheadend media server"
)]
pub struct Cli {
    /// Address the metrics endpoint binds to
    #[arg(long, env = "TVH_EXPORTER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port the metrics endpoint binds to
    #[arg(long, env = "TVH_EXPORTER_PORT", default_value_t = 9429)]
    pub port: u16,

    /// Hostname of the Tvheadend server
    #[arg(long, env = "TVH_SERVER")]
    pub server: String,

    /// HTTP API port of the Tvheadend server
    #[arg(long, env = "TVH_PORT", default_value_t = tvh_client::config::DEFAULT_PORT)]
    pub server_port: u16,

    /// http or https
    #[arg(long, env = "TVH_SCHEME", default_value = "http")]
    pub scheme: String,

    #[arg(long, env = "TVH_USER")]
    pub username: Option<String>,

    #[arg(long, env = "TVH_PASS", hide_env_values = true)]
    pub password: Option<String>,

    /// Upstream request timeout in seconds
    #[arg(long, env = "TVH_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    #[arg(long, env = "TVH_LOG_FORMAT", value_enum, default_value = "text")]
    pub log_format: LogFormat,
}

impl Cli {
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::new(self.server.clone())
            .with_credentials(self.username.clone(), self.password.clone())?;
        config.port = self.server_port;
        config.scheme = self.scheme.parse::<Scheme>()?;
        config.timeout = Duration::from_secs(self.timeout_secs);
        config.validate()?;
        Ok(config)
    }
}

impl LogFormat {
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }
}
