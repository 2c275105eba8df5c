use std::{fmt, str::FromStr, time::Duration};

use tvh_common::error::{ExporterError, Result};

pub const DEFAULT_PORT: u16 = 9981;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    #[default]
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl FromStr for Scheme {
    type Err = ExporterError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            other => Err(ExporterError::InvalidConfig(format!(
                "unsupported scheme: {other}"
            ))),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Connection settings for the upstream HTTP API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub scheme: Scheme,
    pub credentials: Option<Credentials>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            scheme: Scheme::default(),
            credentials: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Pairs a username and password, rejecting a half-configured credential.
    pub fn with_credentials(
        mut self,
        username: Option<String>,
        password: Option<String>,
    ) -> Result<Self> {
        self.credentials = match (username, password) {
            (Some(username), Some(password)) => Some(Credentials { username, password }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(ExporterError::InvalidConfig(
                    "username is set but password is missing".to_string(),
                ));
            }
            (None, Some(_)) => {
                return Err(ExporterError::InvalidConfig(
                    "password is set but username is missing".to_string(),
                ));
            }
        };
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ExporterError::InvalidConfig(
                "upstream server host must not be empty".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(ExporterError::InvalidConfig(
                "upstream timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// IPv6 literals are bracketed so the port separator stays unambiguous.
    pub fn base_url(&self) -> String {
        let host = self.host.trim();
        if host.contains(':') && !host.starts_with('[') {
            format!("{}://[{}]:{}", self.scheme.as_str(), host, self.port)
        } else {
            format!("{}://{}:{}", self.scheme.as_str(), host, self.port)
        }
    }
}
