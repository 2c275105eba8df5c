use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("request to {path} failed: {message}")]
    Upstream { path: String, message: String },
    #[error("{path} returned status {status}")]
    UpstreamStatus { path: String, status: u16 },
    #[error("authentication rejected by upstream for {path} (status {status})")]
    Unauthorized { path: String, status: u16 },
    #[error("malformed response from {path}: {message}")]
    MalformedResponse { path: String, message: String },
    #[error("metric already defined: {0}")]
    DuplicateMetric(String),
    #[error("metric {name} expects {expected} label values, got {actual}")]
    LabelArity {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("scrape section {section} failed: {source}")]
    Section {
        section: &'static str,
        #[source]
        source: Box<ExporterError>,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("internal error: {0}")]
    InternalError(String),
}

impl ExporterError {
    pub fn in_section(self, section: &'static str) -> Self {
        Self::Section {
            section,
            source: Box::new(self),
        }
    }

    /// Name of the scrape section that failed, if the error was raised inside one.
    pub fn section(&self) -> Option<&'static str> {
        match self {
            Self::Section { section, .. } => Some(section),
            _ => None,
        }
    }

    pub fn is_upstream(&self) -> bool {
        match self {
            Self::Upstream { .. }
            | Self::UpstreamStatus { .. }
            | Self::Unauthorized { .. }
            | Self::MalformedResponse { .. } => true,
            Self::Section { source, .. } => source.is_upstream(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExporterError>;
