use tracing_subscriber::EnvFilter;

use crate::cli::LogFormat;

const DEFAULT_DIRECTIVE: &str = "tvh=info";

/// Installs the global subscriber. `RUST_LOG` replaces the default filter.
pub fn init(format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);
    if format.is_json() {
        builder.json().init();
    } else {
        builder.init();
    }
}
