//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the given binary name and level
/// form the default filter (with tower-http request traces at debug).
pub fn setup_logger(name: &str, default_level: &str) {
    let target = name.replace('-', "_");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{target}={default_level},tower_http=debug")));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
