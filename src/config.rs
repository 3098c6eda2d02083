//! Server configuration.

use clap::Parser;

/// Default keep-alive ping period for admin streams (milliseconds).
pub const DEFAULT_PING_INTERVAL_MS: u64 = 30_000;

/// Default inactivity threshold before a visitor session is swept
/// (milliseconds).
pub const DEFAULT_VISITOR_STALE_MS: i64 = 5 * 60 * 1000;

/// Runtime configuration for the real-time server.
#[derive(Debug, Clone, Parser)]
#[command(name = "souk-realtime", about = "Souk marketplace real-time delivery server")]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind
    #[arg(long, default_value_t = 8090)]
    pub port: u16,

    /// Bearer token required on the admin notification endpoints.
    /// Token issuance and verification live outside this service; the
    /// server only compares against this pre-shared value.
    #[arg(long, default_value = "dev-admin-token")]
    pub admin_token: String,

    /// Keep-alive ping period for admin streams, in milliseconds
    #[arg(long, default_value_t = DEFAULT_PING_INTERVAL_MS)]
    pub ping_interval_ms: u64,

    /// Inactivity threshold before a visitor session is considered
    /// stale, in milliseconds
    #[arg(long, default_value_t = DEFAULT_VISITOR_STALE_MS)]
    pub visitor_stale_ms: i64,
}

impl ServerConfig {
    /// Configuration with library defaults, without touching the CLI.
    /// Used by tests and embedders.
    pub fn with_port(port: u16) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port,
            admin_token: "dev-admin-token".to_string(),
            ping_interval_ms: DEFAULT_PING_INTERVAL_MS,
            visitor_stale_ms: DEFAULT_VISITOR_STALE_MS,
        }
    }
}
