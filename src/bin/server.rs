//! Souk real-time delivery server.
//!
//! Streams admin notifications over SSE, tracks presence and typing over
//! WebSocket, and keeps visitor session liveness up to date.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin souk-realtime
//! ```

use clap::Parser;

use souk_realtime::{ServerConfig, logger::setup_logger};

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    // Run the server
    if let Err(e) = souk_realtime::run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
