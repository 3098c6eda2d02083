//! Shared fixtures for integration tests.

use std::time::Duration;

use souk_realtime::ServerConfig;

/// A real server instance bound to a fixed test port.
///
/// Each test uses its own port so the suites can run in parallel.
pub struct TestServer {
    port: u16,
}

impl TestServer {
    /// Spawn the server and wait until it accepts TCP connections.
    pub async fn start(port: u16) -> Self {
        let config = ServerConfig::with_port(port);
        tokio::spawn(async move {
            if let Err(e) = souk_realtime::run(config).await {
                panic!("test server failed: {e}");
            }
        });

        for _ in 0..100 {
            if tokio::net::TcpStream::connect(("127.0.0.1", port))
                .await
                .is_ok()
            {
                return Self { port };
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("test server did not start on port {port}");
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }
}

/// Token matching the default `--admin-token` value.
pub const ADMIN_TOKEN: &str = "dev-admin-token";
