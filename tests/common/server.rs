//! Test server management.
//!
//! Spawns and manages parlord instances for integration testing.

use std::path::PathBuf;
use std::process::{Child, Command};
use std::time::Duration;

use tempfile::TempDir;
use tokio::time::sleep;

/// A test server instance.
pub struct TestServer {
    child: Child,
    port: u16,
    // Holds the config file for the child's lifetime.
    _dir: TempDir,
}

impl TestServer {
    /// Spawn a new test server on an OS-assigned free port.
    pub async fn spawn() -> anyhow::Result<Self> {
        let port = free_port()?;
        let dir = tempfile::tempdir()?;

        let config_path = dir.path().join("config.toml");
        let config_content = format!(
            r#"
[server]
name = "test.parlor"

[listen]
address = "127.0.0.1:{}"

[activity]
sink = "none"
"#,
            port
        );
        std::fs::write(&config_path, config_content)?;

        let binary_path = PathBuf::from(env!("CARGO_BIN_EXE_parlord"));
        let child = Command::new(&binary_path)
            .arg(config_path.to_str().unwrap())
            .spawn()?;

        let server = Self {
            child,
            port,
            _dir: dir,
        };

        server.wait_until_ready().await?;

        Ok(server)
    }

    /// Wait until the server is accepting connections.
    async fn wait_until_ready(&self) -> anyhow::Result<()> {
        for _ in 0..30 {
            if tokio::net::TcpStream::connect(("127.0.0.1", self.port))
                .await
                .is_ok()
            {
                return Ok(());
            }
            sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("Server failed to start within 3 seconds")
    }

    /// Get the server address.
    pub fn address(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }

    /// Connect a client and run the name handshake.
    pub async fn connect(&self, name: &str) -> anyhow::Result<super::client::TestClient> {
        let mut client = super::client::TestClient::connect(&self.address()).await?;
        client.register(name).await?;
        Ok(client)
    }

    /// Connect a client without registering, for handshake tests.
    pub async fn connect_raw(&self) -> anyhow::Result<super::client::TestClient> {
        super::client::TestClient::connect(&self.address()).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Ask the OS for a currently-free TCP port.
///
/// The probe listener is dropped before the server binds, so another
/// process could race for the port; in practice the window is tiny.
fn free_port() -> anyhow::Result<u16> {
    let probe = std::net::TcpListener::bind("127.0.0.1:0")?;
    Ok(probe.local_addr()?.port())
}
