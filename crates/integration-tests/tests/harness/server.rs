//! Test server wrapper that starts Pictura on a random port

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use pictura_config::Config;
use pictura_imagegen::ImageGenerator;
use pictura_server::Server;
use tokio_util::sync::CancellationToken;

/// A running test server instance
pub struct TestServer {
    addr: SocketAddr,
    shutdown: CancellationToken,
    client: reqwest::Client,
}

impl TestServer {
    /// Start a test server with the given configuration
    ///
    /// Binds to port 0 for automatic port assignment
    pub async fn start(config: Config) -> anyhow::Result<Self> {
        Self::serve(Server::new(&config)?).await
    }

    /// Start a test server around a custom image generator
    pub async fn start_with_generator(config: Config, generator: Arc<dyn ImageGenerator>) -> anyhow::Result<Self> {
        Self::serve(Server::with_generator(&config, generator)).await
    }

    async fn serve(server: Server) -> anyhow::Result<Self> {
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        // Bind the listener here so we know the actual port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            axum::serve(listener, server.into_router())
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        let client = reqwest::Client::new();

        Ok(Self { addr, shutdown, client })
    }

    /// Base URL of the running test server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Get a reference to the HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Submit the generation form
    pub async fn generate(&self, prompt: &str, api_key: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/generate"))
            .json(&serde_json::json!({ "prompt": prompt, "api_key": api_key }))
            .send()
            .await
            .unwrap()
    }

    /// Fetch the current session snapshot
    pub async fn session(&self) -> serde_json::Value {
        self.client
            .get(self.url("/api/session"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap()
    }

    /// Poll the session until the attempt leaves `in_flight`
    pub async fn wait_for_resolution(&self) -> serde_json::Value {
        tokio::time::timeout(Duration::from_secs(10), async {
            loop {
                let snapshot = self.session().await;
                if snapshot["phase"] != "in_flight" {
                    return snapshot;
                }
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
        })
        .await
        .expect("generation did not resolve in time")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
