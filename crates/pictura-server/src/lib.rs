#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod api;
mod error;
mod health;
mod page;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use pictura_config::Config;
use pictura_imagegen::ImageGenerator;
use pictura_session::Session;
use tower_http::trace::TraceLayer;

pub use api::AppState;
pub use error::ApiError;

/// Routes for the page and its JSON API
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/", get(page::index))
        .route("/api/generate", post(api::generate))
        .route("/api/session", get(api::session))
        .route("/api/image", get(api::download))
}

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the image generation client fails to initialize
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let generator = pictura_imagegen::build_generator(config)?;
        Ok(Self::with_generator(config, generator))
    }

    /// Build the server around an existing image generator
    pub fn with_generator(config: &Config, generator: Arc<dyn ImageGenerator>) -> Self {
        tracing::debug!(provider = generator.name(), "building server");

        let state = AppState {
            session: Arc::new(Session::new(generator)),
        };

        let mut app = api_router().with_state(state);

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, get(health::health_handler));
        }

        app = app.layer(TraceLayer::new_for_http());

        Self {
            router: app,
            listen_address: config.server.listen_address(),
        }
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
