mod cors;

use std::net::SocketAddr;

use axum::{Router, extract::Request, middleware::Next};
use healthcheck::StartTime;
use tower_http::trace::TraceLayer;
use voca_config::Config;

use cors::CorsPolicy;

/// Assembled server with all enabled functions and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// `started` is the process start time reported as health check uptime.
    ///
    /// # Errors
    ///
    /// Returns an error if the CORS policy is invalid or the transcription
    /// client cannot be built
    pub fn new(config: &Config, started: StartTime) -> anyhow::Result<Self> {
        let mut app = Router::new();

        if config.health.enabled {
            let state = healthcheck::build_state(&config.health, started);
            let policy = CorsPolicy::new(&config.server.cors, healthcheck::ALLOWED_METHODS)?;
            let router = healthcheck::endpoint_router(&config.health).with_state(state);

            app = app.merge(with_cors(router, policy));
            tracing::info!(path = %config.health.path, "health check enabled");
        }

        if config.transcription.enabled {
            let state = transcription::build_server(&config.transcription)?;
            let policy = CorsPolicy::new(&config.server.cors, transcription::ALLOWED_METHODS)?;
            let router = transcription::endpoint_router(&config.transcription).with_state(state);

            app = app.merge(with_cors(router, policy));
            tracing::info!(path = %config.transcription.path, "transcription enabled");
        }

        app = app.layer(TraceLayer::new_for_http());

        Ok(Self {
            router: app,
            listen_address: config.server.listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
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

/// Stamp one function's CORS headers onto everything its router returns
fn with_cors(router: Router, policy: CorsPolicy) -> Router {
    router.layer(axum::middleware::from_fn(move |request: Request, next: Next| {
        let policy = policy.clone();
        async move { cors::cors_middleware(policy, request, next).await }
    }))
}
