//! # HTTP Server
//!
//! Main HTTP server combining all endpoint routers.

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, Router};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::config::HttpServerConfig;
use super::form_routes::form_routes;
use super::observability_routes::health_routes;
use super::person_routes::person_routes;
use super::state::AppState;
use super::upload_routes::upload_routes;
use crate::people::PeopleDirectory;
use crate::schema::{Catalog, SpecResult};

/// HTTP Server
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration
    pub fn new() -> SpecResult<Self> {
        Self::with_config(HttpServerConfig::default())
    }

    /// Create a new HTTP server with custom configuration.
    ///
    /// Builds the standard catalog, loads `spec_files` into it and seeds the
    /// people directory from `known_people`.
    pub fn with_config(config: HttpServerConfig) -> SpecResult<Self> {
        let mut catalog = Catalog::standard()?;
        for path in &config.spec_files {
            let count = catalog.load_file(path)?;
            tracing::info!(path = %path.display(), count, "loaded record specs");
        }

        let people = PeopleDirectory::new(config.known_people.iter().copied());
        let state = Arc::new(AppState::new(catalog, people)?);

        Ok(Self::with_state(config, state))
    }

    /// Create a server around prepared state
    pub fn with_state(config: HttpServerConfig, state: Arc<AppState>) -> Self {
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, state: Arc<AppState>) -> Router {
        // Configure CORS from config
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            // `/` and `/health`
            .merge(health_routes())
            // body, query and path parameters
            .merge(person_routes(state.clone()))
            // form, header and cookie parameters
            .merge(form_routes(state))
            // multipart files
            .merge(upload_routes())
            .layer(DefaultBodyLimit::max(config.max_upload_bytes))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server, stopping on Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(addr.as_str()).await?;

        tracing::info!(addr = %listener.local_addr()?, "person-api listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
