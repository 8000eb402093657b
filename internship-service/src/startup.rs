//! Application startup and lifecycle management.
//!
//! Everything the handlers need is built once here into [`AppState`] and is
//! read-only afterwards.

use crate::config::InternshipConfig;
use crate::handlers;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::TextProvider;
use crate::services::SupabaseClient;
use axum::{
    http::{HeaderValue, Request},
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware, REQUEST_ID_HEADER};
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Browser origins allowed to call the API (the Next.js dev server).
pub const ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Shared application state.
#[derive(Clone, Default)]
pub struct AppState {
    /// `None` when no model credential was configured.
    pub text_provider: Option<Arc<dyn TextProvider>>,
    /// `None` when the data store credentials were incomplete.
    pub supabase: Option<SupabaseClient>,
}

impl AppState {
    pub fn from_config(config: &InternshipConfig) -> Result<Self, AppError> {
        let text_provider = match &config.gemini.api_key {
            Some(api_key) => {
                let gemini_config = GeminiConfig {
                    api_key: api_key.clone(),
                    model: config.gemini.model.clone(),
                    api_base: config.gemini.api_base.clone(),
                    timeout: config.gemini.timeout,
                };
                let provider: Arc<dyn TextProvider> = Arc::new(
                    GeminiTextProvider::new(gemini_config)
                        .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?,
                );

                tracing::info!(
                    model = %config.gemini.model,
                    timeout_secs = config.gemini.timeout.as_secs(),
                    "Initialized Gemini text provider"
                );
                Some(provider)
            }
            None => {
                tracing::warn!("GEMINI_API_KEY not found; chat and review will return 503");
                None
            }
        };

        let supabase = match (&config.supabase.url, &config.supabase.service_role_key) {
            (Some(url), Some(key)) => {
                let client = SupabaseClient::new(url, key.clone())?;
                tracing::info!(url = %client.base_url(), "Initialized Supabase client");
                Some(client)
            }
            _ => {
                tracing::warn!("SUPABASE_URL or SUPABASE_SERVICE_ROLE_KEY not found");
                None
            }
        };

        Ok(Self {
            text_provider,
            supabase,
        })
    }
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(ALLOWED_ORIGINS.map(HeaderValue::from_static)))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Builds the full router with middleware. Exposed for in-process tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route("/api/chat", post(handlers::project_chat))
        .route("/api/review", post(handlers::code_review))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(cors_layer())
        .with_state(state)
}

type ServerFuture = Pin<Box<dyn Future<Output = std::io::Result<()>> + Send>>;

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    server: ServerFuture,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: InternshipConfig) -> Result<Self, AppError> {
        let state = AppState::from_config(&config)?;
        Self::with_state(config.common.port, state).await
    }

    /// Bind the listener for a prepared state (port 0 = random port for testing).
    pub async fn with_state(port: u16, state: AppState) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Internship service listening on port {}", port);

        let server = axum::serve(listener, build_router(state))
            .with_graceful_shutdown(shutdown_signal())
            .into_future();

        Ok(Self {
            port,
            server: Box::pin(server),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
