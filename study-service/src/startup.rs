//! Application startup and lifecycle management.

use crate::config::Config;
use crate::handlers;
use crate::AppState;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn;
use axum::{
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    cors::cors_layer,
    metrics::metrics_middleware,
    security_headers::security_headers_middleware,
    tracing::{make_request_span, request_id_middleware},
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

/// Largest request body accepted by the API routes.
pub const REQUEST_BODY_LIMIT: usize = 1024 * 1024;

/// Build the full router: the four API routes, probes, and the shared
/// middleware stack.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);

    let api = Router::new()
        .route("/ask-ai", post(handlers::assistant::ask_ai))
        .route(
            "/generate-flashcards",
            post(handlers::assistant::generate_flashcards),
        )
        .route(
            "/recommend-video",
            post(handlers::recommendations::recommend_video),
        )
        .route(
            "/recommend-textbook",
            post(handlers::recommendations::recommend_textbook),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics))
        .nest("/api", api)
        .route_layer(from_fn(metrics_middleware))
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(REQUEST_BODY_LIMIT))
        .layer(CatchPanicLayer::custom(handlers::handle_panic))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with real upstream providers.
    pub async fn build(config: Config) -> Result<Self, AppError> {
        Self::build_with_state(AppState::from_config(config)).await
    }

    /// Build around an already assembled state. Port 0 binds a random port.
    pub async fn build_with_state(state: AppState) -> Result<Self, AppError> {
        let addr: SocketAddr = format!("{}:{}", state.config.server.host, state.config.server.port)
            .parse()
            .map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!(
                    "Invalid server address {}:{}: {}",
                    state.config.server.host,
                    state.config.server.port,
                    e
                ))
            })?;

        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port,
            dataset = %state.config.textbooks.csv_path.display(),
            "Study service bound"
        );

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl-C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}

async fn shutdown_signal() {
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
