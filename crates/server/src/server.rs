//! Router assembly and server lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::middleware::{log_requests, request_id};
use crate::routes::{self, health, moderation, recommend, topics};
use crate::state::ServerState;

/// Build the router with all routes and middleware.
///
/// The POST endpoints are browser-facing, so CORS is pinned to the single
/// configured origin rather than `Any`. Probe routes stay unrestricted.
pub fn build_router(state: Arc<ServerState>) -> ServerResult<Router> {
    let origin: HeaderValue = state
        .config
        .allowed_origin
        .parse()
        .map_err(|_| ServerError::Config(format!(
            "invalid allowed_origin {:?}",
            state.config.allowed_origin
        )))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/initialize-topics", post(topics::initialize_topics))
        .route("/recommend", post(recommend::recommend))
        .route("/mask-toxic", post(moderation::mask_toxic))
        .layer(cors);

    let mut probe_routes = Router::new()
        .route("/", get(routes::api_info))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check));
    if state.config.metrics_enabled {
        probe_routes = probe_routes.route("/metrics", get(health::metrics_export));
    }

    Ok(Router::new()
        .merge(api_routes)
        .merge(probe_routes)
        .fallback(routes::not_found)
        .layer(TimeoutLayer::new(Duration::from_secs(
            state.config.timeout_secs,
        )))
        .layer(from_fn(log_requests))
        .layer(from_fn(request_id))
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Start the HTTP server and block until shutdown.
///
/// Installs the tracing subscriber, builds shared state (providers per the
/// configured mode, empty topic registry), binds, and serves with graceful
/// shutdown on SIGTERM / Ctrl+C.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.log_level))
        .with_target(false)
        .init();

    let addr: SocketAddr = config.socket_addr()?;
    let state = Arc::new(ServerState::new(config)?);

    tracing::info!(
        %addr,
        provider_mode = %state.config.provider.mode,
        allowed_origin = %state.config.allowed_origin,
        metrics_enabled = state.config.metrics_enabled,
        "starting topic-match server"
    );

    let app = build_router(state)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
