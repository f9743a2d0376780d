//! Router construction and server lifecycle.

use crate::config::Settings;
use crate::handlers::{
    app::{health_check, index, not_found},
    ask::ask_question,
    metrics::metrics,
};
use crate::services::{metrics::init_metrics, TutorPipeline};
use crate::AppState;
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use secrecy::ExposeSecret;
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::request_id_middleware,
};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    let static_dir = state.settings.app.static_dir.clone();
    let max_request_bytes = state.settings.server.max_request_bytes;

    Router::new()
        .route("/", get(index))
        .route(
            "/api/ask",
            post(ask_question).layer(DefaultBodyLimit::max(max_request_bytes)),
        )
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
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
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Bind the listener and assemble the router with the mock answer pipeline.
    pub async fn build(settings: Settings) -> Result<Self, AppError> {
        let pipeline = TutorPipeline::mock(&settings.tutor);
        Self::build_with_pipeline(settings, pipeline).await
    }

    /// Same as [`Application::build`] with a caller-supplied pipeline.
    pub async fn build_with_pipeline(
        settings: Settings,
        pipeline: TutorPipeline,
    ) -> Result<Self, AppError> {
        let has_api_key = settings
            .tutor
            .openai_api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().is_empty());
        tracing::info!(
            retrieval_delay_ms = settings.tutor.retrieval_delay_ms,
            generation_delay_ms = settings.tutor.generation_delay_ms,
            openai_api_key_configured = has_api_key,
            "Initialized mock tutor pipeline"
        );

        let address = format!("{}:{}", settings.server.host, settings.server.port);
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        let state = AppState::new(settings, pipeline, init_metrics());
        let router = build_router(state);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        tracing::info!(port = self.port, "Starting tutor-service");

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
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
