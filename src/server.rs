use std::{net::SocketAddr, path::Path};

use anyhow::Context;
use axum::{middleware, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    decompression::RequestDecompressionLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    error::ErrorVerbosity,
    middleware::{
        method_not_allowed::method_not_allowed, not_found::not_found, trace_headers::trace_headers,
        trace_response_body::trace_response_body,
    },
    openapi::ApiDoc,
    route,
    state::ApiState,
};

/// Path serving the generated OpenAPI document.
pub const OPENAPI_PATH: &str = "/openapi.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[source] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[source] serde_yaml::Error),
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    socket_address: SocketAddr,
    error_verbosity: ErrorVerbosity,
    /// Server URL advertised by the OpenAPI document.
    #[serde(default)]
    public_url: Option<String>,
    #[serde(default)]
    trace_headers: bool,
    #[serde(default)]
    trace_response_body: bool,
}

impl ServerConfig {
    pub fn new(socket_address: SocketAddr, error_verbosity: ErrorVerbosity) -> Self {
        Self {
            socket_address,
            error_verbosity,
            public_url: None,
            trace_headers: false,
            trace_response_body: false,
        }
    }

    pub fn with_public_url(mut self, public_url: impl Into<String>) -> Self {
        self.public_url = Some(public_url.into());
        self
    }

    pub fn with_trace_headers(mut self, trace_headers: bool) -> Self {
        self.trace_headers = trace_headers;
        self
    }

    pub fn with_trace_response_body(mut self, trace_response_body: bool) -> Self {
        self.trace_response_body = trace_response_body;
        self
    }

    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn from_config_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path.as_ref())
            .await
            .map_err(ConfigError::Read)?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(ConfigError::Parse)
    }

    pub fn socket_address(&self) -> SocketAddr {
        self.socket_address
    }

    pub fn error_verbosity(&self) -> ErrorVerbosity {
        self.error_verbosity
    }
}

pub struct Server {
    config: ServerConfig,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Builds the application with a fresh, empty library.
    pub fn app(&self) -> Router {
        self.app_with_state(ApiState::new(self.config.error_verbosity))
    }

    pub fn app_with_state(&self, state: ApiState) -> Router {
        let doc = ApiDoc::with_public_url(self.config.public_url.as_deref());

        let mut app = Router::<ApiState>::new()
            .merge(route::books::app::app())
            .merge(SwaggerUi::new("/api-docs").url(OPENAPI_PATH, doc.clone()))
            .merge(Redoc::with_url("/redoc", doc))
            .merge(RapiDoc::new(OPENAPI_PATH).path("/rapidoc"))
            .fallback(not_found)
            .layer(middleware::from_fn_with_state(
                state.clone(),
                method_not_allowed::<ApiState>,
            ));

        if self.config.trace_response_body {
            app = app.layer(middleware::from_fn_with_state(
                state.clone(),
                trace_response_body::<ApiState>,
            ));
        }

        if self.config.trace_headers {
            app = app.layer(middleware::from_fn(trace_headers));
        }

        app.with_state(state).layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                        .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                        .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
                )
                .layer(RequestDecompressionLayer::new())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive()),
        )
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let app = self.app();

        tracing::info!(addr = %self.config.socket_address, "Starting server");

        let listener = TcpListener::bind(&self.config.socket_address)
            .await
            .context("Bind failed")?;

        tracing::info!(
            "Server running on http://{}/biblioteca",
            self.config.socket_address
        );
        tracing::info!(
            "Swagger documentation available on http://{}/api-docs",
            self.config.socket_address
        );

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");

        tracing::info!("CTRL+C received");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM signal handler")
            .recv()
            .await;

        tracing::info!("SIGTERM received");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down");
}
