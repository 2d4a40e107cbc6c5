//! Yojana Sahayak service binary.
//!
//! Loads configuration, picks the orchestrator binding, wires the
//! application handlers over one shared in-memory session, and serves
//! the HTTP surface.

use std::sync::Arc;

use http::HeaderValue;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use yojana_sahayak::adapters::http::{app_router, AssistantHandlers};
use yojana_sahayak::adapters::orchestrator::{
    HttpOrchestrator, HttpOrchestratorConfig, MockOrchestrator,
};
use yojana_sahayak::application::handlers::{
    GetSessionHandler, HandleUtteranceHandler, ResetSessionHandler, ValidateDocumentsHandler,
};
use yojana_sahayak::config::AppConfig;
use yojana_sahayak::domain::session::SessionState;
use yojana_sahayak::ports::SchemeOrchestrator;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let orchestrator = build_orchestrator(&config);
    let info = orchestrator.info();

    let state = Arc::new(Mutex::new(SessionState::new()));
    let handlers = AssistantHandlers::new(
        Arc::new(HandleUtteranceHandler::new(
            state.clone(),
            orchestrator.clone(),
        )),
        Arc::new(ValidateDocumentsHandler::new(
            state.clone(),
            orchestrator.clone(),
        )),
        Arc::new(ResetSessionHandler::new(state.clone())),
        Arc::new(GetSessionHandler::new(state)),
        info.clone(),
    );

    let router = app_router(handlers).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(std::time::Duration::from_secs(
                config.server.request_timeout_secs,
            )))
            .layer(cors_layer(&config)),
    );

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, orchestrator = %info.name, engine = %info.engine, "yojana-sahayak listening");

    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn build_orchestrator(config: &AppConfig) -> Arc<dyn SchemeOrchestrator> {
    match &config.orchestrator.base_url {
        Some(base_url) if !base_url.is_empty() => {
            let mut http_config = HttpOrchestratorConfig::new(base_url)
                .with_timeout(config.orchestrator.timeout())
                .with_engine(config.orchestrator.engine.clone());
            if let Some(key) = &config.orchestrator.api_key {
                http_config = http_config.with_api_key(key);
            }
            Arc::new(HttpOrchestrator::new(http_config))
        }
        _ => {
            // Config validation already refused this in production.
            warn!("no orchestrator endpoint configured, using scripted mock binding");
            Arc::new(MockOrchestrator::new())
        }
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
