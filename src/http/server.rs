//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the single ingest handler
//! - Wire up middleware (CORS, body limit, request ID, tracing)
//! - Log every parsed request, then hand it to the dispatcher
//! - Serve until the shutdown signal fires

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, State},
    Json, Router,
};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::clock::ServiceClock;
use crate::config::ServiceConfig;
use crate::downstream::{AutomationSink, SimulatedSink};
use crate::http::request::InboundRequest;
use crate::observability::log_request;
use crate::routing::Dispatcher;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

/// HTTP server for the webhook ingestion service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Uptime is measured from this call.
    pub fn new(config: ServiceConfig) -> Self {
        let sink = Arc::new(SimulatedSink::new(config.downstream.actor.clone()));
        Self::with_sink(config, sink)
    }

    /// Create a server that hands envelopes to a custom sink.
    pub fn with_sink(config: ServiceConfig, sink: Arc<dyn AutomationSink>) -> Self {
        let dispatcher = Dispatcher::from_config(&config, ServiceClock::start(), sink);
        let state = AppState {
            dispatcher: Arc::new(dispatcher),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Every method and path lands in `ingest_handler`; route selection
    /// happens in the dispatcher's own table.
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .fallback(ingest_handler)
            .with_state(state)
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
            .layer(CorsLayer::permissive())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// Log the call, then dispatch it. The log record always precedes anything
/// the handler emits.
pub fn handle_inbound(dispatcher: &Dispatcher, request: &InboundRequest) -> Value {
    log_request(request);
    dispatcher.dispatch(request)
}

/// Body parsing errors never get this far.
async fn ingest_handler(State(state): State<AppState>, request: InboundRequest) -> Json<Value> {
    Json(handle_inbound(&state.dispatcher, &request))
}
