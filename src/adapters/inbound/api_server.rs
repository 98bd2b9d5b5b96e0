//! Console API Server
//!
//! HTTP API through which the console UI reads the proxy registry, switches
//! or adds proxies, and loads the flattened broker table. Responses use the
//! same `{status, data, errMsg}` envelope as the backend.

use crate::application::{ProxyRegistry, TopologyService};
use crate::domain::entities::{ApiEnvelope, ClusterQuery};
use crate::domain::errors::RegistryError;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Body of `POST /api/proxy/select`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectProxyRequest {
    pub proxy_addr: String,
}

/// Body of `POST /api/proxy/add`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProxyRequest {
    pub new_proxy_addr: String,
}

/// Health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// API Server state.
#[derive(Clone)]
pub struct ApiState {
    pub registry: Arc<ProxyRegistry>,
    pub topology: Arc<TopologyService>,
}

impl ApiState {
    pub fn new(registry: Arc<ProxyRegistry>, topology: Arc<TopologyService>) -> Self {
        Self { registry, topology }
    }
}

/// API Server for the console UI.
pub struct ApiServer {
    listen_addr: String,
    state: ApiState,
}

impl ApiServer {
    pub fn new(listen_addr: String, state: ApiState) -> Self {
        Self { listen_addr, state }
    }

    /// Build the router with all console routes.
    pub fn router(state: ApiState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/api/proxy", get(get_proxy_handler))
            .route("/api/proxy/select", post(select_proxy_handler))
            .route("/api/proxy/add", post(add_proxy_handler))
            .route("/api/proxy/refresh", post(refresh_proxy_handler))
            .route("/api/proxy/reload", post(reload_proxy_handler))
            .route("/api/cluster/brokers", get(list_brokers_handler))
            .with_state(state)
    }

    /// Run the API server.
    pub async fn run(&self) -> anyhow::Result<()> {
        let app = Self::router(self.state.clone())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http());

        let listener = TcpListener::bind(&self.listen_addr).await?;
        tracing::info!("console API listening on {}", self.listen_addr);

        axum::serve(listener, app).await?;
        Ok(())
    }
}

fn status_for(err: &RegistryError) -> StatusCode {
    match err {
        RegistryError::PermissionDenied { .. } => StatusCode::FORBIDDEN,
        RegistryError::NotFound(_) => StatusCode::NOT_FOUND,
        RegistryError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        RegistryError::RemoteFailure { .. } => StatusCode::BAD_GATEWAY,
        RegistryError::TransportFailure(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn error_response(err: RegistryError) -> Response {
    if err.is_local() {
        tracing::debug!("request rejected: {}", err);
    } else {
        tracing::warn!("backend call failed: {}", err);
    }
    (status_for(&err), Json(ApiEnvelope::<()>::failure(err.to_string()))).into_response()
}

/// Malformed bodies get the envelope like every other failure.
fn bad_body(rejection: JsonRejection) -> Response {
    error_response(RegistryError::InvalidInput(rejection.body_text()))
}

// Handler functions

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn get_proxy_handler(State(state): State<ApiState>) -> impl IntoResponse {
    Json(ApiEnvelope::ok(state.registry.snapshot().await))
}

async fn select_proxy_handler(
    State(state): State<ApiState>,
    payload: Result<Json<SelectProxyRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => return bad_body(rejection),
    };
    match state.registry.select_address(&req.proxy_addr).await {
        Ok(()) => Json(ApiEnvelope::ok(state.registry.snapshot().await)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn add_proxy_handler(
    State(state): State<ApiState>,
    payload: Result<Json<AddProxyRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => return bad_body(rejection),
    };
    match state.registry.add_address(&req.new_proxy_addr).await {
        Ok(()) => (
            StatusCode::CREATED,
            Json(ApiEnvelope::ok(state.registry.snapshot().await)),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

async fn refresh_proxy_handler(State(state): State<ApiState>) -> Response {
    match state.registry.refresh_active_config().await {
        Ok(()) => Json(ApiEnvelope::ok(state.registry.snapshot().await)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn reload_proxy_handler(State(state): State<ApiState>) -> Response {
    match state.registry.initialize().await {
        Ok(()) => Json(ApiEnvelope::ok(state.registry.snapshot().await)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn list_brokers_handler(
    State(state): State<ApiState>,
    Query(query): Query<ClusterQuery>,
) -> Response {
    match state.topology.broker_instances(&query).await {
        Ok(records) => Json(ApiEnvelope::ok(records)).into_response(),
        Err(e) => error_response(e),
    }
}
