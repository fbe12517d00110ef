//! Per-agent request forwarding
//!
//! `ANY /proxy/:agent/*endpoint` forwards the method, query string, and
//! body to the configured upstream for that agent. Only the
//! `authorization` and `user-agent` request headers cross the boundary;
//! the gateway always speaks JSON upstream and stamps every forwarded
//! request with an `x-ocn-trace-id` header.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::routing::{any, get};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::error::ProxyError;

pub struct AppState {
    pub config: GatewayConfig,
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/status", get(status))
        .route("/proxy/:agent", any(missing_endpoint))
        .route("/proxy/:agent/*endpoint", any(proxy))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn status(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "service": "ocn-gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "agents": state.config.agent_names(),
    }))
}

async fn missing_endpoint() -> ProxyError {
    ProxyError::MissingEndpoint
}

async fn proxy(
    State(state): State<Arc<AppState>>,
    Path((agent, endpoint)): Path<(String, String)>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), ProxyError> {
    let base = state
        .config
        .agent_base(&agent)
        .ok_or_else(|| ProxyError::UnknownAgent(agent.clone()))?;

    let mut target = format!("{}/{}", base.trim_end_matches('/'), endpoint);
    if let Some(query) = uri.query() {
        target.push('?');
        target.push_str(query);
    }

    let trace_id = proxy_trace_id();
    tracing::info!(%agent, %method, %target, %trace_id, "forwarding request");

    // The server and client sit on different http major versions, so the
    // method and headers cross as strings rather than as typed values.
    let upstream_method = reqwest::Method::from_bytes(method.as_str().as_bytes())
        .map_err(|_| ProxyError::Upstream(format!("unsupported method {method}")))?;

    let mut request = state
        .client
        .request(upstream_method, &target)
        .header("content-type", "application/json")
        .header("x-ocn-trace-id", &trace_id);

    for name in [header::AUTHORIZATION, header::USER_AGENT] {
        if let Some(value) = headers.get(&name).and_then(|v| v.to_str().ok()) {
            request = request.header(name.as_str(), value);
        }
    }

    if !body.is_empty() {
        request = request.body(body.to_vec());
    }

    let response = request
        .send()
        .await
        .map_err(|err| ProxyError::Upstream(err.to_string()))?;

    let upstream_status = response.status().as_u16();
    let payload: Value = response
        .json()
        .await
        .map_err(|err| ProxyError::Upstream(err.to_string()))?;

    let status = StatusCode::from_u16(upstream_status).unwrap_or(StatusCode::BAD_GATEWAY);
    Ok((status, Json(payload)))
}

fn proxy_trace_id() -> String {
    format!("trace-{}", chrono::Utc::now().timestamp_millis())
}
