//! Proxy error responses
//!
//! Every failure maps to a JSON body of the shape `{ "error": ... }` with
//! a status describing who was at fault: the caller (400/404) or the
//! upstream agent (502).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Unknown agent: {0}")]
    UnknownAgent(String),

    #[error("Missing endpoint path")]
    MissingEndpoint,

    #[error("Gateway proxy failed: {0}")]
    Upstream(String),
}

impl ProxyError {
    fn status(&self) -> StatusCode {
        match self {
            ProxyError::UnknownAgent(_) => StatusCode::NOT_FOUND,
            ProxyError::MissingEndpoint => StatusCode::BAD_REQUEST,
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::BAD_GATEWAY {
            tracing::error!(error = %self, "proxy request failed");
        } else {
            tracing::warn!(error = %self, "rejected proxy request");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ProxyError::UnknownAgent("kraken".to_string()).to_string(),
            "Unknown agent: kraken"
        );
        assert!(ProxyError::Upstream("connection refused".to_string())
            .to_string()
            .starts_with("Gateway proxy failed"));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ProxyError::UnknownAgent("x".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ProxyError::MissingEndpoint.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ProxyError::Upstream("x".to_string()).status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
