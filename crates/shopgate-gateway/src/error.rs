use actix_web::{HttpResponse, ResponseError};
use std::fmt;

#[derive(Debug)]
pub enum GatewayError {
    /// No upstream route matches the request path
    RouteNotFound(String),
    /// Upstream request failed
    ProxyError(String),
    /// Internal error
    Internal(String),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::RouteNotFound(path) => write!(f, "no route for path: {}", path),
            GatewayError::ProxyError(msg) => write!(f, "proxy error: {}", msg),
            GatewayError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for GatewayError {}

impl ResponseError for GatewayError {
    fn error_response(&self) -> HttpResponse {
        match self {
            GatewayError::RouteNotFound(path) => {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": "route_not_found",
                    "message": format!("No route for '{}'", path)
                }))
            }
            GatewayError::ProxyError(msg) => {
                tracing::error!("Proxy error: {}", msg);
                HttpResponse::BadGateway().json(serde_json::json!({
                    "error": "proxy_error",
                    "message": "Failed to reach upstream service"
                }))
            }
            GatewayError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "internal_error",
                    "message": "An internal error occurred"
                }))
            }
        }
    }
}
