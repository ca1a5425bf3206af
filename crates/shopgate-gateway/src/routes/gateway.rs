//! The catch-all dispatch route: gate first, then resolve and forward.

use actix_web::{web, HttpRequest, HttpResponse};

use crate::error::GatewayError;
use crate::metrics::{PROXY_LATENCY, PROXY_REQUESTS_TOTAL, ROUTE_MISSES};
use crate::middleware::require_auth;
use crate::proxy::forward;
use crate::state::AppState;

/// Sanitize a request path to prevent traversal and header injection on
/// the upstream URL. Validates against the decoded form but returns the
/// original (still-encoded) path to prevent query/fragment injection from
/// decoded URL-special characters.
fn sanitize_path(path: &str) -> Result<String, GatewayError> {
    // URL-decode the path to catch encoded attacks (e.g. %2e%2e)
    let decoded = urlencoding::decode(path)
        .map_err(|_| GatewayError::ProxyError("invalid URL encoding in path".to_string()))?;

    // Reject path traversal
    if decoded.contains("..") {
        return Err(GatewayError::ProxyError(
            "path traversal not allowed".to_string(),
        ));
    }

    // Reject CRLF injection
    if decoded.contains('\r') || decoded.contains('\n') {
        return Err(GatewayError::ProxyError(
            "path must not contain newlines".to_string(),
        ));
    }

    // Reject null bytes
    if decoded.contains('\0') {
        return Err(GatewayError::ProxyError(
            "path must not contain null bytes".to_string(),
        ));
    }

    Ok(path.to_string())
}

/// Sanitize a query string to prevent CRLF injection and fragment smuggling.
fn sanitize_query(query: &str) -> Result<String, GatewayError> {
    // Reject CRLF injection
    if query.contains('\r') || query.contains('\n') {
        return Err(GatewayError::ProxyError(
            "query string must not contain newlines".to_string(),
        ));
    }

    // Strip fragment (everything after #) — fragments should not be sent upstream
    let sanitized = match query.find('#') {
        Some(idx) => &query[..idx],
        None => query,
    };

    // Reject null bytes
    if sanitized.contains('\0') {
        return Err(GatewayError::ProxyError(
            "query string must not contain null bytes".to_string(),
        ));
    }

    // Reject path traversal in query parameters (both decoded and percent-encoded)
    let decoded = urlencoding::decode(sanitized).unwrap_or(std::borrow::Cow::Borrowed(sanitized));
    if decoded.contains("..") {
        return Err(GatewayError::ProxyError(
            "query string must not contain path traversal sequences".to_string(),
        ));
    }

    Ok(sanitized.to_string())
}

/// ANY /{path} - gate, resolve, forward. Deny short-circuits before any
/// upstream call.
pub async fn dispatch(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, GatewayError> {
    let identity = match require_auth(&req, &state.gate) {
        Ok(identity) => identity,
        Err(denial) => return Ok(denial),
    };

    let path = sanitize_path(req.uri().path())?;
    let target = state.routes.resolve(&path).ok_or_else(|| {
        ROUTE_MISSES.inc();
        GatewayError::RouteNotFound(path.clone())
    })?;

    // Add query string if present (sanitized)
    let target_url = if let Some(query) = req.uri().query() {
        let query = sanitize_query(query)?;
        if query.is_empty() {
            target.url
        } else {
            format!("{}?{}", target.url, query)
        }
    } else {
        target.url
    };

    let request_id = uuid::Uuid::new_v4().to_string();
    let timer = PROXY_LATENCY.start_timer();
    let response = forward(
        &state.http_client,
        &req,
        &target_url,
        body,
        identity.as_ref(),
        &request_id,
    )
    .await?;
    timer.observe_duration();
    PROXY_REQUESTS_TOTAL
        .with_label_values(&[&target.upstream])
        .inc();

    Ok(response)
}

/// Configure the catch-all dispatch route. Registered last so the
/// operational routes (health, docs, metrics) keep their own handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.default_service(web::route().to(dispatch));
}
