use actix_web::{HttpRequest, HttpResponse};
use bytes::Bytes;
use shopgate::VerifiedIdentity;

use crate::error::GatewayError;

/// Headers to strip from the client request before forwarding.
/// The gateway is the trust boundary: credentials never reach an upstream,
/// and the identity-propagation headers are always rewritten so a client
/// cannot inject them.
const HEADERS_TO_STRIP: &[&str] = &[
    "host",
    "connection",
    "keep-alive",
    "transfer-encoding",
    "content-length", // Will be recalculated
    "authorization",
    "cookie",
    "proxy-authorization",
    "x-api-key",
    "x-user-id",
    "x-request-id",
];

/// Allowlist of response headers to forward from the upstream.
/// Prevents leaking internal upstream headers (e.g. Server, X-Powered-By).
const ALLOWED_RESPONSE_HEADERS: &[&str] = &[
    "content-type",
    "content-length",
    "content-encoding",
    "cache-control",
    "etag",
    "last-modified",
    "date",
    "vary",
    "x-request-id",
];

/// Maximum upstream response body size (10 MB).
const MAX_RESPONSE_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Forward an allowed request to its upstream target and rebuild the
/// upstream response for the client.
pub async fn forward(
    client: &reqwest::Client,
    original_req: &HttpRequest,
    target_url: &str,
    body: Bytes,
    identity: Option<&VerifiedIdentity>,
    request_id: &str,
) -> Result<HttpResponse, GatewayError> {
    let method = match original_req.method().as_str() {
        "GET" => reqwest::Method::GET,
        "POST" => reqwest::Method::POST,
        "PUT" => reqwest::Method::PUT,
        "DELETE" => reqwest::Method::DELETE,
        "PATCH" => reqwest::Method::PATCH,
        "HEAD" => reqwest::Method::HEAD,
        "OPTIONS" => reqwest::Method::OPTIONS,
        other => {
            return Err(GatewayError::ProxyError(format!(
                "unsupported HTTP method: {}",
                other
            )));
        }
    };

    let mut request_builder = client.request(method, target_url);

    // Copy headers from the original request (except stripped ones)
    for (name, value) in original_req.headers() {
        let name_lower = name.as_str().to_lowercase();
        if !HEADERS_TO_STRIP.contains(&name_lower.as_str()) {
            if let Ok(value_str) = value.to_str() {
                request_builder = request_builder.header(name.as_str(), value_str);
            }
        }
    }

    // Propagate the verified identity so upstreams can trust the gateway's
    // authentication instead of re-parsing tokens.
    if let Some(identity) = identity {
        request_builder = request_builder.header("X-User-Id", identity.subject.as_str());
    }
    request_builder = request_builder.header("X-Request-Id", request_id);

    if !body.is_empty() {
        request_builder = request_builder.body(body.to_vec());
    }

    let mut response = request_builder.send().await.map_err(|e| {
        tracing::error!(error = %e, "upstream request failed");
        GatewayError::ProxyError("upstream request failed".to_string())
    })?;

    let status = response.status();
    let headers = response.headers().clone();

    // Check Content-Length before reading (fast path)
    if let Some(cl) = response.content_length() {
        if cl > MAX_RESPONSE_BODY_SIZE as u64 {
            return Err(GatewayError::ProxyError(format!(
                "upstream response too large: {} bytes (max {})",
                cl, MAX_RESPONSE_BODY_SIZE
            )));
        }
    }

    // Stream the body with progressive size enforcement so chunked
    // responses without Content-Length cannot exhaust memory.
    let mut body_buf = Vec::with_capacity(
        response
            .content_length()
            .map(|cl| cl as usize)
            .unwrap_or(8192)
            .min(MAX_RESPONSE_BODY_SIZE),
    );
    while let Some(chunk) = response.chunk().await.map_err(|e| {
        tracing::error!(error = %e, "failed to read upstream response body");
        GatewayError::ProxyError("failed to read upstream response".to_string())
    })? {
        if body_buf.len() + chunk.len() > MAX_RESPONSE_BODY_SIZE {
            return Err(GatewayError::ProxyError(format!(
                "upstream response too large (max {} bytes)",
                MAX_RESPONSE_BODY_SIZE
            )));
        }
        body_buf.extend_from_slice(&chunk);
    }
    let body = Bytes::from(body_buf);

    let mut builder = HttpResponse::build(
        actix_web::http::StatusCode::from_u16(status.as_u16())
            .unwrap_or(actix_web::http::StatusCode::OK),
    );

    // Copy only allowlisted response headers from the upstream
    for (name, value) in headers.iter() {
        let name_lower = name.as_str().to_lowercase();
        if ALLOWED_RESPONSE_HEADERS.contains(&name_lower.as_str()) {
            if let Ok(value_str) = value.to_str() {
                builder.insert_header((name.as_str(), value_str));
            }
        }
    }

    Ok(builder.body(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_to_strip() {
        assert!(HEADERS_TO_STRIP.contains(&"host"));
        assert!(HEADERS_TO_STRIP.contains(&"authorization"));
        assert!(HEADERS_TO_STRIP.contains(&"x-user-id"));
        assert!(!HEADERS_TO_STRIP.contains(&"content-type"));
    }

    #[test]
    fn test_allowed_response_headers() {
        assert!(ALLOWED_RESPONSE_HEADERS.contains(&"content-type"));
        assert!(ALLOWED_RESPONSE_HEADERS.contains(&"cache-control"));
        assert!(!ALLOWED_RESPONSE_HEADERS.contains(&"server"));
        assert!(!ALLOWED_RESPONSE_HEADERS.contains(&"x-powered-by"));
    }
}
