//! Bridges the framework-agnostic gate onto actix requests and turns a
//! denial into the boundary's generic 401 response.

use actix_web::{HttpRequest, HttpResponse};
use shopgate::{AuthenticationGate, Decision, GateRequest, VerifiedIdentity};

use crate::metrics::{REQUESTS_ALLOWED, REQUESTS_DENIED};

/// The gate's view of an actix request.
pub struct RequestFacts<'a>(pub &'a HttpRequest);

impl GateRequest for RequestFacts<'_> {
    fn path(&self) -> &str {
        self.0.uri().path()
    }

    fn method(&self) -> &str {
        self.0.method().as_str()
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.0.headers().get(name).and_then(|v| v.to_str().ok())
    }
}

/// The one unauthorized response every denial collapses to. No failure-kind
/// detail reaches the caller.
pub fn unauthorized_response() -> HttpResponse {
    HttpResponse::Unauthorized().json(serde_json::json!({
        "error": "unauthorized",
        "message": "Authentication required"
    }))
}

/// Evaluate the gate for this request. `Ok` carries the verified identity
/// (None for bypassed endpoints); `Err` is the ready-to-send 401. The
/// specific failure kind is recorded in logs and metrics only.
pub fn require_auth(
    req: &HttpRequest,
    gate: &AuthenticationGate,
) -> Result<Option<VerifiedIdentity>, HttpResponse> {
    match gate.evaluate(&RequestFacts(req)) {
        Decision::Allow(identity) => {
            let outcome = if identity.is_some() {
                "verified"
            } else {
                "bypass"
            };
            REQUESTS_ALLOWED.with_label_values(&[outcome]).inc();
            if let Some(ref id) = identity {
                tracing::debug!(subject = %id.subject, path = %req.uri().path(), "request authenticated");
            }
            Ok(identity)
        }
        Decision::Deny(failure) => {
            REQUESTS_DENIED.with_label_values(&[failure.as_str()]).inc();
            tracing::debug!(
                path = %req.uri().path(),
                reason = failure.as_str(),
                "request denied at the gate"
            );
            Err(unauthorized_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn request_facts_expose_path_method_and_headers() {
        let req = TestRequest::get()
            .uri("/products?page=2")
            .insert_header(("Authorization", "Bearer abc"))
            .to_http_request();
        let facts = RequestFacts(&req);

        assert_eq!(facts.path(), "/products");
        assert_eq!(facts.method(), "GET");
        assert_eq!(facts.header("Authorization"), Some("Bearer abc"));
        // actix header lookup is case-insensitive
        assert_eq!(facts.header("authorization"), Some("Bearer abc"));
        assert_eq!(facts.header("X-Missing"), None);
    }

    fn gate() -> AuthenticationGate {
        AuthenticationGate::new(
            shopgate::BypassPolicy::default(),
            shopgate::TokenValidator::new(shopgate::TrustConfig {
                secret: b"0123456789abcdef0123456789abcdef".to_vec(),
                issuer: "shopgate".into(),
                audience: "shopgate-api".into(),
                leeway_secs: 30,
            }),
        )
    }

    #[test]
    fn denial_yields_401() {
        let req = TestRequest::get().uri("/products").to_http_request();

        let response = require_auth(&req, &gate()).unwrap_err();
        assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn valid_bearer_token_passes_with_identity() {
        use jsonwebtoken::{encode, EncodingKey, Header};

        let claims = serde_json::json!({
            "sub": "u123",
            "exp": FAR_FUTURE_EXP,
            "iss": "shopgate",
            "aud": "shopgate-api",
        });
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"0123456789abcdef0123456789abcdef"),
        )
        .unwrap();
        let req = TestRequest::get()
            .uri("/products")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_http_request();

        let identity = require_auth(&req, &gate()).unwrap().unwrap();
        assert_eq!(identity.subject, "u123");
    }

    // 2100-01-01T00:00:00Z, far enough out that the wall-clock expiry
    // check cannot flake.
    const FAR_FUTURE_EXP: i64 = 4_102_444_800;
}
