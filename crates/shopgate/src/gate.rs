//! The authentication decision point every request passes before dispatch.

use crate::bypass::BypassPolicy;
use crate::credential;
use crate::error::ValidationFailure;
use crate::token::{TokenValidator, VerifiedIdentity};

/// The request facts the gate needs, kept opaque so the gate stays
/// framework-agnostic and testable without an HTTP server.
pub trait GateRequest {
    fn path(&self) -> &str;
    fn method(&self) -> &str;
    fn header(&self, name: &str) -> Option<&str>;
}

/// Outcome of one gate evaluation.
///
/// `Allow(None)` means the request matched a bypass rule and no credential
/// was inspected; `Allow(Some(_))` carries the verified identity for
/// downstream use (logging the subject, trusted header propagation —
/// never the raw token).
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Allow(Option<VerifiedIdentity>),
    Deny(ValidationFailure),
}

/// Orchestrates bypass policy, credential extraction, and token validation
/// per request. Stateless: holds only immutable configuration, so one
/// instance is shared across all request-handling threads.
pub struct AuthenticationGate {
    bypass: BypassPolicy,
    validator: TokenValidator,
}

impl AuthenticationGate {
    pub fn new(bypass: BypassPolicy, validator: TokenValidator) -> Self {
        Self { bypass, validator }
    }

    /// Decide whether the request may proceed to dispatch.
    ///
    /// The bypass check strictly precedes credential extraction: an exempt
    /// endpoint is never denied for a malformed or absent header.
    pub fn evaluate<R: GateRequest + ?Sized>(&self, request: &R) -> Decision {
        self.decide(request, None)
    }

    /// Like [`evaluate`](Self::evaluate), with an explicit clock instant
    /// for the expiry check.
    pub fn evaluate_at<R: GateRequest + ?Sized>(&self, request: &R, now: i64) -> Decision {
        self.decide(request, Some(now))
    }

    fn decide<R: GateRequest + ?Sized>(&self, request: &R, now: Option<i64>) -> Decision {
        if self.bypass.is_exempt(request.path(), request.method()) {
            return Decision::Allow(None);
        }

        let credential = match credential::extract(request) {
            Some(c) => c,
            None => return Decision::Deny(ValidationFailure::Missing),
        };

        let verdict = match now {
            Some(now) => self.validator.validate_at(credential.as_str(), now),
            None => self.validator.validate(credential.as_str()),
        };

        match verdict {
            Ok(identity) => Decision::Allow(Some(identity)),
            Err(failure) => Decision::Deny(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bypass::BypassRule;
    use crate::token::TrustConfig;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";
    const NOW: i64 = 1_700_000_000;

    struct Req {
        path: &'static str,
        method: &'static str,
        authorization: Option<String>,
    }

    impl GateRequest for Req {
        fn path(&self) -> &str {
            self.path
        }
        fn method(&self) -> &str {
            self.method
        }
        fn header(&self, name: &str) -> Option<&str> {
            (name == credential::AUTHORIZATION)
                .then(|| self.authorization.as_deref())
                .flatten()
        }
    }

    fn gate() -> AuthenticationGate {
        AuthenticationGate::new(
            BypassPolicy::new(vec![BypassRule::any_method("/user/login")]),
            TokenValidator::new(TrustConfig {
                secret: SECRET.to_vec(),
                issuer: "shopgate".into(),
                audience: "shopgate-api".into(),
                leeway_secs: 30,
            }),
        )
    }

    fn bearer(exp: i64) -> Option<String> {
        let claims = serde_json::json!({
            "sub": "u123",
            "exp": exp,
            "iss": "shopgate",
            "aud": "shopgate-api",
        });
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        Some(format!("Bearer {token}"))
    }

    #[test]
    fn bypassed_request_allowed_without_header() {
        let req = Req {
            path: "/user/login",
            method: "POST",
            authorization: None,
        };
        assert_eq!(gate().evaluate_at(&req, NOW), Decision::Allow(None));
    }

    #[test]
    fn bypassed_request_ignores_garbage_header() {
        let req = Req {
            path: "/user/login",
            method: "POST",
            authorization: Some("!!not a credential!!".into()),
        };
        assert_eq!(gate().evaluate_at(&req, NOW), Decision::Allow(None));
    }

    #[test]
    fn missing_header_is_denied() {
        let req = Req {
            path: "/products",
            method: "GET",
            authorization: None,
        };
        assert_eq!(
            gate().evaluate_at(&req, NOW),
            Decision::Deny(ValidationFailure::Missing)
        );
    }

    #[test]
    fn valid_token_is_allowed_with_identity() {
        let req = Req {
            path: "/products",
            method: "GET",
            authorization: bearer(NOW + 3600),
        };
        match gate().evaluate_at(&req, NOW) {
            Decision::Allow(Some(identity)) => assert_eq!(identity.subject, "u123"),
            other => panic!("expected Allow(Some(_)), got {other:?}"),
        }
    }

    #[test]
    fn expired_token_is_denied() {
        let req = Req {
            path: "/products",
            method: "GET",
            authorization: bearer(NOW - 3600),
        };
        assert_eq!(
            gate().evaluate_at(&req, NOW),
            Decision::Deny(ValidationFailure::Expired)
        );
    }

    #[test]
    fn unprefixed_header_fails_structurally() {
        // No "Bearer " prefix: the whole value reaches the validator and
        // fails the structural decode.
        let req = Req {
            path: "/products",
            method: "GET",
            authorization: Some("some-opaque-value".into()),
        };
        assert_eq!(
            gate().evaluate_at(&req, NOW),
            Decision::Deny(ValidationFailure::Malformed)
        );
    }
}
