//! End-to-end scenarios for the gate and the rendered surface contract.

use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use shopgate::{
    AuthenticationGate, BypassPolicy, BypassRule, Decision, EndpointDescriptor, FieldDescriptor,
    GateRequest, Method, SurfaceError, SurfaceRegistry, TokenValidator, TrustConfig,
    ValidationFailure,
};

const SECRET: &[u8] = b"an-integration-test-secret-of-32b";
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
        (name == "Authorization")
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

fn bearer(subject: &str, exp: i64) -> Option<String> {
    let claims = json!({
        "sub": subject,
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
fn login_without_header_is_allowed() {
    let decision = gate().evaluate_at(
        &Req {
            path: "/user/login",
            method: "POST",
            authorization: None,
        },
        NOW,
    );
    assert_eq!(decision, Decision::Allow(None));
}

#[test]
fn products_without_header_is_denied_missing() {
    let decision = gate().evaluate_at(
        &Req {
            path: "/products",
            method: "GET",
            authorization: None,
        },
        NOW,
    );
    assert_eq!(decision, Decision::Deny(ValidationFailure::Missing));
}

#[test]
fn products_with_valid_token_carries_subject() {
    let decision = gate().evaluate_at(
        &Req {
            path: "/products",
            method: "GET",
            authorization: bearer("u123", NOW + 3600),
        },
        NOW,
    );
    match decision {
        Decision::Allow(Some(identity)) => assert_eq!(identity.subject, "u123"),
        other => panic!("expected Allow(Some(_)), got {other:?}"),
    }
}

#[test]
fn products_with_expired_token_is_denied_expired() {
    let decision = gate().evaluate_at(
        &Req {
            path: "/products",
            method: "GET",
            authorization: bearer("u123", NOW - 3600),
        },
        NOW,
    );
    assert_eq!(decision, Decision::Deny(ValidationFailure::Expired));
}

fn sample_registry() -> Vec<EndpointDescriptor> {
    vec![
        EndpointDescriptor::new(Method::Post, "/user/login", "User", "User Login")
            .request_schema(vec![
                FieldDescriptor::string("email").with_format("email"),
                FieldDescriptor::string("password"),
            ])
            .example(json!({"email": "john.doe@example.com", "password": "Test@123"})),
        EndpointDescriptor::new(Method::Get, "/products", "Products", "Get All Products"),
        EndpointDescriptor::new(Method::Get, "/categories", "Categories", "Get All Categories"),
    ]
}

#[test]
fn render_of_build_is_reproducible() {
    let first = shopgate::openapi::render(&SurfaceRegistry::build(sample_registry()).unwrap());
    let second = shopgate::openapi::render(&SurfaceRegistry::build(sample_registry()).unwrap());
    assert_eq!(first, second);
}

#[test]
fn duplicate_descriptor_fails_construction() {
    let mut endpoints = sample_registry();
    endpoints.push(EndpointDescriptor::new(
        Method::Get,
        "/products",
        "Products",
        "Get All Products",
    ));
    assert_eq!(
        SurfaceRegistry::build(endpoints).unwrap_err(),
        SurfaceError::DuplicateEndpoint {
            method: Method::Get,
            path: "/products".into()
        }
    );
}
