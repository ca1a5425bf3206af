//! Authentication gate and virtual API surface for an e-commerce gateway.
//!
//! Every inbound request passes through the [`AuthenticationGate`] before it
//! may reach a backend: a small bypass list (login) is exempt, everything
//! else must carry a valid `Authorization: Bearer <token>` credential. The
//! gate only decides — forwarding is the host's job.
//!
//! Alongside the gate, [`SurfaceRegistry`] holds the gateway's declared
//! public contract (paths, methods, request schemas, literal examples),
//! decoupled from how the backends are routed internally. [`openapi::render`]
//! projects it into a byte-stable OpenAPI document for consumers.
//!
//! # Gate example
//!
//! ```
//! use shopgate::{AuthenticationGate, BypassPolicy, BypassRule, Decision};
//! use shopgate::{TokenValidator, TrustConfig};
//!
//! struct Probe;
//! impl shopgate::GateRequest for Probe {
//!     fn path(&self) -> &str { "/user/login" }
//!     fn method(&self) -> &str { "POST" }
//!     fn header(&self, _name: &str) -> Option<&str> { None }
//! }
//!
//! let bypass = BypassPolicy::new(vec![BypassRule::any_method("/user/login")]);
//! let validator = TokenValidator::new(TrustConfig {
//!     secret: b"0123456789abcdef0123456789abcdef".to_vec(),
//!     issuer: "shopgate".into(),
//!     audience: "shopgate-api".into(),
//!     leeway_secs: 30,
//! });
//! let gate = AuthenticationGate::new(bypass, validator);
//!
//! assert!(matches!(gate.evaluate(&Probe), Decision::Allow(None)));
//! ```

pub mod bypass;
pub mod credential;
pub mod error;
pub mod gate;
pub mod openapi;
pub mod surface;
pub mod token;

pub use bypass::{BypassPolicy, BypassRule};
pub use credential::Credential;
pub use error::ValidationFailure;
pub use gate::{AuthenticationGate, Decision, GateRequest};
pub use surface::{
    EndpointDescriptor, FieldDescriptor, FieldKind, Method, SurfaceError, SurfaceRegistry,
};
pub use token::{TokenValidator, TrustConfig, VerifiedIdentity};
