//! Extraction of the raw credential from a request's Authorization header.

use std::fmt;

use crate::gate::GateRequest;

/// Header carrying the credential.
pub const AUTHORIZATION: &str = "Authorization";

/// Recognized scheme prefix, matched case-sensitively.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Raw credential string lifted from a request. Lives only for the duration
/// of one gate evaluation.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens are sensitive; keep them out of logs and panic messages.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

/// Pull the credential off the request, if any.
///
/// A present header with the `Bearer ` prefix yields the remainder. A header
/// without the prefix is passed through whole — the validator then rejects
/// it structurally. An absent header yields `None`; that is a signal, not an
/// error.
pub fn extract<R: GateRequest + ?Sized>(request: &R) -> Option<Credential> {
    let value = request.header(AUTHORIZATION)?;
    let token = value.strip_prefix(BEARER_PREFIX).unwrap_or(value);
    Some(Credential(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Req(Option<&'static str>);

    impl GateRequest for Req {
        fn path(&self) -> &str {
            "/products"
        }
        fn method(&self) -> &str {
            "GET"
        }
        fn header(&self, name: &str) -> Option<&str> {
            (name == AUTHORIZATION).then_some(self.0).flatten()
        }
    }

    #[test]
    fn strips_bearer_prefix() {
        let cred = extract(&Req(Some("Bearer abc.def.ghi"))).unwrap();
        assert_eq!(cred.as_str(), "abc.def.ghi");
    }

    #[test]
    fn absent_header_is_none() {
        assert!(extract(&Req(None)).is_none());
    }

    #[test]
    fn unrecognized_scheme_passes_through_whole() {
        let cred = extract(&Req(Some("Basic dXNlcjpwdw=="))).unwrap();
        assert_eq!(cred.as_str(), "Basic dXNlcjpwdw==");
    }

    #[test]
    fn prefix_match_is_case_sensitive() {
        let cred = extract(&Req(Some("bearer abc"))).unwrap();
        assert_eq!(cred.as_str(), "bearer abc");
    }

    #[test]
    fn debug_redacts_token() {
        let cred = extract(&Req(Some("Bearer secret-token"))).unwrap();
        let rendered = format!("{:?}", cred);
        assert!(!rendered.contains("secret-token"));
    }
}
