//! Credential validation against the gateway's trust configuration.

use std::collections::HashSet;
use std::fmt;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::error::ValidationFailure;

/// Key material and expected claims used to validate credentials.
/// Built once at startup and shared read-only across request handlers.
#[derive(Clone)]
pub struct TrustConfig {
    /// HS256 signing secret.
    pub secret: Vec<u8>,
    /// Expected `iss` claim.
    pub issuer: String,
    /// Expected `aud` claim.
    pub audience: String,
    /// Clock-skew tolerance applied to the expiry check, in seconds.
    pub leeway_secs: u64,
}

impl fmt::Debug for TrustConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrustConfig")
            .field("secret", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("leeway_secs", &self.leeway_secs)
            .finish()
    }
}

/// Result of a successful validation. Owned by the request that produced
/// it; never cached across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    /// The token's `sub` claim.
    pub subject: String,
    /// The token's `exp` claim, seconds since the Unix epoch.
    pub expires_at: i64,
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
    #[serde(default)]
    iss: Option<String>,
    #[serde(default)]
    aud: Option<String>,
}

/// Validates raw tokens. Pure with respect to process state: consults only
/// the token and the trust configuration, so it is safe to call
/// concurrently without synchronization.
pub struct TokenValidator {
    decoding_key: DecodingKey,
    trust: TrustConfig,
}

impl TokenValidator {
    pub fn new(trust: TrustConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(&trust.secret);
        Self {
            decoding_key,
            trust,
        }
    }

    /// Validate against the current clock.
    pub fn validate(&self, token: &str) -> Result<VerifiedIdentity, ValidationFailure> {
        self.validate_at(token, chrono::Utc::now().timestamp())
    }

    /// Validate against an explicit clock instant (seconds since the Unix
    /// epoch). Each check is a distinct failure mode, in order: structural
    /// decode, signature, expiry, issuer/audience.
    pub fn validate_at(
        &self,
        token: &str,
        now: i64,
    ) -> Result<VerifiedIdentity, ValidationFailure> {
        // Structure and signature. Expiry and claim checks are performed
        // explicitly below so each failure maps to exactly one kind.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => ValidationFailure::SignatureInvalid,
                _ => ValidationFailure::Malformed,
            })?;
        let claims = data.claims;

        // Expired only when strictly past the skew-adjusted deadline.
        if claims.exp < now - self.trust.leeway_secs as i64 {
            return Err(ValidationFailure::Expired);
        }

        if claims.iss.as_deref() != Some(self.trust.issuer.as_str())
            || claims.aud.as_deref() != Some(self.trust.audience.as_str())
        {
            return Err(ValidationFailure::ClaimsInvalid);
        }

        Ok(VerifiedIdentity {
            subject: claims.sub,
            expires_at: claims.exp,
        })
    }
}
