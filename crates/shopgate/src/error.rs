use thiserror::Error;

/// Why a credential failed validation.
///
/// These kinds are recorded server-side for diagnosis; callers only ever
/// see a generic unauthorized response regardless of the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("no credential present")]
    Missing,

    #[error("credential is structurally invalid")]
    Malformed,

    #[error("credential has expired")]
    Expired,

    #[error("credential signature does not verify")]
    SignatureInvalid,

    #[error("credential claims do not match trust configuration")]
    ClaimsInvalid,
}

impl ValidationFailure {
    /// Stable label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationFailure::Missing => "missing",
            ValidationFailure::Malformed => "malformed",
            ValidationFailure::Expired => "expired",
            ValidationFailure::SignatureInvalid => "signature_invalid",
            ValidationFailure::ClaimsInvalid => "claims_invalid",
        }
    }
}
