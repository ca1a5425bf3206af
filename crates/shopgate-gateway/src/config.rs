use std::env;

use url::Url;

use shopgate::TrustConfig;

const DEFAULT_PORT: u16 = 5039;
const DEFAULT_CLOCK_SKEW_SECS: u64 = 30;
const DEFAULT_RATE_LIMIT_RPM: u32 = 60;
const DEFAULT_USER_SERVICE_URL: &str = "http://localhost:5001";
const DEFAULT_PRODUCT_SERVICE_URL: &str = "http://localhost:5002";
const DEFAULT_CATEGORY_SERVICE_URL: &str = "http://localhost:5003";
const DEFAULT_ISSUER: &str = "shopgate";
const DEFAULT_AUDIENCE: &str = "shopgate-api";

#[derive(Clone)]
pub struct GatewayConfig {
    /// JWT signing secret (HS256)
    pub jwt_secret: Vec<u8>,
    /// Expected token issuer
    pub jwt_issuer: String,
    /// Expected token audience
    pub jwt_audience: String,
    /// Clock-skew tolerance for the expiry check, seconds
    pub clock_skew_secs: u64,
    /// Server port
    pub port: u16,
    /// Upstream base URL for the user service
    pub user_service_url: String,
    /// Upstream base URL for the product service
    pub product_service_url: String,
    /// Upstream base URL for the category service
    pub category_service_url: String,
    /// CORS allowed origins
    pub allowed_origins: Vec<String>,
    /// Rate limit requests per minute
    pub rate_limit_rpm: u32,
    /// Bearer token required for /metrics endpoint (None = public)
    pub metrics_token: Option<String>,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_issuer", &self.jwt_issuer)
            .field("jwt_audience", &self.jwt_audience)
            .field("clock_skew_secs", &self.clock_skew_secs)
            .field("port", &self.port)
            .field("user_service_url", &self.user_service_url)
            .field("product_service_url", &self.product_service_url)
            .field("category_service_url", &self.category_service_url)
            .field("allowed_origins", &self.allowed_origins)
            .field("rate_limit_rpm", &self.rate_limit_rpm)
            .field(
                "metrics_token",
                &self.metrics_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Required: JWT secret
        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .map(|s| s.into_bytes())
            .ok_or(ConfigError::MissingRequired("JWT_SECRET"))?;

        if jwt_secret.len() < 32 {
            tracing::warn!(
                "JWT_SECRET is too short ({} bytes, minimum 32) — \
                 use `openssl rand -hex 32` to generate a secure secret",
                jwt_secret.len()
            );
        }

        // Optional: issuer/audience claims
        let jwt_issuer = env::var("JWT_ISSUER").unwrap_or_else(|_| DEFAULT_ISSUER.to_string());
        let jwt_audience =
            env::var("JWT_AUDIENCE").unwrap_or_else(|_| DEFAULT_AUDIENCE.to_string());

        // Optional: clock skew
        let clock_skew_secs = env::var("CLOCK_SKEW_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_CLOCK_SKEW_SECS);

        // Optional: port
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        // Optional: upstream service URLs
        let user_service_url = upstream_from_env("USER_SERVICE_URL", DEFAULT_USER_SERVICE_URL)?;
        let product_service_url =
            upstream_from_env("PRODUCT_SERVICE_URL", DEFAULT_PRODUCT_SERVICE_URL)?;
        let category_service_url =
            upstream_from_env("CATEGORY_SERVICE_URL", DEFAULT_CATEGORY_SERVICE_URL)?;

        // Optional: allowed origins
        let allowed_origins: Vec<String> = env::var("ALLOWED_ORIGINS")
            .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_else(|_| {
                vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ]
            });

        // Optional: rate limit
        let rate_limit_rpm = env::var("RATE_LIMIT_RPM")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_RATE_LIMIT_RPM);

        // Optional: metrics token
        let metrics_token = env::var("METRICS_TOKEN").ok().filter(|s| !s.is_empty());

        if metrics_token.is_none() {
            tracing::warn!("METRICS_TOKEN not set — /metrics endpoint is publicly accessible");
        }

        Ok(Self {
            jwt_secret,
            jwt_issuer,
            jwt_audience,
            clock_skew_secs,
            port,
            user_service_url,
            product_service_url,
            category_service_url,
            allowed_origins,
            rate_limit_rpm,
            metrics_token,
        })
    }

    /// Trust configuration handed to the token validator.
    pub fn trust_config(&self) -> TrustConfig {
        TrustConfig {
            secret: self.jwt_secret.clone(),
            issuer: self.jwt_issuer.clone(),
            audience: self.jwt_audience.clone(),
            leeway_secs: self.clock_skew_secs,
        }
    }
}

fn upstream_from_env(var: &'static str, default: &str) -> Result<String, ConfigError> {
    let value = env::var(var).unwrap_or_else(|_| default.to_string());
    validate_upstream_url(&value)?;
    Ok(value.trim_end_matches('/').to_string())
}

/// Upstreams are operator-configured at startup; validate shape, not
/// reachability.
pub fn validate_upstream_url(url: &str) -> Result<(), ConfigError> {
    let parsed = Url::parse(url).map_err(|_| ConfigError::InvalidUrl(url.to_string()))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{url}: upstream must use http or https"
        )));
    }
    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "{url}: upstream URL must have a host"
        )));
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingRequired(&'static str),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}
