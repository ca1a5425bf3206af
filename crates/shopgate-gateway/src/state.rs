use std::sync::Arc;

use shopgate::{AuthenticationGate, BypassPolicy, SurfaceError, TokenValidator};

use crate::config::GatewayConfig;
use crate::dispatch::RouteTable;
use crate::surface;

/// Shared application state. Everything here is immutable after startup
/// and read concurrently by all workers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub gate: Arc<AuthenticationGate>,
    pub routes: Arc<RouteTable>,
    /// OpenAPI document, rendered once — byte-stable across requests.
    pub openapi_doc: Arc<String>,
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Result<Self, SurfaceError> {
        let gate = AuthenticationGate::new(
            BypassPolicy::new(surface::bypass_rules()),
            TokenValidator::new(config.trust_config()),
        );
        let registry = surface::registry()?;
        let openapi_doc = shopgate::openapi::render(&registry);
        let routes = RouteTable::from_config(&config);

        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("failed to create HTTP client");

        Ok(Self {
            config: Arc::new(config),
            gate: Arc::new(gate),
            routes: Arc::new(routes),
            openapi_doc: Arc::new(openapi_doc),
            http_client,
        })
    }
}
