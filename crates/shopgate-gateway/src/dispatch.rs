//! The dispatch collaborator: a static table mapping path prefixes to
//! upstream base URLs. Deliberately thin — the gateway fronts a fixed set
//! of services, so there is no general route-matching engine here.

use crate::config::GatewayConfig;

#[derive(Debug, Clone)]
struct Route {
    prefix: String,
    upstream: String,
    name: String,
}

/// Immutable prefix → upstream table, built once at startup.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

/// A resolved upstream target for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    /// Full upstream URL for the request path (query not yet applied).
    pub url: String,
    /// Upstream name, used as a metrics label.
    pub upstream: String,
}

impl RouteTable {
    /// `(prefix, upstream base URL, upstream name)` triples. Longest prefix
    /// wins, so ordering of the input does not matter.
    pub fn new(routes: Vec<(String, String, String)>) -> Self {
        let mut routes: Vec<Route> = routes
            .into_iter()
            .map(|(prefix, upstream, name)| Route {
                prefix,
                upstream: upstream.trim_end_matches('/').to_string(),
                name,
            })
            .collect();
        routes.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        Self { routes }
    }

    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(vec![
            (
                "/user".to_string(),
                config.user_service_url.clone(),
                "user-service".to_string(),
            ),
            (
                "/products".to_string(),
                config.product_service_url.clone(),
                "product-service".to_string(),
            ),
            (
                "/categories".to_string(),
                config.category_service_url.clone(),
                "category-service".to_string(),
            ),
        ])
    }

    /// Resolve a request path to its upstream target. The full original
    /// path is forwarded — upstreams expose the same paths the gateway
    /// declares.
    pub fn resolve(&self, path: &str) -> Option<Target> {
        let route = self.routes.iter().find(|r| {
            path.strip_prefix(r.prefix.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })?;
        Some(Target {
            url: format!("{}{}", route.upstream, path),
            upstream: route.name.clone(),
        })
    }
}
