pub mod config;
pub mod cors;
pub mod dispatch;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod proxy;
pub mod routes;
pub mod state;
pub mod surface;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use state::AppState;
