use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shopgate_gateway::{config::GatewayConfig, metrics::register_metrics, routes, state::AppState};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = GatewayConfig::from_env().expect("Failed to load configuration");
    let port = config.port;
    let allowed_origins = config.allowed_origins.clone();
    let rate_limit_rpm = config.rate_limit_rpm;

    tracing::info!("Starting shopgate-gateway on port {}", port);
    tracing::info!("Token issuer: {}", config.jwt_issuer);
    tracing::info!("Token audience: {}", config.jwt_audience);
    tracing::info!("User service: {}", config.user_service_url);
    tracing::info!("Product service: {}", config.product_service_url);
    tracing::info!("Category service: {}", config.category_service_url);

    // Register Prometheus metrics
    register_metrics();

    // Build shared state. A duplicate surface entry is a programming
    // defect; abort before binding the listener.
    let state = AppState::new(config).expect("Failed to build API surface registry");
    let state_data = web::Data::new(state);

    // Configure rate limiter
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_minute(rate_limit_rpm as u64)
        .finish()
        .expect("Failed to create rate limiter config");

    // Start HTTP server
    HttpServer::new(move || {
        let cors = shopgate_gateway::cors::build_cors(&allowed_origins);

        App::new()
            .app_data(state_data.clone())
            .app_data(web::PayloadConfig::new(10 * 1024 * 1024)) // 10MB body limit
            .wrap(Logger::default())
            .wrap(cors)
            .wrap(Governor::new(&governor_conf))
            .configure(routes::health::configure)
            .configure(routes::docs::configure)
            .configure(routes::gateway::configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
