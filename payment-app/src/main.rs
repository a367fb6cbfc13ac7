//! # Payment Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the record-store adapter
//! - Initialize the account authority gateway client
//! - Create the payment service
//! - Start the HTTP server

mod config;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use account_client::{AccountClientConfig, HttpAccountGateway};
use payment_hex::{PaymentService, inbound::HttpServer};
use payment_store::build_store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,payment_app=debug,payment_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting payment server on port {}", config.port);
    tracing::info!("Using database: {}", config.database_url);
    tracing::info!("Account authority at: {}", config.account_service_url);

    // Build record store (handles connection and migration)
    let store = build_store(&config.database_url).await?;

    // Build the account authority gateway client
    let gateway = HttpAccountGateway::new(AccountClientConfig::new(
        config.account_service_url,
        config.account_service_timeout,
    ))?;

    // Create the payment service
    let service = PaymentService::new(store, gateway);

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
