//! Fleetdesk API server.
//!
//! A records-management API for infrastructure inventory: servers,
//! domains (with nested DNS records), email accounts, code repositories,
//! and storage buckets.
//!
//! # Configuration
//!
//! Environment variables:
//! - `FLEETDESK_PORT`: Port to listen on (default: 8000)
//! - `FLEETDESK_BACKEND`: `dynamo` or `memory` (default: `dynamo`)
//! - `FLEETDESK_TABLE_PREFIX`: DynamoDB table name prefix (default: `Fleetdesk`)
//!
//! AWS region and credentials are taken from the standard AWS environment
//! (`AWS_DEFAULT_REGION`, `AWS_ACCESS_KEY_ID`, ...).

use std::net::SocketAddr;

use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fleetdesk::config::{Backend, Config};
use fleetdesk::routes::{self, AppState};
use fleetdesk::store::{DynamoStore, Store};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fleetdesk=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let state = match config.backend {
        Backend::Memory => {
            tracing::warn!("Using in-memory storage; records will not survive a restart");
            AppState::in_memory()
        }
        Backend::Dynamo => {
            let aws = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
            let client = aws_sdk_dynamodb::Client::new(&aws);
            let table = |collection: &str| {
                Store::Dynamo(DynamoStore::new(client.clone(), config.table_name(collection)))
            };
            tracing::info!("Using DynamoDB tables with prefix '{}'", config.table_prefix);
            AppState::new(
                table("Servers"),
                table("Domains"),
                table("Emails"),
                table("Repositories"),
                table("Storage"),
            )
        }
    };

    let app = routes::router(state).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
