//! HTTP surface: one router module per resource type, mounted under
//! `/api/v1`, plus the banner and health endpoints.

pub mod domains;
pub mod emails;
pub mod repositories;
pub mod servers;
pub mod storage;

use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::models::{Domain, EmailAccount, Repository, Server, StorageBucket};
use crate::service::ResourceService;
use crate::store::{MemoryStore, Store};

/// Shared handler state: one service per resource type, each owning its
/// own store handle (its own table in the DynamoDB backend).
#[derive(Clone)]
pub struct AppState {
    pub servers: ResourceService<Server>,
    pub domains: ResourceService<Domain>,
    pub emails: ResourceService<EmailAccount>,
    pub repositories: ResourceService<Repository>,
    pub storage: ResourceService<StorageBucket>,
}

impl AppState {
    pub fn new(
        servers: Store,
        domains: Store,
        emails: Store,
        repositories: Store,
        storage: Store,
    ) -> Self {
        Self {
            servers: ResourceService::new(servers),
            domains: ResourceService::new(domains),
            emails: ResourceService::new(emails),
            repositories: ResourceService::new(repositories),
            storage: ResourceService::new(storage),
        }
    }

    /// State with every resource backed by its own fresh in-memory store.
    pub fn in_memory() -> Self {
        let store = || Store::Memory(MemoryStore::new());
        Self::new(store(), store(), store(), store(), store())
    }
}

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/servers/", servers::router())
        .nest("/domains/", domains::router())
        .nest("/emails/", emails::router())
        .nest("/repositories/", repositories::router())
        .nest("/storage/", storage::router());

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api/v1", api)
        .with_state(state)
}

#[derive(Serialize)]
struct Banner {
    message: &'static str,
    version: &'static str,
    status: &'static str,
}

async fn root() -> Json<Banner> {
    Json(Banner {
        message: "Fleetdesk infrastructure records API",
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health { status: "healthy" })
}
