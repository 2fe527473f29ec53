//! Server management endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use super::AppState;
use crate::error::ApiError;
use crate::models::{Server, ServerDraft, ServerPatch};
use crate::store::FieldFilter;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(fetch).put(update).delete(remove))
}

/// Filters accepted by `GET /servers/`.
#[derive(Debug, Default, Deserialize)]
struct ServerFilters {
    status: Option<String>,
    category: Option<String>,
}

impl ServerFilters {
    fn into_filters(self) -> Vec<FieldFilter> {
        let mut filters = Vec::new();
        if let Some(status) = self.status {
            filters.push(FieldFilter::new("status", status));
        }
        if let Some(category) = self.category {
            filters.push(FieldFilter::new("category", category));
        }
        filters
    }
}

async fn list(
    State(state): State<AppState>,
    Query(filters): Query<ServerFilters>,
) -> Result<Json<Vec<Server>>, ApiError> {
    Ok(Json(state.servers.list(filters.into_filters()).await?))
}

async fn create(
    State(state): State<AppState>,
    Json(draft): Json<ServerDraft>,
) -> Result<(StatusCode, Json<Server>), ApiError> {
    let server = state.servers.create(draft).await?;
    Ok((StatusCode::CREATED, Json(server)))
}

async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Server>, ApiError> {
    Ok(Json(state.servers.get(&id).await?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ServerPatch>,
) -> Result<Json<Server>, ApiError> {
    Ok(Json(state.servers.update(&id, patch).await?))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.servers.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
