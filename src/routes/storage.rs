//! Storage bucket management endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use super::AppState;
use crate::error::ApiError;
use crate::models::{StorageBucket, StorageBucketDraft, StorageBucketPatch};
use crate::store::FieldFilter;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(fetch).put(update).delete(remove))
}

/// Filters accepted by `GET /storage/`.
#[derive(Debug, Default, Deserialize)]
struct StorageFilters {
    provider: Option<String>,
    #[serde(rename = "type")]
    storage_type: Option<String>,
    region: Option<String>,
}

impl StorageFilters {
    fn into_filters(self) -> Vec<FieldFilter> {
        let mut filters = Vec::new();
        if let Some(provider) = self.provider {
            filters.push(FieldFilter::new("provider", provider));
        }
        if let Some(storage_type) = self.storage_type {
            filters.push(FieldFilter::new("type", storage_type));
        }
        if let Some(region) = self.region {
            filters.push(FieldFilter::new("region", region));
        }
        filters
    }
}

async fn list(
    State(state): State<AppState>,
    Query(filters): Query<StorageFilters>,
) -> Result<Json<Vec<StorageBucket>>, ApiError> {
    Ok(Json(state.storage.list(filters.into_filters()).await?))
}

async fn create(
    State(state): State<AppState>,
    Json(draft): Json<StorageBucketDraft>,
) -> Result<(StatusCode, Json<StorageBucket>), ApiError> {
    let bucket = state.storage.create(draft).await?;
    Ok((StatusCode::CREATED, Json(bucket)))
}

async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StorageBucket>, ApiError> {
    Ok(Json(state.storage.get(&id).await?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<StorageBucketPatch>,
) -> Result<Json<StorageBucket>, ApiError> {
    Ok(Json(state.storage.update(&id, patch).await?))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.storage.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
