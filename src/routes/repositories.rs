//! Code repository management endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use super::AppState;
use crate::error::ApiError;
use crate::models::{Repository, RepositoryDraft, RepositoryPatch};
use crate::store::FieldFilter;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(fetch).put(update).delete(remove))
}

/// Filters accepted by `GET /repositories/`.
#[derive(Debug, Default, Deserialize)]
struct RepositoryFilters {
    provider: Option<String>,
    language: Option<String>,
    visibility: Option<String>,
}

impl RepositoryFilters {
    fn into_filters(self) -> Vec<FieldFilter> {
        let mut filters = Vec::new();
        if let Some(provider) = self.provider {
            filters.push(FieldFilter::new("provider", provider));
        }
        if let Some(language) = self.language {
            filters.push(FieldFilter::new("language", language));
        }
        if let Some(visibility) = self.visibility {
            filters.push(FieldFilter::new("visibility", visibility));
        }
        filters
    }
}

async fn list(
    State(state): State<AppState>,
    Query(filters): Query<RepositoryFilters>,
) -> Result<Json<Vec<Repository>>, ApiError> {
    Ok(Json(state.repositories.list(filters.into_filters()).await?))
}

async fn create(
    State(state): State<AppState>,
    Json(draft): Json<RepositoryDraft>,
) -> Result<(StatusCode, Json<Repository>), ApiError> {
    let repository = state.repositories.create(draft).await?;
    Ok((StatusCode::CREATED, Json(repository)))
}

async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Repository>, ApiError> {
    Ok(Json(state.repositories.get(&id).await?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<RepositoryPatch>,
) -> Result<Json<Repository>, ApiError> {
    Ok(Json(state.repositories.update(&id, patch).await?))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.repositories.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
