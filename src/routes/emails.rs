//! Email account management endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use super::AppState;
use crate::error::ApiError;
use crate::models::{EmailAccount, EmailAccountDraft, EmailAccountPatch};
use crate::store::FieldFilter;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(fetch).put(update).delete(remove))
}

/// Filters accepted by `GET /emails/`.
#[derive(Debug, Default, Deserialize)]
struct EmailFilters {
    status: Option<String>,
    provider: Option<String>,
    department: Option<String>,
}

impl EmailFilters {
    fn into_filters(self) -> Vec<FieldFilter> {
        let mut filters = Vec::new();
        if let Some(status) = self.status {
            filters.push(FieldFilter::new("status", status));
        }
        if let Some(provider) = self.provider {
            filters.push(FieldFilter::new("provider", provider));
        }
        if let Some(department) = self.department {
            filters.push(FieldFilter::new("department", department));
        }
        filters
    }
}

async fn list(
    State(state): State<AppState>,
    Query(filters): Query<EmailFilters>,
) -> Result<Json<Vec<EmailAccount>>, ApiError> {
    Ok(Json(state.emails.list(filters.into_filters()).await?))
}

async fn create(
    State(state): State<AppState>,
    Json(draft): Json<EmailAccountDraft>,
) -> Result<(StatusCode, Json<EmailAccount>), ApiError> {
    let account = state.emails.create(draft).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EmailAccount>, ApiError> {
    Ok(Json(state.emails.get(&id).await?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<EmailAccountPatch>,
) -> Result<Json<EmailAccount>, ApiError> {
    Ok(Json(state.emails.update(&id, patch).await?))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.emails.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
