//! Domain management endpoints, including the nested DNS record
//! sub-resource. Every DNS operation returns the full updated parent
//! domain.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use super::AppState;
use crate::dns;
use crate::error::ApiError;
use crate::models::{DnsRecord, DnsRecordDraft, DnsRecordPatch, Domain, DomainDraft, DomainPatch};
use crate::patch::FieldPatch;
use crate::store::FieldFilter;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(fetch).put(update).delete(remove))
        .route("/{id}/dns", axum::routing::post(add_dns_record))
        .route(
            "/{id}/dns/{record_id}",
            axum::routing::put(update_dns_record).delete(remove_dns_record),
        )
}

/// Filters accepted by `GET /domains/`.
#[derive(Debug, Default, Deserialize)]
struct DomainFilters {
    status: Option<String>,
    registrar: Option<String>,
}

impl DomainFilters {
    fn into_filters(self) -> Vec<FieldFilter> {
        let mut filters = Vec::new();
        if let Some(status) = self.status {
            filters.push(FieldFilter::new("status", status));
        }
        if let Some(registrar) = self.registrar {
            filters.push(FieldFilter::new("registrar", registrar));
        }
        filters
    }
}

async fn list(
    State(state): State<AppState>,
    Query(filters): Query<DomainFilters>,
) -> Result<Json<Vec<Domain>>, ApiError> {
    Ok(Json(state.domains.list(filters.into_filters()).await?))
}

async fn create(
    State(state): State<AppState>,
    Json(draft): Json<DomainDraft>,
) -> Result<(StatusCode, Json<Domain>), ApiError> {
    let domain = state.domains.create(draft).await?;
    Ok((StatusCode::CREATED, Json(domain)))
}

async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Domain>, ApiError> {
    Ok(Json(state.domains.get(&id).await?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<DomainPatch>,
) -> Result<Json<Domain>, ApiError> {
    Ok(Json(state.domains.update(&id, patch).await?))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.domains.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn add_dns_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<DnsRecordDraft>,
) -> Result<(StatusCode, Json<Domain>), ApiError> {
    let mut domain = state.domains.get(&id).await?;
    dns::append(&mut domain.dns_records, draft);
    let domain = write_records(&state, &id, domain.dns_records).await?;
    Ok((StatusCode::CREATED, Json(domain)))
}

async fn update_dns_record(
    State(state): State<AppState>,
    Path((id, record_id)): Path<(String, String)>,
    Json(patch): Json<DnsRecordPatch>,
) -> Result<Json<Domain>, ApiError> {
    let mut domain = state.domains.get(&id).await?;
    dns::update(&mut domain.dns_records, &record_id, &patch)?;
    Ok(Json(write_records(&state, &id, domain.dns_records).await?))
}

async fn remove_dns_record(
    State(state): State<AppState>,
    Path((id, record_id)): Path<(String, String)>,
) -> Result<Json<Domain>, ApiError> {
    let mut domain = state.domains.get(&id).await?;
    dns::remove(&mut domain.dns_records, &record_id);
    Ok(Json(write_records(&state, &id, domain.dns_records).await?))
}

/// Writes the whole DNS record list back to the parent as one field
/// replacement.
///
/// Read-modify-write without optimistic concurrency, like the rest of the
/// DNS edits. If the parent is deleted between the caller's read and this
/// write, the store-level upsert resurrects a stub document that then
/// fails decode. Same accepted race family as two edits from one snapshot
/// losing an update.
async fn write_records(
    state: &AppState,
    id: &str,
    records: Vec<DnsRecord>,
) -> Result<Domain, ApiError> {
    let value =
        serde_json::to_value(&records).map_err(|e| ApiError::Validation(e.to_string()))?;
    state
        .domains
        .patch_fields(id, FieldPatch::single("dnsRecords", value))
        .await
}
