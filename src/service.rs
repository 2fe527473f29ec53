//! Generic CRUD service over one resource type.
//!
//! A [`ResourceService`] composes the record store with id generation and
//! the partial-update merge. Each instance owns its own store handle (its
//! own table in the DynamoDB backend); there is no shared global state.
//!
//! Updates are read-patch-write without optimistic concurrency: two
//! interleaved updates to the same id resolve last-writer-wins at the
//! granularity of one store call. Accepted limitation, exercised by tests
//! rather than papered over.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::ids;
use crate::patch::FieldPatch;
use crate::store::{Document, FieldFilter, Store, StoreError, StoreOp};

/// A resource type managed through the uniform CRUD contract.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Human-readable kind for error messages, e.g. `"server"`.
    const KIND: &'static str;
    /// Id prefix, e.g. `"srv"`.
    const ID_PREFIX: &'static str;
    /// Create payload; the caller never supplies an id.
    type Draft: DeserializeOwned + Send + 'static;
    /// Partial update payload; absent fields stay untouched.
    type Patch: Serialize + Send + 'static;

    /// Builds the full record from a draft, injecting type defaults.
    fn from_draft(id: String, draft: Self::Draft) -> Self;

    fn id(&self) -> &str;
}

/// CRUD operations for one resource type, backed by a record store.
#[derive(Debug, Clone)]
pub struct ResourceService<R: Resource> {
    store: Store,
    _marker: PhantomData<fn() -> R>,
}

impl<R: Resource> ResourceService<R> {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Creates a record from a draft: generates a prefixed id, injects the
    /// type's defaults, persists, and returns the stored record.
    pub async fn create(&self, draft: R::Draft) -> Result<R, ApiError> {
        let id = ids::generate(R::ID_PREFIX);
        let record = R::from_draft(id, draft);
        let doc = to_document(&record)?;
        self.store.put(&doc).await?;
        tracing::info!("created {} {}", R::KIND, record.id());
        Ok(record)
    }

    pub async fn get(&self, id: &str) -> Result<R, ApiError> {
        match self.store.get(id).await? {
            Some(doc) => from_document(doc),
            None => Err(ApiError::not_found(R::KIND, id)),
        }
    }

    /// Lists records matching every given equality filter (logical AND).
    ///
    /// The first filter is pushed down to the store scan; the rest are
    /// applied here. No filters means every record.
    pub async fn list(&self, mut filters: Vec<FieldFilter>) -> Result<Vec<R>, ApiError> {
        let pushed = if filters.is_empty() {
            None
        } else {
            Some(filters.remove(0))
        };

        let docs = self.store.scan(pushed.as_ref()).await?;
        let mut records = Vec::new();
        for doc in docs {
            if filters.iter().all(|f| f.matches(&doc)) {
                records.push(from_document(doc)?);
            }
        }
        Ok(records)
    }

    /// Merges a partial update into an existing record.
    ///
    /// Fails with NotFound before any write when the id does not exist. An
    /// empty patch returns the existing record unchanged without touching
    /// the store.
    pub async fn update(&self, id: &str, patch: R::Patch) -> Result<R, ApiError> {
        let existing = self.get(id).await?;

        let patch =
            FieldPatch::from_update(&patch).map_err(|e| ApiError::Validation(e.to_string()))?;
        if patch.is_empty() {
            return Ok(existing);
        }

        let doc = self.store.update(id, &patch).await?;
        from_document(doc)
    }

    /// Replaces named fields directly, bypassing the typed patch shape.
    ///
    /// Used for nested sub-collection writes, where the whole list field
    /// is rewritten in one replacement. The caller must have resolved the
    /// record first.
    pub async fn patch_fields(&self, id: &str, patch: FieldPatch) -> Result<R, ApiError> {
        let doc = self.store.update(id, &patch).await?;
        from_document(doc)
    }

    /// Deletes a record.
    ///
    /// The store itself tolerates deleting an absent key, but this layer
    /// pre-checks existence so a second delete of the same id surfaces
    /// NotFound, per the service contract.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let _ = self.get(id).await?;
        self.store.delete(id).await?;
        tracing::info!("deleted {} {}", R::KIND, id);
        Ok(())
    }
}

fn to_document<T: Serialize>(record: &T) -> Result<Document, ApiError> {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ApiError::Validation(
            "record did not serialize to an object".to_string(),
        )),
        Err(e) => Err(ApiError::Validation(e.to_string())),
    }
}

fn from_document<T: DeserializeOwned>(doc: Document) -> Result<T, ApiError> {
    let key = doc.get("id").and_then(Value::as_str).map(str::to_string);
    serde_json::from_value(Value::Object(doc))
        .map_err(|e| ApiError::Store(StoreError::new(StoreOp::Decode, key, e.to_string())))
}
