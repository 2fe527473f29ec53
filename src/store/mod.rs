//! Key-value record storage.
//!
//! One store contract with two interchangeable backends: DynamoDB for
//! production and an in-memory map for tests and local development.
//! Records cross this boundary as JSON documents; any store-specific
//! encoding (attribute values, update expressions) belongs to the adapter,
//! never to the callers.
//!
//! Mutations are durable before the call returns. Faults surface as a
//! [`StoreError`] naming the attempted operation and key; no retries happen
//! at this layer.

pub mod dynamo;
pub mod memory;

pub use dynamo::DynamoStore;
pub use memory::MemoryStore;

use serde_json::{Map, Value};

use crate::patch::FieldPatch;

/// A stored record: field name to JSON value, always carrying a string
/// `id` under the `"id"` key.
pub type Document = Map<String, Value>;

/// Equality filter on a single string field, applied during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub field: String,
    pub value: String,
}

impl FieldFilter {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// True if the document's field equals the filter value.
    pub fn matches(&self, doc: &Document) -> bool {
        doc.get(&self.field).and_then(Value::as_str) == Some(self.value.as_str())
    }
}

/// The store operation that faulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Get,
    Put,
    Update,
    Delete,
    Scan,
    /// A stored document failed to decode back into its record type.
    Decode,
}

impl StoreOp {
    fn name(&self) -> &'static str {
        match self {
            StoreOp::Get => "get",
            StoreOp::Put => "put",
            StoreOp::Update => "update",
            StoreOp::Delete => "delete",
            StoreOp::Scan => "scan",
            StoreOp::Decode => "decode",
        }
    }
}

/// A fault from the underlying store, naming the attempted operation and
/// key so callers never see an anonymous failure.
#[derive(Debug)]
pub struct StoreError {
    pub op: StoreOp,
    pub key: Option<String>,
    pub message: String,
}

impl StoreError {
    pub fn new(op: StoreOp, key: Option<String>, message: impl Into<String>) -> Self {
        Self {
            op,
            key,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.key {
            Some(key) => write!(f, "store {} failed for '{}': {}", self.op.name(), key, self.message),
            None => write!(f, "store {} failed: {}", self.op.name(), self.message),
        }
    }
}

impl std::error::Error for StoreError {}

/// Record store with two interchangeable backends.
///
/// An enum rather than a trait object so the async operations stay plain
/// methods; every caller holds a `Store` and stays backend-agnostic.
#[derive(Debug, Clone)]
pub enum Store {
    Dynamo(DynamoStore),
    Memory(MemoryStore),
}

impl Store {
    /// Fetches a record by primary key. Absence is not an error.
    pub async fn get(&self, id: &str) -> Result<Option<Document>, StoreError> {
        match self {
            Store::Dynamo(store) => store.get(id).await,
            Store::Memory(store) => store.get(id),
        }
    }

    /// Upserts a full record, keyed on its `id` field.
    pub async fn put(&self, doc: &Document) -> Result<(), StoreError> {
        match self {
            Store::Dynamo(store) => store.put(doc).await,
            Store::Memory(store) => store.put(doc),
        }
    }

    /// Replaces the named fields on a record and returns the merged
    /// document. `patch` must be non-empty; existence checking is the
    /// caller's job, since both backends upsert on an absent key.
    pub async fn update(&self, id: &str, patch: &FieldPatch) -> Result<Document, StoreError> {
        match self {
            Store::Dynamo(store) => store.update(id, patch).await,
            Store::Memory(store) => store.update(id, patch),
        }
    }

    /// Removes a record. Deleting an absent id is a no-op, not an error.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        match self {
            Store::Dynamo(store) => store.delete(id).await,
            Store::Memory(store) => store.delete(id),
        }
    }

    /// Reads every record, or every record matching the filter. Pages
    /// imposed by the backend are walked transparently; the caller always
    /// gets the full logical result.
    pub async fn scan(&self, filter: Option<&FieldFilter>) -> Result<Vec<Document>, StoreError> {
        match self {
            Store::Dynamo(store) => store.scan(filter).await,
            Store::Memory(store) => store.scan(filter),
        }
    }
}
