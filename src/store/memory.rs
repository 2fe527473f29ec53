//! In-memory record store backend.
//!
//! Backs tests and local development with the same contract as the
//! DynamoDB adapter, including upsert semantics for `update` (DynamoDB's
//! `update_item` creates the item when the key is absent; existence checks
//! belong to the service layer).

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;

use super::{Document, FieldFilter, StoreError, StoreOp};
use crate::patch::FieldPatch;

/// Process-local record store. Cloning shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Arc<RwLock<BTreeMap<String, Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Result<Option<Document>, StoreError> {
        let items = self.read(StoreOp::Get, Some(id))?;
        Ok(items.get(id).cloned())
    }

    pub fn put(&self, doc: &Document) -> Result<(), StoreError> {
        let id = doc
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| StoreError::new(StoreOp::Put, None, "document has no string id"))?
            .to_string();
        let mut items = self.write(StoreOp::Put, Some(&id))?;
        items.insert(id, doc.clone());
        Ok(())
    }

    pub fn update(&self, id: &str, patch: &FieldPatch) -> Result<Document, StoreError> {
        let mut items = self.write(StoreOp::Update, Some(id))?;
        let doc = items.entry(id.to_string()).or_insert_with(|| {
            let mut doc = Document::new();
            doc.insert("id".into(), Value::String(id.to_string()));
            doc
        });
        patch.apply(doc);
        Ok(doc.clone())
    }

    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut items = self.write(StoreOp::Delete, Some(id))?;
        items.remove(id);
        Ok(())
    }

    pub fn scan(&self, filter: Option<&FieldFilter>) -> Result<Vec<Document>, StoreError> {
        let items = self.read(StoreOp::Scan, None)?;
        let mut docs = Vec::new();
        for doc in items.values() {
            if filter.map_or(true, |f| f.matches(doc)) {
                docs.push(doc.clone());
            }
        }
        Ok(docs)
    }

    fn read(
        &self,
        op: StoreOp,
        key: Option<&str>,
    ) -> Result<std::sync::RwLockReadGuard<'_, BTreeMap<String, Document>>, StoreError> {
        self.items
            .read()
            .map_err(|_| StoreError::new(op, key.map(String::from), "lock poisoned"))
    }

    fn write(
        &self,
        op: StoreOp,
        key: Option<&str>,
    ) -> Result<std::sync::RwLockWriteGuard<'_, BTreeMap<String, Document>>, StoreError> {
        self.items
            .write()
            .map_err(|_| StoreError::new(op, key.map(String::from), "lock poisoned"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_put_get_roundtrip() {
        let store = MemoryStore::new();
        store
            .put(&doc(json!({"id": "srv-1", "name": "web", "cost": 12.49})))
            .unwrap();

        let loaded = store.get("srv-1").unwrap().unwrap();
        assert_eq!(loaded["name"], json!("web"));
        // Fractional values round-trip exactly.
        assert_eq!(loaded["cost"], json!(12.49));
    }

    #[test]
    fn test_get_absent_is_none() {
        let store = MemoryStore::new();
        assert!(store.get("srv-404").unwrap().is_none());
    }

    #[test]
    fn test_put_without_id_fails() {
        let store = MemoryStore::new();
        let err = store.put(&doc(json!({"name": "no-id"}))).unwrap_err();
        assert_eq!(err.op, StoreOp::Put);
    }

    #[test]
    fn test_put_is_idempotent_on_id() {
        let store = MemoryStore::new();
        store.put(&doc(json!({"id": "srv-1", "name": "a"}))).unwrap();
        store.put(&doc(json!({"id": "srv-1", "name": "b"}))).unwrap();

        assert_eq!(store.scan(None).unwrap().len(), 1);
        assert_eq!(store.get("srv-1").unwrap().unwrap()["name"], json!("b"));
    }

    #[test]
    fn test_update_merges_fields() {
        let store = MemoryStore::new();
        store
            .put(&doc(json!({"id": "srv-1", "name": "web", "status": "online"})))
            .unwrap();

        let merged = store
            .update("srv-1", &FieldPatch::single("status", json!("offline")))
            .unwrap();

        assert_eq!(merged["status"], json!("offline"));
        assert_eq!(merged["name"], json!("web"));
    }

    #[test]
    fn test_update_absent_key_upserts() {
        // Mirrors DynamoDB update_item; the service layer is responsible
        // for the NotFound pre-check.
        let store = MemoryStore::new();
        let merged = store
            .update("srv-9", &FieldPatch::single("name", json!("ghost")))
            .unwrap();

        assert_eq!(merged["id"], json!("srv-9"));
        assert_eq!(merged["name"], json!("ghost"));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        store.put(&doc(json!({"id": "srv-1"}))).unwrap();

        store.delete("srv-1").unwrap();
        store.delete("srv-1").unwrap();
        assert!(store.get("srv-1").unwrap().is_none());
    }

    #[test]
    fn test_scan_with_filter() {
        let store = MemoryStore::new();
        store
            .put(&doc(json!({"id": "srv-1", "category": "testing"})))
            .unwrap();
        store
            .put(&doc(json!({"id": "srv-2", "category": "production"})))
            .unwrap();

        let all = store.scan(None).unwrap();
        assert_eq!(all.len(), 2);

        let filter = FieldFilter::new("category", "testing");
        let testing = store.scan(Some(&filter)).unwrap();
        assert_eq!(testing.len(), 1);
        assert_eq!(testing[0]["id"], json!("srv-1"));
    }

    #[test]
    fn test_scan_is_restartable() {
        let store = MemoryStore::new();
        store.put(&doc(json!({"id": "srv-1"}))).unwrap();

        assert_eq!(store.scan(None).unwrap().len(), 1);
        assert_eq!(store.scan(None).unwrap().len(), 1);
    }
}
