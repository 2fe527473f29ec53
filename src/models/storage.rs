//! Storage bucket and volume records.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::service::Resource;

/// Kind of storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    Object,
    Block,
    File,
}

/// A managed storage bucket or volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageBucket {
    pub id: String,
    pub name: String,
    pub provider: String,
    #[serde(rename = "type")]
    pub storage_type: StorageType,
    pub region: String,
    pub usage_bytes: u64,
    pub capacity_bytes: u64,
    pub created_date: String,
    pub is_public: bool,
}

/// Payload for creating a bucket. Usage starts at zero and the creation
/// date defaults to today; neither is accepted from the caller.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageBucketDraft {
    pub name: String,
    pub provider: String,
    #[serde(rename = "type")]
    pub storage_type: StorageType,
    pub region: String,
    pub capacity_bytes: u64,
    pub is_public: bool,
}

/// Partial update for a bucket.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageBucketPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub storage_type: Option<StorageType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl Resource for StorageBucket {
    const KIND: &'static str = "storage bucket";
    const ID_PREFIX: &'static str = "storage";
    type Draft = StorageBucketDraft;
    type Patch = StorageBucketPatch;

    fn from_draft(id: String, draft: StorageBucketDraft) -> Self {
        StorageBucket {
            id,
            name: draft.name,
            provider: draft.provider,
            storage_type: draft.storage_type,
            region: draft.region,
            usage_bytes: 0,
            capacity_bytes: draft.capacity_bytes,
            created_date: Utc::now().date_naive().to_string(),
            is_public: draft.is_public,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_defaults() {
        let draft: StorageBucketDraft = serde_json::from_value(json!({
            "name": "backups",
            "provider": "AWS",
            "type": "object",
            "region": "us-east-1",
            "capacityBytes": 1_000_000_000u64,
            "isPublic": false,
        }))
        .unwrap();

        let bucket = StorageBucket::from_draft("storage-1".into(), draft);
        assert_eq!(bucket.usage_bytes, 0);
        assert_eq!(
            bucket.created_date,
            Utc::now().date_naive().to_string()
        );
    }

    #[test]
    fn test_type_field_wire_name() {
        let bucket = StorageBucket {
            id: "storage-1".into(),
            name: "media".into(),
            provider: "GCP".into(),
            storage_type: StorageType::Block,
            region: "europe-west1".into(),
            usage_bytes: 10,
            capacity_bytes: 100,
            created_date: "2024-03-01".into(),
            is_public: true,
        };

        let value = serde_json::to_value(&bucket).unwrap();
        assert_eq!(value["type"], json!("block"));
        assert_eq!(value["usageBytes"], json!(10));
    }
}
