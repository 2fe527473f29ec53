//! Server records: machines under management.

use serde::{Deserialize, Serialize};

use crate::service::Resource;

/// Operational status of a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Online,
    Offline,
    Maintenance,
    Warning,
}

/// Environment category of a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerCategory {
    Production,
    Staging,
    Development,
    Testing,
}

/// Hardware specification block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSpecs {
    pub cpu: String,
    pub ram: String,
    pub storage: String,
}

/// A managed server record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    pub id: String,
    pub name: String,
    pub ip_address: String,
    pub os: String,
    pub specs: ServerSpecs,
    pub location: String,
    pub provider: String,
    pub status: ServerStatus,
    pub category: ServerCategory,
    pub responsible_team: String,
    pub last_patch_date: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Payload for creating a server; the id is generated server-side.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerDraft {
    pub name: String,
    pub ip_address: String,
    pub os: String,
    pub specs: ServerSpecs,
    pub location: String,
    pub provider: String,
    pub status: ServerStatus,
    pub category: ServerCategory,
    pub responsible_team: String,
    pub last_patch_date: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update for a server. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specs: Option<ServerSpecs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ServerStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ServerCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible_team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_patch_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Resource for Server {
    const KIND: &'static str = "server";
    const ID_PREFIX: &'static str = "srv";
    type Draft = ServerDraft;
    type Patch = ServerPatch;

    fn from_draft(id: String, draft: ServerDraft) -> Self {
        Server {
            id,
            name: draft.name,
            ip_address: draft.ip_address,
            os: draft.os,
            specs: draft.specs,
            location: draft.location,
            provider: draft.provider,
            status: draft.status,
            category: draft.category,
            responsible_team: draft.responsible_team,
            last_patch_date: draft.last_patch_date,
            tags: draft.tags,
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
    fn test_server_wire_names_are_camel_case() {
        let server: Server = serde_json::from_value(json!({
            "id": "srv-1",
            "name": "web-01",
            "ipAddress": "192.168.1.10",
            "os": "Ubuntu 22.04 LTS",
            "specs": {"cpu": "8 vCPU", "ram": "32GB", "storage": "500GB SSD"},
            "location": "US-East-1",
            "provider": "AWS",
            "status": "online",
            "category": "production",
            "responsibleTeam": "DevOps",
            "lastPatchDate": "2023-10-15",
            "tags": ["web", "api"],
        }))
        .unwrap();

        assert_eq!(server.ip_address, "192.168.1.10");
        assert_eq!(server.status, ServerStatus::Online);

        let value = serde_json::to_value(&server).unwrap();
        assert_eq!(value["responsibleTeam"], json!("DevOps"));
        assert_eq!(value["status"], json!("online"));
    }

    #[test]
    fn test_out_of_enum_status_rejected() {
        let result: Result<ServerStatus, _> = serde_json::from_value(json!("exploded"));
        assert!(result.is_err());
    }

    #[test]
    fn test_draft_tags_default_empty() {
        let draft: ServerDraft = serde_json::from_value(json!({
            "name": "web-01",
            "ipAddress": "10.0.0.1",
            "os": "Debian 12",
            "specs": {"cpu": "4", "ram": "8GB", "storage": "100GB"},
            "location": "eu-west-1",
            "provider": "AWS",
            "status": "offline",
            "category": "staging",
            "responsibleTeam": "Platform",
            "lastPatchDate": "2024-01-01",
        }))
        .unwrap();
        assert!(draft.tags.is_empty());
    }

    #[test]
    fn test_patch_serializes_only_supplied_fields() {
        let patch = ServerPatch {
            status: Some(ServerStatus::Maintenance),
            ..Default::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, json!({"status": "maintenance"}));
    }
}
