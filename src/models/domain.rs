//! Domain records, with SSL details and the nested DNS record list.

use serde::{Deserialize, Serialize};

use crate::service::Resource;

/// Registration status of a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainStatus {
    Active,
    Expired,
    PendingTransfer,
    GracePeriod,
}

/// Certificate status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SslStatus {
    Valid,
    Expired,
    ExpiringSoon,
    Invalid,
}

/// SSL certificate details attached to a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SslInfo {
    pub issuer: String,
    pub valid_from: String,
    pub valid_to: String,
    pub status: SslStatus,
}

/// DNS record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    A,
    Cname,
    Mx,
    Txt,
    Ns,
    Aaaa,
}

/// A DNS record nested inside a domain. Its id (`dns-` prefixed) is unique
/// among siblings in the same domain, not globally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: DnsRecordType,
    pub name: String,
    pub value: String,
    pub ttl: u32,
}

/// Payload for appending a DNS record; the id is generated server-side.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecordDraft {
    #[serde(rename = "type")]
    pub record_type: DnsRecordType,
    pub name: String,
    pub value: String,
    pub ttl: u32,
}

/// Partial update for one DNS record. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecordPatch {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<DnsRecordType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

impl DnsRecordPatch {
    /// Merges the supplied fields into a record, leaving the rest alone.
    pub fn apply(&self, record: &mut DnsRecord) {
        if let Some(record_type) = self.record_type {
            record.record_type = record_type;
        }
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(value) = &self.value {
            record.value = value.clone();
        }
        if let Some(ttl) = self.ttl {
            record.ttl = ttl;
        }
    }
}

/// A managed domain record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub id: String,
    pub name: String,
    pub registrar: String,
    pub registration_date: String,
    pub expiry_date: String,
    pub auto_renew: bool,
    /// Client or product the domain belongs to.
    pub owner: String,
    pub status: DomainStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl: Option<SslInfo>,
    #[serde(default)]
    pub dns_records: Vec<DnsRecord>,
    /// Annual cost. Fractional values round-trip exactly through storage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

/// Payload for creating a domain.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainDraft {
    pub name: String,
    pub registrar: String,
    pub registration_date: String,
    pub expiry_date: String,
    pub auto_renew: bool,
    pub owner: String,
    pub status: DomainStatus,
    #[serde(default)]
    pub ssl: Option<SslInfo>,
    #[serde(default)]
    pub dns_records: Vec<DnsRecord>,
    #[serde(default)]
    pub cost: Option<f64>,
}

/// Partial update for a domain.
///
/// The DNS record list is deliberately absent: it is managed through the
/// nested `/domains/{id}/dns` operations, one keyed edit at a time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_renew: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DomainStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl: Option<SslInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

impl Resource for Domain {
    const KIND: &'static str = "domain";
    const ID_PREFIX: &'static str = "dom";
    type Draft = DomainDraft;
    type Patch = DomainPatch;

    fn from_draft(id: String, draft: DomainDraft) -> Self {
        Domain {
            id,
            name: draft.name,
            registrar: draft.registrar,
            registration_date: draft.registration_date,
            expiry_date: draft.expiry_date,
            auto_renew: draft.auto_renew,
            owner: draft.owner,
            status: draft.status,
            ssl: draft.ssl,
            dns_records: draft.dns_records,
            cost: draft.cost,
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
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_value(DomainStatus::PendingTransfer).unwrap(),
            json!("pending_transfer")
        );
        assert_eq!(
            serde_json::to_value(SslStatus::ExpiringSoon).unwrap(),
            json!("expiring_soon")
        );
    }

    #[test]
    fn test_record_type_wire_names() {
        assert_eq!(
            serde_json::to_value(DnsRecordType::Cname).unwrap(),
            json!("CNAME")
        );
        assert_eq!(
            serde_json::to_value(DnsRecordType::Aaaa).unwrap(),
            json!("AAAA")
        );
        let parsed: DnsRecordType = serde_json::from_value(json!("MX")).unwrap();
        assert_eq!(parsed, DnsRecordType::Mx);
    }

    #[test]
    fn test_dns_record_uses_type_key() {
        let record: DnsRecord = serde_json::from_value(json!({
            "id": "dns-1",
            "type": "A",
            "name": "@",
            "value": "9.9.9.9",
            "ttl": 300,
        }))
        .unwrap();
        assert_eq!(record.record_type, DnsRecordType::A);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], json!("A"));
    }

    #[test]
    fn test_dns_patch_merges_only_supplied_fields() {
        let mut record = DnsRecord {
            id: "dns-1".into(),
            record_type: DnsRecordType::A,
            name: "@".into(),
            value: "9.9.9.9".into(),
            ttl: 300,
        };

        DnsRecordPatch {
            ttl: Some(600),
            ..Default::default()
        }
        .apply(&mut record);

        assert_eq!(record.ttl, 600);
        assert_eq!(record.name, "@");
        assert_eq!(record.value, "9.9.9.9");
        assert_eq!(record.record_type, DnsRecordType::A);
    }

    #[test]
    fn test_domain_optional_fields_default() {
        let domain: Domain = serde_json::from_value(json!({
            "id": "dom-1",
            "name": "example.com",
            "registrar": "Namecheap",
            "registrationDate": "2020-05-01",
            "expiryDate": "2026-05-01",
            "autoRenew": true,
            "owner": "Acme",
            "status": "active",
        }))
        .unwrap();

        assert!(domain.ssl.is_none());
        assert!(domain.dns_records.is_empty());
        assert!(domain.cost.is_none());
    }
}
