//! Email account records.

use serde::{Deserialize, Serialize};

use crate::service::Resource;

/// Account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailStatus {
    Active,
    Suspended,
    Pending,
}

/// A managed email account. Quotas are in megabytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAccount {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub provider: String,
    pub status: EmailStatus,
    pub department: String,
    pub quota_used: u64,
    pub quota_limit: u64,
    pub created_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
}

/// Payload for creating an email account. The used quota always starts at
/// zero; it is not accepted from the caller.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAccountDraft {
    pub email: String,
    pub display_name: String,
    pub provider: String,
    pub status: EmailStatus,
    pub department: String,
    pub quota_limit: u64,
    pub created_date: String,
    #[serde(default)]
    pub last_login: Option<String>,
}

/// Partial update for an email account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAccountPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EmailStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota_used: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota_limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
}

impl Resource for EmailAccount {
    const KIND: &'static str = "email account";
    const ID_PREFIX: &'static str = "email";
    type Draft = EmailAccountDraft;
    type Patch = EmailAccountPatch;

    fn from_draft(id: String, draft: EmailAccountDraft) -> Self {
        EmailAccount {
            id,
            email: draft.email,
            display_name: draft.display_name,
            provider: draft.provider,
            status: draft.status,
            department: draft.department,
            quota_used: 0,
            quota_limit: draft.quota_limit,
            created_date: draft.created_date,
            last_login: draft.last_login,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }
}
