//! Code repository records.

use serde::{Deserialize, Serialize};

use crate::service::Resource;

/// Who can see the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoVisibility {
    Public,
    Private,
    Internal,
}

/// State of the repository's CI pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CiStatus {
    Passing,
    Failing,
    Pending,
    None,
}

/// A managed code repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub id: String,
    pub name: String,
    pub url: String,
    pub provider: String,
    pub language: String,
    pub visibility: RepoVisibility,
    pub owner_team: String,
    pub ci_status: CiStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_commit: Option<String>,
    pub branches: u32,
    pub open_issues: u32,
}

/// Payload for creating a repository. Branch and issue counters default to
/// a single branch with no open issues when not supplied.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryDraft {
    pub name: String,
    pub url: String,
    pub provider: String,
    pub language: String,
    pub visibility: RepoVisibility,
    pub owner_team: String,
    pub ci_status: CiStatus,
    #[serde(default)]
    pub last_commit: Option<String>,
    #[serde(default)]
    pub branches: Option<u32>,
    #[serde(default)]
    pub open_issues: Option<u32>,
}

/// Partial update for a repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<RepoVisibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ci_status: Option<CiStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_commit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branches: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_issues: Option<u32>,
}

impl Resource for Repository {
    const KIND: &'static str = "repository";
    const ID_PREFIX: &'static str = "repo";
    type Draft = RepositoryDraft;
    type Patch = RepositoryPatch;

    fn from_draft(id: String, draft: RepositoryDraft) -> Self {
        Repository {
            id,
            name: draft.name,
            url: draft.url,
            provider: draft.provider,
            language: draft.language,
            visibility: draft.visibility,
            owner_team: draft.owner_team,
            ci_status: draft.ci_status,
            last_commit: draft.last_commit,
            branches: draft.branches.unwrap_or(1),
            open_issues: draft.open_issues.unwrap_or(0),
        }
    }

    fn id(&self) -> &str {
        &self.id
    }
}
