//! Typed resource schemas.
//!
//! Each resource type has a full record, a create draft, and a partial
//! update ("patch") shape. Wire names are camelCase; enumerated fields are
//! Rust enums, so out-of-set values are rejected at deserialization,
//! before any store access.

mod domain;
mod email;
mod repository;
mod server;
mod storage;

pub use domain::{
    DnsRecord, DnsRecordDraft, DnsRecordPatch, DnsRecordType, Domain, DomainDraft, DomainPatch,
    DomainStatus, SslInfo, SslStatus,
};
pub use email::{EmailAccount, EmailAccountDraft, EmailAccountPatch, EmailStatus};
pub use repository::{CiStatus, RepoVisibility, Repository, RepositoryDraft, RepositoryPatch};
pub use server::{Server, ServerCategory, ServerDraft, ServerPatch, ServerSpecs, ServerStatus};
pub use storage::{StorageBucket, StorageBucketDraft, StorageBucketPatch, StorageType};
