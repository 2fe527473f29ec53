//! DNS record editing within a domain.
//!
//! DNS records are a keyed list nested in the parent domain. Each edit
//! mutates the list in memory; the caller then writes the whole list back
//! to the parent as a single field replacement. Addressing is by the
//! record's own id, scoped to the parent's list.

use crate::error::ApiError;
use crate::ids;
use crate::models::{DnsRecord, DnsRecordDraft, DnsRecordPatch};

/// Appends a new record with a generated id, preserving existing order.
///
/// The id is regenerated until unique among current siblings, so append
/// can never introduce a duplicate key.
pub fn append(records: &mut Vec<DnsRecord>, draft: DnsRecordDraft) -> DnsRecord {
    let mut id = ids::generate("dns");
    while records.iter().any(|r| r.id == id) {
        id = ids::generate("dns");
    }

    let record = DnsRecord {
        id,
        record_type: draft.record_type,
        name: draft.name,
        value: draft.value,
        ttl: draft.ttl,
    };
    records.push(record.clone());
    record
}

/// Merges a partial update into the record with the given id.
///
/// First match wins if the list ever carries duplicate ids (only possible
/// through writes outside this editor); siblings and order are untouched.
/// Fails with NotFound when no record has that id.
pub fn update(
    records: &mut [DnsRecord],
    record_id: &str,
    patch: &DnsRecordPatch,
) -> Result<(), ApiError> {
    match records.iter_mut().find(|r| r.id == record_id) {
        Some(record) => {
            patch.apply(record);
            Ok(())
        }
        None => Err(ApiError::not_found("dns record", record_id)),
    }
}

/// Drops every record with the given id, preserving the order of the rest.
/// Removing an absent id is a no-op, not an error.
pub fn remove(records: &mut Vec<DnsRecord>, record_id: &str) {
    records.retain(|r| r.id != record_id);
}
