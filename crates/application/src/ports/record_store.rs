use async_trait::async_trait;
use cobalt_dns_domain::{DomainError, DomainInfo, StoredRecord};

/// Capability the resolution engine depends on for zone and record data.
///
/// `record_type` is a type mnemonic such as `"A"` or `"CNAME"`; an empty
/// string means "any type". Implementations return rows in a stable order
/// so answer sections are deterministic.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Split a queried name into its owning zone and host label.
    ///
    /// Fails with [`DomainError::ZoneNotFound`] when no configured zone is
    /// an ancestor of `name` or the store is unreachable.
    async fn resolve_domain(&self, name: &str) -> Result<DomainInfo, DomainError>;

    /// Fetch all records for a zone/host/type triple.
    ///
    /// Fails with [`DomainError::StoreQueryFailure`] on backing-store
    /// errors; an empty result is not an error.
    async fn query_records(
        &self,
        zone_id: i64,
        host: &str,
        zone_name: &str,
        record_type: &str,
    ) -> Result<Vec<StoredRecord>, DomainError>;
}
