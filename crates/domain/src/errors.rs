use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("No configured zone is an ancestor of {0}")]
    ZoneNotFound(String),

    #[error("Record store query failed: {0}")]
    StoreQueryFailure(String),

    #[error("Failed to parse resource record '{0}': {1}")]
    RecordParse(String, String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Unsupported record type: {0}")]
    UnsupportedRecordType(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("I/O error: {0}")]
    IoError(String),
}

impl DomainError {
    /// True for the failures that route a query to the degrade path
    /// instead of aborting it.
    pub fn is_store_failure(&self) -> bool {
        matches!(
            self,
            DomainError::ZoneNotFound(_)
                | DomainError::StoreQueryFailure(_)
                | DomainError::DatabaseError(_)
        )
    }
}
