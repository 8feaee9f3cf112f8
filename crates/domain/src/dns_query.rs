use crate::RecordType;
use std::sync::Arc;

/// A single question: queried name plus requested type.
///
/// Names are stored normalized (lowercase, no trailing dot).
#[derive(Debug, Clone)]
pub struct DnsQuery {
    pub name: Arc<str>,
    pub record_type: RecordType,
}

impl DnsQuery {
    pub fn new(name: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            name: name.into(),
            record_type,
        }
    }
}
