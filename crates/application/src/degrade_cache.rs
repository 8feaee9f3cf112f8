use cobalt_dns_domain::{DnsQuery, RecordType};
use dashmap::DashMap;
use hickory_proto::rr::Record;
use std::sync::Arc;
use tracing::debug;

/// Identity of a cached answer: one entry per distinct query pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DegradeKey {
    pub fqdn: Arc<str>,
    pub record_type: RecordType,
}

impl From<&DnsQuery> for DegradeKey {
    fn from(query: &DnsQuery) -> Self {
        Self {
            fqdn: query.name.clone(),
            record_type: query.record_type,
        }
    }
}

/// The last successfully computed answer for a key.
///
/// `answers` is the answer section, `extras` the supplemental (glue)
/// records for the additional section.
#[derive(Debug, Clone, PartialEq)]
pub struct DegradeEntry {
    pub answers: Vec<Record>,
    pub extras: Vec<Record>,
}

/// Fail-open cache of last-known-good answers.
///
/// Read on the degraded path, written after every fresh resolution that
/// produced at least one answer. Entries are shared out as
/// `Arc<DegradeEntry>`; the cache owns the stored values and concurrent
/// readers never observe a partially written entry.
pub struct DegradeCache {
    entries: DashMap<DegradeKey, Arc<DegradeEntry>>,
}

impl DegradeCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn get(&self, key: &DegradeKey) -> Option<Arc<DegradeEntry>> {
        self.entries.get(key).map(|entry| Arc::clone(&entry))
    }

    /// Store `entry` under `key` unless an equal entry is already present.
    ///
    /// The comparison is structural over both record sequences, so
    /// steady-state repeated queries do not churn the map. Entries with an
    /// empty answer section are never stored. Returns whether a write
    /// happened.
    pub fn store_if_changed(&self, key: DegradeKey, entry: DegradeEntry) -> bool {
        if entry.answers.is_empty() {
            return false;
        }

        if let Some(current) = self.entries.get(&key) {
            if **current == entry {
                return false;
            }
        }

        debug!(fqdn = %key.fqdn, record_type = %key.record_type, "Degrade cache updated");
        self.entries.insert(key, Arc::new(entry));
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DegradeCache {
    fn default() -> Self {
        Self::new()
    }
}
