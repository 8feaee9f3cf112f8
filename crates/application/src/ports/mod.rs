mod answer_builder;
mod fallback_resolver;
mod record_store;

pub use answer_builder::AnswerBuilder;
pub use fallback_resolver::{FallbackResolver, FallbackResponse};
pub use record_store::RecordStore;

// Re-export for convenience
pub use cobalt_dns_domain::{DnsQuery, DomainInfo, StoredRecord};
