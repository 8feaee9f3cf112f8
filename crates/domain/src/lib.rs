//! Cobalt DNS Domain Layer
pub mod config;
pub mod dns_query;
pub mod domain_info;
pub mod errors;
pub mod record_type;
pub mod stored_record;

pub use config::{CliOverrides, Config};
pub use dns_query::DnsQuery;
pub use domain_info::DomainInfo;
pub use errors::DomainError;
pub use record_type::RecordType;
pub use stored_record::StoredRecord;
