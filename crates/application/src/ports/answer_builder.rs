use cobalt_dns_domain::DomainError;
use hickory_proto::rr::Record;

/// Turns the canonical textual form `<name> <ttl> IN <type> <data>` into
/// a validated wire-ready resource record.
///
/// A failed build is a [`DomainError::RecordParse`]; callers drop the
/// record and continue, a malformed row never aborts the query.
pub trait AnswerBuilder: Send + Sync {
    fn build(&self, rr_text: &str) -> Result<Record, DomainError>;
}
