use async_trait::async_trait;
use cobalt_dns_domain::{DnsQuery, DomainError};
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::Record;

/// What the next resolver in the chain answered. The core passes this
/// through uninterpreted.
#[derive(Debug, Clone)]
pub struct FallbackResponse {
    pub response_code: ResponseCode,
    pub answers: Vec<Record>,
    pub authority: Vec<Record>,
}

impl FallbackResponse {
    pub fn empty(response_code: ResponseCode) -> Self {
        Self {
            response_code,
            answers: vec![],
            authority: vec![],
        }
    }
}

/// The external resolver chain invoked when this resolver has neither a
/// fresh nor a cached answer for a query.
#[async_trait]
pub trait FallbackResolver: Send + Sync {
    async fn delegate(&self, query: &DnsQuery) -> Result<FallbackResponse, DomainError>;
}
