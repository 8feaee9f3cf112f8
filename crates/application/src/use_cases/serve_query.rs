use crate::degrade_cache::{DegradeCache, DegradeEntry, DegradeKey};
use crate::ports::{FallbackResolver, FallbackResponse};
use crate::use_cases::ResolveQueryUseCase;
use cobalt_dns_domain::{DnsQuery, DomainError};
use hickory_proto::rr::Record;
use std::sync::Arc;
use tracing::{debug, warn};

/// How a query was answered.
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    /// Freshly resolved from the record store.
    Fresh {
        answers: Vec<Record>,
        extras: Vec<Record>,
    },
    /// Replayed from the degrade cache because the store failed.
    Degraded(Arc<DegradeEntry>),
    /// Neither fresh nor cached data; the fallback chain answered.
    Delegated(FallbackResponse),
}

/// The response dispatcher: runs the resolution engine and decides
/// between a fresh answer, the last-known-good cached answer, or
/// delegation to the external fallback chain.
///
/// The dispatcher itself never surfaces a store failure to the caller;
/// every internal failure degrades to cache-or-delegate.
pub struct ServeQueryUseCase {
    engine: Arc<ResolveQueryUseCase>,
    cache: Arc<DegradeCache>,
    fallback: Arc<dyn FallbackResolver>,
}

impl ServeQueryUseCase {
    pub fn new(
        engine: Arc<ResolveQueryUseCase>,
        cache: Arc<DegradeCache>,
        fallback: Arc<dyn FallbackResolver>,
    ) -> Self {
        Self {
            engine,
            cache,
            fallback,
        }
    }

    pub async fn execute(&self, query: &DnsQuery) -> Result<QueryOutcome, DomainError> {
        debug!(name = %query.name, record_type = %query.record_type, "Resolving query");
        let key = DegradeKey::from(query);

        match self.engine.resolve(query).await {
            Ok(set) if !set.answers.is_empty() => {
                let entry = DegradeEntry {
                    answers: set.answers.clone(),
                    extras: set.extras.clone(),
                };
                self.cache.store_if_changed(key, entry);

                Ok(QueryOutcome::Fresh {
                    answers: set.answers,
                    extras: set.extras,
                })
            }
            Ok(_) => {
                debug!(name = %query.name, "No local data, delegating to fallback chain");
                self.delegate(query).await
            }
            Err(e) => {
                warn!(name = %query.name, error = %e, "Store failure, entering degraded path");
                match self.cache.get(&key) {
                    Some(entry) => {
                        debug!(name = %query.name, "Serving degraded answer from cache");
                        Ok(QueryOutcome::Degraded(entry))
                    }
                    None => self.delegate(query).await,
                }
            }
        }
    }

    async fn delegate(&self, query: &DnsQuery) -> Result<QueryOutcome, DomainError> {
        let response = self.fallback.delegate(query).await?;
        Ok(QueryOutcome::Delegated(response))
    }
}
