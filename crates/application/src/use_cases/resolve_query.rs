use crate::ports::{AnswerBuilder, RecordStore};
use cobalt_dns_domain::domain_info::WILDCARD_HOST;
use cobalt_dns_domain::{DnsQuery, DomainError, DomainInfo, RecordType, StoredRecord};
use hickory_proto::rr::Record;
use std::sync::Arc;
use tracing::{debug, warn};

/// A fully computed answer: the answer section plus the supplemental
/// (glue) records destined for the additional section.
#[derive(Debug, Clone, Default)]
pub struct AnswerSet {
    pub answers: Vec<Record>,
    pub extras: Vec<Record>,
}

/// The resolution engine: maps a query to an answer set by walking the
/// record store.
///
/// Lookup order: exact type at the exact name, then a single-hop CNAME
/// chase, then the wildcard host under the owning zone. NS answers pull
/// in A/AAAA glue for their targets. Every store failure propagates so
/// the dispatcher can switch to the degrade path; no partial answer
/// leaves this engine after a failed store call.
pub struct ResolveQueryUseCase {
    store: Arc<dyn RecordStore>,
    builder: Arc<dyn AnswerBuilder>,
}

impl ResolveQueryUseCase {
    pub fn new(store: Arc<dyn RecordStore>, builder: Arc<dyn AnswerBuilder>) -> Self {
        Self { store, builder }
    }

    pub async fn resolve(&self, query: &DnsQuery) -> Result<AnswerSet, DomainError> {
        let mut set = AnswerSet::default();
        let qtype = query.record_type.as_str();

        let info = self.store.resolve_domain(&query.name).await?;

        let records = self
            .store
            .query_records(info.zone_id, &info.host, &info.zone_name, qtype)
            .await?;

        if records.is_empty() {
            self.chase_cname(query, &info, &mut set.answers).await?;
        }

        for record in &records {
            self.push_built(&record.rr_text(), &mut set.answers);

            if record.record_type.eq_ignore_ascii_case(RecordType::NS.as_str()) {
                self.resolve_glue(&record.data, &mut set.extras).await;
            }
        }

        if set.answers.is_empty() && wildcard_eligible(&query.name, &info.zone_name) {
            let wildcards = self
                .store
                .query_records(info.zone_id, WILDCARD_HOST, &info.zone_name, qtype)
                .await?;

            for record in &wildcards {
                // Wildcard matches are re-owned to the queried name
                self.push_built(&record.rr_text_owned_by(&query.name), &mut set.answers);
            }
        }

        Ok(set)
    }

    /// Single-hop CNAME chase: emit the alias record owned by the queried
    /// name, then the target's records of the originally requested type
    /// owned by the target itself. Deeper chains are not followed.
    async fn chase_cname(
        &self,
        query: &DnsQuery,
        info: &DomainInfo,
        answers: &mut Vec<Record>,
    ) -> Result<(), DomainError> {
        let cnames = self
            .store
            .query_records(
                info.zone_id,
                &info.host,
                &info.zone_name,
                RecordType::CNAME.as_str(),
            )
            .await?;

        for cname in &cnames {
            self.push_built(&cname.rr_text_owned_by(&query.name), answers);

            let target = normalize_name(&cname.data);
            let target_info = self.store.resolve_domain(target).await?;
            let chased = self
                .store
                .query_records(
                    target_info.zone_id,
                    &target_info.host,
                    &target_info.zone_name,
                    query.record_type.as_str(),
                )
                .await?;

            for record in &chased {
                self.push_built(&record.rr_text(), answers);
            }
        }

        Ok(())
    }

    /// Fetch A and AAAA records for a nameserver and append them as glue.
    ///
    /// Each glue record carries the TTL of the address record itself, not
    /// the NS record's TTL. Failures here only cost us the glue; the main
    /// answer is unaffected.
    async fn resolve_glue(&self, ns_target: &str, extras: &mut Vec<Record>) {
        let ns_name = normalize_name(ns_target);

        let info = match self.store.resolve_domain(ns_name).await {
            Ok(info) => info,
            Err(e) => {
                debug!(nameserver = %ns_name, error = %e, "Glue omitted, nameserver zone unknown");
                return;
            }
        };

        for glue_type in [RecordType::A, RecordType::AAAA] {
            let rows = match self
                .store
                .query_records(info.zone_id, &info.host, &info.zone_name, glue_type.as_str())
                .await
            {
                Ok(rows) => rows,
                Err(e) => {
                    debug!(nameserver = %ns_name, record_type = %glue_type, error = %e, "Glue lookup failed");
                    continue;
                }
            };

            for row in &rows {
                let glue = StoredRecord::new(ns_name, row.ttl, glue_type.as_str(), &row.data);
                self.push_built(&glue.rr_text(), extras);
            }
        }
    }

    fn push_built(&self, rr_text: &str, out: &mut Vec<Record>) {
        match self.builder.build(rr_text) {
            Ok(record) => out.push(record),
            Err(e) => warn!(rr = %rr_text, error = %e, "Dropping malformed record"),
        }
    }
}

/// Wildcard lookup only applies to names more than one label below the
/// zone apex: the unmatched host portion must itself contain a label
/// separator. Apex misses never trigger it.
fn wildcard_eligible(name: &str, zone_name: &str) -> bool {
    if name == zone_name {
        return false;
    }
    match name.strip_suffix(zone_name) {
        Some(host) => host.trim_end_matches('.').contains('.'),
        None => false,
    }
}

fn normalize_name(name: &str) -> &str {
    name.trim_end_matches('.')
}
