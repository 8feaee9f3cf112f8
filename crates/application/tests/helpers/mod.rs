#![allow(dead_code)]

use async_trait::async_trait;
use cobalt_dns_application::ports::{
    AnswerBuilder, FallbackResolver, FallbackResponse, RecordStore,
};
use cobalt_dns_domain::{DnsQuery, DomainError, DomainInfo, StoredRecord};
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::rdata;
use hickory_proto::rr::{Name, RData, Record};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

/// In-memory record store: a zone list plus rows keyed by
/// (zone_id, host, type). `fail_all` simulates a dead backing store.
pub struct MockRecordStore {
    zones: Vec<(i64, String)>,
    records: RwLock<HashMap<(i64, String, String), Vec<StoredRecord>>>,
    fail_all: RwLock<bool>,
    query_count: AtomicUsize,
}

impl MockRecordStore {
    pub fn new(zones: Vec<(i64, &str)>) -> Self {
        Self {
            zones: zones.into_iter().map(|(id, z)| (id, z.to_string())).collect(),
            records: RwLock::new(HashMap::new()),
            fail_all: RwLock::new(false),
            query_count: AtomicUsize::new(0),
        }
    }

    pub fn add_record(&self, zone_id: i64, host: &str, record_type: &str, ttl: u32, data: &str) {
        let zone_name = self
            .zones
            .iter()
            .find(|(id, _)| *id == zone_id)
            .map(|(_, name)| name.clone())
            .expect("unknown zone id in test setup");
        let fqdn = if host == "@" {
            zone_name
        } else {
            format!("{host}.{zone_name}")
        };
        let record = StoredRecord::new(fqdn, ttl, record_type, data);
        self.records
            .write()
            .unwrap()
            .entry((zone_id, host.to_string(), record_type.to_string()))
            .or_default()
            .push(record);
    }

    pub fn set_fail_all(&self, fail: bool) {
        *self.fail_all.write().unwrap() = fail;
    }

    pub fn query_count(&self) -> usize {
        self.query_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn resolve_domain(&self, name: &str) -> Result<DomainInfo, DomainError> {
        if *self.fail_all.read().unwrap() {
            return Err(DomainError::ZoneNotFound(name.to_string()));
        }

        let name = name.trim_end_matches('.');
        let mut best: Option<&(i64, String)> = None;
        for zone in &self.zones {
            let is_suffix = name == zone.1 || name.ends_with(&format!(".{}", zone.1));
            if is_suffix && best.map_or(true, |b| zone.1.len() > b.1.len()) {
                best = Some(zone);
            }
        }

        let (zone_id, zone_name) = best.ok_or_else(|| DomainError::ZoneNotFound(name.to_string()))?;
        let host = if name == zone_name {
            "@".to_string()
        } else {
            name[..name.len() - zone_name.len() - 1].to_string()
        };
        Ok(DomainInfo::new(*zone_id, host, zone_name.clone()))
    }

    async fn query_records(
        &self,
        zone_id: i64,
        host: &str,
        _zone_name: &str,
        record_type: &str,
    ) -> Result<Vec<StoredRecord>, DomainError> {
        self.query_count.fetch_add(1, Ordering::SeqCst);
        if *self.fail_all.read().unwrap() {
            return Err(DomainError::StoreQueryFailure("store is down".to_string()));
        }

        let records = self.records.read().unwrap();
        if record_type.is_empty() {
            let mut rows: Vec<StoredRecord> = records
                .iter()
                .filter(|((zid, h, _), _)| *zid == zone_id && h == host)
                .flat_map(|(_, rows)| rows.clone())
                .collect();
            rows.sort_by(|a, b| a.record_type.cmp(&b.record_type));
            return Ok(rows);
        }

        Ok(records
            .get(&(zone_id, host.to_string(), record_type.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

/// Minimal answer builder for tests: parses the canonical
/// `<name> <ttl> IN <type> <data>` line for the types the tests use.
pub struct MockAnswerBuilder;

impl AnswerBuilder for MockAnswerBuilder {
    fn build(&self, rr_text: &str) -> Result<Record, DomainError> {
        let parse_err =
            |msg: &str| DomainError::RecordParse(rr_text.to_string(), msg.to_string());

        let mut parts = rr_text.split_whitespace();
        let name = parts.next().ok_or_else(|| parse_err("missing name"))?;
        let ttl: u32 = parts
            .next()
            .ok_or_else(|| parse_err("missing ttl"))?
            .parse()
            .map_err(|_| parse_err("bad ttl"))?;
        let class = parts.next().ok_or_else(|| parse_err("missing class"))?;
        if class != "IN" {
            return Err(parse_err("class must be IN"));
        }
        let rtype = parts.next().ok_or_else(|| parse_err("missing type"))?;
        let data = parts.collect::<Vec<_>>().join(" ");
        if data.is_empty() {
            return Err(parse_err("missing data"));
        }

        let owner = Name::from_str(name).map_err(|_| parse_err("bad owner name"))?;
        let rdata = match rtype {
            "A" => RData::A(rdata::A(data.parse().map_err(|_| parse_err("bad A"))?)),
            "AAAA" => RData::AAAA(rdata::AAAA(data.parse().map_err(|_| parse_err("bad AAAA"))?)),
            "CNAME" => RData::CNAME(rdata::CNAME(
                Name::from_str(&data).map_err(|_| parse_err("bad CNAME"))?,
            )),
            "NS" => RData::NS(rdata::NS(
                Name::from_str(&data).map_err(|_| parse_err("bad NS"))?,
            )),
            "TXT" => RData::TXT(rdata::TXT::new(vec![data])),
            _ => return Err(parse_err("type not supported by mock")),
        };

        Ok(Record::from_rdata(owner, ttl, rdata))
    }
}

/// Fallback resolver that counts delegations and returns a canned response.
pub struct MockFallbackResolver {
    calls: AtomicUsize,
    response: FallbackResponse,
}

impl MockFallbackResolver {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            response: FallbackResponse::empty(ResponseCode::NXDomain),
        }
    }

    pub fn with_response(response: FallbackResponse) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            response,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FallbackResolver for MockFallbackResolver {
    async fn delegate(&self, _query: &DnsQuery) -> Result<FallbackResponse, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}
