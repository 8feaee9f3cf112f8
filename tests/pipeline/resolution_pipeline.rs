//! End-to-end tests of the resolution pipeline: real SQLite store, real
//! answer builder, real degrade cache, with only the fallback chain
//! mocked out.

use async_trait::async_trait;
use cobalt_dns_application::ports::{FallbackResolver, FallbackResponse};
use cobalt_dns_application::{
    DegradeCache, QueryOutcome, ResolveQueryUseCase, ServeQueryUseCase,
};
use cobalt_dns_domain::{DnsQuery, DomainError, RecordType};
use cobalt_dns_infrastructure::dns::TextAnswerBuilder;
use cobalt_dns_infrastructure::store::SqliteRecordStore;
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::RData;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const SCHEMA: &str = include_str!("../../migrations/0001_zones_and_records.sql");

struct CountingFallback {
    calls: AtomicUsize,
}

impl CountingFallback {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FallbackResolver for CountingFallback {
    async fn delegate(&self, _query: &DnsQuery) -> Result<FallbackResponse, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(FallbackResponse::empty(ResponseCode::NXDomain))
    }
}

async fn seeded_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::raw_sql(SCHEMA).execute(&pool).await.unwrap();

    sqlx::query("INSERT INTO zones (id, name) VALUES (1, 'example.com')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO records (zone_id, host, type, data, ttl) VALUES
         (1, 'www', 'A', '192.0.2.1', 300),
         (1, 'alias', 'CNAME', 'www.example.com', 600),
         (1, '@', 'NS', 'ns1.example.com', 86400),
         (1, 'ns1', 'A', '192.0.2.53', 3600),
         (1, 'ns1', 'AAAA', '2001:db8::53', 1800),
         (1, '*', 'A', '192.0.2.99', 120)",
    )
    .execute(&pool)
    .await
    .unwrap();

    pool
}

struct Pipeline {
    pool: SqlitePool,
    cache: Arc<DegradeCache>,
    fallback: Arc<CountingFallback>,
    dispatcher: ServeQueryUseCase,
}

async fn pipeline() -> Pipeline {
    let pool = seeded_pool().await;
    let store = Arc::new(SqliteRecordStore::new(pool.clone()).await.unwrap());
    let cache = Arc::new(DegradeCache::new());
    let fallback = Arc::new(CountingFallback::new());
    let engine = Arc::new(ResolveQueryUseCase::new(
        store,
        Arc::new(TextAnswerBuilder::new()),
    ));
    let dispatcher = ServeQueryUseCase::new(engine, cache.clone(), fallback.clone());
    Pipeline {
        pool,
        cache,
        fallback,
        dispatcher,
    }
}

#[tokio::test]
async fn test_exact_a_record_end_to_end() {
    let p = pipeline().await;
    let query = DnsQuery::new("www.example.com", RecordType::A);

    let outcome = p.dispatcher.execute(&query).await.unwrap();
    let QueryOutcome::Fresh { answers, extras } = outcome else {
        panic!("expected fresh outcome");
    };

    assert_eq!(answers.len(), 1);
    assert!(extras.is_empty());
    assert_eq!(answers[0].name().to_utf8(), "www.example.com");
    assert_eq!(answers[0].ttl(), 300);
    match answers[0].data() {
        RData::A(a) => assert_eq!(a.0.to_string(), "192.0.2.1"),
        other => panic!("expected A rdata, got {other:?}"),
    }
}

#[tokio::test]
async fn test_cname_chain_end_to_end() {
    let p = pipeline().await;
    let query = DnsQuery::new("alias.example.com", RecordType::A);

    let outcome = p.dispatcher.execute(&query).await.unwrap();
    let QueryOutcome::Fresh { answers, .. } = outcome else {
        panic!("expected fresh outcome");
    };

    assert_eq!(answers.len(), 2);
    assert_eq!(answers[0].name().to_utf8(), "alias.example.com");
    assert!(matches!(answers[0].data(), RData::CNAME(_)));
    assert_eq!(answers[1].name().to_utf8(), "www.example.com");
    assert!(matches!(answers[1].data(), RData::A(_)));
}

#[tokio::test]
async fn test_ns_glue_end_to_end() {
    let p = pipeline().await;
    let query = DnsQuery::new("example.com", RecordType::NS);

    let outcome = p.dispatcher.execute(&query).await.unwrap();
    let QueryOutcome::Fresh { answers, extras } = outcome else {
        panic!("expected fresh outcome");
    };

    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0].ttl(), 86400);

    assert_eq!(extras.len(), 2);
    assert_eq!(extras[0].ttl(), 3600);
    assert_eq!(extras[1].ttl(), 1800);
    assert_eq!(extras[0].name().to_utf8(), "ns1.example.com");
}

#[tokio::test]
async fn test_wildcard_end_to_end() {
    let p = pipeline().await;
    let query = DnsQuery::new("anything.deep.example.com", RecordType::A);

    let outcome = p.dispatcher.execute(&query).await.unwrap();
    let QueryOutcome::Fresh { answers, .. } = outcome else {
        panic!("expected fresh outcome");
    };

    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0].name().to_utf8(), "anything.deep.example.com");
    assert_eq!(answers[0].ttl(), 120);
}

#[tokio::test]
async fn test_degraded_replay_after_database_goes_away() {
    let p = pipeline().await;
    let query = DnsQuery::new("www.example.com", RecordType::A);

    let fresh = p.dispatcher.execute(&query).await.unwrap();
    let QueryOutcome::Fresh { answers: fresh_answers, .. } = fresh else {
        panic!("expected fresh outcome");
    };

    // Kill the backing store; the zone snapshot stays but record queries fail
    p.pool.close().await;

    let outcome = p.dispatcher.execute(&query).await.unwrap();
    let QueryOutcome::Degraded(entry) = outcome else {
        panic!("expected degraded outcome");
    };
    assert_eq!(entry.answers, fresh_answers);
    assert_eq!(p.fallback.calls(), 0);
}

#[tokio::test]
async fn test_dead_store_without_cache_delegates() {
    let p = pipeline().await;
    p.pool.close().await;

    let query = DnsQuery::new("www.example.com", RecordType::A);
    let outcome = p.dispatcher.execute(&query).await.unwrap();

    assert!(matches!(outcome, QueryOutcome::Delegated(_)));
    assert_eq!(p.fallback.calls(), 1);
}

#[tokio::test]
async fn test_unhosted_name_delegates_without_caching() {
    let p = pipeline().await;
    let query = DnsQuery::new("www.somewhere-else.net", RecordType::A);

    let outcome = p.dispatcher.execute(&query).await.unwrap();

    assert!(matches!(outcome, QueryOutcome::Delegated(_)));
    assert_eq!(p.fallback.calls(), 1);
    assert!(p.cache.is_empty());
}

#[tokio::test]
async fn test_repeat_queries_are_idempotent() {
    let p = pipeline().await;
    let query = DnsQuery::new("www.example.com", RecordType::A);

    let first = p.dispatcher.execute(&query).await.unwrap();
    let second = p.dispatcher.execute(&query).await.unwrap();

    let (QueryOutcome::Fresh { answers: a, .. }, QueryOutcome::Fresh { answers: b, .. }) =
        (first, second)
    else {
        panic!("expected two fresh outcomes");
    };
    assert_eq!(a, b);
    assert_eq!(p.cache.len(), 1);
}
