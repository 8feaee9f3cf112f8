use cobalt_dns_application::{DegradeCache, ResolveQueryUseCase, ServeQueryUseCase};
use cobalt_dns_domain::Config;
use cobalt_dns_infrastructure::dns::server::DnsServerHandler;
use cobalt_dns_infrastructure::dns::{TextAnswerBuilder, UdpFallbackResolver};
use cobalt_dns_infrastructure::store::SqliteRecordStore;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Wires the adapters into the resolution pipeline.
pub struct Services {
    pub store: Arc<SqliteRecordStore>,
    pub handler: DnsServerHandler,
}

impl Services {
    pub async fn new(config: &Config, pool: SqlitePool) -> anyhow::Result<Self> {
        let store = Arc::new(SqliteRecordStore::new(pool).await?);

        let fallback_server = config.resolver.fallback_server.parse()?;
        let fallback = Arc::new(UdpFallbackResolver::new(
            fallback_server,
            config.resolver.fallback_timeout_ms,
        ));

        let engine = Arc::new(ResolveQueryUseCase::new(
            store.clone(),
            Arc::new(TextAnswerBuilder::new()),
        ));
        let cache = Arc::new(DegradeCache::new());
        let dispatcher = Arc::new(ServeQueryUseCase::new(engine, cache, fallback));

        Ok(Self {
            store,
            handler: DnsServerHandler::new(dispatcher),
        })
    }
}
