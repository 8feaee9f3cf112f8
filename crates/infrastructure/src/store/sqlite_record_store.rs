use async_trait::async_trait;
use cobalt_dns_application::ports::RecordStore;
use cobalt_dns_domain::domain_info::APEX_HOST;
use cobalt_dns_domain::{DomainError, DomainInfo, StoredRecord};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::{error, info, instrument};

type RecordRow = (i64, String, String);

/// SQLite-backed record store.
///
/// Zone lookups run against an in-memory snapshot of the `zones` table so
/// a dead database only shows up when records are fetched; the snapshot
/// is refreshed by [`reload_zones`](Self::reload_zones), driven by the
/// zone refresh job.
pub struct SqliteRecordStore {
    pool: SqlitePool,
    zones: RwLock<HashMap<String, i64>>,
}

impl SqliteRecordStore {
    /// Create the store and load the initial zone snapshot.
    pub async fn new(pool: SqlitePool) -> Result<Self, DomainError> {
        let store = Self {
            pool,
            zones: RwLock::new(HashMap::new()),
        };
        store.reload_zones().await?;
        Ok(store)
    }

    /// Replace the zone snapshot with the current contents of the `zones`
    /// table. On failure the previous snapshot stays in place.
    #[instrument(skip(self))]
    pub async fn reload_zones(&self) -> Result<usize, DomainError> {
        let rows = sqlx::query_as::<_, (i64, String)>("SELECT id, name FROM zones")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to load zones");
                DomainError::DatabaseError(e.to_string())
            })?;

        let snapshot: HashMap<String, i64> = rows
            .into_iter()
            .map(|(id, name)| (normalize(&name).to_string(), id))
            .collect();
        let count = snapshot.len();

        *self.zones.write().unwrap() = snapshot;
        info!(zones = count, "Zone snapshot reloaded");
        Ok(count)
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn resolve_domain(&self, name: &str) -> Result<DomainInfo, DomainError> {
        let name = normalize(name);
        let zones = self.zones.read().unwrap();

        // Walk suffixes from the full name down, so the most specific
        // configured zone wins.
        let mut candidate = name.as_str();
        loop {
            if let Some(&zone_id) = zones.get(candidate) {
                let host = if candidate.len() == name.len() {
                    APEX_HOST.to_string()
                } else {
                    name[..name.len() - candidate.len() - 1].to_string()
                };
                return Ok(DomainInfo::new(zone_id, host, candidate.to_string()));
            }
            match candidate.split_once('.') {
                Some((_, rest)) => candidate = rest,
                None => break,
            }
        }

        Err(DomainError::ZoneNotFound(name))
    }

    #[instrument(skip(self))]
    async fn query_records(
        &self,
        zone_id: i64,
        host: &str,
        zone_name: &str,
        record_type: &str,
    ) -> Result<Vec<StoredRecord>, DomainError> {
        // Empty type means "any type"; rows come back in insertion order
        // so answer sections are stable.
        let query = if record_type.is_empty() {
            sqlx::query_as::<_, RecordRow>(
                "SELECT ttl, type, data FROM records
                 WHERE zone_id = ? AND host = ? ORDER BY id ASC",
            )
            .bind(zone_id)
            .bind(host)
        } else {
            sqlx::query_as::<_, RecordRow>(
                "SELECT ttl, type, data FROM records
                 WHERE zone_id = ? AND host = ? AND type = ? ORDER BY id ASC",
            )
            .bind(zone_id)
            .bind(host)
            .bind(record_type)
        };

        let rows = query.fetch_all(&self.pool).await.map_err(|e| {
            error!(error = %e, zone_id, host, "Record query failed");
            DomainError::StoreQueryFailure(e.to_string())
        })?;

        let fqdn = if host == APEX_HOST {
            zone_name.to_string()
        } else {
            format!("{host}.{zone_name}")
        };

        Ok(rows
            .into_iter()
            .map(|(ttl, rtype, data)| StoredRecord::new(&fqdn, ttl as u32, rtype, data))
            .collect())
    }
}

fn normalize(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}
