use crate::store::SqliteRecordStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Background job that periodically reloads the in-memory zone snapshot.
///
/// The first tick is consumed immediately: the store already loads zones
/// during construction, so the first reload happens one full interval
/// after startup.
pub struct ZoneRefreshJob {
    store: Arc<SqliteRecordStore>,
    interval_secs: u64,
}

impl ZoneRefreshJob {
    pub fn new(store: Arc<SqliteRecordStore>, interval_secs: u64) -> Self {
        Self {
            store,
            interval_secs,
        }
    }

    pub async fn start(self: Arc<Self>) {
        info!(interval_secs = self.interval_secs, "Starting zone refresh job");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            interval.tick().await;

            loop {
                interval.tick().await;
                match self.store.reload_zones().await {
                    Ok(count) => info!(zones = count, "ZoneRefreshJob: snapshot reloaded"),
                    Err(e) => error!(error = %e, "ZoneRefreshJob: reload failed, keeping previous snapshot"),
                }
            }
        });
    }
}
