use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds between reloads of the in-memory zone snapshot.
    #[serde(default = "default_zone_refresh_interval")]
    pub zone_refresh_interval_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
            zone_refresh_interval_secs: default_zone_refresh_interval(),
        }
    }
}

fn default_db_path() -> String {
    "./cobalt-dns.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_zone_refresh_interval() -> u64 {
    60
}
