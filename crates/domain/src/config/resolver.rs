use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Upstream server queried when this resolver has neither a fresh nor
    /// a cached answer, `ip:port`.
    #[serde(default = "default_fallback_server")]
    pub fallback_server: String,

    #[serde(default = "default_fallback_timeout_ms")]
    pub fallback_timeout_ms: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fallback_server: default_fallback_server(),
            fallback_timeout_ms: default_fallback_timeout_ms(),
        }
    }
}

fn default_fallback_server() -> String {
    "1.1.1.1:53".to_string()
}

fn default_fallback_timeout_ms() -> u64 {
    2000
}
