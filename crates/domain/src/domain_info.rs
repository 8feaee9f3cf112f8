/// The zone cut for a queried name: which zone owns it and the host
/// label inside that zone.
///
/// Recomputed per lookup, never cached. The apex of a zone uses the
/// conventional `@` host label; wildcard rows use a literal `*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainInfo {
    pub zone_id: i64,
    pub host: String,
    pub zone_name: String,
}

/// Host label used for rows at the zone apex.
pub const APEX_HOST: &str = "@";

/// Host label used for wildcard rows.
pub const WILDCARD_HOST: &str = "*";

impl DomainInfo {
    pub fn new(zone_id: i64, host: impl Into<String>, zone_name: impl Into<String>) -> Self {
        Self {
            zone_id,
            host: host.into(),
            zone_name: zone_name.into(),
        }
    }

    pub fn is_apex(&self) -> bool {
        self.host == APEX_HOST
    }

    /// Fully-qualified name of the host within this zone.
    pub fn fqdn(&self) -> String {
        if self.is_apex() {
            self.zone_name.clone()
        } else {
            format!("{}.{}", self.host, self.zone_name)
        }
    }
}
