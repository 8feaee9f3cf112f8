/// One row returned by the record store for a zone/host/type query.
///
/// `record_type` stays textual here: rows carry whatever type string the
/// store holds, and the canonical resource-record text is rebuilt from it
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub fqdn: String,
    pub ttl: u32,
    pub record_type: String,
    pub data: String,
}

impl StoredRecord {
    pub fn new(
        fqdn: impl Into<String>,
        ttl: u32,
        record_type: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            fqdn: fqdn.into(),
            ttl,
            record_type: record_type.into(),
            data: data.into(),
        }
    }

    /// Canonical single-line zone-file form: `<name> <ttl> IN <type> <data>`.
    ///
    /// This exact shape is the contract with the answer builder.
    pub fn rr_text(&self) -> String {
        self.rr_text_owned_by(&self.fqdn)
    }

    /// Same as [`rr_text`](Self::rr_text) but with the owner name replaced,
    /// used when a wildcard or CNAME answer is re-owned to the queried name.
    pub fn rr_text_owned_by(&self, owner: &str) -> String {
        format!(
            "{} {} IN {} {}",
            owner, self.ttl, self.record_type, self.data
        )
    }
}
