use cobalt_dns_application::ports::AnswerBuilder;
use cobalt_dns_domain::DomainError;
use hickory_proto::rr::rdata;
use hickory_proto::rr::{Name, RData, Record};
use std::str::FromStr;

/// Builds wire-ready records from the canonical single-line form
/// `<name> <ttl> IN <type> <data>`.
///
/// The `IN` class literal is required; anything else fails the build.
pub struct TextAnswerBuilder;

impl TextAnswerBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextAnswerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AnswerBuilder for TextAnswerBuilder {
    fn build(&self, rr_text: &str) -> Result<Record, DomainError> {
        let fail = |msg: &str| DomainError::RecordParse(rr_text.to_string(), msg.to_string());

        let mut parts = rr_text.split_whitespace();
        let owner = parts.next().ok_or_else(|| fail("missing owner name"))?;
        let ttl: u32 = parts
            .next()
            .ok_or_else(|| fail("missing ttl"))?
            .parse()
            .map_err(|_| fail("ttl is not an unsigned integer"))?;
        let class = parts.next().ok_or_else(|| fail("missing class"))?;
        if class != "IN" {
            return Err(fail("class must be the IN literal"));
        }
        let rtype = parts.next().ok_or_else(|| fail("missing record type"))?;
        let fields: Vec<&str> = parts.collect();
        if fields.is_empty() {
            return Err(fail("missing rdata"));
        }

        let name = Name::from_str(owner).map_err(|_| fail("invalid owner name"))?;
        let rdata = parse_rdata(rtype, &fields).ok_or_else(|| fail("invalid rdata"))?;

        Ok(Record::from_rdata(name, ttl, rdata))
    }
}

fn parse_rdata(rtype: &str, fields: &[&str]) -> Option<RData> {
    match rtype {
        "A" => {
            let addr = single(fields)?.parse().ok()?;
            Some(RData::A(rdata::A(addr)))
        }
        "AAAA" => {
            let addr = single(fields)?.parse().ok()?;
            Some(RData::AAAA(rdata::AAAA(addr)))
        }
        "CNAME" => Some(RData::CNAME(rdata::CNAME(name(single(fields)?)?))),
        "NS" => Some(RData::NS(rdata::NS(name(single(fields)?)?))),
        "PTR" => Some(RData::PTR(rdata::PTR(name(single(fields)?)?))),
        "TXT" => Some(RData::TXT(rdata::TXT::new(vec![fields.join(" ")]))),
        "MX" => {
            let [preference, exchange] = fields else {
                return None;
            };
            Some(RData::MX(rdata::MX::new(
                preference.parse().ok()?,
                name(exchange)?,
            )))
        }
        "SRV" => {
            let [priority, weight, port, target] = fields else {
                return None;
            };
            Some(RData::SRV(rdata::SRV::new(
                priority.parse().ok()?,
                weight.parse().ok()?,
                port.parse().ok()?,
                name(target)?,
            )))
        }
        "SOA" => {
            let [mname, rname, serial, refresh, retry, expire, minimum] = fields else {
                return None;
            };
            Some(RData::SOA(rdata::SOA::new(
                name(mname)?,
                name(rname)?,
                serial.parse().ok()?,
                refresh.parse().ok()?,
                retry.parse().ok()?,
                expire.parse().ok()?,
                minimum.parse().ok()?,
            )))
        }
        _ => None,
    }
}

fn single<'a>(fields: &[&'a str]) -> Option<&'a str> {
    match fields {
        [only] => Some(only),
        _ => None,
    }
}

fn name(s: &str) -> Option<Name> {
    Name::from_str(s).ok()
}
