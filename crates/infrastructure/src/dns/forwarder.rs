use super::record_type_map::RecordTypeMapper;
use async_trait::async_trait;
use cobalt_dns_application::ports::{FallbackResolver, FallbackResponse};
use cobalt_dns_domain::{DnsQuery, DomainError};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

/// Fallback chain adapter: forwards the original query to a single
/// upstream server over UDP and hands the answer back uninterpreted.
pub struct UdpFallbackResolver {
    server: SocketAddr,
    timeout: Duration,
}

impl UdpFallbackResolver {
    pub fn new(server: SocketAddr, timeout_ms: u64) -> Self {
        Self {
            server,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    fn build_query(query: &DnsQuery) -> Result<Vec<u8>, DomainError> {
        let name = Name::from_str(&query.name).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", query.name, e))
        })?;

        let mut question = Query::new();
        question.set_name(name);
        question.set_query_type(RecordTypeMapper::to_hickory(&query.record_type));
        question.set_query_class(DNSClass::IN);

        let mut message = Message::new(fastrand::u16(..), MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(question);

        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);
        message
            .emit(&mut encoder)
            .map_err(|e| DomainError::IoError(format!("Failed to serialize DNS query: {e}")))?;
        Ok(buf)
    }
}

#[async_trait]
impl FallbackResolver for UdpFallbackResolver {
    async fn delegate(&self, query: &DnsQuery) -> Result<FallbackResponse, DomainError> {
        debug!(name = %query.name, record_type = %query.record_type, server = %self.server, "Delegating to fallback server");

        let request_bytes = Self::build_query(query)?;

        let socket = UdpSocket::bind("0.0.0.0:0")
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to bind socket: {e}")))?;
        socket
            .connect(self.server)
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to connect to server: {e}")))?;
        socket
            .send(&request_bytes)
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to send query: {e}")))?;

        let mut response_buf = vec![0u8; 4096];
        let len = tokio::time::timeout(self.timeout, socket.recv(&mut response_buf))
            .await
            .map_err(|_| DomainError::QueryTimeout)?
            .map_err(|e| DomainError::IoError(format!("Failed to receive response: {e}")))?;

        let message = Message::from_vec(&response_buf[..len])
            .map_err(|e| DomainError::IoError(format!("Failed to parse DNS response: {e}")))?;

        Ok(FallbackResponse {
            response_code: message.response_code(),
            answers: message.answers().to_vec(),
            authority: message.name_servers().to_vec(),
        })
    }
}
