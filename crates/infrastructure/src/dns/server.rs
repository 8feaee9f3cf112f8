use crate::dns::record_type_map::RecordTypeMapper;
use cobalt_dns_application::{QueryOutcome, ServeQueryUseCase};
use cobalt_dns_domain::DnsQuery;
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::Record;
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Transport-facing request handler: adapts hickory requests onto the
/// dispatcher and writes whichever answer it picked.
#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<ServeQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<ServeQueryUseCase>) -> Self {
        Self { use_case }
    }

    fn normalize_domain(domain: &str) -> String {
        domain.trim_end_matches('.').to_ascii_lowercase()
    }
}

#[async_trait::async_trait]
impl RequestHandler for DnsServerHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let request_info = match request.request_info() {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to parse request info");
                return send_error_response(request, &mut response_handle, ResponseCode::FormErr)
                    .await;
            }
        };

        let query = &request_info.query;
        let domain = Self::normalize_domain(&query.name().to_utf8());

        let record_type = match RecordTypeMapper::from_hickory(query.query_type()) {
            Some(rt) => rt,
            None => {
                warn!(record_type = ?query.query_type(), "Unsupported record type");
                return send_error_response(request, &mut response_handle, ResponseCode::NotImp)
                    .await;
            }
        };

        debug!(domain = %domain, record_type = %record_type, client = %request.src().ip(), "DNS query received");

        let dns_query = DnsQuery::new(domain, record_type);
        let outcome = match self.use_case.execute(&dns_query).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, "Fallback chain failed");
                return send_error_response(request, &mut response_handle, ResponseCode::ServFail)
                    .await;
            }
        };

        let builder = MessageResponseBuilder::from_message_request(request);
        let mut header = *request.header();
        header.set_authoritative(true);

        let response = match &outcome {
            QueryOutcome::Fresh { answers, extras } => {
                debug!(answers = answers.len(), extras = extras.len(), "Sending fresh answer");
                builder.build(header, answers.iter(), &[], &[], extras.iter())
            }
            QueryOutcome::Degraded(entry) => {
                debug!(answers = entry.answers.len(), "Replaying degraded answer");
                builder.build(header, entry.answers.iter(), &[], &[], entry.extras.iter())
            }
            QueryOutcome::Delegated(fallback) => {
                header.set_authoritative(false);
                header.set_response_code(fallback.response_code);
                builder.build(
                    header,
                    fallback.answers.iter(),
                    fallback.authority.iter(),
                    &[],
                    &[] as &[Record],
                )
            }
        };

        match response_handle.send_response(response).await {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to send response");
                ResponseInfo::from(*request.header())
            }
        }
    }
}

async fn send_error_response<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    code: ResponseCode,
) -> ResponseInfo {
    debug!(code = ?code, "Sending error response");
    let builder = MessageResponseBuilder::from_message_request(request);
    let mut header = *request.header();
    header.set_response_code(code);
    let response = builder.build(header, &[], &[], &[], &[]);

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "Failed to send error response");
            ResponseInfo::from(*request.header())
        }
    }
}
