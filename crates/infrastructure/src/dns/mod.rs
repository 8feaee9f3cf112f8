mod answer_builder;
mod forwarder;
mod record_type_map;
pub mod server;

pub use answer_builder::TextAnswerBuilder;
pub use forwarder::UdpFallbackResolver;
pub use record_type_map::RecordTypeMapper;
