//! Cobalt DNS Infrastructure Layer
//!
//! Adapters behind the application ports: the SQLite record store, the
//! textual answer builder, the hickory request handler and the UDP
//! fallback forwarder.
pub mod database;
pub mod dns;
pub mod jobs;
pub mod store;
