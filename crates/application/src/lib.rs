//! Cobalt DNS Application Layer
//!
//! Holds the query-resolution pipeline: the resolution engine with
//! CNAME chasing, NS glue and wildcard fallback, the fail-open degrade
//! cache, and the dispatcher state machine that picks between a fresh
//! answer, a cached one, or delegation to the fallback resolver.
pub mod degrade_cache;
pub mod ports;
pub mod use_cases;

pub use degrade_cache::{DegradeCache, DegradeEntry, DegradeKey};
pub use use_cases::{AnswerSet, QueryOutcome, ResolveQueryUseCase, ServeQueryUseCase};
