mod resolve_query;
mod serve_query;

pub use resolve_query::{AnswerSet, ResolveQueryUseCase};
pub use serve_query::{QueryOutcome, ServeQueryUseCase};
