//! Topic-match recommendation engine.
//!
//! The engine owns the canonical topic set and the arithmetic that turns free
//! text into ranked recommendations:
//!
//! 1. [`TopicRegistry`] deduplicates candidate topics into a canonical global
//!    set using embedding cosine similarity.
//! 2. [`scorer::score`] computes a per-topic relevance vector for any text.
//! 3. [`ranker::rank`] collapses a user vector and a candidate vector into one
//!    scalar per candidate and sorts the candidates.
//!
//! Model access goes through the `providers` capability traits, so all of this
//! is testable with deterministic fakes. Nothing here persists: the registry
//! lives exactly as long as the process.

pub mod error;
pub mod pipeline;
pub mod ranker;
pub mod registry;
pub mod scorer;
pub mod similarity;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::error::EngineError;
pub use crate::pipeline::{initialize_topics, recommend, Recommendations};
pub use crate::ranker::rank;
pub use crate::registry::{RegisterReport, Topic, TopicRegistry, DEDUP_THRESHOLD};
pub use crate::similarity::cosine;
