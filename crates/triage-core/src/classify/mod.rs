pub mod engine;
pub mod outcome;

pub use engine::{classify_type, derive_priority};
pub use outcome::{BatchResult, BatchSummary, KindCounts, Outcome, Rejection};
