//! Lesson extraction.
//!
//! Turns raw text into candidate [`LessonRecord`](crate::models::LessonRecord)s.
//! Both extractors are stateless and total: weak textual evidence produces
//! placeholder strings rather than a dropped record.
//!
//! | Source | Span | Emission rule |
//! |--------|------|---------------|
//! | chat transcript | lines between role/status markers | problem signal AND solution signal in the span |
//! | commit | one subject line | subject matches a fix pattern |

mod chat;
mod commit;
pub mod patterns;

pub use chat::{ChatExtractor, split_into_spans};
pub use commit::CommitExtractor;

/// Placeholder context when no context pattern matches.
pub const FALLBACK_CONTEXT: &str = "Development work";

/// Placeholder problem when no sentence carries a problem signal.
pub const FALLBACK_PROBLEM: &str = "Issue encountered";

/// Placeholder solution when no sentence carries a solution signal.
pub const FALLBACK_SOLUTION: &str = "Solution applied";

/// Maximum number of file references kept as evidence.
pub const MAX_EVIDENCE_FILES: usize = 5;
