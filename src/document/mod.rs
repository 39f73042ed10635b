//! Document merge engine.
//!
//! The knowledge base is human-maintained markdown with a loose heading
//! convention, so it is treated as a flat list of lines. The engine reasons
//! only about heading depth and a handful of landmark strings:
//!
//! ```text
//! ### <Feature> <Category Suffix> - Key Learnings     section heading
//! **Context**: <what was being built>
//! #### <n>. **<Title>**                              numbered point
//! - <bullet>
//! **Key Takeaway**: <sentence>                        optional trailer
//! ```
//!
//! Every operation takes the document text by value and returns new text.
//! Lines outside the inserted or replaced span are never touched. File I/O
//! is left to [`storage`](crate::storage).

mod lines;
mod merge;
mod scanner;
mod stats;

pub use lines::Lines;
pub use merge::{
    AppendOutcome, TakeawayEdit, append_points_to_section, insert_new_section, read_section,
    update_takeaway,
};
pub use scanner::{DocumentScanner, is_takeaway};
pub use stats::{CategoryCount, DocumentStats};

/// Heading marker for a section.
pub const SECTION_MARKER: &str = "###";

/// Heading marker for a numbered point.
pub const POINT_MARKER: &str = "####";

/// Depth of a section heading.
pub const SECTION_DEPTH: usize = 3;

/// Prefix of the section context line.
pub const CONTEXT_MARKER: &str = "**Context**:";

/// Prefix of the section takeaway line.
pub const TAKEAWAY_MARKER: &str = "**Key Takeaway**:";

/// Suffix shared by every rendered section heading.
pub const KEY_LEARNINGS: &str = "Key Learnings";

/// Headers after which new sections are placed when no category section
/// exists. New content goes two lines below the first match.
pub const LANDMARK_HEADERS: &[&str] = &["Development Lessons", "Key Lessons"];

/// Header that closes the lessons area. New content goes right above it.
pub const TRAILER_HEADER: &str = "## Notes for Development";
