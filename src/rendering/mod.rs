//! Markdown rendering for lesson sections.
//!
//! Produces the heading, context line, numbered point blocks and closing
//! takeaway line that the merge engine splices into the knowledge base.

mod phrases;
mod section;

pub use phrases::{DEFAULT_TAKEAWAY, point_title, prevention_tip, section_takeaway};
pub use section::SectionRenderer;
