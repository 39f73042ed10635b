//! Data models for lessons and knowledge-base documents.

mod category;
mod lesson;
mod section;

pub use category::Category;
pub use lesson::{CommitInfo, Evidence, LessonRecord};
pub use section::{Point, PointDraft, Section, single_line};
