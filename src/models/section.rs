//! Parsed views of document sections and their numbered points.

use serde::{Deserialize, Serialize};

/// One numbered entry inside a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    /// Point number, starting at 1 within its section.
    pub number: usize,
    /// Bold title text.
    pub title: String,
    /// Bullet lines, without the leading `- `.
    pub bullets: Vec<String>,
}

impl Point {
    /// Renders the point block, terminated by a blank line.
    ///
    /// ```text
    /// #### 3. **Title**
    /// - bullet
    ///
    /// ```
    ///
    /// Title and bullets are collapsed to single lines.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = format!("#### {}. **{}**\n", self.number, single_line(&self.title));
        for bullet in &self.bullets {
            out.push_str(&format!("- {}\n", single_line(bullet)));
        }
        out.push('\n');
        out
    }
}

/// Collapses every whitespace run, line breaks included, to one space.
///
/// Rendered payloads must stay on their own line or they could open a
/// heading of their own.
#[must_use]
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A point that has not been numbered yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointDraft {
    /// Bold title text.
    pub title: String,
    /// Bullet lines.
    pub bullets: Vec<String>,
}

impl PointDraft {
    /// Creates a draft.
    #[must_use]
    pub fn new(title: impl Into<String>, bullets: Vec<String>) -> Self {
        Self {
            title: title.into(),
            bullets,
        }
    }

    /// Assigns a number.
    #[must_use]
    pub fn numbered(self, number: usize) -> Point {
        Point {
            number,
            title: self.title,
            bullets: self.bullets,
        }
    }
}

/// A heading-delimited region of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text without the `###` marker.
    pub heading: String,
    /// Points in document order.
    pub points: Vec<Point>,
    /// Trailing summary sentence, without the marker.
    pub takeaway: Option<String>,
}
