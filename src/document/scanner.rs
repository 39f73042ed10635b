//! Heading, point and takeaway detection over a line slice.
//!
//! All structural matching rules of the document format live here so that
//! the splice logic in [`merge`](super::merge) only deals in line indices.

// Static regex patterns are compile-time verified and will never fail to compile.
#![allow(clippy::expect_used)]

use super::{SECTION_DEPTH, TAKEAWAY_MARKER};
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// `#### <n>. **<Title>**`
static POINT_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^####\s+(?P<n>\d+)\.\s+\*\*(?P<title>.*?)\*\*").expect("static regex: point heading")
});

/// Read-only view over the lines of a document.
#[derive(Debug, Clone, Copy)]
pub struct DocumentScanner<'a> {
    lines: &'a [&'a str],
}

impl<'a> DocumentScanner<'a> {
    /// Creates a scanner over `lines`.
    #[must_use]
    pub const fn new(lines: &'a [&'a str]) -> Self {
        Self { lines }
    }

    /// Number of lines scanned.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true when there are no lines.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the heading depth of `line`, or `None` if it is not a heading.
    ///
    /// A heading is one to six `#` followed by whitespace or end of line.
    #[must_use]
    pub fn heading_depth(line: &str) -> Option<usize> {
        let trimmed = line.trim_end();
        let depth = trimmed.bytes().take_while(|b| *b == b'#').count();
        if depth == 0 || depth > 6 {
            return None;
        }
        match trimmed[depth..].chars().next() {
            None => Some(depth),
            Some(c) if c.is_whitespace() => Some(depth),
            Some(_) => None,
        }
    }

    /// Index of the first heading at or after `from` whose depth is at most
    /// `max_depth`.
    #[must_use]
    pub fn next_heading(&self, from: usize, max_depth: usize) -> Option<usize> {
        self.lines
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, line)| Self::heading_depth(line).is_some_and(|d| d <= max_depth))
            .map(|(i, _)| i)
    }

    /// Line range of the section whose heading sits at `heading`.
    ///
    /// The section ends before the next heading of equal or shallower depth,
    /// or at end of document.
    #[must_use]
    pub fn section_bounds(&self, heading: usize) -> Range<usize> {
        let depth = self
            .lines
            .get(heading)
            .and_then(|line| Self::heading_depth(line))
            .unwrap_or(SECTION_DEPTH);
        let end = self
            .next_heading(heading + 1, depth)
            .unwrap_or(self.lines.len());
        heading..end
    }

    /// Iterates section headings with their heading text.
    pub fn section_headings(&self) -> impl Iterator<Item = (usize, &'a str)> + '_ {
        self.lines.iter().enumerate().filter_map(|(i, line)| {
            (Self::heading_depth(line) == Some(SECTION_DEPTH))
                .then(|| (i, line.trim_end()[SECTION_DEPTH..].trim()))
        })
    }

    /// Locates the first section whose heading contains `name`,
    /// case-insensitively.
    #[must_use]
    pub fn find_section(&self, name: &str) -> Option<Range<usize>> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.section_headings()
            .find(|(_, text)| text.to_lowercase().contains(&needle))
            .map(|(i, _)| self.section_bounds(i))
    }

    /// Locates the last section heading matching any of `keywords`.
    ///
    /// A keyword matches anywhere in the lowercased heading text, so `ui`
    /// also matches `Build`.
    #[must_use]
    pub fn last_section_matching(&self, keywords: &[&str]) -> Option<usize> {
        if keywords.is_empty() {
            return None;
        }
        self.section_headings()
            .filter(|(_, text)| heading_matches(text, keywords))
            .map(|(i, _)| i)
            .last()
    }

    /// Parses a point heading into its number and title.
    #[must_use]
    pub fn point_heading(line: &str) -> Option<(usize, &str)> {
        let caps = POINT_HEADING.captures(line)?;
        let number = caps.name("n")?.as_str().parse().ok()?;
        let title = caps.name("title")?.as_str();
        Some((number, title))
    }

    /// Highest point number inside `range`, or 0 when there is none.
    #[must_use]
    pub fn max_point_number(&self, range: Range<usize>) -> usize {
        self.slice(range)
            .iter()
            .filter_map(|line| Self::point_heading(line).map(|(n, _)| n))
            .max()
            .unwrap_or(0)
    }

    /// Number the next appended point in `range` should carry.
    #[must_use]
    pub fn next_point_number(&self, range: Range<usize>) -> usize {
        self.max_point_number(range) + 1
    }

    /// Index of the takeaway line inside `range`.
    #[must_use]
    pub fn takeaway_line(&self, range: Range<usize>) -> Option<usize> {
        let start = range.start;
        self.slice(range)
            .iter()
            .position(|line| is_takeaway(line))
            .map(|offset| start + offset)
    }

    /// Index of the first line containing any of `needles`.
    #[must_use]
    pub fn first_line_containing(&self, needles: &[&str]) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| needles.iter().any(|n| line.contains(n)))
    }

    /// Index of the first line starting with `prefix`.
    #[must_use]
    pub fn first_line_starting_with(&self, prefix: &str) -> Option<usize> {
        self.lines.iter().position(|line| line.starts_with(prefix))
    }

    /// Line at `index`.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&'a str> {
        self.lines.get(index).copied()
    }

    fn slice(&self, range: Range<usize>) -> &'a [&'a str] {
        let end = range.end.min(self.lines.len());
        let start = range.start.min(end);
        &self.lines[start..end]
    }
}

/// Returns true if `line` is a takeaway line.
#[must_use]
pub fn is_takeaway(line: &str) -> bool {
    line.trim_start().starts_with(takeaway_stem())
}

/// The marker without its trailing colon, e.g. `**Key Takeaway**`.
pub(super) fn takeaway_stem() -> &'static str {
    TAKEAWAY_MARKER.trim_end_matches(':')
}

/// Returns true when the lowercased `text` contains one of `keywords`.
pub(super) fn heading_matches(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords
        .iter()
        .filter(|k| !k.is_empty())
        .any(|k| lower.contains(k))
}
