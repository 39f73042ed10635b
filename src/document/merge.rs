//! Splice operations over the document text.

use super::scanner::takeaway_stem;
use super::{
    DocumentScanner, LANDMARK_HEADERS, Lines, SECTION_DEPTH, TRAILER_HEADER, is_takeaway,
};
use crate::models::{Category, Point, PointDraft, Section, single_line};
use crate::{Error, Result};

/// Result of a successful [`append_points_to_section`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendOutcome {
    /// The new document text.
    pub document: String,
    /// The points as they were numbered and inserted.
    pub points: Vec<Point>,
}

/// Result of [`update_takeaway`] on an existing section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TakeawayEdit {
    /// The takeaway line was rewritten; carries the new document text.
    Updated(String),
    /// The section has no takeaway line. Nothing was changed.
    Missing,
}

/// Inserts a rendered section into `document`.
///
/// Placement, first rule that applies:
/// 1. after the last `###` section whose heading matches a keyword of
///    `category`, i.e. before the next heading of equal or shallower depth;
/// 2. two lines below the first line mentioning a landmark header;
/// 3. right above the trailer header;
/// 4. at end of document.
///
/// The section is trimmed and surrounded by one blank line on each side.
/// An empty `rendered` string means there is nothing to merge and returns
/// the document unchanged.
#[must_use]
pub fn insert_new_section(document: &str, rendered: &str, category: Category) -> String {
    let section = rendered.trim();
    if section.is_empty() {
        return document.to_string();
    }

    let lines = Lines::parse(document);
    let scanner = DocumentScanner::new(lines.as_slice());
    let at = insertion_line(&scanner, category);
    tracing::debug!(
        category = %category,
        line = at,
        total_lines = scanner.len(),
        "Inserting section"
    );
    lines.splice(at, &["", section, ""])
}

fn insertion_line(scanner: &DocumentScanner<'_>, category: Category) -> usize {
    if let Some(heading) = scanner.last_section_matching(category.heading_keywords()) {
        return scanner.section_bounds(heading).end;
    }
    if let Some(landmark) = scanner.first_line_containing(LANDMARK_HEADERS) {
        return (landmark + 2).min(scanner.len());
    }
    if let Some(trailer) = scanner.first_line_starting_with(TRAILER_HEADER) {
        return trailer;
    }
    scanner.len()
}

/// Appends numbered points to an existing section.
///
/// The section is the first `###` heading containing `section_name`,
/// case-insensitively. Numbering continues from the highest number already
/// in the section. Points go right above the takeaway line, or at the end
/// of the section when it has none.
///
/// # Errors
///
/// Returns [`Error::SectionNotFound`] if no heading matches. The document is
/// not modified in that case.
pub fn append_points_to_section(
    document: &str,
    section_name: &str,
    drafts: &[PointDraft],
) -> Result<AppendOutcome> {
    let lines = Lines::parse(document);
    let scanner = DocumentScanner::new(lines.as_slice());
    let range = scanner
        .find_section(section_name)
        .ok_or_else(|| not_found(section_name))?;

    let first = scanner.next_point_number(range.clone());
    let at = scanner.takeaway_line(range.clone()).unwrap_or(range.end);
    let points: Vec<Point> = drafts
        .iter()
        .cloned()
        .zip(first..)
        .map(|(draft, number)| draft.numbered(number))
        .collect();

    if points.is_empty() {
        return Ok(AppendOutcome {
            document: document.to_string(),
            points,
        });
    }

    // Each block already ends with its blank separator line.
    let blocks: Vec<String> = points
        .iter()
        .map(|point| {
            let markdown = point.to_markdown();
            markdown
                .strip_suffix('\n')
                .map_or_else(|| markdown.clone(), str::to_string)
        })
        .collect();

    tracing::debug!(
        section = section_name,
        first_number = first,
        count = points.len(),
        line = at,
        "Appending points"
    );

    Ok(AppendOutcome {
        document: lines.splice(at, blocks.as_slice()),
        points,
    })
}

/// Replaces the payload of a section's takeaway line.
///
/// The marker and any indentation are preserved; whitespace in
/// `takeaway` is collapsed so the payload stays on one line.
///
/// # Errors
///
/// Returns [`Error::SectionNotFound`] if no heading matches.
pub fn update_takeaway(document: &str, section_name: &str, takeaway: &str) -> Result<TakeawayEdit> {
    let lines = Lines::parse(document);
    let scanner = DocumentScanner::new(lines.as_slice());
    let range = scanner
        .find_section(section_name)
        .ok_or_else(|| not_found(section_name))?;

    let Some(index) = scanner.takeaway_line(range) else {
        return Ok(TakeawayEdit::Missing);
    };
    let Some(line) = scanner.line(index) else {
        return Ok(TakeawayEdit::Missing);
    };

    let rewritten = rewrite_takeaway(line, takeaway);
    Ok(TakeawayEdit::Updated(lines.replace(index, &rewritten)))
}

fn rewrite_takeaway(line: &str, takeaway: &str) -> String {
    let stem = takeaway_stem();
    let start = line.find(stem).unwrap_or(0);
    let mut marker_end = start + stem.len();
    if line[marker_end..].starts_with(':') {
        marker_end += 1;
    }
    let carriage_return = if line.ends_with('\r') { "\r" } else { "" };
    format!(
        "{} {}{carriage_return}",
        &line[..marker_end],
        single_line(takeaway)
    )
}

/// Parses a section into its heading, points and takeaway.
///
/// Bullets are attached to the closest point above them.
///
/// # Errors
///
/// Returns [`Error::SectionNotFound`] if no heading matches.
pub fn read_section(document: &str, section_name: &str) -> Result<Section> {
    let lines = Lines::parse(document);
    let scanner = DocumentScanner::new(lines.as_slice());
    let range = scanner
        .find_section(section_name)
        .ok_or_else(|| not_found(section_name))?;

    let heading = scanner
        .line(range.start)
        .map(|line| line.trim_end()[SECTION_DEPTH..].trim().to_string())
        .unwrap_or_default();

    let mut points: Vec<Point> = Vec::new();
    let mut takeaway = None;
    for line in &lines.as_slice()[range.start + 1..range.end] {
        if let Some((number, title)) = DocumentScanner::point_heading(line) {
            points.push(Point {
                number,
                title: title.to_string(),
                bullets: Vec::new(),
            });
        } else if is_takeaway(line) {
            takeaway = Some(takeaway_payload(line));
        } else if let Some(bullet) = line.trim_start().strip_prefix("- ")
            && let Some(point) = points.last_mut()
        {
            point.bullets.push(bullet.trim_end().to_string());
        }
    }

    Ok(Section {
        heading,
        points,
        takeaway,
    })
}

fn takeaway_payload(line: &str) -> String {
    let stem = takeaway_stem();
    let rest = line
        .find(stem)
        .map_or(line, |start| &line[start + stem.len()..]);
    rest.strip_prefix(':').unwrap_or(rest).trim().to_string()
}

fn not_found(section_name: &str) -> Error {
    Error::SectionNotFound {
        section: section_name.to_string(),
    }
}
