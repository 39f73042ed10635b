//! Document statistics.

use super::scanner::heading_matches;
use super::{DocumentScanner, KEY_LEARNINGS, Lines};
use crate::models::Category;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Number of lesson sections attributed to one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// The category.
    pub category: Category,
    /// Sections whose heading matches the category keywords.
    pub sections: usize,
}

/// Summary of the lessons recorded in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    /// `### ... Key Learnings` sections.
    pub total_sections: usize,
    /// `#### n. **Title**` points anywhere in the document.
    pub total_points: usize,
    /// Per-category section counts in category order.
    ///
    /// A heading can match several categories. `General` counts the
    /// sections that match none.
    pub categories: Vec<CategoryCount>,
    /// When the statistics were collected.
    pub generated_at: DateTime<Utc>,
}

impl DocumentStats {
    /// Collects statistics from document text.
    #[must_use]
    pub fn collect(document: &str) -> Self {
        let lines = Lines::parse(document);
        let scanner = DocumentScanner::new(lines.as_slice());

        let headings: Vec<&str> = scanner
            .section_headings()
            .map(|(_, text)| text)
            .filter(|text| text.contains(KEY_LEARNINGS))
            .collect();

        let total_points = lines
            .as_slice()
            .iter()
            .filter(|line| DocumentScanner::point_heading(line).is_some())
            .count();

        let categories = Category::all()
            .iter()
            .map(|category| {
                let sections = if *category == Category::General {
                    headings
                        .iter()
                        .filter(|text| {
                            Category::all()
                                .iter()
                                .all(|other| !heading_matches(text, other.heading_keywords()))
                        })
                        .count()
                } else {
                    headings
                        .iter()
                        .filter(|text| heading_matches(text, category.heading_keywords()))
                        .count()
                };
                CategoryCount {
                    category: *category,
                    sections,
                }
            })
            .collect();

        Self {
            total_sections: headings.len(),
            total_points,
            categories,
            generated_at: Utc::now(),
        }
    }

    /// Section count for one category.
    #[must_use]
    pub fn sections_in(&self, category: Category) -> usize {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map_or(0, |c| c.sections)
    }
}
