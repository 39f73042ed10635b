//! Section renderer.

use super::phrases::{point_title, prevention_tip, section_takeaway};
use crate::document::{CONTEXT_MARKER, SECTION_MARKER, TAKEAWAY_MARKER};
use crate::models::{Category, LessonRecord, Point, PointDraft, single_line};

/// Renders lesson records into the document's section format.
///
/// Output is a pure function of the inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionRenderer;

impl SectionRenderer {
    /// Creates a new renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Renders a complete section.
    ///
    /// Points are numbered from `first_number` so a re-render that continues
    /// an existing section keeps the run contiguous. An empty `records` slice
    /// renders to an empty string, meaning there is nothing to merge.
    #[must_use]
    pub fn render(
        &self,
        records: &[LessonRecord],
        category: Category,
        feature_name: &str,
        first_number: usize,
    ) -> String {
        let Some(first) = records.first() else {
            return String::new();
        };

        let mut out = format!(
            "{SECTION_MARKER} {} {}\n\n",
            single_line(feature_name),
            category.title_suffix()
        );
        out.push_str(&format!("{CONTEXT_MARKER} {}\n\n", single_line(&first.context)));
        for point in self.render_points(records, first_number) {
            out.push_str(&point.to_markdown());
        }
        out.push_str(&format!(
            "{TAKEAWAY_MARKER} {}\n",
            section_takeaway(records)
        ));
        out
    }

    /// Renders the point blocks only, numbered from `first_number`.
    #[must_use]
    pub fn render_points(&self, records: &[LessonRecord], first_number: usize) -> Vec<Point> {
        records
            .iter()
            .zip(first_number..)
            .map(|(record, number)| self.draft(record).numbered(number))
            .collect()
    }

    /// Builds an unnumbered point for one record.
    #[must_use]
    pub fn draft(&self, record: &LessonRecord) -> PointDraft {
        let mut bullets = Vec::new();
        for text in [&record.problem, &record.solution] {
            let text = single_line(text);
            if !text.is_empty() {
                bullets.push(text);
            }
        }

        let evidence = &record.evidence;
        if !evidence.files.is_empty() {
            bullets.push(format!("Files involved: {}", evidence.files.join(", ")));
        }
        if let Some(time) = &evidence.time_spent {
            bullets.push(format!("Time impact: {time}"));
        }
        if let Some(hash) = &evidence.commit_hash {
            bullets.push(format!("Commit: `{hash}`"));
        }
        bullets.push(prevention_tip(record).to_string());

        PointDraft::new(point_title(record), bullets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Evidence;

    fn wizard_record() -> LessonRecord {
        LessonRecord::new(
            "team creation wizard",
            "User: blank page",
            "turns out container needed a height constraint - fixed by adding heightAnchor",
            Category::UiLayout,
        )
    }

    #[test]
    fn test_render_full_section() {
        let rendered = SectionRenderer::new().render(
            &[wizard_record()],
            Category::UiLayout,
            "Team Wizard",
            1,
        );

        let expected = "\
### Team Wizard Layout Fix - Key Learnings

**Context**: team creation wizard

#### 1. **AutoLayout Constraint Management**
- User: blank page
- turns out container needed a height constraint - fixed by adding heightAnchor
- Verify view hierarchy setup and constraint relationships before debugging complex layout issues

**Key Takeaway**: AutoLayout constraint management requires careful attention to view hierarchy timing and explicit sizing. Container views need guaranteed dimensions before child content can layout properly.
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_empty_is_sentinel() {
        assert!(
            SectionRenderer::new()
                .render(&[], Category::General, "Anything", 1)
                .is_empty()
        );
    }

    #[test]
    fn test_render_numbers_from_offset() {
        let records = vec![wizard_record(), wizard_record()];
        let rendered = SectionRenderer::new().render(&records, Category::UiLayout, "Team", 4);
        assert!(rendered.contains("#### 4. **"));
        assert!(rendered.contains("#### 5. **"));
        assert!(!rendered.contains("#### 1. **"));
    }

    #[test]
    fn test_evidence_bullets() {
        let record = LessonRecord::new("ctx", "crash", "solved", Category::General).with_evidence(
            Evidence {
                files: vec!["A.swift".to_string(), "B.swift".to_string()],
                time_spent: Some("30 mins".to_string()),
                commit_hash: Some("deadbeef".to_string()),
                ..Evidence::default()
            },
        );
        let draft = SectionRenderer::new().draft(&record);
        assert_eq!(
            draft.bullets,
            vec![
                "crash".to_string(),
                "solved".to_string(),
                "Files involved: A.swift, B.swift".to_string(),
                "Time impact: 30 mins".to_string(),
                "Commit: `deadbeef`".to_string(),
                "Document solution for future reference".to_string(),
            ]
        );
    }

    #[test]
    fn test_render_collapses_multiline_payloads() {
        let record = LessonRecord::new(
            "team\nwizard",
            "User: the wizard failed\n### Other Notes",
            "turns out\n#### 2 the cache was stale",
            Category::General,
        );
        let rendered =
            SectionRenderer::new().render(&[record], Category::General, "Team\n# Wizard", 1);

        let headings: Vec<&str> = rendered.lines().filter(|l| l.starts_with('#')).collect();
        assert_eq!(headings.len(), 2);
        assert_eq!(headings[0], "### Team # Wizard Implementation - Key Learnings");
        assert!(headings[1].starts_with("#### 1. **"));
        assert!(rendered.contains("**Context**: team wizard\n"));
        assert!(rendered.contains("- User: the wizard failed ### Other Notes\n"));
        assert!(rendered.contains("- turns out #### 2 the cache was stale\n"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = SectionRenderer::new();
        let records = vec![wizard_record()];
        assert_eq!(
            renderer.render(&records, Category::UiLayout, "Team Wizard", 1),
            renderer.render(&records, Category::UiLayout, "Team Wizard", 1)
        );
    }
}
