//! Canned phrasing used by the renderer.

use crate::models::{Category, LessonRecord};

/// Ordered keyword → point title table. First hit wins.
const TITLE_PATTERNS: &[(&str, &str)] = &[
    ("constraint", "AutoLayout Constraint Management"),
    ("navigation", "Navigation Controller Setup"),
    ("build", "Build Configuration Issues"),
    ("height", "Container Height Requirements"),
    ("delegate", "Delegate Pattern Implementation"),
    ("api", "API Integration Challenges"),
    ("sync", "Background Sync Optimization"),
    ("wallet", "Bitcoin Wallet Integration"),
    ("grid", "Grid Layout Precision"),
    ("modular", "Modular Architecture Benefits"),
];

/// Section takeaway themes in tie-break order.
const TAKEAWAY_THEMES: &[(&str, &str)] = &[
    (
        "constraint",
        "AutoLayout constraint management requires careful attention to view hierarchy timing and explicit sizing. Container views need guaranteed dimensions before child content can layout properly.",
    ),
    (
        "modular",
        "Modular architecture planning from the start prevents complex refactoring later. Breaking features into focused components creates maintainable, debuggable code.",
    ),
    (
        "navigation",
        "Navigation controller setup is foundational to app functionality. Proper embedding and configuration prevents silent failures in view presentation.",
    ),
    (
        "build",
        "Build configuration issues often stem from project file references or dependency setup. Systematic verification prevents compilation problems.",
    ),
    (
        "delegate",
        "Delegate patterns create clean component communication and enable reusable, testable code. Consistent delegate design scales well across complex features.",
    ),
];

/// Takeaway used when no theme scores.
pub const DEFAULT_TAKEAWAY: &str = "Methodical debugging approach and proper documentation prevents recurring issues and improves code maintainability.";

/// Picks a bold title for a point.
#[must_use]
pub fn point_title(record: &LessonRecord) -> &'static str {
    let mut text = record.problem_and_solution_lower();
    if let Some(message) = &record.evidence.commit_message {
        text.push(' ');
        text.push_str(&message.to_lowercase());
    }

    TITLE_PATTERNS
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map_or_else(|| category_title(record.category), |(_, title)| *title)
}

const fn category_title(category: Category) -> &'static str {
    match category {
        Category::UiLayout => "Layout Configuration Challenge",
        Category::Navigation => "Navigation Flow Resolution",
        Category::ApiIntegration => "Service Integration Solution",
        Category::BuildCompilation => "Build Process Optimization",
        Category::Architecture => "Architecture Pattern Application",
        Category::Performance => "Performance Tuning Insight",
        Category::General => "Development Challenge Resolution",
    }
}

/// Picks the prevention bullet for a point.
///
/// Specific problem wording overrides the category tip.
#[must_use]
pub fn prevention_tip(record: &LessonRecord) -> &'static str {
    let problem = record.problem.to_lowercase();
    if problem.contains("height") || problem.contains("container") {
        return "Always add explicit height constraints to container views in ScrollView hierarchies";
    }
    if problem.contains("blank") {
        return "Verify view hierarchy setup and constraint relationships before debugging complex layout issues";
    }
    if problem.contains("build") {
        return "Test incremental changes and verify project file integrity after adding new components";
    }

    match record.category {
        Category::UiLayout => "Always verify container height constraints before adding child views",
        Category::Navigation => "Ensure navigation controller is embedded in AppDelegate setup",
        Category::ApiIntegration => {
            "Add proper error handling and retry logic for external API calls"
        },
        Category::BuildCompilation => {
            "Check Xcode project file references and build target settings"
        },
        Category::Architecture => {
            "Follow established delegate patterns and modular component design"
        },
        Category::Performance => "Profile and test background task performance early",
        Category::General => "Document solution for future reference",
    }
}

/// Picks the section takeaway sentence.
///
/// Each theme scores one per record whose problem or solution mentions it.
/// The highest score wins, ties go to the earlier theme.
#[must_use]
pub fn section_takeaway(records: &[LessonRecord]) -> &'static str {
    let texts: Vec<String> = records
        .iter()
        .map(LessonRecord::problem_and_solution_lower)
        .collect();

    let mut best: Option<(&str, usize)> = None;
    for (theme, sentence) in TAKEAWAY_THEMES {
        let score = texts.iter().filter(|t| t.contains(theme)).count();
        if score > best.map_or(0, |(_, s)| s) {
            best = Some((sentence, score));
        }
    }

    best.map_or(DEFAULT_TAKEAWAY, |(sentence, _)| sentence)
}
