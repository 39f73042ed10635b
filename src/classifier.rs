//! Keyword-scoring classifier.
//!
//! Assigns one [`Category`] to free text. Pure and total: every input maps
//! to some category, `General` when nothing scores.

use crate::models::Category;

/// Keywords counted when scoring `category` against free text.
#[must_use]
pub const fn keywords(category: Category) -> &'static [&'static str] {
    match category {
        Category::UiLayout => &["constraint", "autolayout", "view", "layout", "grid", "scroll"],
        Category::Navigation => &["navigation", "push", "present", "segue", "view controller"],
        Category::ApiIntegration => &["supabase", "coinos", "network", "api", "request", "response"],
        Category::BuildCompilation => &["build", "compile", "xcode", "syntax", "import", "missing"],
        Category::Architecture => &["delegate", "pattern", "service", "manager", "singleton"],
        Category::Performance => &["memory", "background", "sync", "performance", "optimization"],
        Category::General => &[],
    }
}

/// Scores every category against `text`.
///
/// The score is the number of keyword occurrences in the lower-cased text.
/// Results are in category declaration order.
#[must_use]
pub fn scores(text: &str) -> Vec<(Category, usize)> {
    let lower = text.to_lowercase();
    Category::all()
        .iter()
        .map(|category| {
            let score = keywords(*category)
                .iter()
                .map(|kw| lower.matches(kw).count())
                .sum();
            (*category, score)
        })
        .collect()
}

/// Classifies free text.
///
/// Highest score wins; ties go to the category declared first; all-zero
/// returns [`Category::General`].
#[must_use]
pub fn classify(text: &str) -> Category {
    let mut best = (Category::General, 0);
    for (category, score) in scores(text) {
        if score > best.1 {
            best = (category, score);
        }
    }
    best.0
}

/// Classifies a commit from its subject and the files it touched.
///
/// Subject keywords are checked first in a fixed priority order, then
/// file-name conventions, then `General`.
#[must_use]
pub fn classify_commit(message: &str, files_changed: &[String]) -> Category {
    let lower = message.to_lowercase();
    let has_any = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    if has_any(&["constraint", "layout", "autolayout"]) {
        return Category::UiLayout;
    }
    if has_any(&["navigation", "push", "present"]) {
        return Category::Navigation;
    }
    if has_any(&["build", "compile", "xcode"]) {
        return Category::BuildCompilation;
    }
    if has_any(&["api", "supabase", "network"]) {
        return Category::ApiIntegration;
    }

    let any_file = |markers: &[&str]| {
        files_changed
            .iter()
            .any(|f| markers.iter().any(|m| f.contains(m)))
    };
    if any_file(&["View", "UI"]) {
        Category::UiLayout
    } else if any_file(&["Service", "Manager"]) {
        Category::Architecture
    } else if any_file(&["Controller"]) {
        Category::Navigation
    } else {
        Category::General
    }
}
