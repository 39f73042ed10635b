//! Lesson categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of lesson categories.
///
/// Declaration order matters: classifier ties are broken in favour of the
/// variant declared first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    /// Constraint, view hierarchy and layout problems.
    #[serde(rename = "UI/Layout")]
    UiLayout,
    /// Controller setup, routing and presentation flow.
    Navigation,
    /// Remote services, networking and data parsing.
    #[serde(rename = "API Integration")]
    ApiIntegration,
    /// Project files, dependencies and compiler failures.
    #[serde(rename = "Build/Compilation")]
    BuildCompilation,
    /// Patterns, component boundaries and service layering.
    Architecture,
    /// Memory, background work and throughput.
    Performance,
    /// Fallback when nothing more specific applies.
    #[default]
    General,
}

impl Category {
    /// Returns all categories in declaration order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::UiLayout,
            Self::Navigation,
            Self::ApiIntegration,
            Self::BuildCompilation,
            Self::Architecture,
            Self::Performance,
            Self::General,
        ]
    }

    /// Returns the display name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UiLayout => "UI/Layout",
            Self::Navigation => "Navigation",
            Self::ApiIntegration => "API Integration",
            Self::BuildCompilation => "Build/Compilation",
            Self::Architecture => "Architecture",
            Self::Performance => "Performance",
            Self::General => "General",
        }
    }

    /// Keywords that identify an existing section heading as belonging to
    /// this category.
    ///
    /// `General` has none, so general lessons always go to a landmark or the
    /// end of the document.
    #[must_use]
    pub const fn heading_keywords(&self) -> &'static [&'static str] {
        match self {
            Self::UiLayout => &["layout", "constraint", "ui", "grid", "view"],
            Self::Navigation => &["navigation", "controller", "flow", "presentation"],
            Self::ApiIntegration => &["api", "service", "network", "supabase", "integration"],
            Self::BuildCompilation => &["build", "compilation", "xcode", "project"],
            Self::Architecture => &["architecture", "pattern", "delegate", "modular", "component"],
            Self::Performance => &["performance", "optimization", "memory", "sync"],
            Self::General => &[],
        }
    }

    /// Suffix appended to the feature name in a rendered section heading.
    #[must_use]
    pub const fn title_suffix(&self) -> &'static str {
        match self {
            Self::UiLayout => "Layout Fix - Key Learnings",
            Self::Navigation => "Navigation Implementation - Key Learnings",
            Self::ApiIntegration => "API Integration - Key Learnings",
            Self::BuildCompilation => "Build Configuration - Key Learnings",
            Self::Architecture => "Architecture Implementation - Key Learnings",
            Self::Performance => "Performance Optimization - Key Learnings",
            Self::General => "Implementation - Key Learnings",
        }
    }

    /// Parses a category from its display name or a short alias.
    ///
    /// Matching is case-insensitive. Returns `None` for unknown input.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ui/layout" | "ui" | "layout" | "ui-layout" => Some(Self::UiLayout),
            "navigation" | "nav" => Some(Self::Navigation),
            "api integration" | "api" | "api-integration" | "integration" => {
                Some(Self::ApiIntegration)
            },
            "build/compilation" | "build" | "compilation" | "build-compilation" => {
                Some(Self::BuildCompilation)
            },
            "architecture" | "arch" => Some(Self::Architecture),
            "performance" | "perf" => Some(Self::Performance),
            "general" => Some(Self::General),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrips_display_names() {
        for category in Category::all() {
            assert_eq!(Category::parse(category.as_str()), Some(*category));
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Category::parse("UI"), Some(Category::UiLayout));
        assert_eq!(Category::parse(" build "), Some(Category::BuildCompilation));
        assert_eq!(Category::parse("api"), Some(Category::ApiIntegration));
        assert_eq!(Category::parse("unknown"), None);
    }

    #[test]
    fn test_general_has_no_heading_keywords() {
        assert!(Category::General.heading_keywords().is_empty());
        assert!(
            Category::all()
                .iter()
                .filter(|c| **c != Category::General)
                .all(|c| !c.heading_keywords().is_empty())
        );
    }

    #[test]
    fn test_serde_uses_display_names() {
        let json = serde_json::to_string(&Category::UiLayout).unwrap_or_default();
        assert_eq!(json, "\"UI/Layout\"");
        let parsed: Category =
            serde_json::from_str("\"Build/Compilation\"").unwrap_or(Category::General);
        assert_eq!(parsed, Category::BuildCompilation);
    }
}
