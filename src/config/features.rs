//! Feature-name inference tables.
//!
//! A rendered section is headed by a feature name. It is inferred from the
//! source text with an ordered keyword table; the first keyword found in the
//! lower-cased text wins.

use serde::Deserialize;

/// Feature name used for chat lessons when no keyword matches.
pub const DEFAULT_CHAT_FEATURE: &str = "Feature Implementation";

/// Feature name used for commit lessons when no keyword matches.
pub const DEFAULT_COMMIT_FEATURE: &str = "Development Fixes";

/// One keyword → feature name mapping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeatureRule {
    /// Lower-case keyword searched for in the source text.
    pub keyword: String,
    /// Feature name used in the section heading.
    pub name: String,
}

impl FeatureRule {
    /// Creates a rule.
    #[must_use]
    pub fn new(keyword: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into().to_lowercase(),
            name: name.into(),
        }
    }
}

/// Ordered feature-name tables for both lesson sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureNames {
    /// Rules applied to chat transcripts.
    pub chat: Vec<FeatureRule>,
    /// Rules applied to commit messages.
    pub commits: Vec<FeatureRule>,
}

impl Default for FeatureNames {
    fn default() -> Self {
        Self {
            chat: rules(&[
                ("team", "Team Management"),
                ("earnings", "Earnings Page"),
                ("competition", "Competitions Page"),
                ("workout", "Workouts Integration"),
                ("wallet", "Bitcoin Wallet"),
                ("navigation", "Navigation System"),
                ("wizard", "Creation Wizard"),
                ("leaderboard", "Leaderboard System"),
            ]),
            commits: rules(&[
                ("team", "Team System"),
                ("build", "Build Configuration"),
                ("ui", "UI Implementation"),
                ("navigation", "Navigation System"),
                ("wallet", "Bitcoin Wallet"),
                ("api", "API Integration"),
                ("constraint", "Layout System"),
            ]),
        }
    }
}

impl FeatureNames {
    /// Infers the feature name for a chat transcript.
    #[must_use]
    pub fn for_chat(&self, text: &str) -> &str {
        first_match(&self.chat, text).unwrap_or(DEFAULT_CHAT_FEATURE)
    }

    /// Infers the feature name for a batch of commit messages.
    #[must_use]
    pub fn for_commits(&self, text: &str) -> &str {
        first_match(&self.commits, text).unwrap_or(DEFAULT_COMMIT_FEATURE)
    }
}

fn rules(pairs: &[(&str, &str)]) -> Vec<FeatureRule> {
    pairs
        .iter()
        .map(|(keyword, name)| FeatureRule::new(*keyword, *name))
        .collect()
}

fn first_match<'a>(rules: &'a [FeatureRule], text: &str) -> Option<&'a str> {
    let lower = text.to_lowercase();
    rules
        .iter()
        .find(|rule| !rule.keyword.is_empty() && lower.contains(&rule.keyword))
        .map(|rule| rule.name.as_str())
}
