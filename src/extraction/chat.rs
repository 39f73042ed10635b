//! Lesson extraction from chat transcripts.

use super::patterns::{
    CHAT_CONTEXT_PATTERNS, FILE_PATTERN, PROBLEM_SIGNALS, SENTENCE_SPLIT, SOLUTION_SIGNALS,
    Signal, TIME_PATTERNS, any_match,
};
use super::{FALLBACK_CONTEXT, FALLBACK_PROBLEM, FALLBACK_SOLUTION, MAX_EVIDENCE_FILES};
use crate::classifier;
use crate::models::{Evidence, LessonRecord};

/// Markers that open a new exchange span.
const SPAN_MARKERS: &[&str] = &["user:", "assistant:", "error:", "fixed:"];

/// Extracts lessons from free-form chat transcripts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChatExtractor;

impl ChatExtractor {
    /// Creates a new chat extractor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Extracts one record per span that carries both a problem signal and a
    /// solution signal.
    #[must_use]
    pub fn extract(&self, transcript: &str) -> Vec<LessonRecord> {
        split_into_spans(transcript)
            .iter()
            .filter_map(|span| analyze_span(span))
            .collect()
    }
}

/// Splits a transcript into exchange-sized spans.
///
/// A new span starts at every line containing a role or status marker.
#[must_use]
pub fn split_into_spans(text: &str) -> Vec<String> {
    let mut spans = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        let lower = line.to_lowercase();
        if SPAN_MARKERS.iter().any(|m| lower.contains(m)) {
            if !current.trim().is_empty() {
                spans.push(current.trim().to_string());
            }
            current = line.to_string();
        } else {
            current.push('\n');
            current.push_str(line);
        }
    }

    if !current.trim().is_empty() {
        spans.push(current.trim().to_string());
    }

    spans
}

fn analyze_span(span: &str) -> Option<LessonRecord> {
    if !(any_match(&PROBLEM_SIGNALS, span) && any_match(&SOLUTION_SIGNALS, span)) {
        return None;
    }

    let evidence = Evidence {
        files: extract_files(span),
        time_spent: extract_time_spent(span),
        ..Evidence::default()
    };

    Some(
        LessonRecord::new(
            extract_context(span),
            first_sentence_matching(span, &PROBLEM_SIGNALS)
                .unwrap_or_else(|| FALLBACK_PROBLEM.to_string()),
            first_sentence_matching(span, &SOLUTION_SIGNALS)
                .unwrap_or_else(|| FALLBACK_SOLUTION.to_string()),
            classifier::classify(span),
        )
        .with_evidence(evidence),
    )
}

fn extract_context(text: &str) -> String {
    CHAT_CONTEXT_PATTERNS
        .iter()
        .find_map(|signal| {
            signal
                .pattern
                .captures(text)
                .and_then(|caps| caps.name("ctx"))
                .map(|m| m.as_str().trim().to_string())
                .filter(|ctx| !ctx.is_empty())
        })
        .unwrap_or_else(|| FALLBACK_CONTEXT.to_string())
}

fn first_sentence_matching(text: &str, signals: &[Signal]) -> Option<String> {
    SENTENCE_SPLIT
        .split(text)
        .find(|sentence| any_match(signals, sentence))
        .map(|sentence| sentence.trim().to_string())
}

fn extract_time_spent(text: &str) -> Option<String> {
    TIME_PATTERNS.iter().find_map(|signal| {
        let caps = signal.pattern.captures(text)?;
        Some(format!("{} {}s", caps.name("n")?.as_str(), caps.name("unit")?.as_str()))
    })
}

fn extract_files(text: &str) -> Vec<String> {
    let mut files: Vec<String> = Vec::new();
    for m in FILE_PATTERN.find_iter(text) {
        let file = m.as_str().to_string();
        if !files.contains(&file) {
            files.push(file);
        }
        if files.len() == MAX_EVIDENCE_FILES {
            break;
        }
    }
    files
}
