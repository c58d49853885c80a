//! Key information extraction.
//!
//! Quoted spans are the preferred signal. When a prompt quotes nothing, plain
//! words of four or more ASCII letters are used instead.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Minimum length of a fallback word token
const MIN_WORD_LENGTH: usize = 4;

// Opening and closing quote need not be the same character, and a span never
// crosses a line terminator.
// NOTE: expect() is acceptable here, the patterns are constant.
static QUOTED_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["']([^\n\r\x{2028}\x{2029}]*?)["']"#).expect("Invalid regex: quoted span")
});

// Maximal runs of ASCII word characters. A run qualifies as a fallback word
// only when every character is an ASCII letter.
static WORD_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9_]+").expect("Invalid regex: word run"));

/// Which rule produced the extracted phrases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStrategy {
    /// Spans between quote characters
    Quoted,
    /// Fallback word tokens
    WordFallback,
    /// Nothing found
    None,
}

/// Result of key information extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInfoResult {
    /// Distinct phrases in first-occurrence order
    pub phrases: Vec<String>,
    pub strategy: ExtractionStrategy,
}

/// Extracts salient phrases from a prompt
#[derive(Debug, Clone, Default)]
pub struct KeyInfoExtractor;

impl KeyInfoExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Inner text of every quoted span, in order of appearance
    fn quoted_spans<'a>(&self, text: &'a str) -> Vec<&'a str> {
        QUOTED_SPAN
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .collect()
    }

    /// Standalone words of `MIN_WORD_LENGTH` or more ASCII letters
    fn fallback_words<'a>(&self, text: &'a str) -> Vec<&'a str> {
        WORD_RUN
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|w| w.len() >= MIN_WORD_LENGTH && w.bytes().all(|b| b.is_ascii_alphabetic()))
            .collect()
    }

    /// Extract phrases and report which rule produced them
    pub fn extract(&self, text: &str) -> KeyInfoResult {
        let quoted = self.quoted_spans(text);
        if !quoted.is_empty() {
            return KeyInfoResult {
                phrases: dedup_preserving_order(quoted),
                strategy: ExtractionStrategy::Quoted,
            };
        }

        let words = self.fallback_words(text);
        if !words.is_empty() {
            return KeyInfoResult {
                phrases: dedup_preserving_order(words),
                strategy: ExtractionStrategy::WordFallback,
            };
        }

        KeyInfoResult {
            phrases: vec![],
            strategy: ExtractionStrategy::None,
        }
    }

    /// Extract phrases only
    pub fn extract_key_info(&self, text: &str) -> Vec<String> {
        self.extract(text).phrases
    }
}

/// Drop repeated strings, keeping the first occurrence of each
fn dedup_preserving_order(items: Vec<&str>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(*item))
        .map(str::to_string)
        .collect()
}
