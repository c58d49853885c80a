//! Intent Classification using ordered keyword rules.
//!
//! Each rule is a group of lowercase keywords tested by substring containment.
//! Rules are evaluated in table order and the first group with a hit decides
//! the label, so priority lives in `INTENT_RULES` rather than in control flow.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Detected intent type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// Build something new (create, generate, make)
    Creation,
    /// Describe or clarify something (explain, describe, "what is")
    Explanation,
    /// Fix broken behavior (fix, error, bug)
    Debugging,
    /// Make something faster or cleaner (optimize, improve, better)
    Optimization,
    /// Nothing matched
    #[default]
    General,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Intent {
    /// Returns the wire label for the intent
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Creation => "creation",
            Intent::Explanation => "explanation",
            Intent::Debugging => "debugging",
            Intent::Optimization => "optimization",
            Intent::General => "general",
        }
    }
}

/// One row of the intent table
#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    pub intent: Intent,
    pub keywords: &'static [&'static str],
}

/// Intent groups in priority order. The first matching row wins.
pub const INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::Creation,
        keywords: &["create", "generate", "make"],
    },
    IntentRule {
        intent: Intent::Explanation,
        keywords: &["explain", "describe", "what is"],
    },
    IntentRule {
        intent: Intent::Debugging,
        keywords: &["fix", "error", "bug"],
    },
    IntentRule {
        intent: Intent::Optimization,
        keywords: &["optimize", "improve", "better"],
    },
];

/// Result of intent classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentResult {
    /// Detected intent
    pub intent: Intent,
    /// Keyword of the winning rule that was found first in the rule's list
    pub matched_keyword: Option<String>,
}

/// Intent classifier driven by an ordered rule table
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    rules: &'static [IntentRule],
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    /// Create a classifier over the built-in `INTENT_RULES`
    pub fn new() -> Self {
        Self::with_rules(INTENT_RULES)
    }

    /// Create a classifier over a custom rule table
    pub fn with_rules(rules: &'static [IntentRule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [IntentRule] {
        self.rules
    }

    /// Classify the intent of a text
    pub fn classify(&self, text: &str) -> IntentResult {
        let lower = text.to_lowercase();

        for rule in self.rules {
            if let Some(keyword) = rule.keywords.iter().find(|k| lower.contains(**k)) {
                return IntentResult {
                    intent: rule.intent,
                    matched_keyword: Some((*keyword).to_string()),
                };
            }
        }

        IntentResult {
            intent: Intent::General,
            matched_keyword: None,
        }
    }

    /// Classify and return only the label
    pub fn identify_intent(&self, text: &str) -> Intent {
        self.classify(text).intent
    }
}
