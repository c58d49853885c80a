//! Context dependency detection.
//!
//! Flags the kinds of surrounding context (code, variables, types, files) a
//! prompt probably needs. Every rule is tested; hits are emitted in table order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of external context a prompt refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextDependency {
    CodeContext,
    VariableContext,
    TypeContext,
    FileContext,
}

impl fmt::Display for ContextDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl ContextDependency {
    /// Returns the wire tag
    pub fn tag(&self) -> &'static str {
        match self {
            ContextDependency::CodeContext => "code_context",
            ContextDependency::VariableContext => "variable_context",
            ContextDependency::TypeContext => "type_context",
            ContextDependency::FileContext => "file_context",
        }
    }
}

/// One row of the context table
#[derive(Debug, Clone, Copy)]
pub struct ContextRule {
    pub dependency: ContextDependency,
    pub keywords: &'static [&'static str],
}

/// Context groups in emission order
pub const CONTEXT_RULES: &[ContextRule] = &[
    ContextRule {
        dependency: ContextDependency::CodeContext,
        keywords: &["function", "method"],
    },
    ContextRule {
        dependency: ContextDependency::VariableContext,
        keywords: &["variable", "const", "let"],
    },
    ContextRule {
        dependency: ContextDependency::TypeContext,
        keywords: &["class", "interface"],
    },
    ContextRule {
        dependency: ContextDependency::FileContext,
        keywords: &["file", "module"],
    },
];

/// Detects context dependencies with a fixed rule table
#[derive(Debug, Clone)]
pub struct ContextDependencyAnalyzer {
    rules: &'static [ContextRule],
}

impl Default for ContextDependencyAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextDependencyAnalyzer {
    pub fn new() -> Self {
        Self::with_rules(CONTEXT_RULES)
    }

    pub fn with_rules(rules: &'static [ContextRule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [ContextRule] {
        self.rules
    }

    /// Tags for every rule with at least one substring hit
    pub fn analyze(&self, text: &str) -> Vec<ContextDependency> {
        let lower = text.to_lowercase();

        self.rules
            .iter()
            .filter(|rule| rule.keywords.iter().any(|k| lower.contains(*k)))
            .map(|rule| rule.dependency)
            .collect()
    }
}
