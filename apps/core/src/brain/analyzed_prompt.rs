//! Analyzed Prompt - Output structure of the analysis pipeline.
//!
//! Built fresh for every call and never touched afterwards. It carries no
//! timing or identity data so identical prompts give identical records.

use serde::{Deserialize, Serialize};

use super::context::ContextDependency;
use super::intent::Intent;

/// Complete result of analyzing one prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedPrompt {
    /// Input text, verbatim
    pub original_prompt: String,

    /// Distinct key phrases in first-occurrence order
    pub key_info: Vec<String>,

    /// Coarse intent label
    pub intent: Intent,

    /// Context tags in rule order
    pub context_dependencies: Vec<ContextDependency>,

    /// Original prompt prefixed with the metadata blocks
    pub enhanced_prompt: String,
}

impl AnalyzedPrompt {
    /// Context tags as plain strings
    pub fn context_tags(&self) -> Vec<&'static str> {
        self.context_dependencies.iter().map(|d| d.tag()).collect()
    }

    /// Check if any metadata block was added to the prompt
    pub fn is_enhanced(&self) -> bool {
        self.enhanced_prompt != self.original_prompt
    }

    /// Get a summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Intent: {}, Key Info: {}, Context: [{}], Enhanced: {}",
            self.intent,
            self.key_info.len(),
            self.context_tags().join(", "),
            if self.is_enhanced() { "yes" } else { "no" }
        )
    }

    /// Multi-line human readable report
    pub fn report(&self) -> String {
        [
            "Prompt Parser Results:".to_string(),
            "=====================".to_string(),
            format!("Original Prompt: \"{}\"", self.original_prompt),
            format!("Enhanced Prompt: \"{}\"", self.enhanced_prompt),
            format!("Intent: {}", self.intent),
            format!("Key Info: [{}]", self.key_info.join(", ")),
            format!("Context Dependencies: [{}]", self.context_tags().join(", ")),
        ]
        .join("\n")
    }
}
