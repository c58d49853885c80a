//! Enhanced prompt composition.

use super::analyzed_prompt::AnalyzedPrompt;
use super::context::ContextDependency;
use super::intent::Intent;

/// Builds the enhanced prompt by prefixing bracketed metadata blocks.
///
/// Blocks are prepended one after another onto the running result, so the
/// last one applied ends up in front:
/// `[Context: ...] [Key Info: ...] [Intent: ...] <original>`.
#[derive(Debug, Clone, Default)]
pub struct PromptSynthesizer;

impl PromptSynthesizer {
    pub fn new() -> Self {
        Self
    }

    /// Compose from the analysis fields of a record
    pub fn enhance_prompt(&self, record: &AnalyzedPrompt) -> String {
        self.compose(
            &record.original_prompt,
            &record.key_info,
            record.intent,
            &record.context_dependencies,
        )
    }

    pub fn compose(
        &self,
        original_prompt: &str,
        key_info: &[String],
        intent: Intent,
        context_dependencies: &[ContextDependency],
    ) -> String {
        let mut enhanced = original_prompt.to_string();

        if intent != Intent::General {
            enhanced = format!("[Intent: {}] {}", intent, enhanced);
        }

        if !key_info.is_empty() {
            enhanced = format!("[Key Info: {}] {}", key_info.join(", "), enhanced);
        }

        if !context_dependencies.is_empty() {
            let tags: Vec<&str> = context_dependencies.iter().map(|d| d.tag()).collect();
            enhanced = format!("[Context: {}] {}", tags.join(", "), enhanced);
        }

        enhanced
    }
}
