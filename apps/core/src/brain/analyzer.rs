//! Prompt Analysis Pipeline - Main orchestrator for the Brain module.
//!
//! Runs key information extraction, intent classification and context
//! detection over the raw prompt, then composes the enhanced prompt from
//! their outputs. Holds no per-call state, so one pipeline can serve any
//! number of concurrent callers.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

use super::analyzed_prompt::AnalyzedPrompt;
use super::context::ContextDependencyAnalyzer;
use super::intent::IntentClassifier;
use super::keywords::KeyInfoExtractor;
use super::synthesizer::PromptSynthesizer;
use crate::error::AppError;

/// Asynchronous analysis entry point.
///
/// The work itself never suspends; the async signature exists so hosts with
/// an event loop can call it like any other request handler.
#[async_trait]
pub trait PromptParser: Send + Sync + 'static {
    /// Analyzes a prompt and returns the completed record.
    async fn parse(&self, prompt: &str) -> Result<AnalyzedPrompt, AppError>;
}

/// Main pipeline that orchestrates all analysis stages
#[derive(Debug, Clone, Default)]
pub struct PromptAnalysisPipeline {
    extractor: KeyInfoExtractor,
    intent_classifier: IntentClassifier,
    context_analyzer: ContextDependencyAnalyzer,
    synthesizer: PromptSynthesizer,
}

impl PromptAnalysisPipeline {
    /// Create a new pipeline with the built-in rule tables
    pub fn new() -> Self {
        Self {
            extractor: KeyInfoExtractor::new(),
            intent_classifier: IntentClassifier::new(),
            context_analyzer: ContextDependencyAnalyzer::new(),
            synthesizer: PromptSynthesizer::new(),
        }
    }

    /// Analyze a prompt and produce the full record
    #[instrument(skip_all, fields(prompt_len = prompt.len()))]
    pub fn analyze(&self, prompt: &str) -> AnalyzedPrompt {
        // 1. Key phrases
        let key_info = self.extractor.extract(prompt);
        debug!(strategy = ?key_info.strategy, count = key_info.phrases.len(), "Key info extracted");

        // 2. Intent
        let intent = self.intent_classifier.classify(prompt);
        debug!(intent = %intent.intent, keyword = ?intent.matched_keyword, "Intent classified");

        // 3. Context dependencies
        let context_dependencies = self.context_analyzer.analyze(prompt);
        debug!(count = context_dependencies.len(), "Context dependencies detected");

        // 4. Compose (needs the three results above)
        let mut record = AnalyzedPrompt {
            original_prompt: prompt.to_string(),
            key_info: key_info.phrases,
            intent: intent.intent,
            context_dependencies,
            enhanced_prompt: String::new(),
        };
        record.enhanced_prompt = self.synthesizer.enhance_prompt(&record);

        debug!("{}", record.summary());
        record
    }

    /// Analyze a prompt supplied as a JSON value.
    ///
    /// Fails with `AppError::InvalidInput` unless the value is a string.
    pub fn parse_value(&self, value: &Value) -> Result<AnalyzedPrompt, AppError> {
        let prompt = prompt_from_value(value)?;
        Ok(self.analyze(prompt))
    }
}

#[async_trait]
impl PromptParser for PromptAnalysisPipeline {
    async fn parse(&self, prompt: &str) -> Result<AnalyzedPrompt, AppError> {
        Ok(self.analyze(prompt))
    }
}

/// Borrow the prompt text out of a JSON value without coercion
pub fn prompt_from_value(value: &Value) -> Result<&str, AppError> {
    match value {
        Value::String(s) => Ok(s.as_str()),
        Value::Null => Err(AppError::InvalidInput(
            "prompt is missing or null".to_string(),
        )),
        other => Err(AppError::InvalidInput(format!(
            "prompt must be a string, got {}",
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
