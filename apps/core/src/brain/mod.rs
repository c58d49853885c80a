//! # Brain Module
//!
//! Keyword-driven prompt analysis for Pino. Pure text in, structured record
//! out; no model, no I/O.
//!
//! ## Components
//! - `keywords`: Key phrase extraction (quoted spans, word fallback)
//! - `intent`: Intent classification from an ordered keyword table
//! - `context`: Context dependency detection
//! - `synthesizer`: Enhanced prompt composition
//! - `analyzed_prompt`: Output data structure
//! - `analyzer`: Main orchestrator

pub mod analyzed_prompt;
pub mod analyzer;
pub mod context;
pub mod intent;
pub mod keywords;
pub mod synthesizer;

// Re-export main types for convenience
pub use analyzed_prompt::AnalyzedPrompt;
pub use analyzer::{prompt_from_value, PromptAnalysisPipeline, PromptParser};
pub use context::{ContextDependency, ContextDependencyAnalyzer, ContextRule, CONTEXT_RULES};
pub use intent::{Intent, IntentClassifier, IntentResult, IntentRule, INTENT_RULES};
pub use keywords::{ExtractionStrategy, KeyInfoExtractor, KeyInfoResult};
pub use synthesizer::PromptSynthesizer;
