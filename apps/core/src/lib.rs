// Pino Core
// Prompt analysis: key phrases, intent, context tags and an enhanced prompt.

pub mod brain;
pub mod config;
pub mod error;
pub mod host;
pub mod logging;

pub use brain::{AnalyzedPrompt, ContextDependency, Intent, PromptAnalysisPipeline, PromptParser};
pub use config::AppConfig;
pub use error::AppError;

/// Analyze a prompt with the default pipeline.
pub fn analyze(prompt: &str) -> AnalyzedPrompt {
    PromptAnalysisPipeline::new().analyze(prompt)
}

#[cfg(test)]
mod tests;
