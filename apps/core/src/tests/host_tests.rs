//! Host Layer Tests
//!
//! Panel lifecycle, boundary validation and failure handling, using mock
//! parsers and selection sources.

use crate::brain::{AnalyzedPrompt, Intent, PromptAnalysisPipeline, PromptParser};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::host::{EditorSelection, HostRequest, HostResponse, PanelHandle, SelectionSource};
use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::time::{sleep, Duration};

// ============================================================================
// Mock Collaborators
// ============================================================================

/// Parser that delegates to the real pipeline until told to fail
pub struct FlakyParser {
    inner: PromptAnalysisPipeline,
    fail_on: String,
    pub calls: AtomicUsize,
}

impl FlakyParser {
    pub fn failing_on(prompt: &str) -> Self {
        Self {
            inner: PromptAnalysisPipeline::new(),
            fail_on: prompt.to_string(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl PromptParser for FlakyParser {
    async fn parse(&self, prompt: &str) -> Result<AnalyzedPrompt, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if prompt == self.fail_on {
            Err(AppError::Io(std::io::Error::other("mock parser failure")))
        } else {
            self.inner.parse(prompt).await
        }
    }
}

/// Parser that never answers in time
pub struct SlowParser {
    pub delay_ms: u64,
}

#[async_trait]
impl PromptParser for SlowParser {
    async fn parse(&self, prompt: &str) -> Result<AnalyzedPrompt, AppError> {
        sleep(Duration::from_millis(self.delay_ms)).await;
        PromptAnalysisPipeline::new().parse(prompt).await
    }
}

/// Selection source whose editor backend is broken
pub struct BrokenSelection;

#[async_trait]
impl SelectionSource for BrokenSelection {
    async fn current_text(&self) -> Result<Option<String>, AppError> {
        Err(AppError::Io(std::io::Error::other("editor went away")))
    }
}

fn analyze(prompt: serde_json::Value) -> HostRequest {
    HostRequest::Analyze { prompt }
}

// ============================================================================
// Panel Tests
// ============================================================================

#[cfg(test)]
mod panel_tests {
    use super::*;

    #[tokio::test]
    async fn test_failed_analysis_keeps_last_result() {
        let parser = Arc::new(FlakyParser::failing_on("explode"));
        let panel = PanelHandle::with_parts(
            &AppConfig::default(),
            parser.clone(),
            Arc::new(EditorSelection::none()),
        );

        let ok = panel.dispatch(analyze(json!("fix the bug"))).await.unwrap();
        assert!(!ok.is_error());

        let failed = panel.dispatch(analyze(json!("explode"))).await.unwrap();
        assert_eq!(
            failed,
            HostResponse::Error {
                message: "I/O error: mock parser failure".to_string()
            }
        );

        let state = panel.snapshot().await.unwrap();
        let last = state.last_result.expect("previous result is kept");
        assert_eq!(last.original_prompt, "fix the bug");
        assert_eq!(last.intent, Intent::Debugging);
        assert_eq!(state.last_error.as_deref(), Some("I/O error: mock parser failure"));
        assert_eq!(state.analyses, 1);
        assert_eq!(parser.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalid_payloads_never_reach_the_parser() {
        let parser = Arc::new(FlakyParser::failing_on(""));
        let panel = PanelHandle::with_parts(
            &AppConfig::default(),
            parser.clone(),
            Arc::new(EditorSelection::none()),
        );

        for payload in [json!(null), json!(12), json!(["a"]), json!("   ")] {
            let response = panel.dispatch(analyze(payload.clone())).await.unwrap();
            assert!(response.is_error(), "Expected error for {}", payload);
        }

        assert_eq!(parser.calls.load(Ordering::SeqCst), 0);
        assert!(panel.snapshot().await.unwrap().last_result.is_none());
    }

    #[tokio::test]
    async fn test_blank_prompt_message() {
        let panel = PanelHandle::create(&AppConfig::default(), EditorSelection::none());

        let response = panel.dispatch(analyze(json!(""))).await.unwrap();
        assert_eq!(
            response,
            HostResponse::Error {
                message: "Validation error: Please enter a prompt".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_null_prompt_is_invalid_input() {
        let panel = PanelHandle::create(&AppConfig::default(), EditorSelection::none());

        match panel.dispatch(analyze(json!(null))).await.unwrap() {
            HostResponse::Error { message } => assert!(message.starts_with("Invalid input:")),
            other => panic!("Expected error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_selection_requests() {
        let panel = PanelHandle::create(
            &AppConfig::default(),
            EditorSelection::document("Explain this function").with_selection(8..12),
        );

        let response = panel.dispatch(HostRequest::GetSelection).await.unwrap();
        assert_eq!(
            response,
            HostResponse::SelectionText {
                text: "this".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_no_editor_yields_empty_text() {
        let panel = PanelHandle::create(&AppConfig::default(), EditorSelection::none());

        let response = panel.dispatch(HostRequest::GetSelection).await.unwrap();
        assert_eq!(
            response,
            HostResponse::SelectionText {
                text: String::new()
            }
        );
    }

    #[tokio::test]
    async fn test_broken_selection_source() {
        let panel = PanelHandle::with_parts(
            &AppConfig::default(),
            Arc::new(PromptAnalysisPipeline::new()),
            Arc::new(BrokenSelection),
        );

        let response = panel.dispatch(HostRequest::GetSelection).await.unwrap();
        assert!(response.is_error());
    }

    #[tokio::test]
    async fn test_timeout() {
        let config = AppConfig {
            request_timeout_ms: 20,
            ..AppConfig::default()
        };
        let panel = PanelHandle::with_parts(
            &config,
            Arc::new(SlowParser { delay_ms: 500 }),
            Arc::new(EditorSelection::none()),
        );

        let err = panel.dispatch(analyze(json!("make it"))).await.unwrap_err();
        assert!(matches!(err, AppError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_dispose_affects_all_clones() {
        let panel = PanelHandle::create(&AppConfig::default(), EditorSelection::none());
        let other = panel.clone();

        assert!(panel.snapshot().await.unwrap().visible);
        panel.dispose().await.unwrap();

        let err = other.dispatch(analyze(json!("hello"))).await.unwrap_err();
        assert!(matches!(err, AppError::Panel(_)));
        assert!(matches!(other.show().await, Err(AppError::Panel(_))));
    }

    #[tokio::test]
    async fn test_concurrent_dispatch() {
        let panel = PanelHandle::create(&AppConfig::default(), EditorSelection::none());

        let mut handles = Vec::new();
        for i in 0..16 {
            let panel = panel.clone();
            handles.push(tokio::spawn(async move {
                let prompt = format!("Create \"item {}\"", i);
                (i, panel.dispatch(analyze(json!(prompt))).await)
            }));
        }

        for handle in handles {
            let (i, response) = handle.await.unwrap();
            match response.unwrap() {
                HostResponse::AnalysisResult { result } => {
                    assert_eq!(result.key_info, vec![format!("item {}", i)]);
                    assert_eq!(result.intent, Intent::Creation);
                }
                other => panic!("Expected result, got {:?}", other),
            }
        }

        assert_eq!(panel.snapshot().await.unwrap().analyses, 16);
    }
}
