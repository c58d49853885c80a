use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::brain::{AnalyzedPrompt, PromptAnalysisPipeline, PromptParser};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::host::messages::{AnalyzeRequest, HostRequest, HostResponse, PanelMessage};
use crate::host::selection::SelectionSource;

/// What the panel is currently displaying.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PanelState {
    /// Cleared by `hide`, set again by `show`.
    pub visible: bool,
    /// Number of times `show` brought the panel forward.
    pub reveal_count: u32,
    /// Last successful analysis. A later failure never clears it.
    pub last_result: Option<AnalyzedPrompt>,
    pub last_error: Option<String>,
    pub last_analyzed_at: Option<DateTime<Utc>>,
    /// Successful analyses since creation.
    pub analyses: u64,
}

/// A handle to the `PanelRunner`.
///
/// Owned by the host layer; the analysis core never sees it. Cloning the
/// handle shares the same panel.
#[derive(Clone)]
pub struct PanelHandle {
    sender: mpsc::Sender<PanelMessage>,
    request_timeout: Duration,
}

impl PanelHandle {
    /// Creates a panel backed by the production pipeline.
    ///
    /// Must be called from within a tokio runtime.
    pub fn create<S>(config: &AppConfig, selection: S) -> Self
    where
        S: SelectionSource,
    {
        Self::with_parts(
            config,
            Arc::new(PromptAnalysisPipeline::new()),
            Arc::new(selection),
        )
    }

    /// Creates a panel with explicit collaborators.
    pub fn with_parts<P, S>(config: &AppConfig, parser: Arc<P>, selection: Arc<S>) -> Self
    where
        P: PromptParser,
        S: SelectionSource,
    {
        let (sender, receiver) = mpsc::channel(config.channel_capacity);
        let runner = PanelRunner::new(receiver, parser, selection);
        tokio::spawn(async move { runner.run().await });
        Self {
            sender,
            request_timeout: config.request_timeout(),
        }
    }

    /// Answers one UI request.
    ///
    /// Analysis failures come back as `HostResponse::Error`; `Err` means the
    /// panel itself could not be reached.
    #[instrument(skip(self, request), fields(request_id = %Uuid::new_v4()))]
    pub async fn dispatch(&self, request: HostRequest) -> Result<HostResponse, AppError> {
        let (send, recv) = oneshot::channel();
        self.send(PanelMessage::Dispatch {
            request,
            responder: send,
        })
        .await?;
        self.await_reply(recv).await
    }

    /// Brings the panel to the front.
    pub async fn show(&self) -> Result<(), AppError> {
        let (send, recv) = oneshot::channel();
        self.send(PanelMessage::Show { responder: send }).await?;
        self.await_reply(recv).await
    }

    /// Moves the panel to the background. It keeps its state and still
    /// answers requests.
    pub async fn hide(&self) -> Result<(), AppError> {
        let (send, recv) = oneshot::channel();
        self.send(PanelMessage::Hide { responder: send }).await?;
        self.await_reply(recv).await
    }

    /// Returns a copy of the current panel state.
    pub async fn snapshot(&self) -> Result<PanelState, AppError> {
        let (send, recv) = oneshot::channel();
        self.send(PanelMessage::Snapshot { responder: send }).await?;
        self.await_reply(recv).await
    }

    /// Closes the panel. Later calls on any clone fail with `AppError::Panel`.
    pub async fn dispose(&self) -> Result<(), AppError> {
        self.send(PanelMessage::Dispose).await
    }

    async fn send(&self, msg: PanelMessage) -> Result<(), AppError> {
        self.sender
            .send(msg)
            .await
            .map_err(|_| AppError::Panel("panel has been disposed".to_string()))
    }

    async fn await_reply<T>(&self, recv: oneshot::Receiver<T>) -> Result<T, AppError> {
        timeout(self.request_timeout, recv)
            .await?
            .map_err(|_| AppError::Panel("panel closed before replying".to_string()))
    }
}

// --- Actor Runner ---
struct PanelRunner<P, S>
where
    P: PromptParser,
    S: SelectionSource,
{
    receiver: mpsc::Receiver<PanelMessage>,
    parser: Arc<P>,
    selection: Arc<S>,
    state: PanelState,
}

impl<P, S> PanelRunner<P, S>
where
    P: PromptParser,
    S: SelectionSource,
{
    fn new(receiver: mpsc::Receiver<PanelMessage>, parser: Arc<P>, selection: Arc<S>) -> Self {
        Self {
            receiver,
            parser,
            selection,
            state: PanelState {
                visible: true,
                ..PanelState::default()
            },
        }
    }

    async fn run(mut self) {
        info!("Panel created");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                PanelMessage::Dispatch { request, responder } => {
                    let response = self.handle_request(request).await;
                    let _ = responder.send(response);
                }
                PanelMessage::Show { responder } => {
                    self.state.visible = true;
                    self.state.reveal_count += 1;
                    let _ = responder.send(());
                }
                PanelMessage::Hide { responder } => {
                    self.state.visible = false;
                    let _ = responder.send(());
                }
                PanelMessage::Snapshot { responder } => {
                    let _ = responder.send(self.state.clone());
                }
                PanelMessage::Dispose => {
                    self.receiver.close();
                    break;
                }
            }
        }
        info!("Panel disposed");
    }

    async fn handle_request(&mut self, request: HostRequest) -> HostResponse {
        match request {
            HostRequest::Analyze { prompt } => self.handle_analyze(&prompt).await,
            HostRequest::GetSelection => match self.selection.current_text().await {
                Ok(text) => HostResponse::SelectionText {
                    text: text.unwrap_or_default(),
                },
                Err(e) => {
                    warn!("Failed to read selection: {}", e);
                    HostResponse::error(e)
                }
            },
        }
    }

    async fn handle_analyze(&mut self, payload: &serde_json::Value) -> HostResponse {
        let result = match AnalyzeRequest::from_payload(payload) {
            Ok(request) => self.parser.parse(&request.prompt).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(record) => {
                info!("Prompt analyzed: {}", record.summary());
                self.state.last_result = Some(record.clone());
                self.state.last_error = None;
                self.state.last_analyzed_at = Some(Utc::now());
                self.state.analyses += 1;
                HostResponse::AnalysisResult { result: record }
            }
            Err(e) => {
                if e.is_client_error() {
                    warn!("Rejected analyze request: {}", e);
                } else {
                    error!("Analysis failed: {}", e);
                }
                self.state.last_error = Some(e.to_string());
                HostResponse::error(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::selection::EditorSelection;
    use serde_json::json;

    #[tokio::test]
    async fn test_analyze_round_trip() {
        let panel = PanelHandle::create(&AppConfig::default(), EditorSelection::none());

        let response = panel
            .dispatch(HostRequest::Analyze {
                prompt: json!("generate a module"),
            })
            .await
            .unwrap();

        match response {
            HostResponse::AnalysisResult { result } => {
                assert_eq!(result.intent, crate::brain::Intent::Creation);
            }
            other => panic!("Expected result, got {:?}", other),
        }

        let state = panel.snapshot().await.unwrap();
        assert_eq!(state.analyses, 1);
        assert!(state.last_analyzed_at.is_some());
    }

    #[tokio::test]
    async fn test_hide_and_show() {
        let panel = PanelHandle::create(&AppConfig::default(), EditorSelection::none());
        assert!(panel.snapshot().await.unwrap().visible);

        panel.hide().await.unwrap();
        let hidden = panel.snapshot().await.unwrap();
        assert!(!hidden.visible);
        assert_eq!(hidden.reveal_count, 0);

        // A hidden panel still answers requests
        let response = panel
            .dispatch(HostRequest::Analyze {
                prompt: json!("explain this"),
            })
            .await
            .unwrap();
        assert!(!response.is_error());

        panel.show().await.unwrap();
        let shown = panel.snapshot().await.unwrap();
        assert!(shown.visible);
        assert_eq!(shown.reveal_count, 1);
        assert_eq!(shown.analyses, 1);
    }

    #[tokio::test]
    async fn test_show_and_dispose() {
        let panel = PanelHandle::create(&AppConfig::default(), EditorSelection::none());

        panel.show().await.unwrap();
        panel.show().await.unwrap();
        assert_eq!(panel.snapshot().await.unwrap().reveal_count, 2);

        panel.dispose().await.unwrap();

        let err = panel.snapshot().await.unwrap_err();
        assert!(matches!(err, AppError::Panel(_)));
    }
}
