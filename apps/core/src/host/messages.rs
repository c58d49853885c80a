use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::oneshot;
use validator::Validate;

use crate::brain::{prompt_from_value, AnalyzedPrompt};
use crate::error::AppError;
use crate::host::panel::PanelState;

/// Message shown when the user submits an empty prompt.
pub const BLANK_PROMPT_MESSAGE: &str = "Please enter a prompt";

/// Requests a UI sends to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum HostRequest {
    /// Analyze a prompt. The payload is kept untyped until validation so a
    /// missing or non-string prompt is reported instead of failing decoding.
    Analyze {
        #[serde(default)]
        prompt: Value,
    },
    /// Ask for the current editor selection (or whole document).
    GetSelection,
}

/// Responses the host sends back to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum HostResponse {
    /// A completed analysis.
    #[serde(rename = "result")]
    AnalysisResult { result: AnalyzedPrompt },
    /// Any failure, rendered for display.
    Error { message: String },
    /// Editor text; empty when no editor is open.
    SelectionText { text: String },
}

impl HostResponse {
    pub fn error(err: impl std::fmt::Display) -> Self {
        HostResponse::Error {
            message: err.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, HostResponse::Error { .. })
    }
}

/// An analyze request that passed boundary validation.
#[derive(Debug, Clone, Validate)]
pub struct AnalyzeRequest {
    /// Prompt text, analyzed verbatim.
    pub prompt: String,
    /// Trimmed copy, only used to reject blank prompts.
    #[validate(length(min = 1, message = "Please enter a prompt"))]
    trimmed: String,
}

impl AnalyzeRequest {
    /// Checks the untyped payload: it must be a string with visible content.
    pub fn from_payload(payload: &Value) -> Result<Self, AppError> {
        let prompt = prompt_from_value(payload)?;
        let request = Self {
            prompt: prompt.to_string(),
            trimmed: prompt.trim().to_string(),
        };
        request
            .validate()
            .map_err(|_| AppError::Validation(BLANK_PROMPT_MESSAGE.to_string()))?;
        Ok(request)
    }
}

impl HostRequest {
    /// Decode one JSON message.
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Messages that can be sent to the `PanelRunner`.
#[derive(Debug)]
pub enum PanelMessage {
    /// A UI request to answer.
    Dispatch {
        request: HostRequest,
        /// A channel to send the response back.
        responder: oneshot::Sender<HostResponse>,
    },
    /// Bring the panel to the front.
    Show { responder: oneshot::Sender<()> },
    /// Move the panel to the background without disposing it.
    Hide { responder: oneshot::Sender<()> },
    /// Read the current panel state.
    Snapshot {
        responder: oneshot::Sender<PanelState>,
    },
    /// Stop the runner. Pending requests still queued are dropped.
    Dispose,
}
