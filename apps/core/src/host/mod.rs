//! # Host Module
//!
//! Integration layer between a UI (editor panel, CLI, webview) and the
//! analysis core. The core is a plain function; everything stateful lives
//! here.
//!
//! ## Components
//! - `messages`: Tagged request/response types and actor messages
//! - `selection`: Access to the current editor text
//! - `panel`: Panel actor with explicit create/show/hide/dispose lifecycle
//! - `stdio`: JSON-lines transport over any async reader/writer

pub mod messages;
pub mod panel;
pub mod selection;
pub mod stdio;

pub use messages::{AnalyzeRequest, HostRequest, HostResponse, BLANK_PROMPT_MESSAGE};
pub use panel::{PanelHandle, PanelState};
pub use selection::{parse_range, EditorSelection, SelectionSource};
pub use stdio::serve;
