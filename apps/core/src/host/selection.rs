use async_trait::async_trait;
use std::ops::Range;

use crate::error::AppError;

/// Source of the text the user currently has in front of them.
///
/// This abstracts the editor integration so the panel can be driven by a
/// real editor, a file, or a fixed string in tests.
#[async_trait]
pub trait SelectionSource: Send + Sync + 'static {
    /// Returns the selected text, the whole document when nothing is
    /// selected, or `None` when no document is open.
    async fn current_text(&self) -> Result<Option<String>, AppError>;
}

/// In-memory editor state: an optional document and an optional selection.
#[derive(Debug, Clone, Default)]
pub struct EditorSelection {
    document: Option<String>,
    /// Byte range into `document`.
    selection: Option<Range<usize>>,
}

impl EditorSelection {
    /// No editor open.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn document(text: impl Into<String>) -> Self {
        Self {
            document: Some(text.into()),
            selection: None,
        }
    }

    pub fn with_selection(mut self, range: Range<usize>) -> Self {
        self.selection = Some(range);
        self
    }
}

#[async_trait]
impl SelectionSource for EditorSelection {
    async fn current_text(&self) -> Result<Option<String>, AppError> {
        let Some(document) = &self.document else {
            return Ok(None);
        };

        match &self.selection {
            Some(range) if !range.is_empty() => document
                .get(range.clone())
                .map(|s| Some(s.to_string()))
                .ok_or_else(|| {
                    AppError::Validation(format!(
                        "Selection {}..{} is outside the document or splits a character",
                        range.start, range.end
                    ))
                }),
            _ => Ok(Some(document.clone())),
        }
    }
}

/// Parses `START..END` into a byte range.
pub fn parse_range(raw: &str) -> Result<Range<usize>, AppError> {
    let invalid = || AppError::Validation(format!("Invalid selection range: {:?}", raw));

    let (start, end) = raw.split_once("..").ok_or_else(invalid)?;
    let start: usize = start.trim().parse().map_err(|_| invalid())?;
    let end: usize = end.trim().parse().map_err(|_| invalid())?;
    if start > end {
        return Err(invalid());
    }
    Ok(start..end)
}
