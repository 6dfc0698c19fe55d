//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/terminal types here — these are mapped from adapters.

use serde::{Deserialize, Serialize};

/// An image the user attached for analysis. Bytes live in memory for the
/// duration of one request; dropping the attachment releases them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAttachment {
    /// Raw file contents, encoded to base64 only at the transport boundary.
    pub data: Vec<u8>,
    /// IANA media type, e.g. "image/jpeg". Always an image/* type.
    pub mime_type: String,
    /// Original file name, shown in the UI in place of a thumbnail.
    pub file_name: String,
}

impl ImageAttachment {
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
            file_name: file_name.into(),
        }
    }
}

/// What the user submitted: free text, a pasted URL (just text to us), and/or
/// one image. At least one of the two is non-empty — the input collector
/// refuses to submit otherwise.
#[derive(Debug, Clone)]
pub struct StudyRequest {
    pub text: String,
    pub image: Option<ImageAttachment>,
}

impl StudyRequest {
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: None,
        }
    }

    pub fn with_image(text: impl Into<String>, image: ImageAttachment) -> Self {
        Self {
            text: text.into(),
            image: Some(image),
        }
    }

    /// True when there is nothing to analyze (blank text, no image).
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.image.is_none()
    }
}

/// The generated study guide. Immutable once produced; one per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyGuide {
    /// Markdown text from the model (or the fixed fallback string).
    pub markdown: String,
    /// Web sources the model grounded its answer in, in service order.
    /// Empty unless the search tool was enabled and citations came back.
    pub sources: Vec<String>,
}

impl StudyGuide {
    pub fn new(markdown: impl Into<String>, sources: Vec<String>) -> Self {
        Self {
            markdown: markdown.into(),
            sources,
        }
    }
}

/// Session state machine. Exactly one variant at a time:
///
/// ```text
/// Idle ──submit──▶ Loading ──ok──▶ Success ──reset──▶ Idle
///   ▲                  └────err──▶ Failure ──reset──▶ Idle
///   └──────────────────── (Failure ──submit──▶ Loading) ──┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Loading,
    Success(StudyGuide),
    Failure(String),
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    /// The guide, if the last request succeeded.
    pub fn guide(&self) -> Option<&StudyGuide> {
        match self {
            SessionState::Success(guide) => Some(guide),
            _ => None,
        }
    }

    /// The error message, if the last request failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            SessionState::Failure(msg) => Some(msg),
            _ => None,
        }
    }
}
