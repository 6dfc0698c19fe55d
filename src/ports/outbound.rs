//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DomainError, StudyGuide, StudyRequest};

/// Generative-model gateway. One request, one study guide.
///
/// Implementations must never return an empty `markdown`: a technically
/// successful but empty model answer is substituted with a fixed fallback
/// string, not surfaced as an error. No retries — a failed call is terminal
/// for the request and the user retries explicitly.
#[async_trait::async_trait]
pub trait TutorPort: Send + Sync {
    /// Analyze the request and produce a Markdown study guide plus any web
    /// sources the model grounded its answer in.
    async fn analyze(&self, request: &StudyRequest) -> Result<StudyGuide, DomainError>;
}
