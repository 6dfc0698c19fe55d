//! Study session coordinator. Owns the state machine around one tutor request.
//!
//! The state is an explicit value mutated only here, through the transition
//! methods below — the UI reads it but never writes it.

use crate::domain::{DomainError, SessionState, StudyGuide, StudyRequest};
use crate::ports::TutorPort;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Shown when a failed request carries no usable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "生成内容时发生错误，请稍后重试。";

/// Coordinator for the collect → analyze → present cycle.
///
/// Transitions: `Idle`/`Failure` → `Loading` on submit; `Loading` →
/// `Success`/`Failure` on completion; `Success`/`Failure` → `Idle` on reset.
/// At most one request is in flight: `analyze` is the only suspending call
/// and submission is rejected while `Loading`.
pub struct StudySession {
    tutor: Arc<dyn TutorPort>,
    state: SessionState,
}

impl StudySession {
    pub fn new(tutor: Arc<dyn TutorPort>) -> Self {
        Self {
            tutor,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Run one full request cycle and return the resulting state.
    ///
    /// Empty requests are a validation no-op (the collector already blocks
    /// them): the tutor is never invoked and the state does not change.
    pub async fn analyze(&mut self, request: StudyRequest) -> &SessionState {
        if request.is_empty() {
            debug!("empty request, not invoking tutor");
            return &self.state;
        }
        if !self.begin() {
            return &self.state;
        }

        let result = self.tutor.analyze(&request).await;
        self.complete(result);
        &self.state
    }

    /// Submit transition. Clears any previous guide, error and sources by
    /// replacing the whole state with `Loading`. Returns false (no-op) when
    /// a request is already in flight or a result is still on screen.
    fn begin(&mut self) -> bool {
        match self.state {
            SessionState::Idle | SessionState::Failure(_) => {
                self.state = SessionState::Loading;
                true
            }
            SessionState::Loading | SessionState::Success(_) => {
                warn!(state = ?self.state, "submit ignored in current state");
                false
            }
        }
    }

    /// Completion transition, only meaningful from `Loading`.
    fn complete(&mut self, result: Result<StudyGuide, DomainError>) {
        if !self.state.is_loading() {
            warn!(state = ?self.state, "completion ignored outside Loading");
            return;
        }
        self.state = match result {
            Ok(guide) => {
                info!(
                    markdown_len = guide.markdown.len(),
                    sources = guide.sources.len(),
                    "analysis complete"
                );
                SessionState::Success(guide)
            }
            Err(e) => {
                let message = e.message().trim();
                let message = if message.is_empty() {
                    GENERIC_FAILURE_MESSAGE.to_string()
                } else {
                    message.to_string()
                };
                warn!(error = %message, "analysis failed");
                SessionState::Failure(message)
            }
        };
    }

    /// Reset transition: back to `Idle`, discarding the guide or error.
    /// Idempotent — resetting an idle session stays idle. A `Loading` session
    /// cannot be reset (there is no cancellation; the request runs to its end).
    pub fn reset(&mut self) {
        if self.state.is_loading() {
            warn!("reset ignored while a request is in flight");
            return;
        }
        self.state = SessionState::Idle;
    }
}
