//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// The tutor (generative model) call failed: transport, auth, quota,
    /// or an unreadable response. Message is shown to the user verbatim.
    #[error("Tutor error: {0}")]
    Tutor(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading or validating user input (e.g. an image file) failed.
    #[error("Input error: {0}")]
    Input(String),

    #[error("UI error: {0}")]
    Ui(String),
}

impl DomainError {
    /// The human-readable part of the error, without the variant prefix.
    /// Used where the UI shows the message in place of the model output.
    pub fn message(&self) -> &str {
        match self {
            DomainError::Tutor(m)
            | DomainError::Config(m)
            | DomainError::Input(m)
            | DomainError::Ui(m) => m,
        }
    }
}
