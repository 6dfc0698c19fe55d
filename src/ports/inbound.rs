//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: the interactive surface drives the application.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the collect → analyze → present → reset loop until the user quits.
    async fn run(&self) -> Result<(), DomainError>;
}
