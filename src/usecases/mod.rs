//! Application use cases. Orchestrate domain logic via ports.

pub mod session;

pub use session::StudySession;
