//! AI adapter module. Implements TutorPort for the Gemini integration.
//!
//! Provides the Gemini REST adapter and a mock adapter for testing.

pub mod encoding;
pub mod gemini_adapter;
pub mod mock_adapter;

pub use gemini_adapter::GeminiTutor;
pub use mock_adapter::MockTutor;
