//! Infrastructure adapters. Implement the ports.
//!
//! Gemini, terminal UI. Map errors to DomainError.

pub mod ai;
pub mod ui;
