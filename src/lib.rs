//! oranje-studie: bilingual Dutch study guides from text, URLs or images, with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
