//! Test utilities for fhash
//!
//! This crate provides evidence tree builders, mock metadata sources and
//! reference digest vectors for testing the hashing engine.

pub mod builders;
pub mod mocks;
pub mod vectors;

// Re-export commonly used types
pub use builders::EvidenceTreeBuilder;
pub use mocks::{FailingMetadataExtractor, FailingReader, FixedMetadataExtractor};
