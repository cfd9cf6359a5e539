//! Builders for on-disk test evidence

mod evidence;

pub use evidence::EvidenceTreeBuilder;
