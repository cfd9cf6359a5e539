//! Ordered, immutable selection of algorithms used for a run

use super::HashAlgorithm;
use crate::{Result, error::ValidationError};
use serde::{Serialize, Serializer};
use std::str::FromStr;
use std::sync::Arc;

/// The algorithms every digest of a run is computed with
///
/// The set is always non-empty, free of duplicates and in catalog order, so
/// results for text, files and directories of one run are directly comparable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmSet {
    algorithms: Arc<[HashAlgorithm]>,
}

impl AlgorithmSet {
    /// The full catalog
    pub fn catalog() -> Self {
        Self {
            algorithms: Arc::from(HashAlgorithm::ALL.as_slice()),
        }
    }

    /// A subset of the catalog
    pub fn from_algorithms(algorithms: impl IntoIterator<Item = HashAlgorithm>) -> Result<Self> {
        let mut selected: Vec<HashAlgorithm> = algorithms.into_iter().collect();
        selected.sort();
        selected.dedup();

        if selected.is_empty() {
            return Err(ValidationError::invalid_configuration(
                "At least one hash algorithm must be selected",
            )
            .into());
        }

        Ok(Self {
            algorithms: Arc::from(selected),
        })
    }

    /// Parse algorithm names, see [`HashAlgorithm::from_str`] for accepted spellings
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let algorithms = names
            .iter()
            .map(|name| HashAlgorithm::from_str(name.as_ref().trim()))
            .collect::<Result<Vec<_>>>()?;
        Self::from_algorithms(algorithms)
    }

    pub fn algorithms(&self) -> &[HashAlgorithm] {
        &self.algorithms
    }

    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }

    pub fn contains(&self, algorithm: HashAlgorithm) -> bool {
        self.algorithms.contains(&algorithm)
    }
}

impl Default for AlgorithmSet {
    fn default() -> Self {
        Self::catalog()
    }
}

impl Serialize for AlgorithmSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.algorithms.iter())
    }
}
