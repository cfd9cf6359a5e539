//! Central registry for hash algorithm implementations

use super::HashAlgorithm;
use super::traits::HashAlgorithmImpl;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Immutable table of algorithm implementations, indexed by catalog position
pub struct AlgorithmRegistry {
    algorithms: Vec<Arc<dyn HashAlgorithmImpl>>,
}

impl AlgorithmRegistry {
    fn new() -> Self {
        Self {
            algorithms: HashAlgorithm::ALL
                .iter()
                .map(|algo| super::algorithms::implementation(*algo))
                .collect(),
        }
    }

    /// Get the global registry instance
    pub fn global() -> &'static Self {
        static INSTANCE: OnceCell<AlgorithmRegistry> = OnceCell::new();
        INSTANCE.get_or_init(Self::new)
    }

    /// Get the implementation of an algorithm
    pub fn get(&self, algorithm: HashAlgorithm) -> Arc<dyn HashAlgorithmImpl> {
        Arc::clone(&self.algorithms[algorithm.index()])
    }

    /// List all registered algorithm ids in catalog order
    pub fn list(&self) -> Vec<&'static str> {
        self.algorithms.iter().map(|algo| algo.id()).collect()
    }
}
