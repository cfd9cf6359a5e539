//! Running hash states for every algorithm of a set
//!
//! Each chunk is fed to all states before the caller reads the next one, so
//! an input is consumed exactly once however many algorithms are active.

use super::{AlgorithmSet, DigestResult, HashAlgorithm, StreamingHasher};
use std::collections::BTreeMap;

/// One independent hash state per algorithm, owned by a single computation
pub struct MultiHasher {
    states: Vec<(HashAlgorithm, Box<dyn StreamingHasher>)>,
    bytes_processed: u64,
}

impl MultiHasher {
    /// Fresh states for every algorithm in the set
    pub fn new(set: &AlgorithmSet) -> Self {
        Self {
            states: set
                .algorithms()
                .iter()
                .map(|algo| (*algo, algo.to_impl().create_hasher()))
                .collect(),
            bytes_processed: 0,
        }
    }

    /// Feed the same chunk to every state
    pub fn update(&mut self, chunk: &[u8]) {
        for (_, hasher) in &mut self.states {
            hasher.update(chunk);
        }
        self.bytes_processed += chunk.len() as u64;
    }

    pub fn bytes_processed(&self) -> u64 {
        self.bytes_processed
    }

    /// Finalize every state into a complete result
    pub fn finalize(self) -> DigestResult {
        let digests: BTreeMap<HashAlgorithm, String> = self
            .states
            .into_iter()
            .map(|(algo, hasher)| (algo, hasher.finalize()))
            .collect();
        DigestResult::from_digests(digests)
    }
}

impl std::fmt::Debug for MultiHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiHasher")
            .field(
                "algorithms",
                &self.states.iter().map(|(algo, _)| *algo).collect::<Vec<_>>(),
            )
            .field("bytes_processed", &self.bytes_processed)
            .finish()
    }
}
