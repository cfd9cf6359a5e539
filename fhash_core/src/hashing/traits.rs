//! Core traits for hash algorithm implementations

/// Core trait that all hash algorithms must implement
pub trait HashAlgorithmImpl: Send + Sync {
    /// Unique lower-case identifier for this algorithm
    fn id(&self) -> &'static str;

    /// Display name for reports and user interfaces
    fn display_name(&self) -> &'static str;

    /// Digest length in bytes
    fn digest_len(&self) -> usize;

    /// Create a new streaming hasher instance
    fn create_hasher(&self) -> Box<dyn StreamingHasher>;

    /// Calculate hash for in-memory data
    fn hash_bytes(&self, data: &[u8]) -> String {
        let mut hasher = self.create_hasher();
        hasher.update(data);
        hasher.finalize()
    }
}

/// Trait for streaming hash calculation
pub trait StreamingHasher: Send {
    /// Update the hasher with new data
    fn update(&mut self, data: &[u8]);

    /// Finalize the hash calculation and return the lower-case hex digest
    fn finalize(self: Box<Self>) -> String;
}
