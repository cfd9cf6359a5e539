//! Hash algorithm implementations backed by the RustCrypto digest crates

use super::HashAlgorithm;
use super::traits::{HashAlgorithmImpl, StreamingHasher};
use blake2::Blake2b512;
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};
use std::marker::PhantomData;
use std::sync::Arc;

/// Algorithm descriptor for any RustCrypto [`Digest`]
struct DigestAlgorithm<D> {
    id: &'static str,
    display_name: &'static str,
    _digest: PhantomData<fn() -> D>,
}

impl<D> DigestAlgorithm<D> {
    fn new(id: &'static str, display_name: &'static str) -> Self {
        Self {
            id,
            display_name,
            _digest: PhantomData,
        }
    }
}

/// Streaming state for one [`Digest`]
struct DigestHasher<D> {
    hasher: D,
}

impl<D> StreamingHasher for DigestHasher<D>
where
    D: Digest + Send,
{
    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.hasher, data);
    }

    fn finalize(self: Box<Self>) -> String {
        hex::encode(Digest::finalize(self.hasher))
    }
}

impl<D> HashAlgorithmImpl for DigestAlgorithm<D>
where
    D: Digest + Send + 'static,
{
    fn id(&self) -> &'static str {
        self.id
    }

    fn display_name(&self) -> &'static str {
        self.display_name
    }

    fn digest_len(&self) -> usize {
        <D as Digest>::output_size()
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(DigestHasher { hasher: D::new() })
    }
}

/// Build the implementation for a catalog entry
pub(super) fn implementation(algorithm: HashAlgorithm) -> Arc<dyn HashAlgorithmImpl> {
    let name = algorithm.as_str();
    match algorithm {
        HashAlgorithm::Md5 => Arc::new(DigestAlgorithm::<Md5>::new("md5", name)),
        HashAlgorithm::Sha1 => Arc::new(DigestAlgorithm::<Sha1>::new("sha1", name)),
        HashAlgorithm::Sha224 => Arc::new(DigestAlgorithm::<Sha224>::new("sha224", name)),
        HashAlgorithm::Sha256 => Arc::new(DigestAlgorithm::<Sha256>::new("sha256", name)),
        HashAlgorithm::Sha384 => Arc::new(DigestAlgorithm::<Sha384>::new("sha384", name)),
        HashAlgorithm::Sha512 => Arc::new(DigestAlgorithm::<Sha512>::new("sha512", name)),
        HashAlgorithm::Blake2b => Arc::new(DigestAlgorithm::<Blake2b512>::new("blake2b", name)),
        HashAlgorithm::Sha3_224 => Arc::new(DigestAlgorithm::<Sha3_224>::new("sha3_224", name)),
        HashAlgorithm::Sha3_256 => Arc::new(DigestAlgorithm::<Sha3_256>::new("sha3_256", name)),
        HashAlgorithm::Sha3_384 => Arc::new(DigestAlgorithm::<Sha3_384>::new("sha3_384", name)),
        HashAlgorithm::Sha3_512 => Arc::new(DigestAlgorithm::<Sha3_512>::new("sha3_512", name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_lengths() {
        let expected = [16, 20, 28, 32, 48, 64, 64, 28, 32, 48, 64];
        for (algo, len) in HashAlgorithm::ALL.iter().zip(expected) {
            assert_eq!(implementation(*algo).digest_len(), len, "{algo}");
        }
    }

    #[test]
    fn test_hex_length_matches_digest_length() {
        for algo in HashAlgorithm::ALL {
            let imp = implementation(algo);
            assert_eq!(imp.hash_bytes(b"abc").len(), imp.digest_len() * 2);
        }
    }

    #[test]
    fn test_known_vectors_for_test_string() {
        assert_eq!(
            implementation(HashAlgorithm::Md5).hash_bytes(b"test"),
            "098f6bcd4621d373cade4e832627b4f6"
        );
        assert_eq!(
            implementation(HashAlgorithm::Sha1).hash_bytes(b"test"),
            "a94a8fe5ccb19ba61c4c0873d391e987982fbbd3"
        );
        assert_eq!(
            implementation(HashAlgorithm::Sha256).hash_bytes(b"test"),
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
    }

    #[test]
    fn test_streaming_matches_one_shot() {
        for algo in HashAlgorithm::ALL {
            let imp = implementation(algo);
            let mut hasher = imp.create_hasher();
            hasher.update(b"forensic ");
            hasher.update(b"evidence");
            assert_eq!(hasher.finalize(), imp.hash_bytes(b"forensic evidence"));
        }
    }
}
