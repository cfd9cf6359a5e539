//! Hash algorithm catalog and digest results
//!
//! The catalog is part of the report schema: every key that can appear in a
//! [`DigestResult`] comes from [`HashAlgorithm`], and [`CATALOG_VERSION`] must
//! be bumped whenever a variant is added, removed or renamed.

use crate::{Error, Result, error::ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

mod algorithms;
mod multiple;
mod registry;
mod set;
mod traits;

pub use multiple::MultiHasher;
pub use registry::AlgorithmRegistry;
pub use set::AlgorithmSet;
pub use traits::{HashAlgorithmImpl, StreamingHasher};

/// Version of the algorithm catalog and its display names
pub const CATALOG_VERSION: u32 = 1;

/// Hash algorithms supported by the engine, in catalog order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum HashAlgorithm {
    #[serde(rename = "MD5")]
    Md5,
    #[serde(rename = "SHA1")]
    Sha1,
    #[serde(rename = "SHA224")]
    Sha224,
    #[serde(rename = "SHA256")]
    Sha256,
    #[serde(rename = "SHA384")]
    Sha384,
    #[serde(rename = "SHA512")]
    Sha512,
    /// BLAKE2b with a 512-bit digest
    #[serde(rename = "BLAKE2B")]
    Blake2b,
    #[serde(rename = "SHA3_224")]
    Sha3_224,
    #[serde(rename = "SHA3_256")]
    Sha3_256,
    #[serde(rename = "SHA3_384")]
    Sha3_384,
    #[serde(rename = "SHA3_512")]
    Sha3_512,
}

impl HashAlgorithm {
    /// Every algorithm in catalog order
    pub const ALL: [HashAlgorithm; 11] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha224,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
        HashAlgorithm::Blake2b,
        HashAlgorithm::Sha3_224,
        HashAlgorithm::Sha3_256,
        HashAlgorithm::Sha3_384,
        HashAlgorithm::Sha3_512,
    ];

    /// Upper-cased display name used as the key in digest results
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "MD5",
            HashAlgorithm::Sha1 => "SHA1",
            HashAlgorithm::Sha224 => "SHA224",
            HashAlgorithm::Sha256 => "SHA256",
            HashAlgorithm::Sha384 => "SHA384",
            HashAlgorithm::Sha512 => "SHA512",
            HashAlgorithm::Blake2b => "BLAKE2B",
            HashAlgorithm::Sha3_224 => "SHA3_224",
            HashAlgorithm::Sha3_256 => "SHA3_256",
            HashAlgorithm::Sha3_384 => "SHA3_384",
            HashAlgorithm::Sha3_512 => "SHA3_512",
        }
    }

    /// Position of the algorithm in the catalog
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }

    /// Registered implementation for this algorithm
    pub fn to_impl(&self) -> std::sync::Arc<dyn HashAlgorithmImpl> {
        AlgorithmRegistry::global().get(*self)
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for HashAlgorithm {
    type Err = Error;

    /// Accepts `SHA3_256`, `sha3-256`, `sha-256` and similar spellings
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_uppercase)
            .collect();

        match normalized.as_str() {
            "MD5" => Ok(HashAlgorithm::Md5),
            "SHA1" => Ok(HashAlgorithm::Sha1),
            "SHA224" => Ok(HashAlgorithm::Sha224),
            "SHA256" => Ok(HashAlgorithm::Sha256),
            "SHA384" => Ok(HashAlgorithm::Sha384),
            "SHA512" => Ok(HashAlgorithm::Sha512),
            "BLAKE2B" => Ok(HashAlgorithm::Blake2b),
            "SHA3224" => Ok(HashAlgorithm::Sha3_224),
            "SHA3256" => Ok(HashAlgorithm::Sha3_256),
            "SHA3384" => Ok(HashAlgorithm::Sha3_384),
            "SHA3512" => Ok(HashAlgorithm::Sha3_512),
            _ => Err(Error::Validation(ValidationError::unknown_algorithm(s))),
        }
    }
}

/// Hex digests for one input, keyed by algorithm in catalog order
///
/// A result always holds one digest per algorithm of the set that produced
/// it. It is only built by [`MultiHasher::finalize`], after the last chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DigestResult {
    digests: BTreeMap<HashAlgorithm, String>,
}

impl DigestResult {
    pub(crate) fn from_digests(digests: BTreeMap<HashAlgorithm, String>) -> Self {
        Self { digests }
    }

    /// Hex digest for an algorithm, if it was part of the set
    pub fn get(&self, algorithm: HashAlgorithm) -> Option<&str> {
        self.digests.get(&algorithm).map(String::as_str)
    }

    /// Iterate over `(algorithm, hex digest)` pairs in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (HashAlgorithm, &str)> {
        self.digests.iter().map(|(algo, hash)| (*algo, hash.as_str()))
    }

    pub fn algorithms(&self) -> impl Iterator<Item = HashAlgorithm> + '_ {
        self.digests.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.digests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }
}
