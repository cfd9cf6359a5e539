//! Text, stream and file digest computation
//!
//! A [`Digester`] holds only immutable configuration. Every call allocates its
//! own hash states and buffer, so one digester can serve concurrent callers.

use crate::hashing::{AlgorithmSet, DigestResult, MultiHasher};
use crate::metadata::{FileMetadata, FsMetadataExtractor, MetadataExtractor};
use crate::{
    DigestConfig, Error, Result,
    error::{InternalError, IoError, ValidationError},
};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Default read size for streamed inputs
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Cooperative cancellation flag checked between chunks and between files
#[derive(Debug, Clone, Default)]
pub struct AbortSignal {
    aborted: Arc<AtomicBool>,
}

impl AbortSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that running computations stop at their next check
    pub fn abort(&self) {
        self.aborted.store(true, Ordering::SeqCst);
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::SeqCst)
    }
}

/// One file's metadata paired with its digests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHashRecord {
    pub metadata: FileMetadata,
    pub hashes: DigestResult,
}

/// Digests of a text input, kept with the text for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextDigest {
    pub text: String,
    pub hashes: DigestResult,
}

/// Multi-algorithm digest engine
#[derive(Clone)]
pub struct Digester {
    algorithms: AlgorithmSet,
    chunk_size: usize,
    extractor: Arc<dyn MetadataExtractor>,
    abort: Option<AbortSignal>,
}

impl std::fmt::Debug for Digester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Digester")
            .field("algorithms", &self.algorithms)
            .field("chunk_size", &self.chunk_size)
            .field("abortable", &self.abort.is_some())
            .finish()
    }
}

impl Default for Digester {
    fn default() -> Self {
        Self::new()
    }
}

impl Digester {
    /// Full catalog, 8 KiB chunks, metadata from the local filesystem
    pub fn new() -> Self {
        Self {
            algorithms: AlgorithmSet::catalog(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            extractor: Arc::new(FsMetadataExtractor),
            abort: None,
        }
    }

    /// Build a digester from configuration
    pub fn from_config(config: &DigestConfig) -> Result<Self> {
        let algorithms = match &config.algorithms {
            Some(names) => AlgorithmSet::from_names(names)?,
            None => AlgorithmSet::catalog(),
        };

        Self::new()
            .with_algorithms(algorithms)
            .with_chunk_size(config.chunk_size)
    }

    /// Set the read size used for files and readers
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(
                ValidationError::invalid_parameter("chunk_size", "must be greater than 0").into(),
            );
        }
        self.chunk_size = chunk_size;
        Ok(self)
    }

    pub fn with_algorithms(mut self, algorithms: AlgorithmSet) -> Self {
        self.algorithms = algorithms;
        self
    }

    /// Replace the metadata source used by [`Digester::hash_file`] and tree walks
    pub fn with_metadata_extractor(mut self, extractor: Arc<dyn MetadataExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_abort_signal(mut self, signal: AbortSignal) -> Self {
        self.abort = Some(signal);
        self
    }

    pub fn algorithms(&self) -> &AlgorithmSet {
        &self.algorithms
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Fail with [`InternalError::Cancelled`] once the abort signal is raised
    pub(crate) fn check_abort(&self) -> Result<()> {
        match &self.abort {
            Some(signal) if signal.is_aborted() => Err(InternalError::Cancelled.into()),
            _ => Ok(()),
        }
    }

    /// Digest the UTF-8 encoding of a string
    pub fn digest_text(&self, text: &str) -> DigestResult {
        self.digest_bytes(text.as_bytes())
    }

    /// Digest an in-memory byte sequence with a single update per algorithm
    pub fn digest_bytes(&self, data: &[u8]) -> DigestResult {
        let mut hasher = MultiHasher::new(&self.algorithms);
        hasher.update(data);
        hasher.finalize()
    }

    /// Digest everything a reader yields, one chunk at a time
    ///
    /// Every algorithm sees a chunk before the next one is read. Any read
    /// failure discards all hash states.
    pub fn digest_reader<R: Read>(&self, mut reader: R) -> Result<DigestResult> {
        let mut hasher = MultiHasher::new(&self.algorithms);
        let mut buffer = vec![0u8; self.chunk_size];

        loop {
            self.check_abort()?;

            let n = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };

            hasher.update(&buffer[..n]);
        }

        Ok(hasher.finalize())
    }

    /// Digest a file in bounded memory, reading it exactly once
    pub fn digest_file(&self, path: &Path) -> Result<DigestResult> {
        let file = File::open(path).map_err(|e| IoError::at_path(e, path))?;

        let result = self.digest_reader(file).map_err(|e| match e {
            Error::Io(io) => Error::Io(io.with_path(path)),
            other => other,
        })?;

        log::trace!("Digested {} with {} algorithms", path.display(), result.len());
        Ok(result)
    }

    /// Read metadata, then digest the file
    pub fn hash_file(&self, path: &Path) -> Result<FileHashRecord> {
        let metadata = self.extractor.extract(path)?;
        let hashes = self.digest_file(path)?;
        Ok(FileHashRecord { metadata, hashes })
    }

    /// Digest a text and keep it alongside its hashes
    pub fn hash_text(&self, text: &str) -> TextDigest {
        TextDigest {
            text: text.to_string(),
            hashes: self.digest_text(text),
        }
    }
}
