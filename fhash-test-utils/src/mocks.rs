//! Mock implementations for engine seams

use fhash_core::metadata::{FileMetadata, FsMetadataExtractor, MetadataExtractor, extension_of};
use fhash_core::{Result, error::IoError};
use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Metadata extractor with a fixed modification time
///
/// Size and name still come from the filesystem, so digests and metadata stay
/// consistent while report output becomes reproducible.
#[derive(Debug, Clone)]
pub struct FixedMetadataExtractor {
    modified: String,
}

impl FixedMetadataExtractor {
    pub fn new(modified: &str) -> Self {
        Self {
            modified: modified.to_string(),
        }
    }
}

impl Default for FixedMetadataExtractor {
    fn default() -> Self {
        Self::new("2024-01-01 00:00:00")
    }
}

impl MetadataExtractor for FixedMetadataExtractor {
    fn extract(&self, path: &Path) -> Result<FileMetadata> {
        let metadata = std::fs::metadata(path).map_err(|e| IoError::at_path(e, path))?;
        if !metadata.is_file() {
            return Err(IoError::not_a_file(path).into());
        }

        Ok(FileMetadata {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            size: metadata.len(),
            path: path.to_path_buf(),
            modified: self.modified.clone(),
            extension: extension_of(path),
        })
    }
}

/// Metadata extractor that fails for chosen paths
///
/// Every other path is read from the filesystem.
#[derive(Debug, Clone, Default)]
pub struct FailingMetadataExtractor {
    failing: HashSet<PathBuf>,
}

impl FailingMetadataExtractor {
    pub fn for_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            failing: paths.into_iter().map(Into::into).collect(),
        }
    }
}

impl MetadataExtractor for FailingMetadataExtractor {
    fn extract(&self, path: &Path) -> Result<FileMetadata> {
        if self.failing.contains(path) {
            let source = std::io::Error::other("simulated metadata failure");
            return Err(IoError::at_path(source, path).into());
        }
        FsMetadataExtractor.extract(path)
    }
}

/// Reader that yields `good_bytes` zero bytes and then fails
#[derive(Debug)]
pub struct FailingReader {
    remaining: usize,
}

impl FailingReader {
    pub fn after(good_bytes: usize) -> Self {
        Self {
            remaining: good_bytes,
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.remaining == 0 {
            return Err(std::io::Error::other("simulated read failure"));
        }
        let n = buf.len().min(self.remaining);
        buf[..n].fill(0);
        self.remaining -= n;
        Ok(n)
    }
}
