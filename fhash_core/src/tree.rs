//! Recursive directory digests
//!
//! A walk never fails because of a single entry: files that cannot be
//! stat'ed or read, symbolic links and special files are left out of both the
//! result list and the summary. Only a missing root, a root that is not a
//! directory, or an abort signal end the walk with an error.

use crate::digester::{Digester, FileHashRecord};
use crate::metadata::extension_of;
use crate::{Result, error::IoError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use walkdir::WalkDir;

/// File extensions to leave out of a walk
///
/// Entries are stored with a leading dot; `bin` and `.bin` are the same entry.
/// Matching is case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ExcludedExtensions {
    extensions: BTreeSet<String>,
}

impl ExcludedExtensions {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, extension: &str) {
        let extension = extension.trim();
        if extension.is_empty() {
            return;
        }
        if extension.starts_with('.') {
            self.extensions.insert(extension.to_string());
        } else {
            self.extensions.insert(format!(".{extension}"));
        }
    }

    /// Whether the file's extension is excluded
    pub fn is_excluded(&self, path: &Path) -> bool {
        !self.extensions.is_empty() && self.extensions.contains(&extension_of(path))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ExcludedExtensions {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut excluded = Self::none();
        for extension in iter {
            excluded.insert(extension.as_ref());
        }
        excluded
    }
}

impl From<Vec<String>> for ExcludedExtensions {
    fn from(extensions: Vec<String>) -> Self {
        extensions.into_iter().collect()
    }
}

impl From<ExcludedExtensions> for Vec<String> {
    fn from(excluded: ExcludedExtensions) -> Self {
        excluded.extensions.into_iter().collect()
    }
}

/// Totals over the files that made it into a walk's results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorySummary {
    #[serde(rename = "Total Files Processed")]
    pub total_files: u64,
    #[serde(rename = "Total Directory Size")]
    pub total_size: u64,
}

impl DirectorySummary {
    fn record(&mut self, size: u64) {
        self.total_files += 1;
        self.total_size += size;
    }
}

/// Per-file records in traversal order plus their summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeDigest {
    pub results: Vec<FileHashRecord>,
    pub summary: DirectorySummary,
}

impl Digester {
    /// Digest every regular file under `root`
    ///
    /// Entries are visited in lexical order of their names at every level.
    pub fn digest_tree(&self, root: &Path, excluded: &ExcludedExtensions) -> Result<TreeDigest> {
        let root_metadata = std::fs::metadata(root).map_err(|e| IoError::at_path(e, root))?;
        if !root_metadata.is_dir() {
            return Err(IoError::not_a_directory(root).into());
        }

        let mut tree = TreeDigest::default();
        let walker = WalkDir::new(root).follow_links(false).sort_by_file_name();

        for entry in walker {
            self.check_abort()?;

            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::debug!("Skipping unreadable entry: {e}");
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                continue;
            }

            let path = entry.path();
            if !file_type.is_file() {
                log::debug!("Skipping non-regular file: {}", path.display());
                continue;
            }

            if excluded.is_excluded(path) {
                log::trace!("Skipping excluded extension: {}", path.display());
                continue;
            }

            match self.hash_file(path) {
                Ok(record) => {
                    tree.summary.record(record.metadata.size);
                    tree.results.push(record);
                }
                Err(e) if e.is_cancelled() => return Err(e),
                Err(e) => log::debug!("Skipping {}: {e}", path.display()),
            }
        }

        log::debug!(
            "Digested {} files ({} bytes) under {}",
            tree.summary.total_files,
            tree.summary.total_size,
            root.display()
        );
        Ok(tree)
    }
}
