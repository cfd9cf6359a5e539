//! Evidence tree builder backed by a temporary directory

use fhash_core::{Result, error::IoError};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Builds a directory tree of evidence files that is removed on drop
pub struct EvidenceTreeBuilder {
    dir: TempDir,
    generated_files: Vec<PathBuf>,
}

impl EvidenceTreeBuilder {
    /// Create an empty tree in a fresh temporary directory
    pub fn new() -> Result<Self> {
        let dir = TempDir::new()?;
        Ok(Self {
            dir,
            generated_files: Vec::new(),
        })
    }

    /// The `case1` layout: `a.txt` holding `test` and an empty `sub/b.bin`
    pub fn case1() -> Result<Self> {
        let mut builder = Self::new()?;
        builder.add_file("a.txt", b"test")?;
        builder.add_file("sub/b.bin", b"")?;
        Ok(builder)
    }

    /// Root of the tree
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Regular files written so far, in creation order
    pub fn files(&self) -> &[PathBuf] {
        &self.generated_files
    }

    /// Write a file at a path relative to the root, creating parent directories
    pub fn add_file(&mut self, relative: &str, content: &[u8]) -> Result<PathBuf> {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| IoError::at_path(e, parent))?;
        }
        std::fs::write(&path, content).map_err(|e| IoError::at_path(e, &path))?;

        self.generated_files.push(path.clone());
        Ok(path)
    }

    /// Write a file of `size` pseudo-random bytes derived from `seed`
    pub fn add_deterministic_file(&mut self, relative: &str, size: usize, seed: u64) -> Result<PathBuf> {
        let mut state = seed;
        let content: Vec<u8> = (0..size)
            .map(|_| {
                state = state.wrapping_mul(1664525).wrapping_add(1013904223);
                (state >> 24) as u8
            })
            .collect();
        self.add_file(relative, &content)
    }

    /// Create an empty directory
    pub fn add_dir(&mut self, relative: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(relative);
        std::fs::create_dir_all(&path).map_err(|e| IoError::at_path(e, &path))?;
        Ok(path)
    }

    /// Create a symbolic link at `relative` pointing to `target`
    #[cfg(unix)]
    pub fn add_symlink(&mut self, relative: &str, target: &Path) -> Result<PathBuf> {
        let path = self.dir.path().join(relative);
        std::os::unix::fs::symlink(target, &path).map_err(|e| IoError::at_path(e, &path))?;
        Ok(path)
    }

    /// Remove all permissions from a file
    #[cfg(unix)]
    pub fn make_unreadable(&self, path: &Path) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o000))
            .map_err(|e| IoError::at_path(e, path))?;
        Ok(())
    }
}
