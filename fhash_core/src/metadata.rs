//! File metadata extraction
//!
//! Metadata is read from the filesystem at the moment a file is hashed and is
//! never cached. The serialized field names match the report schema.

use crate::{Result, error::IoError};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize, Serializer};
use std::path::{Path, PathBuf};

/// Timestamp layout used for `Last Modified Time`
pub const MODIFIED_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Descriptive attributes of one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    #[serde(rename = "File Name")]
    pub name: String,
    #[serde(rename = "File Size")]
    pub size: u64,
    /// Serialized lossily so a non UTF-8 name never fails the whole result
    #[serde(rename = "File Path", serialize_with = "serialize_lossy_path")]
    pub path: PathBuf,
    #[serde(rename = "Last Modified Time")]
    pub modified: String,
    /// Extension with its leading dot, empty when the file has none
    #[serde(rename = "File Type/Extension")]
    pub extension: String,
}

/// Source of [`FileMetadata`], injected into the digester
pub trait MetadataExtractor: Send + Sync {
    /// Read metadata for a regular file
    fn extract(&self, path: &Path) -> Result<FileMetadata>;
}

/// Reads metadata with `std::fs`, following symbolic links
#[derive(Debug, Clone, Copy, Default)]
pub struct FsMetadataExtractor;

impl MetadataExtractor for FsMetadataExtractor {
    fn extract(&self, path: &Path) -> Result<FileMetadata> {
        let metadata = std::fs::metadata(path).map_err(|e| io_error(e, path))?;

        if !metadata.is_file() {
            return Err(IoError::not_a_file(path).into());
        }

        let modified = metadata.modified().map_err(|e| io_error(e, path))?;
        let absolute = std::path::absolute(path).map_err(|e| io_error(e, path))?;

        Ok(FileMetadata {
            name: file_name(path),
            size: metadata.len(),
            path: absolute,
            modified: DateTime::<Local>::from(modified)
                .format(MODIFIED_TIME_FORMAT)
                .to_string(),
            extension: extension_of(path),
        })
    }
}

/// Extension of a path with its leading dot, or an empty string
///
/// Dot-files such as `.bashrc` have no extension.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn serialize_lossy_path<P: AsRef<Path>, S: Serializer>(
    path: &P,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.as_ref().to_string_lossy())
}

fn io_error(source: std::io::Error, path: &Path) -> crate::Error {
    IoError::at_path(source, path).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IoErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of(Path::new("a.txt")), ".txt");
        assert_eq!(extension_of(Path::new("archive.tar.gz")), ".gz");
        assert_eq!(extension_of(Path::new("README")), "");
        assert_eq!(extension_of(Path::new(".bashrc")), "");
        assert_eq!(extension_of(Path::new("dir/IMAGE.JPG")), ".JPG");
    }

    #[test]
    fn test_extract_regular_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, b"test").unwrap();

        let metadata = FsMetadataExtractor.extract(&path).unwrap();

        assert_eq!(metadata.name, "a.txt");
        assert_eq!(metadata.size, 4);
        assert!(metadata.path.is_absolute());
        assert_eq!(metadata.extension, ".txt");
        assert_eq!(metadata.modified.len(), "2024-01-01 00:00:00".len());
    }

    #[test]
    fn test_extract_missing_file() {
        let dir = TempDir::new().unwrap();
        let error = FsMetadataExtractor
            .extract(&dir.path().join("gone.bin"))
            .unwrap_err();

        match error {
            crate::Error::Io(io) => assert_eq!(io.kind, IoErrorKind::FileNotFound),
            other => panic!("Expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_extract_directory_is_not_a_file() {
        let dir = TempDir::new().unwrap();
        let error = FsMetadataExtractor.extract(dir.path()).unwrap_err();

        match error {
            crate::Error::Io(io) => assert_eq!(io.kind, IoErrorKind::NotAFile),
            other => panic!("Expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_serialized_field_names() {
        let metadata = FileMetadata {
            name: "a.txt".to_string(),
            size: 4,
            path: PathBuf::from("/case1/a.txt"),
            modified: "2024-05-01 10:00:00".to_string(),
            extension: ".txt".to_string(),
        };
        let json = serde_json::to_value(&metadata).unwrap();

        assert_eq!(json["File Name"], "a.txt");
        assert_eq!(json["File Size"], 4);
        assert_eq!(json["File Path"], "/case1/a.txt");
        assert_eq!(json["Last Modified Time"], "2024-05-01 10:00:00");
        assert_eq!(json["File Type/Extension"], ".txt");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_path_serializes_lossily() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new("/case1").join(OsStr::from_bytes(b"bad\xffname.bin"));
        let metadata = FileMetadata {
            name: "bad\u{FFFD}name.bin".to_string(),
            size: 0,
            path,
            modified: "2024-05-01 10:00:00".to_string(),
            extension: ".bin".to_string(),
        };
        let json = serde_json::to_value(&metadata).unwrap();

        assert_eq!(json["File Path"], "/case1/bad\u{FFFD}name.bin");
    }
}
