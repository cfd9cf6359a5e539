//! Hash requests as submitted by a front end, and their outcomes
//!
//! This is the validation boundary for user input: an empty text request is
//! rejected here, while [`Digester::digest_text`] itself accepts the empty
//! string.

use crate::digester::{Digester, FileHashRecord, TextDigest};
use crate::tree::{ExcludedExtensions, TreeDigest};
use crate::{Result, error::ValidationError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One unit of work for the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashRequest {
    Text(String),
    File(PathBuf),
    Directory {
        root: PathBuf,
        excluded: ExcludedExtensions,
    },
}

impl HashRequest {
    /// Short label used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            HashRequest::Text(_) => "text",
            HashRequest::File(_) => "file",
            HashRequest::Directory { .. } => "directory",
        }
    }
}

/// Completed result of a [`HashRequest`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HashOutcome {
    Text(TextDigest),
    File(FileHashRecord),
    Directory(TreeDigest),
}

impl Digester {
    /// Validate and run a request to completion
    pub fn execute(&self, request: HashRequest) -> Result<HashOutcome> {
        let kind = request.kind();

        let outcome = match request {
            HashRequest::Text(text) => {
                if text.is_empty() {
                    return Err(ValidationError::empty_input("text_input").into());
                }
                HashOutcome::Text(self.hash_text(&text))
            }
            HashRequest::File(path) => HashOutcome::File(self.hash_file(&path)?),
            HashRequest::Directory { root, excluded } => {
                HashOutcome::Directory(self.digest_tree(&root, &excluded)?)
            }
        };

        log::debug!("Completed {kind} hash request");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use tempfile::TempDir;

    #[test]
    fn test_empty_text_request_is_rejected() {
        let error = Digester::new()
            .execute(HashRequest::Text(String::new()))
            .unwrap_err();

        assert!(matches!(
            error,
            Error::Validation(ValidationError::EmptyInput { .. })
        ));
    }

    #[test]
    fn test_text_request_keeps_text() {
        let outcome = Digester::new()
            .execute(HashRequest::Text("test".to_string()))
            .unwrap();

        match outcome {
            HashOutcome::Text(text) => {
                assert_eq!(text.text, "test");
                assert_eq!(text.hashes.len(), 11);
            }
            other => panic!("Expected text outcome, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_request_fails() {
        let dir = TempDir::new().unwrap();
        let result = Digester::new().execute(HashRequest::File(dir.path().join("nope")));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_outcome_is_tagged_by_type() {
        let outcome = Digester::new()
            .execute(HashRequest::Text("abc".to_string()))
            .unwrap();
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["type"], "text");
        assert_eq!(json["text"], "abc");
        assert_eq!(
            json["hashes"]["MD5"],
            "900150983cd24fb0d6963f7d28e17f72"
        );
    }
}
