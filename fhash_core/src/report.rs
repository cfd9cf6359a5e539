//! Case report model
//!
//! A [`CaseReport`] collects the latest text, file and directory outcomes for
//! one case together with the investigator's case metadata. Page layout is the
//! renderer's business; this module provides the data, the report file name
//! and a plain-text rendering.

use crate::digester::{FileHashRecord, TextDigest};
use crate::format::format_size;
use crate::hashing::{CATALOG_VERSION, DigestResult};
use crate::metadata::FileMetadata;
use crate::request::HashOutcome;
use crate::tree::{DirectorySummary, TreeDigest};
use crate::{Result, error::ValidationError};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Timestamp layout used for the case date
pub const CASE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp layout embedded in report file names
pub const FILE_NAME_DATE_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Who is reporting on which case, and when
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseMetadata {
    pub investigator_name: String,
    pub case_id: String,
    pub case_description: String,
    pub date_time: String,
}

impl CaseMetadata {
    /// Case metadata stamped with the current local time
    pub fn new(investigator_name: &str, case_id: &str, case_description: &str) -> Result<Self> {
        Self::at(investigator_name, case_id, case_description, Local::now())
    }

    /// Case metadata stamped with the given time
    pub fn at(
        investigator_name: &str,
        case_id: &str,
        case_description: &str,
        when: DateTime<Local>,
    ) -> Result<Self> {
        if investigator_name.trim().is_empty() {
            return Err(ValidationError::empty_input("investigator_name").into());
        }
        if case_id.trim().is_empty() {
            return Err(ValidationError::empty_input("case_id").into());
        }

        Ok(Self {
            investigator_name: investigator_name.trim().to_string(),
            case_id: case_id.trim().to_string(),
            case_description: case_description.trim().to_string(),
            date_time: when.format(CASE_DATE_FORMAT).to_string(),
        })
    }
}

/// Everything a renderer needs for one report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseReport {
    pub organization: String,
    pub case: CaseMetadata,
    pub catalog_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_results: Option<TextDigest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_results: Option<FileHashRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir_results: Option<TreeDigest>,
}

impl CaseReport {
    pub fn new(organization: &str, case: CaseMetadata) -> Self {
        Self {
            organization: organization.to_string(),
            case,
            catalog_version: CATALOG_VERSION,
            text_results: None,
            file_results: None,
            dir_results: None,
        }
    }

    /// Store an outcome in its slot, replacing any earlier one of the same type
    pub fn record(&mut self, outcome: HashOutcome) {
        match outcome {
            HashOutcome::Text(text) => self.text_results = Some(text),
            HashOutcome::File(file) => self.file_results = Some(file),
            HashOutcome::Directory(tree) => self.dir_results = Some(tree),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text_results.is_none() && self.file_results.is_none() && self.dir_results.is_none()
    }

    /// Fail when there is nothing to report
    pub fn ensure_populated(&self) -> Result<()> {
        if self.is_empty() {
            return Err(ValidationError::empty_input("report_data").into());
        }
        Ok(())
    }

    /// Plain-text rendering with the same sections as the printed report
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("{}\n", self.organization));
        out.push_str("Forensic Hashing Report\n");
        out.push_str(&format!("{}\n\n", "=".repeat(72)));

        out.push_str("CASE INFORMATION\n");
        out.push_str(&format!(
            "  Investigator Name: {}\n",
            self.case.investigator_name
        ));
        out.push_str(&format!("  Case ID:           {}\n", self.case.case_id));
        out.push_str(&format!(
            "  Case Description:  {}\n",
            self.case.case_description
        ));
        out.push_str(&format!("  Date & Time:       {}\n\n", self.case.date_time));

        out.push_str("Report Overview\n");
        out.push_str(&format!(
            "  Cryptographic digests computed over the submitted evidence \
             (algorithm catalog v{}).\n\n",
            self.catalog_version
        ));

        if let Some(text) = &self.text_results {
            out.push_str("Text Hashing Results\n");
            out.push_str(&format!("  Original Text: {}\n", text.text));
            push_hashes(&mut out, &text.hashes);
            out.push('\n');
        }

        if let Some(file) = &self.file_results {
            out.push_str("File Hashing Results\n");
            push_metadata(&mut out, &file.metadata);
            push_hashes(&mut out, &file.hashes);
            out.push('\n');
        }

        if let Some(tree) = &self.dir_results {
            out.push_str("Directory Hashing Results\n");
            push_summary(&mut out, &tree.summary);
            out.push('\n');
            for record in &tree.results {
                out.push_str(&format!("  File Details: {}\n", record.metadata.name));
                push_metadata(&mut out, &record.metadata);
                push_hashes(&mut out, &record.hashes);
                out.push('\n');
            }
        }

        out.push_str("Investigation Conclusion\n");
        out.push_str(
            "  The digests above were computed by the investigator named in this report \
             and identify the evidence as it existed at the time of hashing.\n\n",
        );
        out.push_str("  Investigator Signature: ________________________   Date: ____________\n");
        out.push_str("  Witness Signature:      ________________________   Date: ____________\n");

        out
    }
}

fn push_hashes(out: &mut String, hashes: &DigestResult) {
    for (algo, hash) in hashes.iter() {
        out.push_str(&format!("    {algo:<8}  {hash}\n"));
    }
}

fn push_metadata(out: &mut String, metadata: &FileMetadata) {
    out.push_str(&format!("    File Name:     {}\n", metadata.name));
    out.push_str(&format!(
        "    File Size:     {} bytes ({})\n",
        metadata.size,
        format_size(metadata.size)
    ));
    out.push_str(&format!("    File Path:     {}\n", metadata.path.display()));
    out.push_str(&format!("    Last Modified: {}\n", metadata.modified));
}

fn push_summary(out: &mut String, summary: &DirectorySummary) {
    out.push_str(&format!(
        "    Total Files Processed: {}\n",
        summary.total_files
    ));
    out.push_str(&format!(
        "    Total Directory Size:  {}\n",
        format_size(summary.total_size)
    ));
}

/// Case id reduced to ASCII-safe file name characters
///
/// Only alphanumerics and `_` survive.
pub fn safe_case_id(case_id: &str) -> String {
    case_id
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// `Forensic_Report_<case>_<timestamp>.<extension>`
pub fn report_file_name(case_id: &str, generated_at: DateTime<Local>, extension: &str) -> String {
    format!(
        "Forensic_Report_{}_{}.{}",
        safe_case_id(case_id),
        generated_at.format(FILE_NAME_DATE_FORMAT),
        extension.trim_start_matches('.')
    )
}
