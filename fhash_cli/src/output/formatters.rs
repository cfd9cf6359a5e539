use super::OutputFormatter;
use anyhow::Result;
use colored::*;
use fhash_core::{
    AlgorithmSet, DigestResult, FileHashRecord, FileMetadata, HashOutcome, format_size,
};

/// Text formatter for human-readable output
pub struct TextFormatter {
    use_color: bool,
}

impl TextFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn colorize(&self, text: &str, color: fn(&str) -> ColoredString) -> String {
        if self.use_color {
            color(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn push_hashes(&self, output: &mut String, hashes: &DigestResult) {
        for (algo, hash) in hashes.iter() {
            let algo_str = self.colorize(&format!("{algo:<8}"), |s| s.yellow());
            let hash_str = self.colorize(hash, |s| s.cyan());
            output.push_str(&format!("  {algo_str} {hash_str}\n"));
        }
    }

    fn push_metadata(&self, output: &mut String, metadata: &FileMetadata) {
        output.push_str(&format!("File: {}\n", metadata.path.display()));
        output.push_str(&format!(
            "Size: {} ({} bytes)\n",
            format_size(metadata.size),
            metadata.size
        ));
        output.push_str(&format!("Modified: {}\n", metadata.modified));
        if !metadata.extension.is_empty() {
            output.push_str(&format!("Type: {}\n", metadata.extension));
        }
    }

    fn push_record(&self, output: &mut String, record: &FileHashRecord) {
        self.push_metadata(output, &record.metadata);
        output.push_str("Hashes:\n");
        self.push_hashes(output, &record.hashes);
    }
}

impl OutputFormatter for TextFormatter {
    fn format_outcome(&self, outcome: &HashOutcome) -> Result<String> {
        let mut output = String::new();

        match outcome {
            HashOutcome::Text(text) => {
                output.push_str(&format!("Text: {}\n", text.text));
                output.push_str("Hashes:\n");
                self.push_hashes(&mut output, &text.hashes);
            }
            HashOutcome::File(record) => self.push_record(&mut output, record),
            HashOutcome::Directory(tree) => {
                for record in &tree.results {
                    self.push_record(&mut output, record);
                    output.push('\n');
                }
                output.push_str(&self.colorize("Summary:", |s| s.bold().green()));
                output.push('\n');
                output.push_str(&format!(
                    "  Total Files Processed: {}\n",
                    tree.summary.total_files
                ));
                output.push_str(&format!(
                    "  Total Directory Size: {} ({} bytes)\n",
                    format_size(tree.summary.total_size),
                    tree.summary.total_size
                ));
            }
        }

        Ok(output)
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_outcome(&self, outcome: &HashOutcome) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(outcome)?)
        } else {
            Ok(serde_json::to_string(outcome)?)
        }
    }
}

/// CSV formatter for tabular output
///
/// File and directory outcomes share one layout; text outcomes get a
/// `text` column in place of the metadata columns.
pub struct CsvFormatter {
    algorithms: AlgorithmSet,
}

impl CsvFormatter {
    pub fn new(algorithms: AlgorithmSet) -> Self {
        Self { algorithms }
    }

    fn headers(&self, leading: &[&str]) -> Vec<String> {
        leading
            .iter()
            .map(|h| h.to_string())
            .chain(self.algorithms.algorithms().iter().map(|a| a.to_string()))
            .collect()
    }

    fn hash_columns(&self, hashes: &DigestResult) -> Vec<String> {
        self.algorithms
            .algorithms()
            .iter()
            .map(|algo| hashes.get(*algo).unwrap_or_default().to_string())
            .collect()
    }

    fn record_row(&self, record: &FileHashRecord) -> Vec<String> {
        let metadata = &record.metadata;
        let mut row = vec![
            metadata.path.to_string_lossy().to_string(),
            metadata.name.clone(),
            metadata.size.to_string(),
            metadata.modified.clone(),
            metadata.extension.clone(),
        ];
        row.extend(self.hash_columns(&record.hashes));
        row
    }
}

const FILE_COLUMNS: [&str; 5] = ["path", "name", "size", "modified", "extension"];

impl OutputFormatter for CsvFormatter {
    fn format_outcome(&self, outcome: &HashOutcome) -> Result<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);

        match outcome {
            HashOutcome::Text(text) => {
                wtr.write_record(self.headers(&["text"]))?;
                let mut row = vec![text.text.clone()];
                row.extend(self.hash_columns(&text.hashes));
                wtr.write_record(row)?;
            }
            HashOutcome::File(record) => {
                wtr.write_record(self.headers(&FILE_COLUMNS))?;
                wtr.write_record(self.record_row(record))?;
            }
            HashOutcome::Directory(tree) => {
                wtr.write_record(self.headers(&FILE_COLUMNS))?;
                for record in &tree.results {
                    wtr.write_record(self.record_row(record))?;
                }
            }
        }

        let data = wtr.into_inner()?;
        Ok(String::from_utf8(data)?)
    }
}
