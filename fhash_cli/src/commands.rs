//! Command implementations shared by the binary and its tests

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use fhash_core::{
    AbortSignal, CATALOG_VERSION, CaseReport, Digester, HashAlgorithm, HashOutcome, HashRequest,
    report_file_name,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Report file layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
        }
    }
}

/// Raise `signal` on Ctrl-C for the rest of the process
///
/// Running digests stop at their next check. A second Ctrl-C exits at once.
pub fn abort_on_interrupt(signal: AbortSignal) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        log::debug!("Interrupt received, aborting");
        signal.abort();

        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(130);
        }
    });
}

/// Fail once the abort signal has been raised
pub fn ensure_not_aborted(signal: &AbortSignal) -> Result<()> {
    if signal.is_aborted() {
        anyhow::bail!("Interrupted");
    }
    Ok(())
}

/// Run a hash request on the blocking pool
///
/// An abort raised on the digester's signal fails the request as cancelled
/// instead of leaving a partial result behind.
pub async fn run_request(digester: Digester, request: HashRequest) -> Result<HashOutcome> {
    let kind = request.kind();
    let outcome = tokio::task::spawn_blocking(move || digester.execute(request))
        .await
        .context("Hashing task panicked")?;

    outcome.with_context(|| format!("Failed to hash {kind}"))
}

#[derive(Debug, Serialize)]
struct AlgorithmInfo {
    name: &'static str,
    id: &'static str,
    digest_bytes: usize,
}

#[derive(Debug, Serialize)]
struct AlgorithmCatalog {
    catalog_version: u32,
    algorithms: Vec<AlgorithmInfo>,
}

fn catalog() -> AlgorithmCatalog {
    let algorithms = HashAlgorithm::ALL
        .iter()
        .map(|algo| {
            let implementation = algo.to_impl();
            AlgorithmInfo {
                name: algo.as_str(),
                id: implementation.id(),
                digest_bytes: implementation.digest_len(),
            }
        })
        .collect();

    AlgorithmCatalog {
        catalog_version: CATALOG_VERSION,
        algorithms,
    }
}

/// Catalog listing as text or JSON
pub fn algorithm_listing(json: bool) -> Result<String> {
    let catalog = catalog();
    if json {
        return Ok(serde_json::to_string_pretty(&catalog)?);
    }

    let mut output = format!("Algorithm catalog v{}\n", catalog.catalog_version);
    for info in &catalog.algorithms {
        output.push_str(&format!(
            "  {:<8}  {:>2} bytes  ({})\n",
            info.name, info.digest_bytes, info.id
        ));
    }
    Ok(output)
}

/// Render and write a report, returning the path written
///
/// With no explicit `output`, the file lands in `output_dir` under its
/// generated name.
pub fn write_report(
    report: &CaseReport,
    format: ReportFormat,
    output: Option<&Path>,
    output_dir: &Path,
    generated_at: DateTime<Local>,
) -> Result<PathBuf> {
    report.ensure_populated()?;

    let path = match output {
        Some(path) => path.to_path_buf(),
        None => output_dir.join(report_file_name(
            &report.case.case_id,
            generated_at,
            format.extension(),
        )),
    };

    let contents = match format {
        ReportFormat::Text => report.render_text(),
        ReportFormat::Json => serde_json::to_string_pretty(report)?,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))?;

    log::debug!("Wrote {format:?} report to {}", path.display());
    Ok(path)
}
