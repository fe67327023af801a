//! Export orchestrator for artifacts and reports.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::ExportFormat;
use crate::reporting::artifacts::{ArtifactManager, ArtifactPaths};
use crate::reporting::reports::MarkdownReportGenerator;
use crate::result::AnalysisResult;

pub fn export_run_with_report(
    output_dir: impl AsRef<Path>,
    result: &AnalysisResult,
    format: ExportFormat,
    include_report: bool,
) -> Result<ArtifactPaths> {
    let manager = ArtifactManager::new(output_dir, format)?;
    let mut paths = manager.save_run(result)?;

    if include_report {
        let report_path = manager.output_dir().join("report.md");
        let report = MarkdownReportGenerator.generate(result);
        std::fs::write(&report_path, report)
            .with_context(|| format!("Failed to write report {}", report_path.display()))?;
        paths.report_markdown = Some(report_path);
    }

    Ok(paths)
}
