//! Import command handler
//!
//! Checks a CSV file locally and, unless only a check was asked for, sends it
//! to the bulk upload endpoint.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use super::players::stdout_error;
use crate::cli::render;
use crate::error::{AppError, AppResult};
use crate::external::players::{CsvUploadReport, PlayerApi};
use crate::import::CsvPreflight;

/// Handler for the import command
pub struct ImportCommandHandler {
    api: Arc<dyn PlayerApi>,
    preflight: CsvPreflight,
}

impl ImportCommandHandler {
    pub fn new(api: Arc<dyn PlayerApi>) -> AppResult<Self> {
        Ok(Self {
            api,
            preflight: CsvPreflight::new()?,
        })
    }

    /// Execute the import command
    ///
    /// # Errors
    /// - the file cannot be read, is empty or lacks a required column
    /// - `check_only` and some rows have issues
    /// - the upload fails
    pub async fn execute(
        &self,
        path: &Path,
        check_only: bool,
        out: &mut impl Write,
    ) -> AppResult<Option<CsvUploadReport>> {
        let contents =
            std::fs::read(path).map_err(|e| AppError::io(path.display().to_string(), e))?;
        let report = self.preflight.check(&contents)?;

        if check_only {
            write!(out, "{}", render::preflight(&report)).map_err(stdout_error)?;
            if report.is_clean() {
                return Ok(None);
            }
            return Err(AppError::Validation {
                field: path.display().to_string(),
                reason: format!("{} rows with issues", report.rows_with_issues()),
            });
        }

        // The service reports failed rows itself; local row issues only warn.
        for issue in &report.issues {
            tracing::warn!(line = issue.line, column = issue.column, "{}", issue.message);
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "players.csv".to_string());
        tracing::info!(file = %file_name, rows = report.rows, "Uploading CSV");

        let uploaded = self.api.bulk_upload(&file_name, contents).await?;
        writeln!(out, "{}", uploaded.summary()).map_err(stdout_error)?;
        if !uploaded.failed_to_create.is_empty() {
            let rows: Vec<String> = uploaded
                .failed_to_create
                .iter()
                .map(u32::to_string)
                .collect();
            writeln!(out, "Failed rows: {}", rows.join(", ")).map_err(stdout_error)?;
        }
        Ok(Some(uploaded))
    }
}
