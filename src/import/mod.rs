//! Local checks on a player CSV before it is sent to the bulk upload endpoint.
//!
//! The service parses the file itself and reports per-row failures, so only a
//! missing header column blocks an upload here. Row problems are collected as
//! [`RowIssue`]s for the user to review.

use std::fmt;

use csv::{ReaderBuilder, StringRecord, Trim};
use jiff::civil::Date;
use regex::Regex;

use crate::error::{AppError, AppResult};
use crate::models::{Position, normalize_nationality};

pub const REQUIRED_COLUMNS: [&str; 6] = [
    "firstName",
    "lastName",
    "dateOfBirth",
    "height",
    "nationalities",
    "positions",
];

/// Characters accepted between values of a multi-valued cell.
const LIST_SEPARATORS: &str = r"[|/;#!%]";

/// A problem found in one data row. Lines are numbered from 1 with the
/// header on line 1, matching the row numbers in the service's upload report.
#[derive(Debug, Clone, PartialEq)]
pub struct RowIssue {
    pub line: u64,
    pub column: &'static str,
    pub message: String,
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.column, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreflightReport {
    pub rows: usize,
    pub issues: Vec<RowIssue>,
}

impl PreflightReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of distinct rows with at least one issue.
    pub fn rows_with_issues(&self) -> usize {
        let mut lines: Vec<u64> = self.issues.iter().map(|i| i.line).collect();
        lines.dedup();
        lines.len()
    }
}

/// Header and row checker for player CSV files.
#[derive(Debug, Clone)]
pub struct CsvPreflight {
    separator: Regex,
}

impl CsvPreflight {
    pub fn new() -> AppResult<Self> {
        let separator = Regex::new(LIST_SEPARATORS).map_err(|e| AppError::Internal {
            source: e.into(),
        })?;
        Ok(Self { separator })
    }

    /// Split a multi-valued cell, dropping blank entries.
    pub fn split_cell<'a>(&self, cell: &'a str) -> Vec<&'a str> {
        self.separator
            .split(cell)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Fail on the first required column the header lacks.
    pub fn check_header(&self, headers: &StringRecord) -> AppResult<()> {
        if headers.iter().all(|h| h.is_empty()) {
            return Err(AppError::csv("Missing header row"));
        }
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(AppError::csv(format!("Missing required column: {}", column)));
            }
        }
        Ok(())
    }

    /// Check the header, then every data row.
    ///
    /// Returns an error only for an empty file, an unreadable file or a
    /// missing column.
    pub fn check(&self, contents: &[u8]) -> AppResult<PreflightReport> {
        if contents.iter().all(u8::is_ascii_whitespace) {
            return Err(AppError::csv("File is empty"));
        }

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(contents);
        let headers = reader.headers()?.clone();
        self.check_header(&headers)?;

        let columns = ColumnIndex::new(&headers);
        let mut report = PreflightReport::default();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(index as u64 + 2);
            report.rows += 1;
            self.check_row(&columns, &record, line, &mut report.issues);
        }

        tracing::debug!(
            rows = report.rows,
            issues = report.issues.len(),
            "CSV preflight finished"
        );
        Ok(report)
    }

    fn check_row(
        &self,
        columns: &ColumnIndex,
        record: &StringRecord,
        line: u64,
        issues: &mut Vec<RowIssue>,
    ) {
        let mut issue = |column: &'static str, message: String| {
            issues.push(RowIssue {
                line,
                column,
                message,
            })
        };

        for column in ["firstName", "lastName"] {
            if columns.cell(record, column).is_empty() {
                issue(column, "value is empty".to_string());
            }
        }

        let dob = columns.cell(record, "dateOfBirth");
        if dob.parse::<Date>().is_err() {
            issue(
                "dateOfBirth",
                format!("'{}' is not a date in YYYY-MM-DD form", dob),
            );
        }

        let height = columns.cell(record, "height");
        match height.parse::<f64>() {
            Ok(h) if h.is_finite() && h > 0.0 => {}
            _ => issue("height", format!("'{}' is not a positive number", height)),
        }

        let nationalities = self.split_cell(columns.cell(record, "nationalities"));
        if nationalities.is_empty() {
            issue("nationalities", "no nationality given".to_string());
        }
        for code in nationalities {
            if let Err(e) = normalize_nationality(code) {
                issue("nationalities", e.to_string());
            }
        }

        let positions = self.split_cell(columns.cell(record, "positions"));
        if positions.is_empty() {
            issue("positions", "no position given".to_string());
        }
        for code in positions {
            if let Err(e) = code.parse::<Position>() {
                issue("positions", e.to_string());
            }
        }
    }
}

/// Position of each required column in the header.
struct ColumnIndex(Vec<(&'static str, usize)>);

impl ColumnIndex {
    fn new(headers: &StringRecord) -> Self {
        Self(
            REQUIRED_COLUMNS
                .iter()
                .filter_map(|&name| headers.iter().position(|h| h == name).map(|i| (name, i)))
                .collect(),
        )
    }

    /// Missing trailing cells read as empty.
    fn cell<'r>(&self, record: &'r StringRecord, column: &str) -> &'r str {
        self.0
            .iter()
            .find(|(name, _)| *name == column)
            .and_then(|(_, i)| record.get(*i))
            .unwrap_or("")
    }
}
