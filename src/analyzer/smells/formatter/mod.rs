//! Output formatters for smell reports.
//!
//! Provides multiple output formats:
//! - Table: human-readable, colored
//! - CSV: one row per chart for spreadsheets and plotting
//! - JSON: machine-readable, optionally with per-check findings
//!
//! The findings view renders a single chart check by check.

pub mod csv;
pub mod findings;
pub mod json;
pub mod table;

use std::fs;
use std::path::Path;

use crate::analyzer::smells::types::ChartReport;
use crate::error::{Result, SmellError};

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned columns with colors
    #[default]
    Table,
    /// Comma-separated values
    Csv,
    /// JSON array
    Json,
}

impl OutputFormat {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" | "default" => Some(Self::Table),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// Render chart reports in the given format.
///
/// `details` adds per-check findings to JSON output; other formats ignore it.
pub fn format_reports<'a>(
    reports: impl IntoIterator<Item = &'a ChartReport>,
    format: OutputFormat,
    details: bool,
) -> Result<String> {
    let reports: Vec<&ChartReport> = reports.into_iter().collect();
    match format {
        OutputFormat::Table => Ok(table::format(&reports)),
        OutputFormat::Csv => Ok(csv::format(&reports)),
        OutputFormat::Json => json::format(&reports, details),
    }
}

/// Print to stdout, or write to `output` when given.
pub fn emit(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => fs::write(path, rendered).map_err(|e| SmellError::io(path, e)),
        None => {
            print!("{}", rendered);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::smells::types::Finding;
    use tempfile::TempDir;

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("table"), Some(OutputFormat::Table));
        assert_eq!(OutputFormat::parse("CSV"), Some(OutputFormat::Csv));
        assert_eq!(OutputFormat::parse("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("yaml"), None);
        assert_eq!(OutputFormat::default().as_str(), "table");
    }

    #[test]
    fn test_emit_to_file() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("report.csv");
        let report = ChartReport::new(Path::new("web"), 10, 1, vec![Finding::with_count("a", 1, "")]);
        let rendered = format_reports([&report], OutputFormat::Csv, false).unwrap();
        emit(&rendered, Some(&out)).unwrap();
        let written = fs::read_to_string(&out).unwrap();
        assert!(written.starts_with("Chart,Code Smells"));
        assert!(written.contains("web,1,10,1,0.1"));
    }
}
