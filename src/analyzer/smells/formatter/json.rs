//! JSON formatter for smell reports.

use serde::Serialize;

use crate::analyzer::smells::types::{ChartReport, Finding};
use crate::error::Result;

/// JSON output structure for one chart.
#[derive(Serialize)]
struct JsonChart<'a> {
    chart_name: &'a str,
    code_smells: usize,
    total_lines: usize,
    total_files: usize,
    ratio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    findings: Option<&'a [Finding]>,
}

impl<'a> JsonChart<'a> {
    fn new(report: &'a ChartReport, details: bool) -> Self {
        Self {
            chart_name: &report.chart_name,
            code_smells: report.code_smells,
            total_lines: report.total_lines,
            total_files: report.total_files,
            ratio: report.ratio(),
            findings: details.then_some(report.findings.as_slice()),
        }
    }
}

/// Format reports as a pretty-printed JSON array.
pub fn format(reports: &[&ChartReport], details: bool) -> Result<String> {
    let charts: Vec<JsonChart> = reports.iter().map(|r| JsonChart::new(r, details)).collect();
    let mut output = serde_json::to_string_pretty(&charts)?;
    output.push('\n');
    Ok(output)
}
