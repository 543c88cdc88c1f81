//! CSV formatter for smell reports.
//!
//! One row per chart; the ratio is written as a raw float so downstream
//! tools can aggregate it.

use crate::analyzer::smells::types::ChartReport;

pub const HEADER: &str = "Chart,Code Smells,Total Lines,Total Files,Ratio";

/// Format reports as CSV, header first.
pub fn format(reports: &[&ChartReport]) -> String {
    let mut output = String::from(HEADER);
    output.push('\n');
    for report in reports {
        output.push_str(&format!(
            "{},{},{},{},{}\n",
            escape_field(&report.chart_name),
            report.code_smells,
            report.total_lines,
            report.total_files,
            report.ratio()
        ));
    }
    output
}

/// Quote a field when it holds a separator, a quote or a line break.
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
