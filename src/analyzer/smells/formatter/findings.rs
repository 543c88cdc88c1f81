//! Check-by-check view of a single chart.

use colored::Colorize;

use crate::analyzer::smells::types::ChartReport;

/// One line per check, `name: OK|FAIL (details)`, then the chart totals.
pub fn format(report: &ChartReport) -> String {
    let mut output = format!("{}\n", report.chart_name.bold());

    for finding in &report.findings {
        let status = if finding.success {
            "OK".green()
        } else {
            "FAIL".red()
        };
        output.push_str(&format!("  {}: {} ({})\n", finding.name, status, finding.details));
    }

    output.push_str(&format!(
        "Code smells: {}  Lines: {}  Files: {}  Ratio: {:.6}\n",
        report.code_smells,
        report.total_lines,
        report.total_files,
        report.ratio()
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::smells::types::Finding;
    use std::path::Path;

    #[test]
    fn test_findings_view() {
        colored::control::set_override(false);
        let report = ChartReport::new(
            Path::new("web"),
            40,
            2,
            vec![
                Finding::clean("standard_labels", "No violation detected."),
                Finding::with_count("has_helper_file", 1, "_helpers.tpl not found."),
            ],
        );
        let view = format(&report);
        assert!(view.contains("  standard_labels: OK (No violation detected.)"));
        assert!(view.contains("  has_helper_file: FAIL (_helpers.tpl not found.)"));
        assert!(view.contains("Code smells: 1  Lines: 40  Files: 2  Ratio: 0.025000"));
    }
}
