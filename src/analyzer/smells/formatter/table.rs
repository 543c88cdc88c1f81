//! Table formatter for smell reports.
//!
//! Aligned columns, with the smell count colored by whether the chart is
//! clean.

use colored::Colorize;

use crate::analyzer::smells::types::ChartReport;

const HEADERS: [&str; 5] = ["Chart", "Code Smells", "Total Lines", "Total Files", "Ratio"];

fn row(report: &ChartReport) -> [String; 5] {
    [
        report.chart_name.clone(),
        report.code_smells.to_string(),
        report.total_lines.to_string(),
        report.total_files.to_string(),
        format!("{:.6}", report.ratio()),
    ]
}

/// Format reports as an aligned table.
pub fn format(reports: &[&ChartReport]) -> String {
    if reports.is_empty() {
        return "No charts analyzed.\n".to_string();
    }

    let rows: Vec<[String; 5]> = reports.iter().map(|r| row(r)).collect();
    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut output = String::new();
    let header: Vec<String> = HEADERS
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (h, w))| pad(h, w, i > 0))
        .collect();
    output.push_str(&format!("{}\n", header.join("  ").bold()));

    for (report, row) in reports.iter().zip(&rows) {
        let cells: Vec<String> = row
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, (cell, w))| {
                let padded = pad(cell, w, i > 0);
                match i {
                    0 => padded.bright_white().to_string(),
                    1 if report.code_smells == 0 => padded.green().to_string(),
                    1 => padded.yellow().to_string(),
                    _ => padded,
                }
            })
            .collect();
        output.push_str(&cells.join("  "));
        output.push('\n');
    }

    let total: usize = reports.iter().map(|r| r.code_smells).sum();
    output.push_str(&format!(
        "\n{} chart(s), {} code smell(s)\n",
        reports.len(),
        total
    ));
    output
}

fn pad(cell: &str, width: usize, right_align: bool) -> String {
    if right_align {
        format!("{:>width$}", cell, width = width)
    } else {
        format!("{:<width$}", cell, width = width)
    }
}
