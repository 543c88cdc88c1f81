//! Smell density over time.
//!
//! Densities are smells per 1000 lines of configuration, per practice and in
//! total, one point per analyzed revision.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::analyzer::history::RevisionReport;

/// Smells per 1000 lines; 0 when there are no lines.
pub fn density(code_smells: usize, total_lines: usize) -> f64 {
    if total_lines > 0 {
        code_smells as f64 * 1000.0 / total_lines as f64
    } else {
        0.0
    }
}

/// Direction of a practice between the first and last revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    fn between(start: f64, end: f64) -> Self {
        let delta = end - start;
        if delta > 0.0 {
            Self::Up
        } else if delta < 0.0 {
            Self::Down
        } else {
            Self::Flat
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Flat => "flat",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One revision of the series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub sha: String,
    pub date: NaiveDate,
    pub total_lines: usize,
    /// Total smells per 1000 lines.
    pub density: f64,
    /// Per-practice smells per 1000 lines.
    pub practices: BTreeMap<String, f64>,
}

/// How one practice evolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PracticeTrend {
    pub practice: String,
    pub start: f64,
    pub end: f64,
    pub trend: Trend,
    /// First pair of consecutive revisions where the practice went from
    /// absent to present.
    pub introduced: Option<(NaiveDate, NaiveDate)>,
}

/// Per-practice densities across revisions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeSeries {
    pub points: Vec<SeriesPoint>,
}

impl TimeSeries {
    /// Build the series from revisions in chronological order.
    ///
    /// Every practice seen in any revision gets a value at every point.
    pub fn from_revisions(revisions: &[RevisionReport]) -> Self {
        let practices: BTreeSet<&str> = revisions
            .iter()
            .flat_map(|r| r.report.findings.iter().map(|f| f.name.as_str()))
            .collect();

        let points = revisions
            .iter()
            .map(|revision| {
                let report = &revision.report;
                SeriesPoint {
                    sha: revision.sha.clone(),
                    date: revision.date.date_naive(),
                    total_lines: report.total_lines,
                    density: density(report.code_smells, report.total_lines),
                    practices: practices
                        .iter()
                        .map(|p| {
                            (p.to_string(), density(report.smells_for(p), report.total_lines))
                        })
                        .collect(),
                }
            })
            .collect();

        Self { points }
    }

    /// Practice names, sorted.
    pub fn practices(&self) -> Vec<&str> {
        self.points
            .first()
            .map(|p| p.practices.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Values of one practice over time.
    pub fn values(&self, practice: &str) -> Vec<f64> {
        self.points
            .iter()
            .map(|p| p.practices.get(practice).copied().unwrap_or(0.0))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Start, end, direction and introduction of every practice.
    pub fn trends(&self) -> Vec<PracticeTrend> {
        if self.points.is_empty() {
            return Vec::new();
        }

        self.practices()
            .into_iter()
            .map(|practice| {
                let values = self.values(practice);
                let start = values[0];
                let end = values[values.len() - 1];
                let introduced = values
                    .windows(2)
                    .position(|w| w[0] == 0.0 && w[1] > 0.0)
                    .map(|i| (self.points[i].date, self.points[i + 1].date));

                PracticeTrend {
                    practice: practice.to_string(),
                    start,
                    end,
                    trend: Trend::between(start, end),
                    introduced,
                }
            })
            .collect()
    }
}

/// Plain-text summary of practice trends.
pub fn format_trends(trends: &[PracticeTrend]) -> String {
    let mut output = String::from("=== Practice trends (smells / 1000 lines) ===\n\n");
    if trends.is_empty() {
        output.push_str("No revisions analyzed.\n");
        return output;
    }

    for trend in trends {
        output.push_str(&format!("- {}\n", trend.practice));
        output.push_str(&format!("  start: {:.2}\n", trend.start));
        output.push_str(&format!("  end  : {:.2}\n", trend.end));
        output.push_str(&format!("  trend: {}\n", trend.trend));
        if let Some((before, after)) = trend.introduced {
            output.push_str(&format!("  introduced between {} and {}\n", before, after));
        }
        output.push('\n');
    }
    output
}
