//! Chart smells across the history of a git repository.
//!
//! Revisions are sampled from `git log`, each one is checked out into its
//! own temporary directory and analyzed like any other chart, and the
//! results are folded into a [`TimeSeries`]. The repository's HEAD, index
//! and working tree are never modified, so revisions run in parallel.

pub mod git;
pub mod sampling;
pub mod series;

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use log::{error, info, warn};
use rayon::prelude::*;
use serde::Serialize;

use crate::analyzer::smells::formatter::OutputFormat;
use crate::analyzer::smells::formatter::csv::escape_field;
use crate::analyzer::smells::lint::analyze_chart;
use crate::analyzer::smells::rules::RuleRegistry;
use crate::analyzer::smells::types::{ChartReport, chart_name};
use crate::error::{Result, SmellError};

pub use git::Commit;
pub use sampling::{DEFAULT_MONTHS_RANGE, sample_revisions};
pub use series::{PracticeTrend, TimeSeries, Trend, format_trends};

/// A chart inside a repository, and which revisions to look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorySource {
    /// Repository root.
    pub repository: PathBuf,
    /// Chart directory, relative to the repository root.
    pub chart_path: PathBuf,
    /// Spacing of sampled revisions.
    pub months_range: u32,
    /// Explicit revisions; replaces sampling when non-empty.
    pub revisions: Vec<String>,
}

impl HistorySource {
    pub fn new(repository: impl Into<PathBuf>, chart_path: impl Into<PathBuf>) -> Self {
        Self {
            repository: repository.into(),
            chart_path: chart_path.into(),
            months_range: DEFAULT_MONTHS_RANGE,
            revisions: Vec::new(),
        }
    }

    pub fn with_months_range(mut self, months: u32) -> Self {
        self.months_range = months;
        self
    }

    pub fn with_revisions(mut self, revisions: Vec<String>) -> Self {
        self.revisions = revisions;
        self
    }

    /// Name reported for the chart: the chart directory, else the repository.
    pub fn chart_name(&self) -> String {
        match self.chart_path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => chart_name(&self.repository),
        }
    }
}

/// Analysis of the chart at one revision.
#[derive(Debug, Clone, PartialEq)]
pub struct RevisionReport {
    pub sha: String,
    pub date: DateTime<FixedOffset>,
    pub report: ChartReport,
}

/// Revisions to analyze, oldest first.
///
/// Explicit revisions are matched by full or abbreviated hash; unknown ones
/// are logged and ignored.
pub fn select_revisions(source: &HistorySource) -> Result<Vec<Commit>> {
    let commits = git::list_commits(&source.repository)?;
    if source.revisions.is_empty() {
        return Ok(sample_revisions(&commits, source.months_range));
    }

    for wanted in &source.revisions {
        if !commits.iter().any(|c| c.sha.starts_with(wanted.as_str())) {
            warn!("Revision {} not found in {}", wanted, source.repository.display());
        }
    }
    Ok(commits
        .into_iter()
        .filter(|c| {
            source
                .revisions
                .iter()
                .any(|wanted| !wanted.is_empty() && c.sha.starts_with(wanted.as_str()))
        })
        .collect())
}

/// Analyze the chart at one revision.
///
/// `Ok(None)` when the chart does not exist at that revision.
pub fn analyze_revision(
    source: &HistorySource,
    commit: &Commit,
    registry: &RuleRegistry,
) -> Result<Option<RevisionReport>> {
    let dest = tempfile::tempdir().map_err(|e| SmellError::io(&source.repository, e))?;
    let Some(root) = git::materialize(&source.repository, &commit.sha, &source.chart_path, dest.path())?
    else {
        return Ok(None);
    };

    let mut report = analyze_chart(&root, registry)?;
    report.chart_name = source.chart_name();
    report.root = source.repository.join(&source.chart_path);

    Ok(Some(RevisionReport {
        sha: commit.sha.clone(),
        date: commit.date,
        report,
    }))
}

/// Analyze every selected revision of a chart, oldest first.
///
/// A revision that fails is logged and left out; revisions where the chart
/// does not exist are skipped.
pub fn analyze_history(source: &HistorySource, registry: &RuleRegistry) -> Result<Vec<RevisionReport>> {
    let commits = select_revisions(source)?;
    info!(
        "Analyzing {} revision(s) of {} in {}",
        commits.len(),
        source.chart_path.display(),
        source.repository.display()
    );

    let results: Vec<Option<RevisionReport>> = commits
        .par_iter()
        .map(|commit| match analyze_revision(source, commit, registry) {
            Ok(Some(revision)) => Some(revision),
            Ok(None) => {
                info!("{} not present at {}, skipped", source.chart_path.display(), commit.short_sha());
                None
            }
            Err(e) => {
                error!("Failed to analyze revision {}: {}", commit.short_sha(), e);
                None
            }
        })
        .collect();

    Ok(results.into_iter().flatten().collect())
}

/// Revision row as rendered in CSV and JSON.
#[derive(Serialize)]
struct RevisionRow<'a> {
    chart_name: &'a str,
    sha: &'a str,
    date: String,
    code_smells: usize,
    total_lines: usize,
    total_files: usize,
    ratio: f64,
}

impl<'a> From<&'a RevisionReport> for RevisionRow<'a> {
    fn from(revision: &'a RevisionReport) -> Self {
        Self {
            chart_name: &revision.report.chart_name,
            sha: &revision.sha,
            date: revision.date.date_naive().to_string(),
            code_smells: revision.report.code_smells,
            total_lines: revision.report.total_lines,
            total_files: revision.report.total_files,
            ratio: revision.report.ratio(),
        }
    }
}

pub const CSV_HEADER: &str = "Chart,Revision,Date,Code Smells,Total Lines,Total Files,Ratio";

/// Render revision results.
pub fn format_revisions(revisions: &[RevisionReport], format: OutputFormat) -> Result<String> {
    let rows: Vec<RevisionRow> = revisions.iter().map(RevisionRow::from).collect();
    match format {
        OutputFormat::Json => {
            let mut output = serde_json::to_string_pretty(&rows)?;
            output.push('\n');
            Ok(output)
        }
        OutputFormat::Csv => {
            let mut output = format!("{}\n", CSV_HEADER);
            for row in &rows {
                output.push_str(&format!(
                    "{},{},{},{},{},{},{}\n",
                    escape_field(row.chart_name),
                    row.sha,
                    row.date,
                    row.code_smells,
                    row.total_lines,
                    row.total_files,
                    row.ratio
                ));
            }
            Ok(output)
        }
        OutputFormat::Table => {
            if rows.is_empty() {
                return Ok("No revisions analyzed.\n".to_string());
            }
            let mut output = format!(
                "{:<10}  {:<10}  {:>11}  {:>11}  {:>11}  {:>10}\n",
                "Revision", "Date", "Code Smells", "Total Lines", "Total Files", "Ratio"
            );
            for row in &rows {
                output.push_str(&format!(
                    "{:<10}  {:<10}  {:>11}  {:>11}  {:>11}  {:>10.6}\n",
                    git::short_sha(row.sha),
                    row.date,
                    row.code_smells,
                    row.total_lines,
                    row.total_files,
                    row.ratio
                ));
            }
            Ok(output)
        }
    }
}
