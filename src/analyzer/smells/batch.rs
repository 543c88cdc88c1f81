//! Batch analysis of a workspace of charts.
//!
//! Each immediate subdirectory of the workspace is treated as a chart root.
//! Charts share nothing, so they are analyzed in parallel on a rayon pool.
//! A chart that fails is logged and recorded; the rest of the batch goes on.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use rayon::prelude::*;

use crate::analyzer::smells::lint::analyze_chart;
use crate::analyzer::smells::rules::RuleRegistry;
use crate::analyzer::smells::types::{ChartReport, chart_name};
use crate::error::{Result, SmellError};

/// Options for a batch run.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Worker threads; `None` uses rayon's default.
    pub jobs: Option<usize>,
    /// Draw a progress bar on stderr.
    pub progress: bool,
}

/// Results of a batch run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Reports keyed by chart name.
    pub charts: BTreeMap<String, ChartReport>,
    /// Charts that could not be analyzed, with the reason.
    pub failures: Vec<(String, String)>,
}

impl BatchReport {
    /// Reports in chart-name order.
    pub fn reports(&self) -> impl Iterator<Item = &ChartReport> {
        self.charts.values()
    }

    /// Sum of smells over every analyzed chart.
    pub fn total_smells(&self) -> usize {
        self.charts.values().map(|r| r.code_smells).sum()
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Immediate subdirectories of a workspace, sorted by path.
pub fn list_charts(workspace: &Path) -> Result<Vec<PathBuf>> {
    if !workspace.exists() {
        return Err(SmellError::MissingPath(workspace.to_path_buf()));
    }
    if !workspace.is_dir() {
        return Err(SmellError::NotADirectory(workspace.to_path_buf()));
    }

    let entries = fs::read_dir(workspace).map_err(|e| SmellError::io(workspace, e))?;
    let mut charts: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    charts.sort();
    Ok(charts)
}

/// Analyze the given chart roots in parallel.
pub fn analyze_charts(charts: &[PathBuf], registry: &RuleRegistry, progress: bool) -> BatchReport {
    let pb = progress.then(|| progress_bar(charts.len()));

    let results: Vec<(String, Result<ChartReport>)> = charts
        .par_iter()
        .map(|root| {
            let result = analyze_chart(root, registry);
            if let Some(pb) = &pb {
                pb.set_message(chart_name(root));
                pb.inc(1);
            }
            (chart_name(root), result)
        })
        .collect();

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let mut report = BatchReport::default();
    for (name, result) in results {
        match result {
            Ok(chart) => {
                report.charts.insert(name, chart);
            }
            Err(e) => {
                error!("Failed to analyze chart {}: {}", name, e);
                report.failures.push((name, e.to_string()));
            }
        }
    }
    report
}

/// Analyze every chart of a workspace.
pub fn analyze_workspace(
    workspace: &Path,
    registry: &RuleRegistry,
    options: BatchOptions,
) -> Result<BatchReport> {
    let charts = list_charts(workspace)?;
    info!("Found {} chart(s) under {}", charts.len(), workspace.display());

    match options.jobs {
        Some(jobs) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()
                .map_err(|e| SmellError::InvalidArgument(format!("cannot start {} workers: {}", jobs, e)))?;
            Ok(pool.install(|| analyze_charts(&charts, registry, options.progress)))
        }
        None => Ok(analyze_charts(&charts, registry, options.progress)),
    }
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("  {msg:20} {bar:40.cyan/blue} {pos}/{len} charts")
    {
        pb.set_style(style);
    }
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn workspace() -> TempDir {
        let dir = TempDir::new().unwrap();
        for (chart, content) in [
            ("zeta", "apiVersion: v2\nname: zeta\n"),
            ("alpha", "dependencies:\n  - name: a\n    version: 1.2.3\n"),
        ] {
            fs::create_dir_all(dir.path().join(chart)).unwrap();
            fs::write(dir.path().join(chart).join("Chart.yaml"), content).unwrap();
        }
        fs::write(dir.path().join("README.md"), "not a chart\n").unwrap();
        dir
    }

    #[test]
    fn test_list_charts_sorted_dirs_only() {
        let dir = workspace();
        let charts = list_charts(dir.path()).unwrap();
        let names: Vec<String> = charts.iter().map(|p| chart_name(p)).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_list_charts_missing_workspace() {
        assert!(matches!(
            list_charts(Path::new("/nonexistent/workspace")),
            Err(SmellError::MissingPath(_))
        ));
    }

    #[test]
    fn test_analyze_workspace() {
        let dir = workspace();
        let registry = RuleRegistry::default();
        let report = analyze_workspace(dir.path(), &registry, BatchOptions::default()).unwrap();

        assert_eq!(report.len(), 2);
        assert!(!report.has_failures());
        let alpha = &report.charts["alpha"];
        assert_eq!(alpha.smells_for("count_nonrange_versions"), 1);
        assert_eq!(alpha.total_lines, 3);
        assert_eq!(
            report.total_smells(),
            report.reports().map(|r| r.code_smells).sum::<usize>()
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let dir = workspace();
        let registry = RuleRegistry::with_extended();
        let single = analyze_workspace(
            dir.path(),
            &registry,
            BatchOptions { jobs: Some(1), progress: false },
        )
        .unwrap();
        let many = analyze_workspace(
            dir.path(),
            &registry,
            BatchOptions { jobs: Some(4), progress: false },
        )
        .unwrap();
        assert_eq!(single, many);
    }

    #[test]
    fn test_failed_chart_does_not_stop_batch() {
        let dir = workspace();
        let mut charts = list_charts(dir.path()).unwrap();
        charts.insert(0, dir.path().join("vanished"));

        let report = analyze_charts(&charts, &RuleRegistry::default(), false);
        assert_eq!(report.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, "vanished");
    }
}
