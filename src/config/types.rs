use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::analyzer::history::{DEFAULT_MONTHS_RANGE, HistorySource};
use crate::analyzer::smells::SmellConfig;
use crate::analyzer::smells::formatter::OutputFormat;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub rules: RulesConfig,
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
    pub repositories: Vec<RepositoryConfig>,
}

/// Which checks run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    /// Run the supplemental checks as well
    pub extended: bool,
    /// Checks to skip, by name or code
    pub disabled: Vec<String>,
    /// Supplemental checks to run individually
    pub enabled: Vec<String>,
}

/// Analysis configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Worker threads for batch and history runs
    pub jobs: Option<usize>,
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: ReportFormat,
}

/// Report format as written in the configuration file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl From<ReportFormat> for OutputFormat {
    fn from(format: ReportFormat) -> Self {
        match format {
            ReportFormat::Table => OutputFormat::Table,
            ReportFormat::Csv => OutputFormat::Csv,
            ReportFormat::Json => OutputFormat::Json,
        }
    }
}

/// A chart whose history is analyzed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepositoryConfig {
    pub repository_folder: PathBuf,
    pub chart_folder_path: PathBuf,
    #[serde(default = "default_months_range")]
    pub months_range: u32,
    #[serde(default)]
    pub revisions: Vec<String>,
}

fn default_months_range() -> u32 {
    DEFAULT_MONTHS_RANGE
}

impl RepositoryConfig {
    pub fn to_source(&self) -> HistorySource {
        HistorySource::new(&self.repository_folder, &self.chart_folder_path)
            .with_months_range(self.months_range)
            .with_revisions(self.revisions.clone())
    }
}

impl Config {
    /// Analyzer settings described by this file.
    pub fn smell_config(&self) -> SmellConfig {
        SmellConfig::new()
            .with_extended(self.rules.extended)
            .disable_all(self.rules.disabled.iter().cloned())
            .enable_all(self.rules.enabled.iter().cloned())
            .with_jobs(self.analysis.jobs)
    }
}
