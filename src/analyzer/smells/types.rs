//! Core types for chart smell analysis.
//!
//! - `RuleCode` / `RuleCategory` - rule identifiers and grouping
//! - `Violation` - one detected smell inside a check
//! - `Finding` - the result of running one check against one chart
//! - `ChartReport` - the aggregated result for one chart

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Rule categories for organizing smell checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleCategory {
    /// Secrets and transport security
    Security,
    /// Labels, selectors and other manifest metadata
    Metadata,
    /// Chart.yaml and dependency declarations
    Dependencies,
    /// Go template definitions and usage
    Template,
    /// Formatting and layout of YAML sources
    Style,
}

impl RuleCategory {
    /// Get the display name for this category.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Security => "Security",
            Self::Metadata => "Metadata",
            Self::Dependencies => "Dependencies",
            Self::Template => "Templates",
            Self::Style => "Style",
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A rule code identifier (e.g., "HS001").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleCode(pub String);

impl RuleCode {
    /// Create a new rule code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Get the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RuleCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One smell detected while scanning a chart.
///
/// Violations stay internal to a check; only their count and a joined
/// description reach the [`Finding`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File the smell was found in.
    pub file: PathBuf,
    /// 1-indexed line, when the smell is tied to one.
    pub line: Option<usize>,
    /// What is wrong.
    pub message: String,
}

impl Violation {
    /// Violation tied to a specific line.
    pub fn at(file: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line: Some(line),
            message: message.into(),
        }
    }

    /// Violation about a whole file (or the whole chart).
    pub fn in_file(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{} {}", self.file.display(), line, self.message),
            None => write!(f, "{} {}", self.file.display(), self.message),
        }
    }
}

/// The result of one check against one chart.
///
/// `success` is always derived from `code_smells`, so the two can never
/// disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Check identity.
    pub name: String,
    /// True iff no smell was detected.
    pub success: bool,
    /// Number of smells detected.
    pub code_smells: usize,
    /// Human-readable summary.
    pub details: String,
}

impl Finding {
    /// A clean result.
    pub fn clean(name: impl Into<String>, details: impl Into<String>) -> Self {
        Self::with_count(name, 0, details)
    }

    /// The check does not apply to this chart (missing artifact).
    pub fn not_applicable(name: impl Into<String>, details: impl Into<String>) -> Self {
        Self::with_count(name, 0, details)
    }

    /// A result with an explicit smell count.
    pub fn with_count(name: impl Into<String>, code_smells: usize, details: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: code_smells == 0,
            code_smells,
            details: details.into(),
        }
    }

    /// The check could not verify the chart; counted as one smell.
    pub fn error(name: impl Into<String>, details: impl Into<String>) -> Self {
        Self::with_count(name, 1, details)
    }

    /// Build a finding from collected violations.
    ///
    /// `summary` receives the violations when there is at least one.
    pub fn from_violations(
        name: impl Into<String>,
        violations: &[Violation],
        clean_details: impl Into<String>,
        summary: impl FnOnce(&[Violation]) -> String,
    ) -> Self {
        if violations.is_empty() {
            Self::clean(name, clean_details)
        } else {
            Self::with_count(name, violations.len(), summary(violations))
        }
    }
}

/// Join violation descriptions the way findings report them.
pub fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" / ")
}

/// Aggregated smell analysis of one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartReport {
    /// Chart identity (directory name).
    pub chart_name: String,
    /// Chart root that was analyzed.
    #[serde(skip)]
    pub root: PathBuf,
    /// Sum of `code_smells` over all findings.
    pub code_smells: usize,
    /// Lines across `.yaml`, `.yml` and `.tpl` files.
    pub total_lines: usize,
    /// Number of YAML files.
    pub total_files: usize,
    /// Per-check results, in registry order.
    pub findings: Vec<Finding>,
}

impl ChartReport {
    /// Build a report, summing smells from the findings.
    pub fn new(root: &Path, total_lines: usize, total_files: usize, findings: Vec<Finding>) -> Self {
        let code_smells = findings.iter().map(|f| f.code_smells).sum();
        Self {
            chart_name: chart_name(root),
            root: root.to_path_buf(),
            code_smells,
            total_lines,
            total_files,
            findings,
        }
    }

    /// Smells per line, 0 when the chart has no lines.
    pub fn ratio(&self) -> f64 {
        smell_ratio(self.code_smells, self.total_lines)
    }

    /// Smell count of a single check, 0 if it did not run.
    pub fn smells_for(&self, name: &str) -> usize {
        self.findings
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.code_smells)
            .unwrap_or(0)
    }

    /// The (smells, lines, files) triple.
    pub fn triple(&self) -> (usize, usize, usize) {
        (self.code_smells, self.total_lines, self.total_files)
    }
}

/// Smells divided by lines; 0 when there are no lines.
pub fn smell_ratio(code_smells: usize, total_lines: usize) -> f64 {
    if total_lines > 0 {
        code_smells as f64 / total_lines as f64
    } else {
        0.0
    }
}

/// Chart identity: the final component of its root path.
pub fn chart_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string())
}
