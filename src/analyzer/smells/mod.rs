//! Helm chart code smell analysis.
//!
//! A rule-based static analyzer that walks a chart, runs a set of
//! independent checks against its YAML and template files, and measures
//! smell density as smells per line of configuration.
//!
//! # Example
//!
//! ```rust,no_run
//! use helm_smells::analyzer::smells::{RuleRegistry, analyze_chart};
//! use std::path::Path;
//!
//! # fn main() -> helm_smells::error::Result<()> {
//! let report = analyze_chart(Path::new("./my-chart"), &RuleRegistry::default())?;
//! for finding in &report.findings {
//!     println!("{}: {} smell(s)", finding.name, finding.code_smells);
//! }
//! println!("ratio: {}", report.ratio());
//! # Ok(())
//! # }
//! ```
//!
//! # Rules
//!
//! | Category | Codes | Description |
//! |----------|-------|-------------|
//! | Security | HS001, HS004 | Secrets in ConfigMaps, plain HTTP repositories |
//! | Metadata | HS002, HS003, HS011 | Labels, selectors, chart name |
//! | Dependencies | HS005 | Pinned dependency versions |
//! | Templates | HS006, HS007, HS008 | Defines, helpers, include indentation |
//! | Style | HS009, HS010 | Tabs, nested values |

pub mod batch;
pub mod block;
pub mod config;
pub mod formatter;
pub mod lint;
pub mod rules;
pub mod surface;
pub mod types;

// Re-export main types and functions
pub use batch::{BatchOptions, BatchReport, analyze_workspace, list_charts};
pub use config::SmellConfig;
pub use formatter::{OutputFormat, format_reports};
pub use lint::{analyze_chart, analyze_chart_default};
pub use rules::{ChartContext, Rule, RuleRegistry};
pub use surface::ChartSurface;
pub use types::{ChartReport, Finding, RuleCategory, RuleCode, Violation};
