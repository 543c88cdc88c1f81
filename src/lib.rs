//! # helm-smells
//!
//! A rule-based static analyzer that detects "code smells" in Helm charts.
//!
//! ## Features
//!
//! - **Independent checks**: each best practice is one rule producing one finding
//! - **Smell density**: smells per line of YAML and template configuration
//! - **Batch analysis**: every chart of a workspace, in parallel
//! - **History**: the same chart sampled across the commits of a git repository
//!
//! ## Example
//!
//! ```rust,no_run
//! use helm_smells::analyzer::smells::{RuleRegistry, analyze_chart};
//! use std::path::Path;
//!
//! # fn main() -> helm_smells::Result<()> {
//! let report = analyze_chart(Path::new("./charts/web"), &RuleRegistry::default())?;
//! println!("{} smells over {} lines", report.code_smells, report.total_lines);
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;

// Re-export commonly used types and functions
pub use analyzer::smells::{ChartReport, Finding, RuleRegistry, analyze_chart};
pub use error::{Result, SmellError};
use cli::Commands;
use config::Config;

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn run_command(command: Commands, config: &Config, quiet: bool) -> Result<()> {
    match command {
        Commands::Scan {
            workspace,
            format,
            output,
            rules,
            jobs,
            details,
        } => handlers::handle_scan(
            config,
            handlers::ScanOptions {
                workspace,
                format: format.map(Into::into),
                output,
                rules,
                jobs,
                details,
                quiet,
            },
        ),
        Commands::Chart {
            path,
            format,
            rules,
        } => handlers::handle_chart(config, &path, format.map(Into::into), &rules),
        Commands::History {
            repository,
            chart,
            months,
            revisions,
            format,
            output,
            trends,
            rules,
        } => handlers::handle_history(
            config,
            handlers::HistoryOptions {
                repository,
                chart,
                months,
                revisions,
                format: format.map(Into::into),
                output,
                trends,
                rules,
            },
        ),
        Commands::Rules => handlers::handle_rules(),
    }
}
