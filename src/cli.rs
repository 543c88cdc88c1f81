use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::analyzer::smells::formatter::OutputFormat;

#[derive(Parser)]
#[command(name = "helm-smells")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Detect code smells in Helm charts")]
#[command(long_about = "A rule-based static analyzer for Helm charts. It runs a set of best-practice checks over a chart's YAML and template files and reports code smells, lines of configuration and smell density, for one chart, a workspace of charts, or a chart across the history of a git repository.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Options shared by the commands that run checks.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct RuleArgs {
    /// Also run the supplemental checks (tabs, nested values, chart name)
    #[arg(long)]
    pub extended: bool,

    /// Checks to skip, by name or code (comma-separated)
    #[arg(long, value_delimiter = ',', value_name = "RULES")]
    pub disable: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze every chart directory of a workspace
    Scan {
        /// Directory whose immediate subdirectories are charts
        #[arg(value_name = "WORKSPACE")]
        workspace: PathBuf,

        /// Output format (default: from config, else table)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Write the report to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        rules: RuleArgs,

        /// Worker threads (default: one per CPU)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Include per-check findings in JSON output
        #[arg(long)]
        details: bool,
    },

    /// Analyze a single chart and show every check
    Chart {
        /// Chart root directory
        #[arg(value_name = "CHART")]
        path: PathBuf,

        /// Output format (default: check-by-check view)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        #[command(flatten)]
        rules: RuleArgs,
    },

    /// Analyze a chart across the history of a git repository
    History {
        /// Repository root (default: the repositories listed in the config)
        #[arg(value_name = "REPO")]
        repository: Option<PathBuf>,

        /// Chart directory relative to the repository root
        #[arg(long, value_name = "PATH", requires = "repository")]
        chart: Option<PathBuf>,

        /// Months between sampled revisions
        #[arg(short, long)]
        months: Option<u32>,

        /// Analyze these revisions instead of sampling
        #[arg(long = "revision", value_name = "SHA")]
        revisions: Vec<String>,

        /// Output format (default: from config, else table)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Write the report to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Append per-practice trends (smells per 1000 lines)
        #[arg(long)]
        trends: bool,

        #[command(flatten)]
        rules: RuleArgs,
    },

    /// List the available checks
    Rules,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Table,
    Csv,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}
