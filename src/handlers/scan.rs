use crate::analyzer::smells::formatter::{self, OutputFormat};
use crate::analyzer::smells::{BatchOptions, analyze_workspace};
use crate::cli::RuleArgs;
use crate::config::Config;
use crate::handlers::{build_registry, smell_config};
use log::info;
use std::path::PathBuf;

/// Arguments of `helm-smells scan`.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub workspace: PathBuf,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub rules: RuleArgs,
    pub jobs: Option<usize>,
    pub details: bool,
    pub quiet: bool,
}

pub fn handle_scan(config: &Config, options: ScanOptions) -> crate::Result<()> {
    let registry = build_registry(config, &options.rules);
    let jobs = options.jobs.or(smell_config(config, &options.rules).jobs);
    let format = options
        .format
        .unwrap_or_else(|| config.output.format.into());

    // progress bars would interleave with log lines
    let progress = !options.quiet && log::max_level() < log::LevelFilter::Info;

    info!(
        "Scanning {} with {} check(s)",
        options.workspace.display(),
        registry.len()
    );
    let batch = analyze_workspace(&options.workspace, &registry, BatchOptions { jobs, progress })?;

    let rendered = formatter::format_reports(batch.reports(), format, options.details)?;
    formatter::emit(&rendered, options.output.as_deref())?;

    if let Some(path) = &options.output {
        info!("Report written to {}", path.display());
    }
    if !options.quiet {
        for (chart, reason) in &batch.failures {
            eprintln!("Skipped {}: {}", chart, reason);
        }
    }
    Ok(())
}
