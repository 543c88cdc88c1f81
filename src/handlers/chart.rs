use crate::analyzer::smells::analyze_chart;
use crate::analyzer::smells::formatter::{self, OutputFormat, findings};
use crate::cli::RuleArgs;
use crate::config::Config;
use crate::handlers::build_registry;
use std::path::Path;

/// Analyze one chart. Without a format, prints the check-by-check view.
pub fn handle_chart(
    config: &Config,
    path: &Path,
    format: Option<OutputFormat>,
    rules: &RuleArgs,
) -> crate::Result<()> {
    let registry = build_registry(config, rules);
    let report = analyze_chart(path, &registry)?;

    let rendered = match format {
        None => findings::format(&report),
        Some(format) => formatter::format_reports([&report], format, true)?,
    };
    formatter::emit(&rendered, None)
}
