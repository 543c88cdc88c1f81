// Handler modules
pub mod chart;
pub mod history;
pub mod rules;
pub mod scan;

// Re-export all handler functions
pub use chart::handle_chart;
pub use history::{HistoryOptions, handle_history};
pub use rules::handle_rules;
pub use scan::{ScanOptions, handle_scan};

use crate::analyzer::smells::{RuleRegistry, SmellConfig};
use crate::cli::RuleArgs;
use crate::config::Config;

/// Analyzer settings: the config file, overridden by command line flags.
pub fn smell_config(config: &Config, args: &RuleArgs) -> SmellConfig {
    let smells = config.smell_config().disable_all(args.disable.iter().cloned());
    if args.extended {
        smells.with_extended(true)
    } else {
        smells
    }
}

/// The checks a command runs.
pub fn build_registry(config: &Config, args: &RuleArgs) -> RuleRegistry {
    RuleRegistry::from_config(&smell_config(config, args))
}
