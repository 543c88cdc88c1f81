//! Configuration for the smell analyzer.
//!
//! Provides options for:
//! - Enabling the supplemental (extended) checks
//! - Disabling or enabling individual checks by name or code
//! - Worker thread count for batch runs

use std::collections::HashSet;

/// Configuration for a smell analysis run.
#[derive(Debug, Clone, Default)]
pub struct SmellConfig {
    /// Run the supplemental checks as well as the default set.
    pub extended: bool,

    /// Supplemental checks to run even when `extended` is off.
    pub enabled_rules: HashSet<String>,

    /// Checks to skip (by name or code).
    pub disabled_rules: HashSet<String>,

    /// Worker threads for batch runs (`None` = one per CPU).
    pub jobs: Option<usize>,
}

impl SmellConfig {
    /// Create a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Include the supplemental checks.
    pub fn with_extended(mut self, extended: bool) -> Self {
        self.extended = extended;
        self
    }

    /// Skip a check.
    pub fn disable(mut self, rule: impl Into<String>) -> Self {
        self.disabled_rules.insert(rule.into());
        self
    }

    /// Skip several checks.
    pub fn disable_all(mut self, rules: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for rule in rules {
            self.disabled_rules.insert(rule.into());
        }
        self
    }

    /// Run a supplemental check.
    pub fn enable(mut self, rule: impl Into<String>) -> Self {
        self.enabled_rules.insert(rule.into());
        self
    }

    /// Run several supplemental checks.
    pub fn enable_all(mut self, rules: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for rule in rules {
            self.enabled_rules.insert(rule.into());
        }
        self
    }

    /// Set the worker thread count.
    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Check if a rule is disabled (by name or code).
    pub fn is_disabled(&self, name: &str, code: &str) -> bool {
        self.disabled_rules.contains(name) || self.disabled_rules.contains(code)
    }

    /// Check if a supplemental rule was requested (by name or code).
    pub fn is_enabled(&self, name: &str, code: &str) -> bool {
        self.extended || self.enabled_rules.contains(name) || self.enabled_rules.contains(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SmellConfig::default();
        assert!(!config.extended);
        assert!(config.disabled_rules.is_empty());
        assert!(config.jobs.is_none());
    }

    #[test]
    fn test_disable_by_name_or_code() {
        let config = SmellConfig::new().disable("standard_labels").disable("HS004");
        assert!(config.is_disabled("standard_labels", "HS002"));
        assert!(config.is_disabled("count_http_only_repositories", "HS004"));
        assert!(!config.is_disabled("selector_mismatch", "HS003"));
    }

    #[test]
    fn test_enable_supplemental() {
        let config = SmellConfig::new().enable("count_tabs");
        assert!(config.is_enabled("count_tabs", "HS009"));
        assert!(!config.is_enabled("chart_name_format", "HS011"));

        let config = SmellConfig::new().with_extended(true);
        assert!(config.is_enabled("chart_name_format", "HS011"));
    }
}
