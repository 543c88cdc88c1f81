//! Rule system for chart smell checks.
//!
//! Every check implements [`Rule`]: it receives the chart's YAML files and
//! root, and returns exactly one [`Finding`]. Checks share nothing but that
//! read-only input, so they can be added, removed or reordered freely.
//!
//! # Rules
//!
//! | Code  | Name | Default |
//! |-------|------|---------|
//! | HS001 | configmap_sensitive_values | yes |
//! | HS002 | standard_labels | yes |
//! | HS003 | selector_mismatch | yes |
//! | HS004 | count_http_only_repositories | yes |
//! | HS005 | count_nonrange_versions | yes |
//! | HS006 | namespaced_template_definitions | yes |
//! | HS007 | has_helper_file | yes |
//! | HS008 | include_indent_required | yes |
//! | HS009 | count_tabs | extended |
//! | HS010 | count_embedded_objects | extended |
//! | HS011 | chart_name_format | extended |

pub mod hs001;
pub mod hs002;
pub mod hs003;
pub mod hs004;
pub mod hs005;
pub mod hs006;
pub mod hs007;
pub mod hs008;
pub mod hs009;
pub mod hs010;
pub mod hs011;

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::analyzer::smells::config::SmellConfig;
use crate::analyzer::smells::types::{Finding, RuleCategory, RuleCode};

/// What a check sees of a chart.
#[derive(Debug, Clone, Copy)]
pub struct ChartContext<'a> {
    /// Chart root directory.
    pub root: &'a Path,
    /// YAML files of the chart.
    pub yaml_files: &'a [PathBuf],
}

impl<'a> ChartContext<'a> {
    pub fn new(root: &'a Path, yaml_files: &'a [PathBuf]) -> Self {
        Self { root, yaml_files }
    }

    /// Path for messages, relative to the chart root when possible.
    pub fn display_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

/// A smell check.
pub trait Rule: Send + Sync {
    /// Get the rule code (e.g., "HS001").
    fn code(&self) -> &RuleCode;

    /// Get the check identity reported in findings.
    fn name(&self) -> &str;

    /// Get the rule description.
    fn description(&self) -> &str;

    /// Get the rule category.
    fn category(&self) -> RuleCategory;

    /// Supplemental checks are off unless requested.
    fn is_extended(&self) -> bool {
        false
    }

    /// Run the check against one chart.
    fn check(&self, ctx: &ChartContext) -> Finding;
}

/// A rule backed by a plain check function.
pub struct SimpleRule<F>
where
    F: Fn(&ChartContext) -> Finding + Send + Sync,
{
    code: RuleCode,
    name: String,
    description: String,
    category: RuleCategory,
    extended: bool,
    check_fn: F,
}

impl<F> SimpleRule<F>
where
    F: Fn(&ChartContext) -> Finding + Send + Sync,
{
    pub fn new(
        code: impl Into<RuleCode>,
        name: impl Into<String>,
        category: RuleCategory,
        description: impl Into<String>,
        check_fn: F,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            description: description.into(),
            category,
            extended: false,
            check_fn,
        }
    }

    /// Mark the rule as supplemental.
    pub fn extended(mut self) -> Self {
        self.extended = true;
        self
    }
}

impl<F> Rule for SimpleRule<F>
where
    F: Fn(&ChartContext) -> Finding + Send + Sync,
{
    fn code(&self) -> &RuleCode {
        &self.code
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> RuleCategory {
        self.category
    }

    fn is_extended(&self) -> bool {
        self.extended
    }

    fn check(&self, ctx: &ChartContext) -> Finding {
        let finding = (self.check_fn)(ctx);
        // Findings always carry the registered identity.
        Finding::with_count(self.name.clone(), finding.code_smells, finding.details)
    }
}

/// Rules run by default.
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(hs001::rule()),
        Box::new(hs002::rule()),
        Box::new(hs003::rule()),
        Box::new(hs004::rule()),
        Box::new(hs005::rule()),
        Box::new(hs006::rule()),
        Box::new(hs007::rule()),
        Box::new(hs008::rule()),
    ]
}

/// Supplemental rules, off unless requested.
pub fn extended_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(hs009::rule()),
        Box::new(hs010::rule()),
        Box::new(hs011::rule()),
    ]
}

/// Every available rule.
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    let mut rules = default_rules();
    rules.extend(extended_rules());
    rules
}

/// The set of checks a run uses, keyed by name.
///
/// Registration order is kept for display only; each check contributes to
/// the smell total independently of the others.
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::from_rules(default_rules())
    }
}

impl RuleRegistry {
    /// An empty registry.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Registry of the default checks.
    pub fn default_rules() -> Self {
        Self::default()
    }

    /// Registry of every check, supplemental ones included.
    pub fn with_extended() -> Self {
        Self::from_rules(all_rules())
    }

    /// Register rules in order, skipping duplicate names.
    pub fn from_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        let mut registry = Self::empty();
        for rule in rules {
            registry.register(rule);
        }
        registry
    }

    /// Build the registry a configuration asks for.
    pub fn from_config(config: &SmellConfig) -> Self {
        for requested in config.disabled_rules.iter().chain(&config.enabled_rules) {
            if !all_rules()
                .iter()
                .any(|r| r.name() == requested || r.code().as_str() == requested)
            {
                warn!("Ignoring unknown rule '{}'", requested);
            }
        }

        let selected = all_rules()
            .into_iter()
            .filter(|r| !r.is_extended() || config.is_enabled(r.name(), r.code().as_str()))
            .filter(|r| !config.is_disabled(r.name(), r.code().as_str()))
            .collect();

        Self::from_rules(selected)
    }

    /// Add a rule. A rule whose name is already registered is skipped.
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        if self.get(rule.name()).is_some() {
            warn!("Rule '{}' is already registered, skipping", rule.name());
            return;
        }
        debug!("Registered rule {} ({})", rule.code(), rule.name());
        self.rules.push(rule);
    }

    /// The same registry without one rule.
    pub fn without(mut self, name: &str) -> Self {
        self.rules
            .retain(|r| r.name() != name && r.code().as_str() != name);
        self
    }

    /// Look up a rule by name or code.
    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.rules
            .iter()
            .find(|r| r.name() == name || r.code().as_str() == name)
            .map(|r| r.as_ref())
    }

    /// Registered rule names.
    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Registered rules.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule once against a chart.
    pub fn run(&self, ctx: &ChartContext) -> Vec<Finding> {
        self.rules
            .iter()
            .map(|rule| {
                let finding = rule.check(ctx);
                debug!(
                    "{} {}: {} smell(s) ({})",
                    ctx.root.display(),
                    finding.name,
                    finding.code_smells,
                    finding.details
                );
                finding
            })
            .collect()
    }
}
