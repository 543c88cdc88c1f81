//! HS005: count_nonrange_versions
//!
//! Chart dependencies should be pinned to version ranges, never to one exact
//! version. See <https://helm.sh/docs/chart_best_practices/dependencies#versions>.

use std::fs;

use serde_yaml::Value;

use crate::analyzer::smells::rules::{ChartContext, Rule, SimpleRule};
use crate::analyzer::smells::types::{Finding, RuleCategory};

const CODE: &str = "HS005";
const NAME: &str = "count_nonrange_versions";
const DESCRIPTION: &str = "Chart dependencies must use version ranges.";

/// Markers of a version range.
const RANGE_INDICATORS: &[&str] = &["~", "^", ">=", "<=", "*"];

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, RuleCategory::Dependencies, DESCRIPTION, check)
}

/// True when a version string pins one exact version.
pub fn is_nonrange_version(version: &str) -> bool {
    !RANGE_INDICATORS.iter().any(|i| version.contains(i))
}

fn version_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Pinned dependency versions declared by a Chart.yaml document.
fn count_pinned(doc: &Value) -> usize {
    let Some(dependencies) = doc.get("dependencies").and_then(Value::as_sequence) else {
        return 0;
    };

    dependencies
        .iter()
        .filter_map(|dep| dep.get("version"))
        .filter_map(version_string)
        .filter(|v| is_nonrange_version(v))
        .count()
}

fn check(ctx: &ChartContext) -> Finding {
    let mut pinned = 0;
    let mut total_lines = 0;

    for path in ctx.yaml_files {
        let display = ctx.display_path(path);
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                return Finding::error(NAME, format!("Failed to read {}: {}", display.display(), e));
            }
        };
        total_lines += content.lines().count();

        if !path.to_string_lossy().contains("Chart.yaml") {
            continue;
        }

        match serde_yaml::from_str::<Value>(&content) {
            Ok(doc) => pinned += count_pinned(&doc),
            Err(e) => {
                return Finding::error(NAME, format!("Failed to parse {}: {}", display.display(), e));
            }
        }
    }

    Finding::with_count(
        NAME,
        pinned,
        format!("{} / {} lines declare non-range dependency versions.", pinned, total_lines),
    )
}
