//! HS002: standard_labels
//!
//! Every manifest applies the recommended Helm labels, either through an
//! included labels helper or by setting all of them directly.

use std::sync::LazyLock;

use regex::Regex;

use crate::analyzer::smells::rules::{ChartContext, Rule, SimpleRule};
use crate::analyzer::smells::surface::{file_name, read_source};
use crate::analyzer::smells::types::{Finding, RuleCategory, Violation, join_violations};

const CODE: &str = "HS002";
const NAME: &str = "standard_labels";
const DESCRIPTION: &str =
    "Manifests must apply the recommended labels, directly or through a labels helper.";

/// Labels recommended by the Helm best practices guide.
pub const RECOMMENDED_LABELS: &[&str] = &[
    "app.kubernetes.io/name",
    "app.kubernetes.io/instance",
    "helm.sh/chart",
    "app.kubernetes.io/managed-by",
];

/// Chart files that are not manifests.
const NON_MANIFEST_FILES: &[&str] = &["Chart.yaml", "values.yaml"];

static LABELS_HELPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"include\s+"[^"]*labels""#).unwrap());

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, RuleCategory::Metadata, DESCRIPTION, check)
}

/// Recommended labels a manifest does not set directly.
fn missing_labels(content: &str) -> Vec<&'static str> {
    RECOMMENDED_LABELS
        .iter()
        .copied()
        .filter(|label| {
            !content.lines().any(|line| {
                line.trim()
                    .strip_prefix(*label)
                    .is_some_and(|rest| rest.starts_with(':'))
            })
        })
        .collect()
}

fn check(ctx: &ChartContext) -> Finding {
    let mut violations = Vec::new();

    for path in ctx.yaml_files {
        if NON_MANIFEST_FILES.contains(&file_name(path)) {
            continue;
        }
        let Some(content) = read_source(path) else {
            continue;
        };
        if LABELS_HELPER.is_match(&content) {
            continue;
        }

        let missing = missing_labels(&content);
        if !missing.is_empty() {
            violations.push(Violation::in_file(
                ctx.display_path(path),
                format!("missing {}", missing.join(", ")),
            ));
        }
    }

    Finding::from_violations(
        NAME,
        &violations,
        "All manifests apply the recommended labels (via helper or directly).",
        |v| format!("labels missing for {} files: {}", v.len(), join_violations(v)),
    )
}
