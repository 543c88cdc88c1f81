//! HS006: namespaced_template_definitions
//!
//! Template names are global across a chart and its subcharts, so each
//! `define` must be prefixed with the chart name (`mychart.fullname`).

use std::fs;
use std::sync::LazyLock;

use regex::Regex;

use crate::analyzer::smells::rules::{ChartContext, Rule, SimpleRule};
use crate::analyzer::smells::surface::template_files;
use crate::analyzer::smells::types::{Finding, RuleCategory, Violation, join_violations};

const CODE: &str = "HS006";
const NAME: &str = "namespaced_template_definitions";
const DESCRIPTION: &str = "Template definitions must be namespaced (e.g. chart.name).";

static DEFINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\{\{-\s*define\s+"([^"]+)"\s*\}"#).unwrap());

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, RuleCategory::Template, DESCRIPTION, check)
}

fn check(ctx: &ChartContext) -> Finding {
    let Some(files) = template_files(ctx.root) else {
        return Finding::not_applicable(NAME, "No templates/ directory found, check skipped.");
    };

    let mut violations = Vec::new();
    for path in &files {
        let display = ctx.display_path(path);
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                violations.push(Violation::in_file(&display, format!("failed to read: {}", e)));
                continue;
            }
        };

        for (i, line) in content.lines().enumerate() {
            let Some(name) = DEFINE.captures(line).and_then(|c| c.get(1)) else {
                continue;
            };
            if !name.as_str().contains('.') {
                violations.push(Violation::at(
                    &display,
                    i + 1,
                    format!("template '{}' is not namespaced", name.as_str()),
                ));
            }
        }
    }

    Finding::from_violations(
        NAME,
        &violations,
        "All template definitions are namespaced.",
        |v| format!("{} non-namespaced definition(s): {}", v.len(), join_violations(v)),
    )
}
