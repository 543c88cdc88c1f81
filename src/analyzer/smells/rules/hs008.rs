//! HS008: include_indent_required
//!
//! An `include` that is alone on its line must pipe its output through
//! `indent N` or `nindent N`, otherwise the rendered YAML lands at the wrong
//! depth. Includes embedded in a longer line are not checked.

use std::sync::LazyLock;

use regex::Regex;

use crate::analyzer::smells::rules::{ChartContext, Rule, SimpleRule};
use crate::analyzer::smells::surface::{read_source, template_files};
use crate::analyzer::smells::types::{Finding, RuleCategory, Violation, join_violations};

const CODE: &str = "HS008";
const NAME: &str = "include_indent_required";
const DESCRIPTION: &str = "Standalone include calls must be piped through indent or nindent.";

static STANDALONE_INCLUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\{\{-?\s*include\s+"[^"]+"(.*?)-?\}\}$"#).unwrap());

static INDENT_FILTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\|\s*(nindent|indent)\s+\d+").unwrap());

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, RuleCategory::Template, DESCRIPTION, check)
}

/// Problem with a line, if it is a standalone include lacking indentation.
fn include_problem(line: &str) -> Option<&'static str> {
    let trimmed = line.trim();
    if !trimmed.contains("include") {
        return None;
    }
    let caps = STANDALONE_INCLUDE.captures(trimmed)?;
    let rest = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    // Several actions on one line: the include is not alone.
    if rest.contains("}}") || rest.contains("{{") {
        return None;
    }

    if !rest.contains('|') {
        Some("include without '| indent N' or '| nindent N'")
    } else if !INDENT_FILTER.is_match(rest) {
        Some("include piped without a valid indent/nindent")
    } else {
        None
    }
}

fn check(ctx: &ChartContext) -> Finding {
    let Some(files) = template_files(ctx.root) else {
        return Finding::not_applicable(NAME, "No templates/ directory found, check skipped.");
    };

    let mut violations = Vec::new();
    for path in &files {
        let Some(content) = read_source(path) else {
            continue;
        };
        for (i, line) in content.lines().enumerate() {
            if let Some(problem) = include_problem(line) {
                violations.push(Violation::at(ctx.display_path(path), i + 1, problem));
            }
        }
    }

    Finding::from_violations(NAME, &violations, "No violation detected.", |v| {
        format!("{} problem(s) found: {}", v.len(), join_violations(v))
    })
}
