//! HS009: count_tabs
//!
//! YAML forbids tabs for indentation; every line holding one counts.

use std::fs;

use crate::analyzer::smells::rules::{ChartContext, Rule, SimpleRule};
use crate::analyzer::smells::types::{Finding, RuleCategory};

const CODE: &str = "HS009";
const NAME: &str = "count_tabs";
const DESCRIPTION: &str = "YAML files must not contain tab characters.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, RuleCategory::Style, DESCRIPTION, check).extended()
}

fn check(ctx: &ChartContext) -> Finding {
    let mut tab_lines = 0;
    let mut total_lines = 0;

    for path in ctx.yaml_files {
        match fs::read_to_string(path) {
            Ok(content) => {
                total_lines += content.lines().count();
                tab_lines += content.lines().filter(|l| l.contains('\t')).count();
            }
            Err(e) => {
                return Finding::error(
                    NAME,
                    format!("Failed to read {}: {}", ctx.display_path(path).display(), e),
                );
            }
        }
    }

    Finding::with_count(
        NAME,
        tab_lines,
        format!("{} / {} lines contain a tab.", tab_lines, total_lines),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::smells::rules::test_support::{chart, run};

    #[test]
    fn test_counts_tab_lines() {
        let dir = chart(&[("values.yaml", "a:\n\tb: 1\nc: \"x\ty\"\nd: 2\n")]);
        let finding = run(dir.path(), check);
        assert_eq!(finding.code_smells, 2);
        assert_eq!(finding.details, "2 / 4 lines contain a tab.");
    }

    #[test]
    fn test_no_tabs() {
        let dir = chart(&[("values.yaml", "a:\n  b: 1\n")]);
        assert!(run(dir.path(), check).success);
    }

    #[test]
    fn test_is_extended() {
        assert!(rule().is_extended());
    }
}
