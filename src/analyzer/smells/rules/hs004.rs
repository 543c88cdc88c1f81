//! HS004: count_http_only_repositories
//!
//! Repositories must be reached over HTTPS. Every line mentioning a
//! repository together with an `http://` URL counts once.

use std::fs;

use crate::analyzer::smells::rules::{ChartContext, Rule, SimpleRule};
use crate::analyzer::smells::types::{Finding, RuleCategory};

const CODE: &str = "HS004";
const NAME: &str = "count_http_only_repositories";
const DESCRIPTION: &str = "Repositories must not be referenced over plain HTTP.";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, RuleCategory::Security, DESCRIPTION, check)
}

fn is_http_repository(line: &str) -> bool {
    line.contains("http://") && line.contains("repository")
}

fn check(ctx: &ChartContext) -> Finding {
    let mut http_lines = 0;
    let mut total_lines = 0;

    for path in ctx.yaml_files {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                return Finding::error(
                    NAME,
                    format!("Failed to read {}: {}", ctx.display_path(path).display(), e),
                );
            }
        };
        total_lines += content.lines().count();
        http_lines += content.lines().filter(|l| is_http_repository(l)).count();
    }

    Finding::with_count(
        NAME,
        http_lines,
        format!(
            "{} / {} lines reference HTTP-only repositories.",
            http_lines, total_lines
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::smells::rules::test_support::{chart, run};

    #[test]
    fn test_counts_http_repository_lines() {
        let chart_yaml = "apiVersion: v2
name: web
dependencies:
  - name: redis
    repository: http://charts.example.com
  - name: pg
    repository: https://charts.example.com
";
        let values = "image:\n  repository: http://registry.local/web\nhomepage: http://example.com\n";
        let dir = chart(&[("Chart.yaml", chart_yaml), ("values.yaml", values)]);
        let finding = run(dir.path(), check);
        assert_eq!(finding.code_smells, 2);
        assert!(!finding.success);
        assert!(finding.details.starts_with("2 / 10 lines"));
    }

    #[test]
    fn test_https_only_is_clean() {
        let dir = chart(&[("Chart.yaml", "dependencies:\n  - repository: https://x\n")]);
        let finding = run(dir.path(), check);
        assert_eq!(finding.code_smells, 0);
        assert!(finding.success);
    }

    #[test]
    fn test_unreadable_file_fails_check() {
        let dir = chart(&[("Chart.yaml", "name: x\n")]);
        std::fs::write(dir.path().join("values.yaml"), [0xff, 0xfe]).unwrap();
        let finding = run(dir.path(), check);
        assert!(!finding.success);
        assert_eq!(finding.code_smells, 1);
        assert!(finding.details.contains("values.yaml"));
    }
}
