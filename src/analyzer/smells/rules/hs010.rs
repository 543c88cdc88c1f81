//! HS010: count_embedded_objects
//!
//! Helm recommends flat values. Each top-level key of `values.yaml` that
//! opens a nested object counts once.

use std::path::PathBuf;

use crate::analyzer::smells::rules::{ChartContext, Rule, SimpleRule};
use crate::analyzer::smells::surface::{file_name, read_source};
use crate::analyzer::smells::types::{Finding, RuleCategory};

const CODE: &str = "HS010";
const NAME: &str = "count_embedded_objects";
const DESCRIPTION: &str = "values.yaml should prefer flat keys over nested objects.";

const VALUES_FILE: &str = "values.yaml";

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, RuleCategory::Style, DESCRIPTION, check).extended()
}

/// Top-level keys followed by indented, non-comment content.
pub fn count_embedded_objects(content: &str) -> usize {
    let lines: Vec<&str> = content.lines().collect();
    let mut embedded = 0;

    for (i, line) in lines.iter().enumerate() {
        let stripped = line.trim_start();
        if stripped.is_empty() || stripped.starts_with('#') {
            continue;
        }
        let top_level = !line.starts_with(' ') && !line.starts_with('\t');
        if !top_level || !line.contains(':') || stripped.starts_with('-') {
            continue;
        }

        for next in &lines[i + 1..] {
            let next_stripped = next.trim_start();
            if next_stripped.is_empty() {
                continue;
            }
            if next.len() == next_stripped.len() {
                break;
            }
            if next_stripped.starts_with('#') {
                continue;
            }
            embedded += 1;
            break;
        }
    }

    embedded
}

/// The root `values.yaml`, else the first file whose name ends with it.
fn values_file<'a>(ctx: &ChartContext<'a>) -> Option<&'a PathBuf> {
    let own = ctx.root.join(VALUES_FILE);
    ctx.yaml_files
        .iter()
        .find(|p| **p == own)
        .or_else(|| ctx.yaml_files.iter().find(|p| file_name(p).ends_with(VALUES_FILE)))
}

fn check(ctx: &ChartContext) -> Finding {
    let values = values_file(ctx);

    let (embedded, total_lines, file) = match values.and_then(|p| read_source(p).map(|c| (p, c))) {
        Some((path, content)) => (
            count_embedded_objects(&content),
            content.lines().count(),
            Some(ctx.display_path(path)),
        ),
        None => (0, 0, None),
    };

    let mut details = format!(
        "{} embedded object(s) / {} YAML lines analysed",
        embedded, total_lines
    );
    if let Some(file) = file.filter(|_| embedded > 0) {
        details.push_str(&format!(" - {}: {} embedded object(s)", file.display(), embedded));
    }

    Finding::with_count(NAME, embedded, details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::smells::rules::test_support::{chart, run};

    const VALUES: &str = "replicaCount: 1
image:
  repository: nginx
  tag: latest

# comment only
service:
  # inner comment
  port: 80
list:
- a
- b
empty:

flat: true
";

    #[test]
    fn test_count_embedded_objects() {
        assert_eq!(count_embedded_objects(VALUES), 2);
        assert_eq!(count_embedded_objects(""), 0);
        assert_eq!(count_embedded_objects("a:\n  # only a comment\nb: 1\n"), 0);
    }

    #[test]
    fn test_only_values_yaml_is_checked() {
        let dir = chart(&[
            ("templates/cm.yaml", "data:\n  a: b\n"),
            ("values.yaml", VALUES),
        ]);
        let finding = run(dir.path(), check);
        assert_eq!(finding.code_smells, 2);
        assert!(finding.details.contains("values.yaml: 2"));
    }

    #[test]
    fn test_root_values_preferred_over_subchart() {
        let dir = chart(&[
            ("values.yaml", "image:\n  tag: latest\nservice:\n  port: 80\n"),
            ("charts/redis/values.yaml", "flat: 1\n"),
        ]);
        let finding = run(dir.path(), check);
        assert_eq!(finding.code_smells, 2);
        assert!(finding.details.contains("/ 4 YAML lines"));
    }

    #[test]
    fn test_suffixed_values_file_qualifies() {
        let dir = chart(&[("prod-values.yaml", "resources:\n  limits: {}\n")]);
        let finding = run(dir.path(), check);
        assert_eq!(finding.code_smells, 1);
        assert!(finding.details.contains("prod-values.yaml: 1"));
    }

    #[test]
    fn test_no_values_file() {
        let dir = chart(&[("Chart.yaml", "name: x\n")]);
        let finding = run(dir.path(), check);
        assert!(finding.success);
        assert_eq!(finding.details, "0 embedded object(s) / 0 YAML lines analysed");
    }
}
