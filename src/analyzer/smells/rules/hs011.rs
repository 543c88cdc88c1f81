//! HS011: chart_name_format
//!
//! Chart names must be lower case letters, digits and dashes.
//! See <https://helm.sh/docs/chart_best_practices/conventions/#chart-names>.

use std::fs;
use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::Value;

use crate::analyzer::smells::rules::{ChartContext, Rule, SimpleRule};
use crate::analyzer::smells::types::{Finding, RuleCategory};

const CODE: &str = "HS011";
const NAME: &str = "chart_name_format";
const DESCRIPTION: &str = "Chart names must match ^[a-z0-9-]+$.";

const CHART_FILE: &str = "Chart.yaml";

static VALID_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").unwrap());

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, RuleCategory::Metadata, DESCRIPTION, check).extended()
}

/// Problem with a Chart.yaml document's `name`, if any.
fn name_problem(content: &str) -> Option<String> {
    let doc = match serde_yaml::from_str::<Value>(content) {
        Ok(doc) => doc,
        Err(e) => return Some(format!("invalid YAML: {}", e)),
    };
    let Some(mapping) = doc.as_mapping() else {
        return Some("Chart.yaml is not a mapping".to_string());
    };

    match mapping.get("name").and_then(Value::as_str) {
        None | Some("") => Some("no chart name found".to_string()),
        Some(name) if !VALID_NAME.is_match(name) => {
            Some(format!("invalid chart name '{}'", name))
        }
        Some(_) => None,
    }
}

fn check(ctx: &ChartContext) -> Finding {
    let path = ctx.root.join(CHART_FILE);
    if !path.is_file() {
        return Finding::not_applicable(NAME, "No Chart.yaml found, check skipped.");
    }

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => return Finding::error(NAME, format!("Failed to read Chart.yaml: {}", e)),
    };

    match name_problem(&content) {
        Some(problem) => Finding::error(NAME, format!("Chart.yaml: {}", problem)),
        None => Finding::clean(NAME, "Chart name is valid."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::smells::rules::test_support::{chart, run};

    #[test]
    fn test_name_problem() {
        assert_eq!(name_problem("name: my-chart-2\n"), None);
        assert!(name_problem("name: MyChart\n").unwrap().contains("'MyChart'"));
        assert!(name_problem("name: my_chart\n").is_some());
        assert!(name_problem("version: 1.0.0\n").unwrap().contains("no chart name"));
        assert!(name_problem("name: \"\"\n").is_some());
        assert!(name_problem("- a\n- b\n").unwrap().contains("not a mapping"));
        assert!(name_problem("name: [unclosed\n").unwrap().contains("invalid YAML"));
    }

    #[test]
    fn test_invalid_name_is_one_smell() {
        let dir = chart(&[("Chart.yaml", "apiVersion: v2\nname: Web_App\n")]);
        let finding = run(dir.path(), check);
        assert_eq!(finding.code_smells, 1);
        assert!(!finding.success);
    }

    #[test]
    fn test_valid_name() {
        let dir = chart(&[("Chart.yaml", "apiVersion: v2\nname: web-app\n")]);
        assert!(run(dir.path(), check).success);
    }

    #[test]
    fn test_only_root_chart_yaml_counts() {
        let dir = chart(&[("charts/sub/Chart.yaml", "name: Bad_Name\n")]);
        let finding = run(dir.path(), check);
        assert!(finding.success);
        assert!(finding.details.contains("skipped"));
    }
}
