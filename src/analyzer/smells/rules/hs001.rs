//! HS001: configmap_sensitive_values
//!
//! A ConfigMap must not carry passwords or tokens in plain text. Values
//! pulled from `.Values`, templated, empty, boolean or file-like values are
//! not counted.

use std::sync::LazyLock;

use regex::Regex;

use crate::analyzer::smells::rules::{ChartContext, Rule, SimpleRule};
use crate::analyzer::smells::surface::read_source;
use crate::analyzer::smells::types::{Finding, RuleCategory, Violation, join_violations};

const CODE: &str = "HS001";
const NAME: &str = "configmap_sensitive_values";
const DESCRIPTION: &str = "ConfigMaps must not contain passwords or tokens in plain text.";

static SENSITIVE_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*([A-Za-z0-9_-]*(password|token)[A-Za-z0-9_-]*)\s*:\s*(.*)$").unwrap()
});

static TEMPLATE_EXPR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{.*?\}\}").unwrap());

/// Key fragments that mark a reference to a secret rather than the secret.
const EXEMPT_KEY_PARTS: &[&str] = &["file", "url", "path"];

/// Value fragments that mark a flag or a file reference.
const EXEMPT_VALUE_PARTS: &[&str] = &["true", "false", "file"];

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, RuleCategory::Security, DESCRIPTION, check)
}

/// True when a `key: value` pair is a plain-text secret.
fn is_plaintext_secret(key: &str, value: &str) -> bool {
    let key_lower = key.to_lowercase();
    let value_lower = value.to_lowercase();

    if EXEMPT_KEY_PARTS.iter().any(|p| key_lower.contains(p)) {
        return false;
    }
    if value.contains(".Values") {
        return false;
    }
    if matches!(value, "" | "''" | "\"\"") {
        return false;
    }
    if EXEMPT_VALUE_PARTS.iter().any(|p| value_lower.contains(p)) {
        return false;
    }
    !TEMPLATE_EXPR.is_match(value)
}

/// Sensitive keys of one file, or nothing if it is not a ConfigMap.
fn scan(ctx: &ChartContext, path: &std::path::Path, content: &str) -> Vec<Violation> {
    if !content.lines().any(|l| l.contains("kind: ConfigMap")) {
        return Vec::new();
    }

    content
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let caps = SENSITIVE_KEY.captures(line)?;
            let key = caps.get(1)?.as_str();
            let value = caps.get(3).map(|m| m.as_str().trim()).unwrap_or_default();
            is_plaintext_secret(key, value).then(|| {
                Violation::at(
                    ctx.display_path(path),
                    i + 1,
                    format!("sensitive key '{}' set in plain text in a ConfigMap", key),
                )
            })
        })
        .collect()
}

fn check(ctx: &ChartContext) -> Finding {
    let violations: Vec<Violation> = ctx
        .yaml_files
        .iter()
        .filter_map(|path| read_source(path).map(|content| scan(ctx, path, &content)))
        .flatten()
        .collect();

    Finding::from_violations(
        NAME,
        &violations,
        "No plain-text sensitive values found in ConfigMaps.",
        |v| format!("{} plain-text secret(s) in ConfigMaps: {}", v.len(), join_violations(v)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::smells::rules::test_support::{chart, run};

    fn configmap(data: &str) -> String {
        format!(
            "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: app\ndata:\n{}",
            data
        )
    }

    #[test]
    fn test_plaintext_password_is_one_smell() {
        let dir = chart(&[("templates/cm.yaml", &configmap("  password: \"hunter2\"\n"))]);
        let finding = run(dir.path(), check);
        assert_eq!(finding.code_smells, 1);
        assert!(!finding.success);
        assert!(finding.details.contains("templates/cm.yaml:6"));
        assert!(finding.details.contains("'password'"));
    }

    #[test]
    fn test_values_reference_is_clean() {
        let dir = chart(&[(
            "templates/cm.yaml",
            &configmap("  password: {{ .Values.secret }}\n"),
        )]);
        let finding = run(dir.path(), check);
        assert_eq!(finding.code_smells, 0);
        assert!(finding.success);
    }

    #[test]
    fn test_exemptions() {
        let data = "  passwordFile: /etc/secret
  tokenUrl: https://auth
  token_path: /var/run
  password: \"\"
  token: ''
  password:
  usePassword: true
  tokenEnabled: False
  password: {{ template \"x\" . }}
";
        let dir = chart(&[("templates/cm.yaml", &configmap(data))]);
        assert_eq!(run(dir.path(), check).code_smells, 0);
    }

    #[test]
    fn test_case_insensitive_keys() {
        let data = "  DB_PASSWORD: s3cret\n  apiToken: abc123\n";
        let dir = chart(&[("templates/cm.yaml", &configmap(data))]);
        assert_eq!(run(dir.path(), check).code_smells, 2);
    }

    #[test]
    fn test_non_configmap_ignored() {
        let dir = chart(&[(
            "templates/secret.yaml",
            "apiVersion: v1\nkind: Secret\nstringData:\n  password: hunter2\n",
        )]);
        assert_eq!(run(dir.path(), check).code_smells, 0);
    }

    #[test]
    fn test_unreadable_file_skipped() {
        let dir = chart(&[("templates/cm.yaml", &configmap("  password: hunter2\n"))]);
        std::fs::write(dir.path().join("templates/bad.yaml"), [0xff, 0xfe]).unwrap();
        assert_eq!(run(dir.path(), check).code_smells, 1);
    }
}
