//! HS003: selector_mismatch
//!
//! Every `key: value` in a Service selector must match the labels of some
//! Pod or Deployment of the chart. A chart without any workload labels is
//! itself reported as one smell.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use crate::analyzer::smells::block::{find_block, find_path};
use crate::analyzer::smells::rules::{ChartContext, Rule, SimpleRule};
use crate::analyzer::smells::surface::read_source;
use crate::analyzer::smells::types::{Finding, RuleCategory, Violation, join_violations};

const CODE: &str = "HS003";
const NAME: &str = "selector_mismatch";
const DESCRIPTION: &str = "Service selectors must match the labels of a Pod or Deployment.";

static KIND_SERVICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^kind:\s*Service\s*$").unwrap());
static API_V1: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^apiVersion:\s*v1\s*$").unwrap());
static KIND_POD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^kind:\s*Pod\s*$").unwrap());
static KIND_DEPLOYMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^kind:\s*Deployment\s*$").unwrap());
static API_MONITORING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^apiVersion:\s*monitoring\.coreos\.com").unwrap());
static KIND_CRD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^kind:\s*CustomResourceDefinition").unwrap());

/// Where a workload keeps its pod labels.
const DEPLOYMENT_LABELS: &[&str] = &["spec", "template", "metadata", "labels"];
const POD_LABELS: &[&str] = &["metadata", "labels"];

type Labels = BTreeMap<String, String>;

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, RuleCategory::Metadata, DESCRIPTION, check)
}

/// Monitoring resources and CRDs carry selectors of their own.
fn is_excluded(text: &str) -> bool {
    text.contains("ServiceMonitor")
        || text.contains("PodMonitor")
        || API_MONITORING.is_match(text)
        || KIND_CRD.is_match(text)
}

fn service_selector(text: &str) -> Option<Labels> {
    if !(KIND_SERVICE.is_match(text) && API_V1.is_match(text)) {
        return None;
    }
    let lines: Vec<&str> = text.lines().collect();
    let selector = find_block(&lines, "selector")?.pairs();
    (!selector.is_empty()).then_some(selector)
}

fn workload_labels(text: &str) -> Vec<Labels> {
    let lines: Vec<&str> = text.lines().collect();
    let mut found = Vec::new();

    if KIND_DEPLOYMENT.is_match(text)
        && let Some(block) = find_path(&lines, DEPLOYMENT_LABELS)
    {
        found.push(block.pairs());
    }
    if KIND_POD.is_match(text)
        && let Some(block) = find_path(&lines, POD_LABELS)
    {
        found.push(block.pairs());
    }

    found.retain(|labels| !labels.is_empty());
    found
}

fn check(ctx: &ChartContext) -> Finding {
    let mut selectors: Vec<(PathBuf, Labels)> = Vec::new();
    let mut workloads: Vec<Labels> = Vec::new();

    for path in ctx.yaml_files {
        let Some(text) = read_source(path) else {
            continue;
        };
        if is_excluded(&text) {
            continue;
        }
        if let Some(selector) = service_selector(&text) {
            selectors.push((ctx.display_path(path), selector));
        }
        workloads.extend(workload_labels(&text));
    }

    if workloads.is_empty() {
        return Finding::with_count(NAME, 1, "No Pod/Deployment found in the chart.");
    }

    let mut violations = Vec::new();
    for (path, selector) in &selectors {
        for (key, value) in selector {
            let matched = workloads
                .iter()
                .any(|labels| labels.get(key) == Some(value));
            if !matched {
                violations.push(Violation::in_file(
                    path,
                    format!("selector {}: {} matches no Pod/Deployment", key, value),
                ));
            }
        }
    }

    Finding::from_violations(NAME, &violations, "No selector mismatch detected.", join_violations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::smells::rules::test_support::{chart, run};

    const DEPLOYMENT: &str = "apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
spec:
  selector:
    matchLabels:
      app: web
  template:
    metadata:
      labels:
        app: web
        tier: frontend
    spec:
      containers:
        - name: web
";

    fn service(selector: &str) -> String {
        format!(
            "apiVersion: v1\nkind: Service\nmetadata:\n  name: web\nspec:\n  selector:\n{}  ports:\n    - port: 80\n",
            selector
        )
    }

    #[test]
    fn test_matching_selector_is_clean() {
        let dir = chart(&[
            ("templates/deployment.yaml", DEPLOYMENT),
            ("templates/service.yaml", &service("    app: web\n    tier: frontend\n")),
        ]);
        let finding = run(dir.path(), check);
        assert_eq!(finding.code_smells, 0);
        assert!(finding.success);
    }

    #[test]
    fn test_unmatched_selector_counts_per_pair() {
        let dir = chart(&[
            ("templates/deployment.yaml", DEPLOYMENT),
            ("templates/service.yaml", &service("    app: foo\n    tier: frontend\n")),
        ]);
        let finding = run(dir.path(), check);
        assert_eq!(finding.code_smells, 1);
        assert!(finding.details.contains("selector app: foo"));
    }

    #[test]
    fn test_flow_selector_without_match() {
        let svc = "apiVersion: v1\nkind: Service\nspec:\n  selector: {app: foo}\n";
        let dir = chart(&[
            ("templates/deployment.yaml", DEPLOYMENT),
            ("templates/service.yaml", svc),
        ]);
        assert_eq!(run(dir.path(), check).code_smells, 1);
    }

    #[test]
    fn test_no_workloads_is_one_smell() {
        let dir = chart(&[("templates/service.yaml", &service("    app: a\n    b: c\n"))]);
        let finding = run(dir.path(), check);
        assert_eq!(finding.code_smells, 1);
        assert!(!finding.success);
        assert!(finding.details.contains("No Pod/Deployment"));
    }

    #[test]
    fn test_pod_metadata_labels() {
        let pod = "apiVersion: v1\nkind: Pod\nmetadata:\n  name: job\n  labels:\n    app: batch\nspec:\n  containers: []\n";
        let dir = chart(&[
            ("templates/pod.yaml", pod),
            ("templates/service.yaml", &service("    app: batch\n")),
        ]);
        assert_eq!(run(dir.path(), check).code_smells, 0);
    }

    #[test]
    fn test_deployment_metadata_labels_not_used() {
        let deployment = "apiVersion: apps/v1
kind: Deployment
metadata:
  labels:
    app: outer
spec:
  template:
    metadata:
      labels:
        app: inner
";
        let dir = chart(&[
            ("templates/deployment.yaml", deployment),
            ("templates/service.yaml", &service("    app: outer\n")),
        ]);
        assert_eq!(run(dir.path(), check).code_smells, 1);
    }

    #[test]
    fn test_service_monitor_ignored() {
        let monitor = "apiVersion: monitoring.coreos.com/v1\nkind: ServiceMonitor\nspec:\n  selector:\n    app: nothing\n";
        let dir = chart(&[
            ("templates/deployment.yaml", DEPLOYMENT),
            ("templates/monitor.yaml", monitor),
        ]);
        assert_eq!(run(dir.path(), check).code_smells, 0);
    }

    #[test]
    fn test_non_v1_service_ignored() {
        let svc = "apiVersion: serving.knative.dev/v1\nkind: Service\nspec:\n  selector:\n    app: none\n";
        let dir = chart(&[
            ("templates/deployment.yaml", DEPLOYMENT),
            ("templates/ksvc.yaml", svc),
        ]);
        assert_eq!(run(dir.path(), check).code_smells, 0);
    }
}
