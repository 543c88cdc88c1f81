//! Chart aggregation.
//!
//! Ties the surface enumerator and the rule registry together: enumerate a
//! chart once, run every registered check against it, and sum the results
//! into a [`ChartReport`].

use std::path::Path;

use log::debug;

use crate::analyzer::smells::rules::{ChartContext, RuleRegistry};
use crate::analyzer::smells::surface::ChartSurface;
use crate::analyzer::smells::types::ChartReport;
use crate::error::Result;

/// Analyze one chart root with the given checks.
///
/// Fails only when the root is missing or not a directory. Analysis is
/// read-only, so running it twice on an unchanged chart gives the same
/// report.
pub fn analyze_chart(root: &Path, registry: &RuleRegistry) -> Result<ChartReport> {
    let surface = ChartSurface::discover(root)?;
    let ctx = ChartContext::new(&surface.root, &surface.yaml_files);
    let findings = registry.run(&ctx);

    let report = ChartReport::new(
        &surface.root,
        surface.total_lines,
        surface.total_files(),
        findings,
    );
    debug!(
        "{}: {} smell(s) over {} lines in {} files",
        report.chart_name, report.code_smells, report.total_lines, report.total_files
    );
    Ok(report)
}

/// Analyze one chart with the default checks.
pub fn analyze_chart_default(root: &Path) -> Result<ChartReport> {
    analyze_chart(root, &RuleRegistry::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::smells::rules::test_support::chart;
    use crate::error::SmellError;

    const CHART_YAML: &str = "apiVersion: v2
name: web
version: 1.0.0
dependencies:
  - name: redis
    version: 17.0.1
    repository: http://charts.example.com
";

    const HELPERS: &str = r#"{{- define "web.labels" -}}
app.kubernetes.io/name: web
{{- end }}
"#;

    const DEPLOYMENT: &str = r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
  labels:
    {{- include "web.labels" . | nindent 4 }}
spec:
  template:
    metadata:
      labels:
        app: web
"#;

    const SERVICE: &str = r#"apiVersion: v1
kind: Service
metadata:
  name: web
  labels:
    {{- include "web.labels" . | nindent 4 }}
spec:
  selector:
    app: web
"#;

    fn scenario_chart() -> tempfile::TempDir {
        chart(&[
            ("Chart.yaml", CHART_YAML),
            ("values.yaml", "replicaCount: 1\n"),
            ("templates/_helpers.tpl", HELPERS),
            ("templates/deployment.yaml", DEPLOYMENT),
            ("templates/service.yaml", SERVICE),
        ])
    }

    #[test]
    fn test_report_sums_findings() {
        let dir = scenario_chart();
        let report = analyze_chart_default(dir.path()).unwrap();

        assert_eq!(report.findings.len(), 8);
        // one pinned dependency, one http repository
        assert_eq!(report.smells_for("count_nonrange_versions"), 1);
        assert_eq!(report.smells_for("count_http_only_repositories"), 1);
        assert_eq!(report.code_smells, 2);
        assert_eq!(report.total_files, 4);
        assert_eq!(report.total_lines, 7 + 1 + 3 + 11 + 9);
        assert_eq!(
            report.code_smells,
            report.findings.iter().map(|f| f.code_smells).sum::<usize>()
        );
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let dir = scenario_chart();
        let first = analyze_chart_default(dir.path()).unwrap();
        let second = analyze_chart_default(dir.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_removing_a_check_drops_only_its_count() {
        let dir = scenario_chart();
        let full = analyze_chart_default(dir.path()).unwrap();
        let registry = RuleRegistry::default().without("count_nonrange_versions");
        let partial = analyze_chart(dir.path(), &registry).unwrap();

        assert_eq!(
            partial.code_smells,
            full.code_smells - full.smells_for("count_nonrange_versions")
        );
        assert_eq!(partial.total_lines, full.total_lines);
    }

    #[test]
    fn test_empty_chart() {
        let dir = tempfile::TempDir::new().unwrap();
        let report = analyze_chart_default(dir.path()).unwrap();
        // no workloads and no helper file
        assert_eq!(report.code_smells, 2);
        assert_eq!(report.smells_for("selector_mismatch"), 1);
        assert_eq!(report.smells_for("has_helper_file"), 1);
        assert_eq!(report.total_lines, 0);
        assert_eq!(report.ratio(), 0.0);
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let err = analyze_chart_default(Path::new("/nonexistent/helm/chart")).unwrap_err();
        assert!(matches!(err, SmellError::MissingPath(_)));
    }

    #[test]
    fn test_every_finding_keeps_success_invariant() {
        let dir = chart(&[
            ("Chart.yaml", "dependencies: [unclosed\n"),
            ("templates/cm.yaml", "kind: ConfigMap\ndata:\n  db_password: hunter2\n"),
        ]);
        let report = analyze_chart(dir.path(), &RuleRegistry::with_extended()).unwrap();
        assert_eq!(report.findings.len(), 11);
        for finding in &report.findings {
            assert_eq!(finding.success, finding.code_smells == 0, "{}", finding.name);
        }
        assert_eq!(report.smells_for("count_nonrange_versions"), 1);
        assert_eq!(report.smells_for("configmap_sensitive_values"), 1);
    }
}
