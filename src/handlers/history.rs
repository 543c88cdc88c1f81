use crate::analyzer::history::{
    HistorySource, RevisionReport, TimeSeries, analyze_history, format_revisions, format_trends,
};
use crate::analyzer::smells::formatter::{self, OutputFormat};
use crate::analyzer::smells::rules::RuleRegistry;
use crate::cli::RuleArgs;
use crate::config::Config;
use crate::error::SmellError;
use crate::handlers::{build_registry, smell_config};
use log::{error, info};
use std::path::PathBuf;

/// Arguments of `helm-smells history`.
#[derive(Debug, Clone, Default)]
pub struct HistoryOptions {
    pub repository: Option<PathBuf>,
    pub chart: Option<PathBuf>,
    pub months: Option<u32>,
    pub revisions: Vec<String>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub trends: bool,
    pub rules: RuleArgs,
}

/// Charts to follow: the command line repository, else the configured ones.
pub fn history_sources(config: &Config, options: &HistoryOptions) -> crate::Result<Vec<HistorySource>> {
    let mut sources = match &options.repository {
        Some(repository) => vec![HistorySource::new(
            repository,
            options.chart.clone().unwrap_or_else(|| PathBuf::from(".")),
        )],
        None => config.repositories.iter().map(|r| r.to_source()).collect(),
    };

    if sources.is_empty() {
        return Err(SmellError::InvalidArgument(
            "no repository given and none configured under [[repositories]]".to_string(),
        ));
    }

    for source in &mut sources {
        if let Some(months) = options.months {
            source.months_range = months;
        }
        if !options.revisions.is_empty() {
            source.revisions = options.revisions.clone();
        }
    }
    Ok(sources)
}

/// Analyze each source in turn.
///
/// A source that fails (missing repository, git error) is logged and
/// skipped. Fails only when every source failed.
pub fn analyze_sources(
    sources: Vec<HistorySource>,
    registry: &RuleRegistry,
) -> crate::Result<Vec<(HistorySource, Vec<RevisionReport>)>> {
    let mut results = Vec::new();
    let mut last_error = None;
    for source in sources {
        match analyze_history(&source, registry) {
            Ok(revisions) => results.push((source, revisions)),
            Err(e) => {
                error!(
                    "Failed to analyze {} in {}: {}",
                    source.chart_path.display(),
                    source.repository.display(),
                    e
                );
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) if results.is_empty() => Err(e),
        _ => Ok(results),
    }
}

pub fn handle_history(config: &Config, options: HistoryOptions) -> crate::Result<()> {
    let registry = build_registry(config, &options.rules);
    let format = options
        .format
        .unwrap_or_else(|| config.output.format.into());
    let sources = history_sources(config, &options)?;

    let run = || analyze_sources(sources, &registry);
    let results = match smell_config(config, &options.rules).jobs {
        Some(jobs) => rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .map_err(|e| SmellError::InvalidArgument(format!("cannot start {} workers: {}", jobs, e)))?
            .install(run)?,
        None => run()?,
    };

    let all: Vec<RevisionReport> = results
        .iter()
        .flat_map(|(_, revisions)| revisions.iter().cloned())
        .collect();
    let mut rendered = format_revisions(&all, format)?;

    if options.trends {
        let mut trends = String::new();
        for (source, revisions) in &results {
            trends.push_str(&format!(
                "\n{} / {}\n",
                source.repository.display(),
                source.chart_path.display()
            ));
            trends.push_str(&format_trends(&TimeSeries::from_revisions(revisions).trends()));
        }
        // keep machine-readable output parseable
        if format == OutputFormat::Table {
            rendered.push_str(&trends);
        } else {
            eprint!("{}", trends);
        }
    }

    formatter::emit(&rendered, options.output.as_deref())?;
    info!("{} revision(s) analyzed", all.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::history::git::{self, test_support::{commit, init}};
    use crate::config::RepositoryConfig;
    use tempfile::TempDir;

    #[test]
    fn test_sources_from_command_line() {
        let options = HistoryOptions {
            repository: Some(PathBuf::from("/repo")),
            months: Some(3),
            ..Default::default()
        };
        let sources = history_sources(&Config::default(), &options).unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].chart_path, PathBuf::from("."));
        assert_eq!(sources[0].months_range, 3);
    }

    #[test]
    fn test_sources_from_config() {
        let mut config = Config::default();
        config.repositories.push(RepositoryConfig {
            repository_folder: PathBuf::from("/repo"),
            chart_folder_path: PathBuf::from("deploy/web"),
            months_range: 4,
            revisions: vec![],
        });
        let options = HistoryOptions {
            revisions: vec!["abc".to_string()],
            ..Default::default()
        };
        let sources = history_sources(&config, &options).unwrap();
        assert_eq!(sources[0].months_range, 4);
        assert_eq!(sources[0].revisions, vec!["abc"]);
    }

    #[test]
    fn test_failing_source_does_not_stop_the_others() {
        if !git::is_available() {
            return;
        }
        let repo = TempDir::new().unwrap();
        init(repo.path());
        commit(repo.path(), "2023-01-01T00:00:00+00:00", &[("web/Chart.yaml", "name: web\n")]);

        let sources = vec![
            HistorySource::new("/nonexistent/repository", "web"),
            HistorySource::new(repo.path(), "web"),
        ];
        let results = analyze_sources(sources, &RuleRegistry::default()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0.repository, repo.path());
        assert_eq!(results[0].1.len(), 1);
    }

    #[test]
    fn test_all_sources_failing_is_error() {
        let sources = vec![
            HistorySource::new("/nonexistent/first", "."),
            HistorySource::new("/nonexistent/second", "."),
        ];
        let err = analyze_sources(sources, &RuleRegistry::default()).unwrap_err();
        assert!(matches!(err, SmellError::MissingPath(_)));
    }

    #[test]
    fn test_no_sources_is_error() {
        let err = history_sources(&Config::default(), &HistoryOptions::default()).unwrap_err();
        assert!(matches!(err, SmellError::InvalidArgument(_)));
    }
}
