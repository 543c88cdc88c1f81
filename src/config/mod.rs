pub mod types;

use crate::error::{Result, SmellError};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

pub use types::{Config, RepositoryConfig};

const CONFIG_FILE_NAME: &str = ".helm-smells.toml";

/// Get the global config file path (~/.helm-smells.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Get the local config file path (workspace/.helm-smells.toml)
pub fn local_config_path(workspace: &Path) -> PathBuf {
    workspace.join(CONFIG_FILE_NAME)
}

/// Parse a configuration file.
pub fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| SmellError::io(path, e))?;
    toml::from_str(&content).map_err(|e| SmellError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load configuration.
///
/// An explicit file must parse. Otherwise the workspace file is tried, then
/// the global one; files that fail to parse there are logged and skipped.
pub fn load_config(explicit: Option<&Path>, workspace: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        debug!("Loading configuration from {}", path.display());
        return read_config(path);
    }

    let candidates = workspace
        .map(local_config_path)
        .into_iter()
        .chain(global_config_path());

    for path in candidates {
        if !path.is_file() {
            continue;
        }
        match read_config(&path) {
            Ok(config) => {
                debug!("Loaded configuration from {}", path.display());
                return Ok(config);
            }
            Err(e) => warn!("Ignoring configuration {}: {}", path.display(), e),
        }
    }

    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::smells::formatter::OutputFormat;
    use tempfile::TempDir;

    const FULL: &str = r#"
[rules]
extended = false
disabled = ["standard_labels"]
enabled = ["HS009"]

[analysis]
jobs = 2

[output]
format = "csv"

[[repositories]]
repository_folder = "repos/app"
chart_folder_path = "deploy/chart"

[[repositories]]
repository_folder = "/abs/other"
chart_folder_path = "."
months_range = 3
revisions = ["abc123"]
"#;

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(FULL).unwrap();
        assert_eq!(config.rules.disabled, vec!["standard_labels"]);
        assert_eq!(config.analysis.jobs, Some(2));
        assert_eq!(OutputFormat::from(config.output.format), OutputFormat::Csv);
        assert_eq!(config.repositories.len(), 2);
        assert_eq!(config.repositories[0].months_range, 6);
        assert_eq!(config.repositories[1].months_range, 3);
        assert_eq!(config.repositories[1].to_source().revisions, vec!["abc123"]);

        let smells = config.smell_config();
        assert!(smells.is_disabled("standard_labels", "HS002"));
        assert!(smells.is_enabled("count_tabs", "HS009"));
        assert_eq!(smells.jobs, Some(2));
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_explicit_invalid_config_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[output]\nformat = \"xml\"\n").unwrap();
        let err = load_config(Some(&path), None).unwrap_err();
        assert!(matches!(err, SmellError::Config { .. }));
    }

    #[test]
    fn test_local_config_wins() {
        let dir = TempDir::new().unwrap();
        fs::write(local_config_path(dir.path()), "[analysis]\njobs = 3\n").unwrap();
        let config = load_config(None, Some(dir.path())).unwrap();
        assert_eq!(config.analysis.jobs, Some(3));
    }

    #[test]
    fn test_invalid_local_config_falls_back() {
        let dir = TempDir::new().unwrap();
        fs::write(local_config_path(dir.path()), "[analysis]\njobs = \"many\"\n").unwrap();
        // skipped with a warning, not an error
        assert!(load_config(None, Some(dir.path())).is_ok());
    }
}
