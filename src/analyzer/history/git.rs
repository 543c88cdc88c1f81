//! Thin wrapper over the `git` command line.
//!
//! Every command runs with `git -C <repo>`; nothing here changes the
//! process working directory or the repository's HEAD, index or working
//! tree.

use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, FixedOffset};
use log::{debug, warn};

use crate::error::{Result, SmellError};

/// Format of `git log --date=iso` dates.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Index file used for checkouts, kept out of the repository's own.
const PRIVATE_INDEX: &str = "index";

/// A commit of the analyzed repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub sha: String,
    pub date: DateTime<FixedOffset>,
}

impl Commit {
    /// Abbreviated hash for display.
    pub fn short_sha(&self) -> &str {
        short_sha(&self.sha)
    }
}

/// First eight characters of a hash.
pub fn short_sha(sha: &str) -> &str {
    sha.get(..8).unwrap_or(sha)
}

fn git(repo: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.arg("-C").arg(repo);
    cmd
}

/// Run a git command, returning stdout on success.
fn run(mut cmd: Command, description: &str) -> Result<String> {
    debug!("Running git {}", description);
    let output = cmd.output().map_err(|e| SmellError::Git {
        command: description.to_string(),
        stderr: e.to_string(),
    })?;

    if !output.status.success() {
        return Err(SmellError::Git {
            command: description.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// True when a `git` executable can be run.
pub fn is_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Parse one `<sha> <iso date>` line of `git log`.
pub fn parse_log_line(line: &str) -> Result<Commit> {
    let (sha, date) = line
        .trim()
        .split_once(' ')
        .ok_or_else(|| SmellError::InvalidDate(line.to_string()))?;
    let date = DateTime::parse_from_str(date.trim(), ISO_DATE_FORMAT)
        .map_err(|e| SmellError::InvalidDate(format!("{}: {}", date, e)))?;

    Ok(Commit {
        sha: sha.to_string(),
        date,
    })
}

/// Commits reachable from HEAD, oldest first.
pub fn list_commits(repo: &Path) -> Result<Vec<Commit>> {
    if !repo.is_dir() {
        return Err(SmellError::MissingPath(repo.to_path_buf()));
    }

    let mut cmd = git(repo);
    cmd.args(["log", "--reverse", "--format=%H %ad", "--date=iso"]);
    let stdout = run(cmd, "log")?;

    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_log_line)
        .collect()
}

/// `<sha>:<path>` object name, the commit's root tree for an empty path.
fn object_name(sha: &str, path: &Path) -> String {
    let path = path.to_string_lossy();
    let path = path.trim_matches('/');
    if path.is_empty() || path == "." {
        format!("{}^{{tree}}", sha)
    } else {
        format!("{}:{}", sha, path)
    }
}

/// True when `path` exists in the tree of `sha`.
pub fn path_exists_at(repo: &Path, sha: &str, path: &Path) -> bool {
    git(repo)
        .args(["cat-file", "-e"])
        .arg(object_name(sha, path))
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Check the chart subtree of `sha` out into `dest`.
///
/// Returns the chart root inside `dest`, or `None` when the chart does not
/// exist at that revision. A private index file is used so the repository
/// itself is never touched.
pub fn materialize(repo: &Path, sha: &str, chart_path: &Path, dest: &Path) -> Result<Option<PathBuf>> {
    if !path_exists_at(repo, sha, chart_path) {
        debug!("{} does not exist at {}", chart_path.display(), sha);
        return Ok(None);
    }

    let index_dir = tempfile::tempdir().map_err(|e| SmellError::io(dest, e))?;
    let mut cmd = git(repo);
    cmd.env("GIT_INDEX_FILE", index_dir.path().join(PRIVATE_INDEX))
        .arg("--work-tree")
        .arg(dest)
        .args(["checkout", sha, "--"])
        .arg(pathspec(chart_path));
    run(cmd, &format!("checkout {}", sha))?;

    let root = dest.join(chart_path);
    if !root.is_dir() {
        warn!("Checkout of {} produced no directory at {}", sha, root.display());
        return Ok(None);
    }
    Ok(Some(root))
}

fn pathspec(chart_path: &Path) -> String {
    let path = chart_path.to_string_lossy();
    let path = path.trim_matches('/');
    if path.is_empty() { ".".to_string() } else { path.to_string() }
}


#[cfg(test)]
mod tests {
    use super::test_support::{commit, init};
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_log_line() {
        let commit = parse_log_line("abc123 2024-03-05 14:22:01 +0100").unwrap();
        assert_eq!(commit.sha, "abc123");
        assert_eq!(commit.date.to_rfc3339(), "2024-03-05T14:22:01+01:00");
        assert!(parse_log_line("abc123").is_err());
        assert!(parse_log_line("abc123 yesterday").is_err());
    }

    #[test]
    fn test_object_name() {
        assert_eq!(object_name("abc", Path::new("charts/web")), "abc:charts/web");
        assert_eq!(object_name("abc", Path::new(".")), "abc^{tree}");
        assert_eq!(object_name("abc", Path::new("")), "abc^{tree}");
    }

    #[test]
    fn test_list_commits_missing_repo() {
        assert!(list_commits(Path::new("/nonexistent/repo")).is_err());
    }

    #[test]
    fn test_list_and_materialize() {
        if !is_available() {
            return;
        }
        let repo = TempDir::new().unwrap();
        init(repo.path());
        commit(repo.path(), "2023-01-10T10:00:00+00:00", &[("README.md", "hi\n")]);
        commit(
            repo.path(),
            "2023-03-10T10:00:00+00:00",
            &[("charts/web/Chart.yaml", "name: web\n")],
        );
        fs::write(repo.path().join("charts/web/Chart.yaml"), "name: dirty\n").unwrap();

        let commits = list_commits(repo.path()).unwrap();
        assert_eq!(commits.len(), 2);
        assert!(commits[0].date < commits[1].date);

        let chart = Path::new("charts/web");
        let dest = TempDir::new().unwrap();
        assert_eq!(materialize(repo.path(), &commits[0].sha, chart, dest.path()).unwrap(), None);

        let dest = TempDir::new().unwrap();
        let root = materialize(repo.path(), &commits[1].sha, chart, dest.path())
            .unwrap()
            .unwrap();
        assert_eq!(fs::read_to_string(root.join("Chart.yaml")).unwrap(), "name: web\n");
        // working tree untouched
        assert_eq!(
            fs::read_to_string(repo.path().join("charts/web/Chart.yaml")).unwrap(),
            "name: dirty\n"
        );
    }
}
